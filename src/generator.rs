//! Random puzzle generation.
//!
//! Generation seeds every cell with one random link, then repeats a repair pass until nothing changes:
//! cells grow into unlinked neighbours ([`extend`](Board::extend)), zig-zags that could be straightened are cut
//! ([`validate`](Board::validate)), and strands of one path running alongside each other are split
//! ([`remove_overlap`](Board::remove_overlap)). The ends of the surviving chains become the numbered pairs.
//!
//! The repair loop is a heuristic without a termination proof, so passes and whole attempts are both capped.

use itertools::Itertools;
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::cell::{Hue, PairID};
use crate::location::Location;
use crate::shape::SquareStep;

/// Summary of one [`Generator`] run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GenerationReport {
    /// Attempts started, including the final one.
    pub attempts: usize,
    /// Repair passes run during the final attempt.
    pub passes: usize,
    /// Whether the final attempt reached a fixed point covering every cell.
    pub converged: bool,
    /// Number of pairs issued.
    pub pairs: usize,
}

/// Fills a [`Board`] with a random solved layout and derives its numbered pairs.
///
/// Seeded generators are reproducible: the same seed on the same dimensions always yields the same puzzle.
pub struct Generator {
    rng: StdRng,
    max_passes: usize,
    max_attempts: usize,
}

impl Generator {
    /// Repair passes allowed per attempt unless configured otherwise.
    pub const DEFAULT_MAX_PASSES: usize = 1000;
    /// Attempts allowed per generation unless configured otherwise.
    pub const DEFAULT_MAX_ATTEMPTS: usize = 16;

    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_passes: Self::DEFAULT_MAX_PASSES,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Cap the repair passes of a single attempt. Zero is treated as one.
    pub fn max_passes(&mut self, max_passes: usize) -> &mut Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Cap the number of fresh attempts made when the repair loop fails to converge. Zero is treated as one.
    pub fn max_attempts(&mut self, max_attempts: usize) -> &mut Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Replace `board` with a new puzzle of the same dimensions, ready to play.
    ///
    /// The solved links are kept in each cell's [`solution`](crate::Cell::solution); live links are cleared.
    pub fn generate(&mut self, board: &mut Board) -> GenerationReport {
        let report = self.solve_into(board);
        board.reset();
        report
    }

    /// Replace `board` with a new puzzle of the same dimensions, leaving its solution linked.
    ///
    /// If no attempt converges the last attempt's state is kept, possibly with unlinked cells.
    pub fn solve_into(&mut self, board: &mut Board) -> GenerationReport {
        let mut report = GenerationReport::default();
        let mut order = Vec::new();

        if board.cells.len() < 2 {
            warn!("a {}x{} board cannot hold a path", board.dims.0, board.dims.1);
            *board = Board::with_dims(board.dims);
            return report;
        }

        for attempt in 1..=self.max_attempts {
            *board = Board::with_dims(board.dims);
            order = board.locations();
            report.attempts = attempt;
            report.passes = 0;
            report.converged = false;

            self.seed(board);
            while report.passes < self.max_passes {
                report.passes += 1;
                let changed = self.repair_pass(board, &mut order);
                trace!("attempt {attempt} pass {}: changed = {changed}", report.passes);

                if !changed && board.fully_linked() {
                    report.converged = true;
                    break;
                }
            }

            if report.converged {
                debug!("attempt {attempt} converged after {} passes", report.passes);
                break;
            }
            warn!("attempt {attempt} did not converge within {} passes", self.max_passes);
        }

        report.pairs = board.assign_pairs(&order);
        debug!("issued {} pairs", report.pairs);

        report
    }

    fn seed(&mut self, board: &mut Board) {
        for location in board.locations() {
            if let Some(direction) = SquareStep::VARIANTS.choose(&mut self.rng) {
                let neighbour = direction.attempt_from(location);
                if board.contains(neighbour) {
                    board.link(neighbour, location);
                }
            }
        }
    }

    fn repair_pass(&mut self, board: &mut Board, order: &mut Vec<Location>) -> bool {
        order.shuffle(&mut self.rng);

        for location in order.iter() {
            board.extend(*location);
        }

        let mut changed = false;
        for location in order.iter() {
            changed |= board.validate(*location);
        }
        for location in order.iter() {
            changed |= board.remove_overlap(*location);
        }

        changed
    }
}

impl Board {
    pub(crate) fn fully_linked(&self) -> bool {
        self.cells.iter().all(|cell| !cell.connections.is_empty())
    }

    /// Grow from `at`: link the first unlinked neighbour, or else continue a lone link straight through `at`.
    ///
    /// The straight continuation is only taken onto a cell with at most one link, or when the cell behind `at` is itself a path end.
    pub(crate) fn extend(&mut self, at: Location) {
        for direction in SquareStep::VARIANTS {
            let neighbour = direction.attempt_from(at);
            if self.cell(neighbour).is_some_and(|cell| cell.connections.is_empty()) {
                self.link(neighbour, at);
                return;
            }
        }

        if let &[behind] = self[at].connections.as_slice() {
            let ahead = at.reflect(behind);
            if let Some(cell) = self.cell(ahead) {
                if cell.degree() <= 1 || self[behind].degree() == 1 {
                    self.link(ahead, at);
                }
            }
        }
    }

    /// Cut detours through `at`.
    ///
    /// With `at` linked to `first` and `second`: if `first` continues to a cell adjacent to `second`,
    /// the link `first`-`at` is a detour and is cut, and likewise the other way round.
    pub(crate) fn validate(&mut self, at: Location) -> bool {
        let &[first, second] = self[at].connections.as_slice() else {
            return false;
        };

        let mut changed = false;
        for (near, other) in [(first, second), (second, first)] {
            if self.far_neighbour(near, at).is_some_and(|far| other.is_adjacent(far)) {
                self.unlink(near, at);
                changed = true;
            }
        }

        changed
    }

    /// The neighbour of `via` other than `from`, if `via` has exactly two links.
    fn far_neighbour(&self, via: Location, from: Location) -> Option<Location> {
        match self[via].connections.as_slice() {
            &[first, second] => Some(if first == from { second } else { first }),
            _ => None,
        }
    }

    /// Split strands of one path lying side by side at `at`.
    ///
    /// Each neighbour in `at`'s component scores a point; a path end touching another end of its own path,
    /// or a path end facing its own path two cells away, scores three outright.
    /// At three points `at` drops its first link.
    pub(crate) fn remove_overlap(&mut self, at: Location) -> bool {
        let identifier = self[at].identifier;
        let is_end = self[at].degree() == 1;

        let mut same = 0;
        for direction in SquareStep::VARIANTS {
            let Some(near) = self.cell(direction.attempt_from(at)) else {
                continue;
            };

            if near.identifier == identifier {
                same += 1;
                if is_end && near.degree() == 1 {
                    same = 3;
                }
            } else if is_end && self.cell(direction.attempt_n_from(at, 2)).is_some_and(|far| far.identifier == identifier) {
                same = 3;
            }
        }

        if same < 3 {
            return false;
        }

        match self[at].connections.first() {
            Some(&first) => self.unlink(first, at),
            None => false,
        }
    }

    /// Number the two ends of every chain, visiting path ends in `order` from the back.
    ///
    /// Each chain is coloured with its pair's hue. Returns the number of pairs issued.
    pub(crate) fn assign_pairs(&mut self, order: &[Location]) -> usize {
        let mut endpoints = order.iter()
            .copied()
            .filter(|location| self[*location].degree() == 1)
            .collect_vec();

        while let Some(first) = endpoints.pop() {
            let identifier = self[first].identifier;
            let Some(second) = endpoints.iter().copied().find(|location| self[*location].identifier == identifier) else {
                warn!("path end {first:?} has no partner");
                continue;
            };

            let id = PairID::MIN.saturating_add(self.pairs.len());
            for (this, other) in [(first, second), (second, first)] {
                let cell = &mut self[this];
                cell.number = Some(id);
                cell.hue = Some(Hue(id));
                cell.pair = Some(other);
            }
            self.relabel(first, identifier, Some(Hue(id)));
            self.pairs.push(UnorderedPair(first, second));

            endpoints.retain(|location| self[*location].identifier != identifier);
        }

        self.pairs.len()
    }
}
