use std::collections::HashSet;
use std::num::NonZero;

use crate::location::Location;
use crate::shape::SquareStep;

/// Identifies one numbered pair; pair ids are assigned from 1 upward.
pub type PairID = NonZero<usize>;

/// A colour tag shared by both cells of a pair and by every cell joined to them.
///
/// The tag is the pair it was derived from; renderers turn it into a colour with [`Hue::fraction`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Hue(pub(crate) PairID);

impl Hue {
    const CYCLE: f64 = 11.3;

    /// The pair this hue was issued for.
    pub fn pair_id(&self) -> PairID {
        self.0
    }

    /// Hue as a fraction of the colour wheel, in `[0, 1)`.
    pub fn fraction(&self) -> f64 {
        (self.0.get() as f64 / Self::CYCLE) % 1.0
    }

    /// A letter naming this hue in text output; pair 1 is `a`.
    pub(crate) fn display(&self) -> char {
        display_of(self.0).to_lowercase().next().unwrap_or('#')
    }
}

// Greek capitals with no Latin look-alike, used once the alphabet runs out
const EXTRA_LETTERS: [char; 10] = ['Γ', 'Δ', 'Θ', 'Λ', 'Ξ', 'Π', 'Σ', 'Φ', 'Ψ', 'Ω'];

/// The letter naming a pair in text output: `A` to `Z`, then `EXTRA_LETTERS`, then `#` for all the rest.
pub(crate) fn display_of(pair: PairID) -> char {
    match pair.get() {
        n @ 1..=26 => (b'A' + (n - 1) as u8) as char,
        n => EXTRA_LETTERS.get(n - 27).copied().unwrap_or('#'),
    }
}

/// One grid position and its connectivity state.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) location: Location,
    pub(crate) idx: usize,
    pub(crate) identifier: usize,
    // oldest first; eviction takes the front
    pub(crate) connections: Vec<Location>,
    pub(crate) solution: Vec<Location>,
    pub(crate) number: Option<PairID>,
    pub(crate) pair: Option<Location>,
    pub(crate) hue: Option<Hue>,
}

impl Cell {
    pub(crate) fn new(location: Location, idx: usize) -> Self {
        Self {
            location,
            idx,
            identifier: idx,
            connections: Vec::with_capacity(3),
            solution: Vec::new(),
            number: None,
            pair: None,
            hue: None,
        }
    }

    /// Where this cell sits.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Row-major index assigned at creation; never changes.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// Component label. Two cells share it exactly when a chain of connections joins them.
    pub fn identifier(&self) -> usize {
        self.identifier
    }

    /// Neighbours this cell is linked to, oldest link first.
    pub fn connections(&self) -> &[Location] {
        &self.connections
    }

    /// Links this cell had when the board was last reset.
    pub fn solution(&self) -> &[Location] {
        &self.solution
    }

    /// The pair number, for path ends.
    pub fn number(&self) -> Option<PairID> {
        self.number
    }

    /// The other cell carrying the same number.
    pub fn pair(&self) -> Option<Location> {
        self.pair
    }

    /// The colour of the path through this cell, if it has been joined to a numbered cell.
    pub fn hue(&self) -> Option<Hue> {
        self.hue
    }

    /// Number of live links.
    pub fn degree(&self) -> usize {
        self.connections.len()
    }

    /// Numbered cells terminate a path and so take a single link; every other cell takes two.
    pub fn max_connections(&self) -> usize {
        match self.number {
            Some(_) => 1,
            None => 2,
        }
    }

    pub(crate) fn remove_connection(&mut self, other: Location) -> bool {
        match self.connections.iter().position(|c| *c == other) {
            Some(position) => {
                self.connections.remove(position);
                if self.connections.is_empty() && self.number.is_none() {
                    self.hue = None;
                }
                true
            }
            None => false,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.solution = std::mem::take(&mut self.connections);
        self.identifier = self.idx;
        if self.number.is_none() {
            self.hue = None;
        }
    }
}

/// What a frozen cell shows.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FrozenCellType {
    /// A numbered path end.
    Terminus {
        /// The pair number.
        pair: PairID,
        /// The pair's colour.
        hue: Hue,
    },
    /// A linked cell, coloured once joined to a numbered cell.
    Path {
        /// The colour it took from its path, if any.
        hue: Option<Hue>,
    },
    /// An unlinked, unnumbered cell.
    #[default]
    Empty,
}

/// Cells, frozen for output or rendering.
#[derive(Clone, Debug, Default)]
pub struct FrozenCell {
    /// Directions in which this cell's links leave it.
    pub exits: HashSet<SquareStep>,
    /// What the cell shows.
    pub cell_type: FrozenCellType,
}

impl From<&Cell> for FrozenCell {
    fn from(cell: &Cell) -> Self {
        let exits = cell.connections.iter()
            .filter_map(|other| SquareStep::direction_to(cell.location, *other))
            .collect();

        let cell_type = match (cell.number, cell.hue) {
            (Some(pair), Some(hue)) => FrozenCellType::Terminus { pair, hue },
            (Some(pair), None) => FrozenCellType::Terminus { pair, hue: Hue(pair) },
            (None, hue) if !cell.connections.is_empty() => FrozenCellType::Path { hue },
            (None, _) => FrozenCellType::Empty,
        };

        Self { exits, cell_type }
    }
}
