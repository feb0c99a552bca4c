use std::collections::HashSet;

use ndarray::Array2;
use strum::VariantArray;

use crate::location::Location;

/// The four directions of travel between square cells on a rectangular board.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    // declaration order is the order in which the generator probes neighbours
    Up,
    Left,
    Right,
    Down,
}

impl SquareStep {
    /// The offset `(dx, dy)` of one step in this direction.
    pub(crate) fn delta(&self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
        }
    }

    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie outside any particular board; callers check bounds.
    pub fn attempt_from(&self, location: Location) -> Location {
        location.offset_by(self.delta())
    }

    /// Attempt `times` consecutive steps from `location`.
    pub(crate) fn attempt_n_from(&self, location: Location, times: isize) -> Location {
        let (dx, dy) = self.delta();
        location.offset_by((dx * times, dy * times))
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if they are not adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    /// The box-drawing glyph for a cell whose path leaves through `exits`.
    pub(crate) fn glyph(exits: &HashSet<Self>) -> char {
        let has = |dir| exits.contains(&dir);
        match (has(Self::Up), has(Self::Left), has(Self::Right), has(Self::Down)) {
            (false, false, false, false) => '·',
            (true, false, false, false) => '╵',
            (false, true, false, false) => '╴',
            (false, false, true, false) => '╶',
            (false, false, false, true) => '╷',
            (true, false, false, true) => '│',
            (false, true, true, false) => '─',
            (true, true, false, false) => '┘',
            (true, false, true, false) => '└',
            (false, true, false, true) => '┐',
            (false, false, true, true) => '┌',
            // more than two exits never occurs on a valid board
            _ => '┼',
        }
    }

    /// Dump the specified [`ndarray::Array2`], one row per line.
    pub(crate) fn print(board: Array2<char>) -> String {
        let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

        for row in board.rows() {
            for col in row {
                out.push(*col);
            }
            out.push('\n');
        }

        out
    }
}
