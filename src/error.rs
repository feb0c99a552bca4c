use thiserror::Error;

use crate::location::Location;

/// Reasons an engine operation may be refused before touching the board.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The location lies outside the board.
    #[error("location {0:?} is outside the board")]
    OutOfBounds(Location),
    /// Links may only join cells sharing a side.
    #[error("{0:?} and {1:?} are not adjacent")]
    NotAdjacent(Location, Location),
}

/// A broken board invariant, as reported by [`Board::check_invariants`](crate::Board::check_invariants).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `.0` lists `.1` as a neighbour but not the other way around.
    #[error("{0:?} links to {1:?} but not back")]
    Asymmetric(Location, Location),
    /// The cell holds more links than it may.
    #[error("{location:?} has {degree} links, at most {max} allowed")]
    OverCapacity {
        /// The offending cell.
        location: Location,
        /// Its link count.
        degree: usize,
        /// Its capacity.
        max: usize,
    },
    /// A link joins two cells not sharing a side.
    #[error("{0:?} links to non-adjacent {1:?}")]
    NotAdjacent(Location, Location),
    /// Two reachable cells carry different identifiers.
    #[error("{0:?} and {1:?} are connected but labelled differently")]
    IdentifierSplit(Location, Location),
    /// Two unreachable cells carry the same identifier.
    #[error("{0:?} and {1:?} are disconnected but share a label")]
    IdentifierShared(Location, Location),
}
