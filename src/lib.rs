#![warn(missing_docs)]

//! # `flowlink`
//!
//! A generator and play engine for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) puzzles as found in the mobile game Flow Free:
//! every cell of a rectangular board must end up on exactly one path, and each path joins the two cells of one numbered pair.
//!
//! Make an empty [`Board`] with [`Board::with_dims`], then fill it with a [`Generator`]:
//! [`generate`](Generator::generate) leaves a fresh puzzle ready to play, while [`solve_into`](Generator::solve_into) leaves its solution linked.
//! Play with [`Board::connect`], [`Board::disconnect`], [`Board::stroke`] and [`Board::delete_path`], and check [`Board::has_win`] after each move.
//!
//! ```
//! use std::num::NonZero;
//! use flowlink::{Board, Generator};
//!
//! let mut board = Board::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()));
//! let report = Generator::seeded(7).solve_into(&mut board);
//! assert_eq!(report.converged, board.has_win());
//! ```
//!
//! # Internals
//! A cell holds at most two links, and a numbered cell at most one, so every component is a simple chain.
//! Each cell carries an identifier naming its component. Rather than maintaining a disjoint-set forest,
//! every link or unlink walks the affected chains and rewrites their identifiers, which costs time linear in the chain
//! and keeps `identifier` equality exactly equal to reachability at all times ([`Board::check_invariants`] verifies this).
//!
//! Linking two cells already on one chain is read as a toggle and removes the link instead, so chains never close into cycles.
//! Linking a cell already at capacity evicts its oldest link.

pub use board::Board;
pub use cell::{Cell, FrozenCell, FrozenCellType, Hue, PairID};
pub use engine::ConnectOutcome;
pub use error::{EngineError, InvariantViolation};
pub use generator::{GenerationReport, Generator};
pub use location::{Dimension, Location};
pub use shape::SquareStep;

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod engine;
pub(crate) mod error;
pub(crate) mod generator;
pub(crate) mod location;
pub(crate) mod shape;
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;
