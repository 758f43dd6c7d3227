#![warn(missing_docs)]

//! # `fuwari`
//!
//! A solver for [Dosun Fuwari](https://www.nikoli.co.jp/en/puzzles/dosun_fuwari/), the grid puzzle of balloons and stones.
//! Begin by constructing a [`Grid`] (directly via [`Grid::new`] or by deserializing the JSON grid format), then either
//! call [`solve()`](crate::solve()) for an in-process answer or use the [`encode`], [`dimacs`], and [`decode`] modules
//! to hand the problem to an external SAT solver and interpret what it returns.
//!
//! # Internals
//! This crate is driven by expressing the puzzle as a Boolean satisfiability problem (a "SAT"), extracting information
//! from that solver, and re-expressing the grid accordingly.
//!
//! Every cell carries three variables: "holds a balloon", "holds a stone", and "is black" (an obstacle).
//! Two virtual rows, one above and one below the grid, are forced black so the grid edges behave as resting surfaces.
//! We then assert, in CNF form:
//! 1. A cell holds at most one marker.
//! 2. A stone rests on a stone or a black cell directly below it; a balloon rests under a balloon or a black cell
//!    directly above it. The virtual rows anchor both chains at the grid edges.
//! 3. Every zone contains exactly one balloon and exactly one stone.
//!
//! The [`reduce`] module can further rewrite any such formula into an equisatisfiable one in which every clause has
//! exactly three literals, introducing auxiliary variables beyond the grid's own numbering.

pub use cell::{CellState, Role};
pub use grid::{Grid, GridError};
pub use location::Location;
pub use numbering::Numbering;
pub use solve::{solve, Solution, SolveFailure};

pub(crate) mod location;
mod tests;
pub mod cell;
pub mod grid;
pub mod numbering;
pub(crate) mod logic;
pub mod encode;
pub mod reduce;
pub mod decode;
pub mod dimacs;
pub mod solve;
