#![warn(missing_docs)]

//! # `linkcnf`
//!
//! A solver for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) puzzles on rectangular grids, by way of a
//! Boolean satisfiability (SAT) encoding.
//! Describe a puzzle with [`Puzzle::new`] or a [`PuzzleBuilder`], then call [`Puzzle::solve`] to obtain a
//! [`ConnectivityGrid`]: per cell, a color and the directions its line leaves in.
//!
//! # Internals
//! Solving runs in three strictly sequential stages, each usable on its own:
//!
//! 1. [`encode`] turns a [`Puzzle`] into a list of [`Clause`]s over three families of variables:
//!    `h.x.y` (cell `(x, y)` links to its right neighbour), `v.x.y` (links to the cell below) and
//!    `c.x.y.k` (the cell carries color `k`).
//! 2. [`solve_clauses`] binds each distinct variable to a fresh variable of a [`Backend`] (by default
//!    [`varisat`], see [`VarisatBackend`]), solves, and reads back one [`Record`] per satisfied color variable.
//! 3. [`decode`] turns the records into a [`ConnectivityGrid`].
//!
//! We make the following assertions in SAT form:
//! 1. An endpoint has exactly one link; every other cell has exactly two.
//! 2. Every cell carries exactly one color.
//! 3. Linked cells carry the same color.
//! 4. Endpoints carry their own color.
//!
//! Assertion 3 is expressed without auxiliary variables and costs `2^k` clauses per link for `k` colors.
//! This is the encoding's main limitation: puzzles with more than a handful of colors grow quickly.
//! Nothing in the encoding forbids a closed loop of one color that touches no endpoint, so such loops can appear
//! next to the required paths.
//!
//! A solve is a single, synchronous, untimed attempt. An inconsistent puzzle yields
//! [`SolverFailure::Unsatisfiable`]; a backend that cannot decide yields [`SolverFailure::Indeterminate`].

pub use backend::{Backend, BackendStatus, VarisatBackend};
pub use builder::PuzzleBuilder;
pub use cell::LinkedCell;
pub use check::{check_solution, SolutionDefect};
pub use encoder::encode;
pub use grid::{decode, ConnectivityGrid};
pub use location::{Dimension, Location};
pub use puzzle::{ColorId, Puzzle, PuzzleError};
pub use shape::SquareStep;
pub use solver::{solve_clauses, Record, SolverFailure};
pub use var::{Clause, Literal, ParseError, VarKey};

/// SAT solver abstraction and the varisat implementation.
pub mod backend;
/// Incremental puzzle construction.
pub mod builder;
pub(crate) mod cell;
/// Verification of solved grids.
pub mod check;
/// Puzzle to CNF.
pub mod encoder;
/// Solved grids and record decoding.
pub mod grid;
pub(crate) mod location;
pub(crate) mod logic;
/// Validated puzzle descriptions.
pub mod puzzle;
pub(crate) mod shape;
/// Running clauses through a backend.
pub mod solver;
/// Variables, literals and clauses, with their text form.
pub mod var;
