#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Nonogram model and solver.
//!
//! - [`puzzle`], [`cell`], [`grid`]: the puzzle definition and partial solutions.
//! - [`line`]: candidate-line enumeration for a single row or column.
//! - [`cache`], [`deduction`], [`contradiction`]: the per-frame search node, its deduction pass
//!   and its feasibility check.
//! - [`selection`], [`phase`], [`search`]: branching strategies and the lazy hypothesis search.
//! - [`brute_force`]: an exhaustive reference solver.
//! - [`parser`], [`render`], [`samples`]: text input and output, and built-in puzzles.
pub mod brute_force;
pub mod cache;
pub mod cell;
pub mod contradiction;
pub mod deduction;
pub mod error;
pub mod grid;
pub mod line;
pub mod parser;
pub mod phase;
pub mod puzzle;
pub mod render;
pub mod samples;
pub mod search;
pub mod selection;
pub mod solver;
