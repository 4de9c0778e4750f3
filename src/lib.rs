#![warn(missing_docs)]
//! This crate provides a solver for nonograms (also known as picross or paint-by-numbers):
//! grids whose rows and columns are annotated with the lengths of their runs of marked cells.
//!
//! Solving alternates between a deductive phase, which enumerates every legal completion of
//! each row and column and fixes the cells they all agree on, and a hypothetical phase, which
//! guesses the value of one cell on a cloned grid and backtracks when the guess leads nowhere.

/// The `nonogram` module implements the puzzle model, the line enumerator, the deduction
/// engine and the hypothesis search, plus parsing, rendering and sample puzzles.
pub mod nonogram;
