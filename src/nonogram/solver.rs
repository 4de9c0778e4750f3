#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The interface shared by every nonogram solver in this crate.
//!
//! Two solvers implement [`Solver`]: the streaming
//! [`Search`](crate::nonogram::search::Search), which deduces before it guesses, and the
//! exhaustive [`BruteForce`](crate::nonogram::brute_force::BruteForce) used as a reference on
//! small grids.

use crate::nonogram::error::SolverError;
use crate::nonogram::grid::Grid;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A complete grid satisfying every row and column.
    Solved(Grid),
    /// The search space was exhausted without finding a solution.
    Unsatisfiable,
}

impl Outcome {
    /// The solved grid, if any.
    #[must_use]
    pub const fn grid(&self) -> Option<&Grid> {
        match self {
            Self::Solved(grid) => Some(grid),
            Self::Unsatisfiable => None,
        }
    }

    /// `true` for [`Outcome::Solved`].
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// Counters collected while solving.
///
/// Solvers that have no notion of a counter leave it at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Deduction passes run, including passes that fixed nothing.
    pub deduction_passes: usize,
    /// Cells resolved by deduction rather than by hypothesis.
    pub cells_deduced: usize,
    /// Cells branched on.
    pub branches: usize,
    /// Hypotheses abandoned because some line ran out of candidates.
    pub dead_ends: usize,
    /// Deepest nesting of hypotheses reached.
    pub max_depth: usize,
    /// Events emitted to the consumer.
    pub events: usize,
    /// Solutions found.
    pub solutions: usize,
}

/// A nonogram solver.
pub trait Solver {
    /// Runs until the next solution or until the puzzle is shown to have none.
    ///
    /// # Errors
    ///
    /// [`SolverError::Finished`] if the solver has nothing left to report, including when
    /// every solution has already been returned. Any other error is a violation of the
    /// solver's own invariants.
    fn solve(&mut self) -> Result<Outcome, SolverError>;

    /// Runs to exhaustion and returns every solution not reported yet, in the order the
    /// solver finds them.
    ///
    /// # Errors
    ///
    /// [`SolverError::Finished`] if the solver has already finished. Any other error is a
    /// violation of the solver's own invariants.
    fn solutions(&mut self) -> Result<Vec<Grid>, SolverError>;

    /// Counters accumulated so far.
    fn stats(&self) -> SearchStats;
}
