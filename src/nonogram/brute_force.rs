#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exhaustive reference solver.
//!
//! [`BruteForce`] tries every assignment of the unknown cells of a grid and yields the ones that
//! form a complete, correct grid. It knows nothing about candidate lines or deduction, which
//! makes it a useful oracle for testing the real search on small puzzles.

use crate::nonogram::cell::Cell;
use crate::nonogram::error::SolverError;
use crate::nonogram::grid::Grid;
use crate::nonogram::solver::{Outcome, SearchStats, Solver};
use std::iter::FusedIterator;

/// Largest number of unknown cells [`BruteForce`] accepts (2^24 assignments).
pub const MAX_UNKNOWNS: usize = 24;

/// Enumerates every completion of a grid.
///
/// Assignment `k` marks the `i`-th unknown cell (row-major) iff bit `i` of `k` is set, and
/// assignments are tried in increasing `k`.
#[derive(Debug, Clone)]
pub struct BruteForce {
    base: Grid,
    unknown: Vec<(usize, usize)>,
    cursor: u64,
    end: u64,
    stats: SearchStats,
}

impl BruteForce {
    /// Prepares to enumerate the completions of `grid`.
    ///
    /// # Errors
    ///
    /// [`SolverError::TooManyUnknowns`] when `grid` has more than [`MAX_UNKNOWNS`] unknown cells.
    pub fn new(grid: Grid) -> Result<Self, SolverError> {
        let unknown: Vec<_> = grid.unknown_cells().collect();
        if unknown.len() > MAX_UNKNOWNS {
            return Err(SolverError::TooManyUnknowns {
                unknown: unknown.len(),
                limit: MAX_UNKNOWNS,
            });
        }
        Ok(Self {
            end: 1 << unknown.len(),
            base: grid,
            unknown,
            cursor: 0,
            stats: SearchStats::default(),
        })
    }

    /// Number of assignments still to be tried.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.end - self.cursor
    }

    fn assignment(&self, bits: u64) -> Result<Grid, SolverError> {
        let mut grid = self.base.clone();
        for (i, &(x, y)) in self.unknown.iter().enumerate() {
            grid.set(x, y, Cell::from((bits >> i) & 1 == 1))?;
        }
        Ok(grid)
    }
}

impl Iterator for BruteForce {
    type Item = Result<Grid, SolverError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.end {
            let bits = self.cursor;
            self.cursor += 1;
            self.stats.events += 1;
            match self.assignment(bits) {
                Ok(grid) if grid.correct() => {
                    self.stats.solutions += 1;
                    return Some(Ok(grid));
                }
                Ok(_) => self.stats.dead_ends += 1,
                Err(e) => {
                    self.cursor = self.end;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl FusedIterator for BruteForce {}

impl Solver for BruteForce {
    fn solve(&mut self) -> Result<Outcome, SolverError> {
        if self.remaining() == 0 {
            return Err(SolverError::Finished);
        }
        match self.next().transpose()? {
            Some(grid) => Ok(Outcome::Solved(grid)),
            None if self.stats.solutions == 0 => Ok(Outcome::Unsatisfiable),
            None => Err(SolverError::Finished),
        }
    }

    fn solutions(&mut self) -> Result<Vec<Grid>, SolverError> {
        if self.remaining() == 0 {
            return Err(SolverError::Finished);
        }
        self.by_ref().collect()
    }

    /// `events` counts assignments tried, `dead_ends` those that were rejected.
    fn stats(&self) -> SearchStats {
        self.stats
    }
}
