#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching-cell selection.
//!
//! When deduction reaches fixity without completing the grid, the search must guess. The
//! heuristic here decides *which* cell to guess; [`crate::nonogram::phase`] decides which value
//! to try first.

use crate::nonogram::cache::SearchNode;
use clap::ValueEnum;
use std::fmt::{Debug, Display};

/// Picks the cell the search branches on.
pub trait CellSelection {
    /// Returns the `(x, y)` of an unknown cell of `node`, or `None` if the grid is complete.
    ///
    /// Implementations must be deterministic: the same node always yields the same cell.
    fn pick(&self, node: &SearchNode) -> Option<(usize, usize)>;
}

/// Chooses the unknown cell with the fewest row candidates plus column candidates.
///
/// Small candidate sets are the most likely to collapse once the cell is fixed, so each branch
/// tends to cascade into further deductions. Ties go to the smallest `(x, y)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinCandidates;

impl CellSelection for MinCandidates {
    fn pick(&self, node: &SearchNode) -> Option<(usize, usize)> {
        node.grid()
            .unknown_cells()
            .min_by_key(|&(x, y)| {
                let score = node.row_candidates(y).len() + node.column_candidates(x).len();
                (score, x, y)
            })
    }
}

/// Chooses the first unknown cell in row-major order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedOrder;

impl CellSelection for FixedOrder {
    fn pick(&self, node: &SearchNode) -> Option<(usize, usize)> {
        node.grid().unknown_cells().next()
    }
}

/// A cell-selection strategy chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSelectionImpls {
    /// See [`MinCandidates`].
    MinCandidates(MinCandidates),
    /// See [`FixedOrder`].
    FixedOrder(FixedOrder),
}

impl Default for CellSelectionImpls {
    fn default() -> Self {
        Self::MinCandidates(MinCandidates)
    }
}

impl CellSelection for CellSelectionImpls {
    fn pick(&self, node: &SearchNode) -> Option<(usize, usize)> {
        match self {
            Self::MinCandidates(s) => s.pick(node),
            Self::FixedOrder(s) => s.pick(node),
        }
    }
}

/// Names of the available cell-selection strategies, for configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CellSelectionType {
    /// Fewest row plus column candidates.
    #[default]
    MinCandidates,
    /// First unknown cell, row by row.
    FixedOrder,
}

impl CellSelectionType {
    /// The strategy this name stands for.
    #[must_use]
    pub const fn to_impl(self) -> CellSelectionImpls {
        match self {
            Self::MinCandidates => CellSelectionImpls::MinCandidates(MinCandidates),
            Self::FixedOrder => CellSelectionImpls::FixedOrder(FixedOrder),
        }
    }
}

impl Display for CellSelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MinCandidates => write!(f, "min-candidates"),
            Self::FixedOrder => write!(f, "fixed-order"),
        }
    }
}
