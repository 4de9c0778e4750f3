#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Phase ordering: which value a hypothesis tries first on the chosen cell.
//!
//! Both values are always tried (unless the search stops early), so the order never changes the
//! set of solutions, only the order in which they are found and how quickly the first one is.

use crate::nonogram::cache::SearchNode;
use crate::nonogram::cell::Cell;
use clap::ValueEnum;
use std::fmt::{Debug, Display};

/// Orders the two hypotheses for a branching cell.
pub trait PhaseOrder {
    /// The two values to try on `(x, y)`, in order. Always a permutation of
    /// `[Cell::Marked, Cell::Unmarked]`.
    fn phases(&self, x: usize, y: usize, node: &SearchNode) -> [Cell; 2];
}

/// Tries `Unmarked` before `Marked`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnmarkedFirst;

impl PhaseOrder for UnmarkedFirst {
    fn phases(&self, _x: usize, _y: usize, _node: &SearchNode) -> [Cell; 2] {
        [Cell::Unmarked, Cell::Marked]
    }
}

/// Tries `Marked` before `Unmarked`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkedFirst;

impl PhaseOrder for MarkedFirst {
    fn phases(&self, _x: usize, _y: usize, _node: &SearchNode) -> [Cell; 2] {
        [Cell::Marked, Cell::Unmarked]
    }
}

/// Tries first whichever value more of the cell's row and column candidates agree on.
///
/// Ties go to `Unmarked`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Majority;

impl PhaseOrder for Majority {
    fn phases(&self, x: usize, y: usize, node: &SearchNode) -> [Cell; 2] {
        let row = node.row_candidates(y);
        let column = node.column_candidates(x);
        let marked = row.iter().filter(|line| line.get(x) == Some(true)).count()
            + column.iter().filter(|line| line.get(y) == Some(true)).count();
        let total = row.len() + column.len();

        if marked * 2 > total {
            [Cell::Marked, Cell::Unmarked]
        } else {
            [Cell::Unmarked, Cell::Marked]
        }
    }
}

/// A phase order chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOrderImpls {
    /// See [`UnmarkedFirst`].
    UnmarkedFirst(UnmarkedFirst),
    /// See [`MarkedFirst`].
    MarkedFirst(MarkedFirst),
    /// See [`Majority`].
    Majority(Majority),
}

impl Default for PhaseOrderImpls {
    fn default() -> Self {
        Self::UnmarkedFirst(UnmarkedFirst)
    }
}

impl PhaseOrder for PhaseOrderImpls {
    fn phases(&self, x: usize, y: usize, node: &SearchNode) -> [Cell; 2] {
        match self {
            Self::UnmarkedFirst(p) => p.phases(x, y, node),
            Self::MarkedFirst(p) => p.phases(x, y, node),
            Self::Majority(p) => p.phases(x, y, node),
        }
    }
}

/// Names of the available phase orders, for configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PhaseOrderType {
    /// Unmarked, then marked.
    #[default]
    UnmarkedFirst,
    /// Marked, then unmarked.
    MarkedFirst,
    /// Whichever value most candidates through the cell agree on.
    Majority,
}

impl PhaseOrderType {
    /// The phase order this name stands for.
    #[must_use]
    pub const fn to_impl(self) -> PhaseOrderImpls {
        match self {
            Self::UnmarkedFirst => PhaseOrderImpls::UnmarkedFirst(UnmarkedFirst),
            Self::MarkedFirst => PhaseOrderImpls::MarkedFirst(MarkedFirst),
            Self::Majority => PhaseOrderImpls::Majority(Majority),
        }
    }
}

impl Display for PhaseOrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnmarkedFirst => write!(f, "unmarked-first"),
            Self::MarkedFirst => write!(f, "marked-first"),
            Self::Majority => write!(f, "majority"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonogram::grid::Grid;
    use crate::nonogram::puzzle::PuzzleSpec;
    use std::sync::Arc;

    fn node(rows: Vec<Vec<usize>>, columns: Vec<Vec<usize>>) -> SearchNode {
        SearchNode::new(Grid::new(Arc::new(PuzzleSpec::new(rows, columns).unwrap())))
    }

    #[test]
    fn test_fixed_orders() {
        let node = node(vec![vec![1], vec![1]], vec![vec![1], vec![1]]);
        assert_eq!(
            UnmarkedFirst.phases(0, 0, &node),
            [Cell::Unmarked, Cell::Marked]
        );
        assert_eq!(MarkedFirst.phases(0, 0, &node), [Cell::Marked, Cell::Unmarked]);
    }

    #[test]
    fn test_majority_follows_candidates() {
        // Row 0 is [2] in 3 cells: the middle cell is marked in both candidates.
        // Column 1 is [1] in 2 cells: marked in one of two.
        let node = node(vec![vec![2], vec![1]], vec![vec![1], vec![1], vec![1]]);
        assert_eq!(Majority.phases(1, 0, &node), [Cell::Marked, Cell::Unmarked]);
        // The corner (0, 1): row 1 is [1] in 3 (1 of 3), column 0 is [1] in 2 (1 of 2).
        assert_eq!(Majority.phases(0, 1, &node), [Cell::Unmarked, Cell::Marked]);
    }

    #[test]
    fn test_phases_are_a_permutation() {
        let node = node(vec![vec![1], vec![1]], vec![vec![1], vec![1]]);
        for kind in PhaseOrderType::value_variants() {
            let mut phases = kind.to_impl().phases(1, 1, &node);
            phases.sort();
            assert_eq!(phases, [Cell::Marked, Cell::Unmarked]);
        }
    }
}
