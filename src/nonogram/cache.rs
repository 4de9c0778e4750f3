//! The line cache: a grid together with the candidate lines of every row and column.
//!
//! Candidate sets are never patched. Whenever the grid changes, every set is enumerated again
//! from the new grid. Lines sharing the same runs and the same known cells (common on a fresh
//! grid) are enumerated once per rebuild.

use crate::nonogram::cell::Cell;
use crate::nonogram::error::SolverError;
use crate::nonogram::grid::Grid;
use crate::nonogram::line::{Candidates, LineId, legal_lines};
use crate::nonogram::puzzle::Runs;
use rustc_hash::FxHashMap;

/// A grid plus the candidate-line sets of all of its rows and columns.
///
/// A node is owned by exactly one search frame. Hypotheses clone the grid into a fresh node
/// rather than touching this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    grid: Grid,
    rows: Vec<Candidates>,
    columns: Vec<Candidates>,
}

impl SearchNode {
    /// Builds the node for `grid`, enumerating every line.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let rows = enumerate(grid.spec().rows(), grid.rows().map(<[Cell]>::to_vec));
        let columns = enumerate(grid.spec().columns(), grid.columns());
        Self {
            grid,
            rows,
            columns,
        }
    }

    /// Replaces the grid and regenerates every candidate set.
    pub(crate) fn rebuild(&mut self, grid: Grid) {
        *self = Self::new(grid);
    }

    /// The current partial solution.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consumes the node, keeping only its grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Candidates of row `y`.
    #[must_use]
    pub fn row_candidates(&self, y: usize) -> &Candidates {
        &self.rows[y]
    }

    /// Candidates of column `x`.
    #[must_use]
    pub fn column_candidates(&self, x: usize) -> &Candidates {
        &self.columns[x]
    }

    /// Candidates of `line`.
    #[must_use]
    pub fn candidates(&self, line: LineId) -> &Candidates {
        match line {
            LineId::Row(y) => self.row_candidates(y),
            LineId::Column(x) => self.column_candidates(x),
        }
    }

    /// Every line with its candidates: rows first, then columns.
    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Candidates)> {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(y, c)| (LineId::Row(y), c));
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(x, c)| (LineId::Column(x), c));
        rows.chain(columns)
    }

    /// The first line with no candidate left, if any.
    #[must_use]
    pub fn first_empty(&self) -> Option<LineId> {
        self.lines()
            .find(|(_, candidates)| candidates.is_empty())
            .map(|(line, _)| line)
    }

    /// Total number of candidates over all lines. Shrinks monotonically as the grid fills in.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.lines().map(|(_, candidates)| candidates.len()).sum()
    }

    /// A fresh node whose grid is a copy of this one with (`x`, `y`) set to `value`.
    ///
    /// # Errors
    ///
    /// See [`Grid::set`].
    pub fn hypothesize(&self, x: usize, y: usize, value: Cell) -> Result<Self, SolverError> {
        let mut grid = self.grid.clone();
        grid.set(x, y, value)?;
        Ok(Self::new(grid))
    }

    /// Pairs `grid` with candidate sets that were not enumerated from it.
    #[cfg(test)]
    pub(crate) const fn from_parts(
        grid: Grid,
        rows: Vec<Candidates>,
        columns: Vec<Candidates>,
    ) -> Self {
        Self {
            grid,
            rows,
            columns,
        }
    }
}

fn enumerate(clues: &[Runs], lines: impl Iterator<Item = Vec<Cell>>) -> Vec<Candidates> {
    let mut seen: FxHashMap<(&[usize], Vec<Cell>), Candidates> = FxHashMap::default();
    clues
        .iter()
        .zip(lines)
        .map(|(runs, partial)| {
            seen.entry((runs.as_slice(), partial))
                .or_insert_with_key(|(runs, partial)| legal_lines(runs, partial))
                .clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonogram::puzzle::PuzzleSpec;
    use std::sync::Arc;

    fn spec(rows: Vec<Vec<usize>>, columns: Vec<Vec<usize>>) -> Arc<PuzzleSpec> {
        Arc::new(PuzzleSpec::new(rows, columns).unwrap())
    }

    #[test]
    fn test_fresh_node_sizes() {
        let node = SearchNode::new(Grid::new(spec(
            vec![vec![1], vec![1, 1]],
            vec![vec![1], vec![1], vec![1]],
        )));
        assert_eq!(node.row_candidates(0).len(), 3);
        assert_eq!(node.row_candidates(1).len(), 1);
        assert_eq!(node.column_candidates(0).len(), 2);
        assert_eq!(node.candidates(LineId::Column(2)).len(), 2);
        assert_eq!(node.candidate_count(), 3 + 1 + 2 + 2 + 2);
        assert_eq!(node.first_empty(), None);
    }

    #[test]
    fn test_lines_order() {
        let node = SearchNode::new(Grid::new(spec(vec![vec![1]], vec![vec![1]])));
        let ids: Vec<_> = node.lines().map(|(line, _)| line).collect();
        assert_eq!(ids, vec![LineId::Row(0), LineId::Column(0)]);
    }

    #[test]
    fn test_hypothesis_leaves_parent_untouched() {
        let node = SearchNode::new(Grid::new(spec(
            vec![vec![1], vec![1]],
            vec![vec![1], vec![1]],
        )));
        let child = node.hypothesize(0, 0, Cell::Marked).unwrap();
        assert_eq!(node.grid().get(0, 0), Some(Cell::Unknown));
        assert_eq!(child.grid().get(0, 0), Some(Cell::Marked));
        assert_eq!(child.row_candidates(0).len(), 1);
        assert_eq!(node.row_candidates(0).len(), 2);
    }

    #[test]
    fn test_empty_line_detected() {
        let node = SearchNode::new(Grid::new(spec(
            vec![vec![1, 1], vec![2]],
            vec![vec![2], vec![0], vec![2]],
        )));
        let child = node.hypothesize(1, 1, Cell::Marked).unwrap();
        assert_eq!(child.first_empty(), Some(LineId::Column(1)));
    }
}
