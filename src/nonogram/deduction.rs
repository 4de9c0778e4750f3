//! The deduction engine.
//!
//! One pass looks at the candidates of every row, then of every column, and fixes each unknown
//! cell on which all of its line's candidates agree. The fixed cells go into a fresh copy of the
//! grid and all candidate sets are rebuilt from it. Callers repeat passes until one fixes
//! nothing: the node is then at fixity.

use crate::nonogram::cache::SearchNode;
use crate::nonogram::cell::Cell;
use crate::nonogram::error::SolverError;
use crate::nonogram::grid::Grid;
use crate::nonogram::line::{Candidates, LineId};
use tracing::trace;

/// The result of one deduction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deduction {
    /// Cells resolved by the pass.
    pub fixed: usize,
}

impl Deduction {
    /// `false` once the node has reached fixity.
    #[must_use]
    pub const fn changed(self) -> bool {
        self.fixed > 0
    }
}

impl SearchNode {
    /// Runs one deduction pass over every row and column.
    ///
    /// When nothing can be fixed the node is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Only on an internal inconsistency (a consensus pointing outside the grid).
    pub fn deduce(&mut self) -> Result<Deduction, SolverError> {
        let mut next = self.grid().clone();
        let mut fixed = 0;

        for y in 0..next.height() {
            fixed += apply(&mut next, LineId::Row(y), self.row_candidates(y))?;
        }
        for x in 0..next.width() {
            fixed += apply(&mut next, LineId::Column(x), self.column_candidates(x))?;
        }

        if fixed > 0 {
            trace!(fixed, unknown = next.unknown_count(), "deduction pass");
            self.rebuild(next);
        }

        Ok(Deduction { fixed })
    }

    /// Repeats [`SearchNode::deduce`] until fixity, or until some line runs out of
    /// candidates. Returns the total number of cells fixed.
    ///
    /// # Errors
    ///
    /// See [`SearchNode::deduce`].
    pub fn deduce_to_fixity(&mut self) -> Result<Deduction, SolverError> {
        let mut total = Deduction::default();
        while self.first_empty().is_none() {
            let pass = self.deduce()?;
            if !pass.changed() {
                break;
            }
            total.fixed += pass.fixed;
        }
        Ok(total)
    }
}

/// Writes the consensus of `candidates` into the unknown cells of `line` in `grid`.
///
/// A cell already fixed earlier in the same pass is left alone; if the two lines disagree the
/// rebuilt candidates of one of them will be empty.
fn apply(grid: &mut Grid, line: LineId, candidates: &Candidates) -> Result<usize, SolverError> {
    let Some(consensus) = candidates.consensus() else {
        return Ok(0);
    };

    let mut fixed = 0;
    for (i, value) in consensus.into_iter().enumerate() {
        if value == Cell::Unknown {
            continue;
        }
        let (x, y) = match line {
            LineId::Row(y) => (i, y),
            LineId::Column(x) => (x, i),
        };
        if grid.get(x, y) == Some(Cell::Unknown) {
            grid.set(x, y, value)?;
            fixed += 1;
        }
    }
    Ok(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonogram::puzzle::PuzzleSpec;
    use std::sync::Arc;

    fn node(rows: Vec<Vec<usize>>, columns: Vec<Vec<usize>>) -> SearchNode {
        SearchNode::new(Grid::new(Arc::new(PuzzleSpec::new(rows, columns).unwrap())))
    }

    #[test]
    fn test_easy_puzzle_deduces_completely() {
        let mut node = node(vec![vec![1], vec![1, 1]], vec![vec![1], vec![1], vec![1]]);
        let total = node.deduce_to_fixity().unwrap();
        assert_eq!(total.fixed, 6);
        assert!(node.grid().complete());
        assert!(node.grid().correct());
        assert_eq!(
            node.grid().row(0),
            &[Cell::Unmarked, Cell::Marked, Cell::Unmarked]
        );
    }

    #[test]
    fn test_first_pass_uses_overlap() {
        let mut node = node(vec![vec![3], vec![0]], vec![vec![0], vec![1], vec![1], vec![1], vec![0]]);
        let pass = node.deduce().unwrap();
        assert!(pass.changed());
        // Row 1 is empty and columns 0 and 4 are empty.
        assert_eq!(node.grid().get(0, 1), Some(Cell::Unmarked));
        assert_eq!(node.grid().get(0, 0), Some(Cell::Unmarked));
        assert_eq!(node.grid().get(2, 0), Some(Cell::Marked));
    }

    #[test]
    fn test_fixity_is_idempotent() {
        let mut node = node(vec![vec![1], vec![1]], vec![vec![1], vec![1]]);
        assert!(!node.deduce().unwrap().changed());
        let before = node.clone();
        let pass = node.deduce().unwrap();
        assert_eq!(pass, Deduction { fixed: 0 });
        assert_eq!(node, before);
    }

    #[test]
    fn test_deduction_never_unresolves() {
        let mut node = node(
            vec![vec![2], vec![1, 1], vec![3], vec![1]],
            vec![vec![1, 1], vec![3], vec![1, 1], vec![1]],
        );
        let mut known = 0;
        loop {
            let before = node.grid().clone();
            let pass = node.deduce().unwrap();
            for (old, new) in before.cells().iter().zip(node.grid().cells()) {
                if old.is_known() {
                    assert_eq!(old, new);
                }
            }
            let now = node.grid().cells().iter().filter(|c| c.is_known()).count();
            assert!(now >= known);
            known = now;
            if !pass.changed() {
                break;
            }
        }
    }

    #[test]
    fn test_inconsistent_puzzle_empties_a_line() {
        let mut node = node(vec![vec![1, 1], vec![2]], vec![vec![2], vec![0], vec![2]]);
        node.deduce_to_fixity().unwrap();
        assert!(node.first_empty().is_some());
    }
}
