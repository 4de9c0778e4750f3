//! The contradiction detector.
//!
//! A line without candidates proves the current partial assignment has no completion. That is
//! the ordinary way a hypothesis fails. A resolved line that breaks its own runs while every
//! line still has candidates can only come from a broken deduction step, and is fatal.

use crate::nonogram::cache::SearchNode;
use crate::nonogram::error::SolverError;
use crate::nonogram::line::LineId;

/// What the detector concluded about a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every line still has at least one candidate.
    Feasible,
    /// `line` has no candidate left; the node cannot be completed.
    Infeasible {
        /// The line that ran out of candidates.
        line: LineId,
    },
}

impl Verdict {
    /// `true` for [`Verdict::Feasible`].
    #[must_use]
    pub const fn is_feasible(self) -> bool {
        matches!(self, Self::Feasible)
    }
}

/// Inspects the candidates and the grid of `node`.
///
/// # Errors
///
/// [`SolverError::UnsoundDeduction`] if every line has candidates but some fully resolved line
/// violates its runs. A resolved line with a candidate is its own only candidate, so this
/// cannot happen unless the engine is wrong.
pub fn check(node: &SearchNode) -> Result<Verdict, SolverError> {
    if let Some(line) = node.first_empty() {
        return Ok(Verdict::Infeasible { line });
    }
    if let Some(line) = node.grid().first_violation() {
        return Err(SolverError::UnsoundDeduction { line });
    }
    Ok(Verdict::Feasible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonogram::cell::Cell;
    use crate::nonogram::grid::Grid;
    use crate::nonogram::puzzle::PuzzleSpec;
    use std::sync::Arc;

    fn inconsistent() -> SearchNode {
        SearchNode::new(Grid::new(Arc::new(
            PuzzleSpec::new(vec![vec![1, 1], vec![2]], vec![vec![2], vec![0], vec![2]]).unwrap(),
        )))
    }

    #[test]
    fn test_fresh_node_is_feasible() {
        assert_eq!(check(&inconsistent()), Ok(Verdict::Feasible));
    }

    #[test]
    fn test_empty_line_is_infeasible() {
        let node = inconsistent().hypothesize(1, 0, Cell::Marked).unwrap();
        assert_eq!(
            check(&node),
            Ok(Verdict::Infeasible {
                line: LineId::Row(0)
            })
        );
        assert!(!check(&node).unwrap().is_feasible());
    }

    #[test]
    fn test_broken_line_with_candidates_is_unsound() {
        let spec = Arc::new(PuzzleSpec::new(vec![vec![1]], vec![vec![1]]).unwrap());
        let fresh = SearchNode::new(Grid::new(Arc::clone(&spec)));
        let broken = Grid::from_cells(spec, vec![Cell::Unmarked]).unwrap();
        let node = SearchNode::from_parts(
            broken,
            vec![fresh.row_candidates(0).clone()],
            vec![fresh.column_candidates(0).clone()],
        );

        assert_eq!(node.first_empty(), None);
        assert_eq!(
            check(&node),
            Err(SolverError::UnsoundDeduction {
                line: LineId::Column(0)
            })
        );
    }

    #[test]
    fn test_bad_hypothesis_is_not_an_invariant_violation() {
        // Completing a line wrongly empties its candidates, so it is reported as infeasible.
        let spec = Arc::new(PuzzleSpec::new(vec![vec![1]], vec![vec![1]]).unwrap());
        let node = SearchNode::new(Grid::new(spec))
            .hypothesize(0, 0, Cell::Unmarked)
            .unwrap();
        assert!(node.grid().first_violation().is_some());
        assert_eq!(
            check(&node),
            Ok(Verdict::Infeasible {
                line: LineId::Row(0)
            })
        );
    }
}
