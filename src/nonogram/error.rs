//! Error types for puzzle construction, parsing and solving.
//!
//! Three categories are kept apart:
//!
//! - [`SpecError`]: the puzzle definition itself is malformed. Raised once, at construction.
//! - [`SolverError`]: the engine was misused or caught itself in an inconsistent state.
//!   These are bugs, not puzzle properties, and are never recovered from.
//! - [`ParseError`]: the textual puzzle front end failed.
//!
//! An unsolvable puzzle is *not* an error. It is reported as
//! [`Outcome::Unsatisfiable`](crate::nonogram::solver::Outcome::Unsatisfiable).

use crate::nonogram::line::LineId;
use std::io;
use std::num::ParseIntError;

/// The puzzle definition violates one of its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// The puzzle has no rows or no columns.
    #[error("puzzle must have at least one row and one column")]
    Empty,

    /// Row runs and column runs describe a different number of marked cells.
    #[error("row runs mark {rows} cells but column runs mark {columns}")]
    SumMismatch {
        /// Total marked cells according to the row runs.
        rows: usize,
        /// Total marked cells according to the column runs.
        columns: usize,
    },

    /// A row's runs cannot fit in the puzzle width.
    #[error("row {index} needs {needed} cells but the puzzle is {width} wide")]
    RowTooLong {
        /// Row index.
        index: usize,
        /// Minimum width required by the runs.
        needed: usize,
        /// Puzzle width.
        width: usize,
    },

    /// A column's runs cannot fit in the puzzle height.
    #[error("column {index} needs {needed} cells but the puzzle is {height} tall")]
    ColumnTooLong {
        /// Column index.
        index: usize,
        /// Minimum height required by the runs.
        needed: usize,
        /// Puzzle height.
        height: usize,
    },

    /// A picture's rows are not all the same length.
    #[error("picture row {row} has {len} cells, expected {width}")]
    Ragged {
        /// Index of the first row with the wrong length.
        row: usize,
        /// Its length.
        len: usize,
        /// Length of the first row.
        width: usize,
    },

    /// A grid was built from the wrong number of cells.
    #[error("grid has {len} cells, expected {expected}")]
    CellCount {
        /// Cells supplied.
        len: usize,
        /// Width times height of the puzzle.
        expected: usize,
    },
}

/// An invariant of the engine was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    /// The satisfaction rule was asked about a line that still holds unknown cells.
    #[error("line still contains unknown cells")]
    UnresolvedLine,

    /// An attempt was made to resolve a cell that is already resolved.
    #[error("cell ({x}, {y}) is already resolved")]
    AlreadyResolved {
        /// Column of the cell.
        x: usize,
        /// Row of the cell.
        y: usize,
    },

    /// A coordinate outside the grid.
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds {
        /// Column of the cell.
        x: usize,
        /// Row of the cell.
        y: usize,
    },

    /// Deduction produced a fully resolved line that violates its own runs.
    #[error("deduction produced an unsound {line}")]
    UnsoundDeduction {
        /// The offending line.
        line: LineId,
    },

    /// The search found no unknown cell to branch on although the grid is incomplete.
    #[error("no cell to branch on in an incomplete grid")]
    NoBranchingCell,

    /// The solver was asked for more after its stream had already ended.
    #[error("the solver has already finished")]
    Finished,

    /// The brute-force enumerator refuses to walk this many assignments.
    #[error("{unknown} unknown cells exceed the brute-force limit of {limit}")]
    TooManyUnknowns {
        /// Unknown cells in the grid.
        unknown: usize,
        /// The enumerator's limit.
        limit: usize,
    },
}

/// Failure to read a puzzle description.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A run length or dimension is not a non-negative integer.
    #[error("line {line}: {source}")]
    InvalidNumber {
        /// One-based line number in the input.
        line: usize,
        /// The integer parse failure.
        source: ParseIntError,
    },

    /// The input is structurally wrong.
    #[error("line {line}: {message}")]
    Syntax {
        /// One-based line number in the input.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The clues parsed but do not form a valid puzzle.
    #[error(transparent)]
    Spec(#[from] SpecError),
}
