//! Partial and complete solutions.
//!
//! A [`Grid`] is a value object: the search clones it whenever two paths diverge, and no grid is
//! ever mutated by two independent search paths. Cells are stored row-major.

use crate::nonogram::cell::Cell;
use crate::nonogram::error::{SolverError, SpecError};
use crate::nonogram::line::{LineId, satisfies};
use crate::nonogram::puzzle::PuzzleSpec;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::sync::Arc;

/// A `width` × `height` array of cells tied to one puzzle.
#[derive(Debug, Clone)]
pub struct Grid {
    spec: Arc<PuzzleSpec>,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-`Unknown` grid for `spec`.
    #[must_use]
    pub fn new(spec: Arc<PuzzleSpec>) -> Self {
        let cells = vec![Cell::Unknown; spec.width() * spec.height()];
        Self { spec, cells }
    }

    /// A grid with the given row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::CellCount`] if `cells` does not have `width * height` entries.
    pub fn from_cells(spec: Arc<PuzzleSpec>, cells: Vec<Cell>) -> Result<Self, SpecError> {
        let expected = spec.width() * spec.height();
        if cells.len() != expected {
            return Err(SpecError::CellCount {
                len: cells.len(),
                expected,
            });
        }
        Ok(Self { spec, cells })
    }

    #[must_use]
    pub const fn spec(&self) -> &Arc<PuzzleSpec> {
        &self.spec
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.spec.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.spec.height()
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width() && y < self.height()).then(|| y * self.width() + x)
    }

    /// The cell at column `x`, row `y`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index_of(x, y).map(|i| self.cells[i])
    }

    /// Row `y`, left to right.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    #[must_use]
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width();
        &self.cells[y * width..(y + 1) * width]
    }

    /// Column `x`, top to bottom. Columns are not contiguous, so this copies.
    ///
    /// # Panics
    ///
    /// If `x >= width`.
    #[must_use]
    pub fn column(&self, x: usize) -> Vec<Cell> {
        assert!(x < self.width(), "column {x} out of range");
        self.cells
            .iter()
            .skip(x)
            .step_by(self.width())
            .copied()
            .collect()
    }

    /// The cells of `line`.
    #[must_use]
    pub fn line(&self, line: LineId) -> Vec<Cell> {
        match line {
            LineId::Row(y) => self.row(y).to_vec(),
            LineId::Column(x) => self.column(x),
        }
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width())
    }

    /// All columns, left to right.
    pub fn columns(&self) -> impl Iterator<Item = Vec<Cell>> + '_ {
        (0..self.width()).map(|x| self.column(x))
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Resolves the unknown cell at (`x`, `y`).
    ///
    /// Setting an `Unknown` cell to `Unknown` is a no-op.
    ///
    /// # Errors
    ///
    /// [`SolverError::OutOfBounds`] outside the grid, [`SolverError::AlreadyResolved`] if the cell
    /// is already `Marked` or `Unmarked`.
    pub fn set(&mut self, x: usize, y: usize, value: Cell) -> Result<(), SolverError> {
        let i = self.index_of(x, y).ok_or(SolverError::OutOfBounds { x, y })?;
        let cell = &mut self.cells[i];
        if cell.is_known() {
            return Err(SolverError::AlreadyResolved { x, y });
        }
        *cell = value;
        Ok(())
    }

    /// Marks the unknown cell at (`x`, `y`).
    ///
    /// # Errors
    ///
    /// See [`Grid::set`].
    pub fn mark(&mut self, x: usize, y: usize) -> Result<(), SolverError> {
        self.set(x, y, Cell::Marked)
    }

    /// Unmarks the unknown cell at (`x`, `y`).
    ///
    /// # Errors
    ///
    /// See [`Grid::set`].
    pub fn unmark(&mut self, x: usize, y: usize) -> Result<(), SolverError> {
        self.set(x, y, Cell::Unmarked)
    }

    /// Coordinates `(x, y)` of every unknown cell, in row-major order.
    pub fn unknown_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_unknown())
            .map(move |(i, _)| (i % width, i / width))
    }

    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_unknown()).count()
    }

    /// `true` when no cell is unknown.
    #[must_use]
    pub fn complete(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_known())
    }

    /// `true` when every fully resolved row and column satisfies its runs.
    ///
    /// Lines that still contain an unknown cell are not checked, even when their runs can no
    /// longer be satisfied.
    #[must_use]
    pub fn correct(&self) -> bool {
        self.first_violation().is_none()
    }

    /// The first fully resolved line (columns first, then rows) that violates its runs.
    #[must_use]
    pub fn first_violation(&self) -> Option<LineId> {
        let columns = (0..self.width()).map(LineId::Column);
        let rows = (0..self.height()).map(LineId::Row);
        columns.chain(rows).find(|&line| {
            let runs = match line {
                LineId::Row(y) => self.spec.row_runs(y),
                LineId::Column(x) => self.spec.column_runs(x),
            };
            matches!(satisfies(&self.line(line), runs), Ok(false))
        })
    }

    /// The grid as rows of booleans (`true` = marked), if it is complete.
    #[must_use]
    pub fn to_picture(&self) -> Option<Vec<Vec<bool>>> {
        self.complete().then(|| {
            self.rows()
                .map(|row| row.iter().map(|cell| cell.is_marked()).collect())
                .collect()
        })
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        assert!(x < self.width() && y < self.height(), "cell ({x}, {y}) out of range");
        &self.cells[y * self.width() + x]
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.spec, &other.spec) || self.spec == other.spec)
            && self.cells == other.cells
    }
}

impl Eq for Grid {}

impl Hash for Grid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn easy() -> Arc<PuzzleSpec> {
        Arc::new(
            PuzzleSpec::new(vec![vec![1], vec![1, 1]], vec![vec![1], vec![1], vec![1]]).unwrap(),
        )
    }

    #[test]
    fn test_new_grid_is_unknown() {
        let grid = Grid::new(easy());
        assert_eq!(grid.unknown_count(), 6);
        assert!(!grid.complete());
        assert!(grid.correct());
        assert_eq!(grid.get(2, 1), Some(Cell::Unknown));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_rows_and_columns() {
        let mut grid = Grid::new(easy());
        grid.mark(1, 0).unwrap();
        grid.unmark(0, 0).unwrap();
        grid.mark(2, 1).unwrap();

        assert_eq!(grid.row(0), &[Cell::Unmarked, Cell::Marked, Cell::Unknown]);
        assert_eq!(grid.column(2), vec![Cell::Unknown, Cell::Marked]);
        assert_eq!(grid.line(LineId::Column(1)), vec![Cell::Marked, Cell::Unknown]);
        assert_eq!(grid.rows().count(), 2);
        assert_eq!(grid.columns().count(), 3);
        assert_eq!(grid[(1, 0)], Cell::Marked);
    }

    #[test]
    fn test_set_is_monotonic() {
        let mut grid = Grid::new(easy());
        grid.mark(0, 1).unwrap();
        assert_eq!(
            grid.unmark(0, 1),
            Err(SolverError::AlreadyResolved { x: 0, y: 1 })
        );
        assert_eq!(
            grid.mark(0, 1),
            Err(SolverError::AlreadyResolved { x: 0, y: 1 })
        );
        assert_eq!(grid.mark(5, 0), Err(SolverError::OutOfBounds { x: 5, y: 0 }));
        assert_eq!(grid.get(0, 1), Some(Cell::Marked));
    }

    #[test]
    fn test_unknown_cells_row_major() {
        let mut grid = Grid::new(easy());
        grid.mark(0, 0).unwrap();
        grid.unmark(2, 1).unwrap();
        let unknown: Vec<_> = grid.unknown_cells().collect();
        assert_eq!(unknown, vec![(1, 0), (2, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_correct_and_complete() {
        let spec = easy();
        let solved = Grid::from_cells(
            spec.clone(),
            vec![
                Cell::Unmarked,
                Cell::Marked,
                Cell::Unmarked,
                Cell::Marked,
                Cell::Unmarked,
                Cell::Marked,
            ],
        )
        .unwrap();
        assert!(solved.complete());
        assert!(solved.correct());
        assert_eq!(
            solved.to_picture(),
            Some(vec![vec![false, true, false], vec![true, false, true]])
        );

        let wrong = Grid::from_cells(
            spec,
            vec![
                Cell::Marked,
                Cell::Unmarked,
                Cell::Unmarked,
                Cell::Marked,
                Cell::Unmarked,
                Cell::Marked,
            ],
        )
        .unwrap();
        assert!(wrong.complete());
        assert!(!wrong.correct());
        assert_eq!(wrong.first_violation(), Some(LineId::Column(0)));
    }

    #[test]
    fn test_correct_ignores_unresolved_lines() {
        let mut grid = Grid::new(easy());
        grid.mark(0, 0).unwrap();
        grid.mark(1, 0).unwrap();
        // Row 0 now has a run of two but still holds an unknown cell.
        assert!(grid.correct());
        grid.unmark(2, 0).unwrap();
        assert!(!grid.correct());
        assert_eq!(grid.first_violation(), Some(LineId::Row(0)));
    }

    #[test]
    fn test_from_cells_wrong_size() {
        assert_eq!(
            Grid::from_cells(easy(), vec![Cell::Unknown; 5]),
            Err(SpecError::CellCount {
                len: 5,
                expected: 6
            })
        );
        assert_eq!(
            SpecError::CellCount {
                len: 5,
                expected: 6
            }
            .to_string(),
            "grid has 5 cells, expected 6"
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let grid = Grid::new(easy());
        let mut other = grid.clone();
        other.mark(0, 0).unwrap();
        assert_ne!(grid, other);
        assert_eq!(grid.get(0, 0), Some(Cell::Unknown));
    }
}
