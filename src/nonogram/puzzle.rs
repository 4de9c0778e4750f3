//! The immutable puzzle definition.
//!
//! A [`PuzzleSpec`] holds the run lengths of every row and column. It is validated once at
//! construction and then shared, through an `Arc`, by every grid and search built on it.

use crate::nonogram::error::SpecError;
use itertools::Itertools;
use smallvec::SmallVec;

/// Run lengths of one row or column, in reading order.
pub type Runs = SmallVec<[usize; 8]>;

/// Minimum number of cells a line needs to hold `runs`: each run plus one blank between
/// neighbours.
#[must_use]
pub fn min_length(runs: &[usize]) -> usize {
    if runs.is_empty() {
        0
    } else {
        runs.iter().sum::<usize>() + runs.len() - 1
    }
}

/// Drops zero-length runs. `[0]` is the conventional clue for an empty line and becomes `[]`.
fn normalise(runs: impl IntoIterator<Item = usize>) -> Runs {
    runs.into_iter().filter(|&run| run > 0).collect()
}

/// A validated nonogram: `height` row clues and `width` column clues.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleSpec {
    name: Option<String>,
    rows: Vec<Runs>,
    columns: Vec<Runs>,
}

impl PuzzleSpec {
    /// Builds and validates a puzzle from its row and column clues.
    ///
    /// The width is the number of column clues and the height the number of row clues.
    /// Zero-length runs are discarded, so `[0]` describes an entirely unmarked line.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] if the puzzle is empty, if row and column clues mark a different
    /// number of cells, or if some clue cannot fit in its line.
    pub fn new(
        rows: impl IntoIterator<Item = impl IntoIterator<Item = usize>>,
        columns: impl IntoIterator<Item = impl IntoIterator<Item = usize>>,
    ) -> Result<Self, SpecError> {
        let spec = Self {
            name: None,
            rows: rows.into_iter().map(normalise).collect(),
            columns: columns.into_iter().map(normalise).collect(),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Like [`PuzzleSpec::new`], with a display name attached.
    ///
    /// # Errors
    ///
    /// See [`PuzzleSpec::new`].
    pub fn named(
        name: impl Into<String>,
        rows: impl IntoIterator<Item = impl IntoIterator<Item = usize>>,
        columns: impl IntoIterator<Item = impl IntoIterator<Item = usize>>,
    ) -> Result<Self, SpecError> {
        let mut spec = Self::new(rows, columns)?;
        spec.name = Some(name.into());
        Ok(spec)
    }

    /// Builds a puzzle whose clues are known to be valid, such as the built-in samples.
    pub(crate) fn trusted(name: &str, rows: &[&[usize]], columns: &[&[usize]]) -> Self {
        let spec = Self {
            name: Some(name.to_owned()),
            rows: rows.iter().map(|runs| normalise(runs.iter().copied())).collect(),
            columns: columns.iter().map(|runs| normalise(runs.iter().copied())).collect(),
        };
        debug_assert_eq!(spec.validate(), Ok(()));
        spec
    }

    /// Derives the clues of a picture, given as rows of `true` (marked) / `false` cells.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Ragged`] if the rows differ in length and [`SpecError::Empty`] if
    /// the picture has no cells.
    pub fn from_picture(picture: &[Vec<bool>]) -> Result<Self, SpecError> {
        let width = picture.first().map_or(0, Vec::len);
        if let Some((row, line)) = picture.iter().find_position(|line| line.len() != width) {
            return Err(SpecError::Ragged {
                row,
                len: line.len(),
                width,
            });
        }

        let rows = picture.iter().map(|line| runs_of(line.iter().copied()));
        let columns = (0..width).map(|x| runs_of(picture.iter().map(|line| line[x])));

        Self::new(rows.collect_vec(), columns.collect_vec())
    }

    fn validate(&self) -> Result<(), SpecError> {
        if self.rows.is_empty() || self.columns.is_empty() {
            return Err(SpecError::Empty);
        }

        let rows: usize = self.rows.iter().flatten().sum();
        let columns: usize = self.columns.iter().flatten().sum();
        if rows != columns {
            return Err(SpecError::SumMismatch { rows, columns });
        }

        let width = self.width();
        if let Some((index, needed)) = self
            .rows
            .iter()
            .map(|runs| min_length(runs))
            .find_position(|&needed| needed > width)
        {
            return Err(SpecError::RowTooLong {
                index,
                needed,
                width,
            });
        }

        let height = self.height();
        if let Some((index, needed)) = self
            .columns
            .iter()
            .map(|runs| min_length(runs))
            .find_position(|&needed| needed > height)
        {
            return Err(SpecError::ColumnTooLong {
                index,
                needed,
                height,
            });
        }

        Ok(())
    }

    /// The display name, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Runs of row `y`.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    #[must_use]
    pub fn row_runs(&self, y: usize) -> &[usize] {
        &self.rows[y]
    }

    /// Runs of column `x`.
    ///
    /// # Panics
    ///
    /// If `x >= width`.
    #[must_use]
    pub fn column_runs(&self, x: usize) -> &[usize] {
        &self.columns[x]
    }

    /// All row clues, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Runs] {
        &self.rows
    }

    /// All column clues, left to right.
    #[must_use]
    pub fn columns(&self) -> &[Runs] {
        &self.columns
    }

    /// Number of marked cells in any solution.
    #[must_use]
    pub fn total_marked(&self) -> usize {
        self.rows.iter().flatten().sum()
    }
}

/// Lengths of the maximal runs of `true` in `cells`.
fn runs_of(cells: impl Iterator<Item = bool>) -> Runs {
    let chunks = cells.chunk_by(|&marked| marked);
    let runs = chunks
        .into_iter()
        .filter(|(marked, _)| *marked)
        .map(|(_, run)| run.count())
        .collect();
    runs
}
