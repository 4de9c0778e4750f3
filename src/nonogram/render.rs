//! ASCII rendering of puzzles and grids.
//!
//! ```text
//!        1  1  1
//!     +---------
//!   1 | .  ## .
//! 1 1 | ## .  ##
//! ```
//!
//! Column clues are stacked bottom-aligned above their column, row clues are right-aligned left
//! of the bar. An empty clue is shown as `0`.

use crate::nonogram::cell::Cell;
use crate::nonogram::grid::Grid;
use crate::nonogram::puzzle::PuzzleSpec;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

fn clue_text(runs: &[usize]) -> String {
    if runs.is_empty() {
        "0".to_owned()
    } else {
        runs.iter().join(" ")
    }
}

fn render(
    f: &mut Formatter<'_>,
    spec: &PuzzleSpec,
    cell: impl Fn(usize, usize) -> Cell,
) -> fmt::Result {
    let row_clues = spec.rows().iter().map(|runs| clue_text(runs)).collect_vec();
    let clue_width = row_clues.iter().map(String::len).max().unwrap_or(0);
    let header_rows = spec
        .columns()
        .iter()
        .map(|runs| runs.len().max(1))
        .max()
        .unwrap_or(1);

    for i in 0..header_rows {
        write!(f, "{:width$}", "", width = clue_width + 2)?;
        for runs in spec.columns() {
            let shown: &[usize] = if runs.is_empty() { &[0] } else { runs };
            match (i + shown.len()).checked_sub(header_rows) {
                Some(idx) => write!(f, "{:>3}", shown[idx])?,
                None => write!(f, "   ")?,
            }
        }
        writeln!(f)?;
    }
    write!(
        f,
        "{:width$}+{}",
        "",
        "---".repeat(spec.width()),
        width = clue_width + 1
    )?;

    for (y, clue) in row_clues.iter().enumerate() {
        write!(f, "\n{clue:>clue_width$} |")?;
        for x in 0..spec.width() {
            write!(f, " {}", cell(x, y))?;
        }
    }
    Ok(())
}

impl Display for PuzzleSpec {
    /// The clues around an empty board.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        render(f, self, |_, _| Cell::Unknown)
    }
}

impl Display for Grid {
    /// The clues of the grid's puzzle around its current cells.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        render(f, self.spec(), |x, y| self[(x, y)])
    }
}
