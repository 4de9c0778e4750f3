#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the line-oriented nonogram text format used by
//! [nonogram-db](https://github.com/mikix/nonogram-db).
//!
//! ```text
//! # An optional comment
//! title "Easy Puzzle"
//! width 3
//! height 2
//!
//! rows
//! 1
//! 1,1
//!
//! columns
//! 1
//! 1
//! 1
//! ```
//!
//! - Lines whose first non-blank character is `#` are comments.
//! - `title`, `width` and `height` are optional. When given, `width` and `height` must match
//!   the number of column and row clues.
//! - `rows` and `columns` each open a block of clues, one line per row (or column). Run
//!   lengths are separated by commas or whitespace, and `0` is an empty line.
//! - A block ends at a blank line, at the next keyword, or at the end of the input.
//! - Any other keyword (`catalogue`, `copyright`, `goal`, ...) is ignored.

use crate::nonogram::error::ParseError;
use crate::nonogram::puzzle::PuzzleSpec;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Header,
    Rows,
    Columns,
}

#[derive(Debug, Default)]
struct Parser {
    title: Option<String>,
    width: Option<usize>,
    height: Option<usize>,
    rows: Option<Vec<Vec<usize>>>,
    columns: Option<Vec<Vec<usize>>>,
}

impl Parser {
    fn header_line(&mut self, line: &str, number: usize) -> Result<Mode, ParseError> {
        let (keyword, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args = args.trim();
        match keyword {
            "rows" => {
                if self.rows.replace(Vec::new()).is_some() {
                    return Err(syntax(number, "second rows block"));
                }
                Ok(Mode::Rows)
            }
            "columns" => {
                if self.columns.replace(Vec::new()).is_some() {
                    return Err(syntax(number, "second columns block"));
                }
                Ok(Mode::Columns)
            }
            "width" => {
                self.width = Some(number_arg(args, number)?);
                Ok(Mode::Header)
            }
            "height" => {
                self.height = Some(number_arg(args, number)?);
                Ok(Mode::Header)
            }
            "title" => {
                self.title = Some(unquote(args).to_owned());
                Ok(Mode::Header)
            }
            _ => Ok(Mode::Header),
        }
    }

    fn clue_line(&mut self, mode: Mode, line: &str, number: usize) -> Result<(), ParseError> {
        let runs = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<usize>()
                    .map_err(|source| ParseError::InvalidNumber {
                        line: number,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let block = match mode {
            Mode::Rows => self.rows.as_mut(),
            Mode::Columns => self.columns.as_mut(),
            Mode::Header => None,
        };
        block
            .ok_or_else(|| syntax(number, "clue outside of a rows or columns block"))?
            .push(runs);
        Ok(())
    }

    fn finish(self, last_line: usize) -> Result<PuzzleSpec, ParseError> {
        let rows = self
            .rows
            .ok_or_else(|| syntax(last_line, "missing rows block"))?;
        let columns = self
            .columns
            .ok_or_else(|| syntax(last_line, "missing columns block"))?;

        if let Some(height) = self.height.filter(|&h| h != rows.len()) {
            return Err(syntax(
                last_line,
                &format!("height is {height} but there are {} rows", rows.len()),
            ));
        }
        if let Some(width) = self.width.filter(|&w| w != columns.len()) {
            return Err(syntax(
                last_line,
                &format!("width is {width} but there are {} columns", columns.len()),
            ));
        }

        let spec = match self.title {
            Some(title) => PuzzleSpec::named(title, rows, columns)?,
            None => PuzzleSpec::new(rows, columns)?,
        };
        Ok(spec)
    }
}

fn syntax(line: usize, message: &str) -> ParseError {
    ParseError::Syntax {
        line,
        message: message.to_owned(),
    }
}

fn number_arg(args: &str, line: usize) -> Result<usize, ParseError> {
    args.parse()
        .map_err(|source| ParseError::InvalidNumber { line, source })
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

/// Parses a puzzle from a `BufRead` source.
///
/// # Errors
///
/// - [`ParseError::Io`] if reading fails.
/// - [`ParseError::InvalidNumber`] for a clue or dimension that is not a non-negative integer.
/// - [`ParseError::Syntax`] for a missing or repeated block, a clue outside a block, or a
///   `width`/`height` that disagrees with the clues.
/// - [`ParseError::Spec`] if the clues do not form a valid puzzle.
pub fn parse_nonogram<R: BufRead>(reader: R) -> Result<PuzzleSpec, ParseError> {
    let mut parser = Parser::default();
    let mut mode = Mode::Header;
    let mut number = 0;

    for line in reader.lines() {
        let line = line?;
        number += 1;
        let line = line.trim();

        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            mode = Mode::Header;
            continue;
        }

        if line.starts_with(|c: char| c.is_ascii_digit()) {
            parser.clue_line(mode, line, number)?;
        } else {
            mode = parser.header_line(line, number)?;
        }
    }

    parser.finish(number)
}

/// Parses the puzzle file at `path`.
///
/// # Errors
///
/// See [`parse_nonogram`]. Failing to open the file is a [`ParseError::Io`].
pub fn parse_nonogram_file(path: impl AsRef<Path>) -> Result<PuzzleSpec, ParseError> {
    let file = File::open(path)?;
    parse_nonogram(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonogram::error::SpecError;
    use crate::nonogram::samples;

    fn parse(text: &str) -> Result<PuzzleSpec, ParseError> {
        parse_nonogram(text.as_bytes())
    }

    #[test]
    fn test_parse_easy() {
        let spec = parse(
            "# easy\ntitle \"Easy Puzzle\"\nwidth 3\nheight 2\n\nrows\n1\n1,1\n\ncolumns\n1\n1\n1\n",
        )
        .unwrap();
        assert_eq!(spec.name(), Some("Easy Puzzle"));
        assert_eq!(spec.rows(), samples::easy().rows());
        assert_eq!(spec.columns(), samples::easy().columns());
    }

    #[test]
    fn test_blocks_end_at_keywords() {
        let spec = parse("columns\n2\n0\n2\nrows\n1 1\n2\ncopyright \"nobody\"").unwrap();
        assert_eq!(spec.width(), 3);
        assert_eq!(spec.height(), 2);
        assert_eq!(spec.column_runs(1), &[] as &[usize]);
        assert_eq!(spec.row_runs(0), &[1, 1]);
        assert_eq!(spec.name(), None);
    }

    #[test]
    fn test_invalid_number() {
        let err = parse("rows\n1,x\ncolumns\n1\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 2, .. }), "{err}");

        let err = parse("width three\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 1, .. }), "{err}");
    }

    #[test]
    fn test_missing_block() {
        let err = parse("rows\n1\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }), "{err}");
    }

    #[test]
    fn test_repeated_block() {
        let err = parse("rows\n1\n\nrows\n1\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = parse("width 2\nrows\n1\ncolumns\n1\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }), "{err}");
    }

    #[test]
    fn test_clue_outside_block() {
        let err = parse("title x\n\n1\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_invalid_puzzle() {
        let err = parse("rows\n2\ncolumns\n1\n").unwrap_err();
        assert!(
            matches!(err, ParseError::Spec(SpecError::SumMismatch { rows: 2, columns: 1 })),
            "{err}"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = parse_nonogram_file("/nonexistent/puzzle.non").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
