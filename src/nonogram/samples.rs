//! Built-in sample puzzles.

use crate::nonogram::puzzle::PuzzleSpec;
use clap::ValueEnum;
use std::fmt::Display;
use std::sync::Arc;

/// A 3x2 puzzle solved by deduction alone.
#[must_use]
pub fn easy() -> Arc<PuzzleSpec> {
    Arc::new(PuzzleSpec::trusted(
        "easy",
        &[&[1], &[1, 1]],
        &[&[1], &[1], &[1]],
    ))
}

/// A 2x2 puzzle with two solutions, the two diagonals.
#[must_use]
pub fn ambiguous() -> Arc<PuzzleSpec> {
    Arc::new(PuzzleSpec::trusted(
        "ambiguous",
        &[&[1], &[1]],
        &[&[1], &[1]],
    ))
}

/// A well-formed 3x2 puzzle with no solution.
#[must_use]
pub fn inconsistent() -> Arc<PuzzleSpec> {
    Arc::new(PuzzleSpec::trusted(
        "inconsistent",
        &[&[1, 1], &[2]],
        &[&[2], &[0], &[2]],
    ))
}

/// A 20x20 picture that needs both deduction and branching.
#[must_use]
pub fn hard_picture() -> Arc<PuzzleSpec> {
    Arc::new(PuzzleSpec::trusted(
        "hard picture",
        &[
            &[3],
            &[5],
            &[3, 1],
            &[2, 1],
            &[3, 3, 4],
            &[2, 2, 7],
            &[6, 1, 1],
            &[4, 2, 2],
            &[1, 1],
            &[3, 1],
            &[6],
            &[2, 7],
            &[6, 3, 1],
            &[1, 2, 2, 1, 1],
            &[4, 1, 1, 3],
            &[4, 2, 2],
            &[3, 3, 1],
            &[3, 3],
            &[3],
            &[2, 1],
        ],
        &[
            &[2],
            &[1, 2],
            &[2, 3],
            &[2, 3],
            &[3, 1, 1],
            &[2, 1, 1],
            &[1, 1, 1, 2, 2],
            &[1, 1, 3, 1, 3],
            &[2, 6, 4],
            &[3, 3, 9, 1],
            &[5, 3, 2],
            &[3, 1, 2, 2],
            &[2, 1, 7],
            &[3, 3, 2],
            &[2, 4],
            &[2, 1, 2],
            &[2, 2, 1],
            &[2, 2],
            &[1],
            &[1],
        ],
    ))
}

/// Names of the built-in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleName {
    /// See [`easy`].
    Easy,
    /// See [`ambiguous`].
    Ambiguous,
    /// See [`inconsistent`].
    Inconsistent,
    /// See [`hard_picture`].
    Hard,
}

impl SampleName {
    /// Builds the sample.
    #[must_use]
    pub fn spec(self) -> Arc<PuzzleSpec> {
        match self {
            Self::Easy => easy(),
            Self::Ambiguous => ambiguous(),
            Self::Inconsistent => inconsistent(),
            Self::Hard => hard_picture(),
        }
    }
}

impl Display for SampleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Ambiguous => write!(f, "ambiguous"),
            Self::Inconsistent => write!(f, "inconsistent"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Looks a sample up by name, ignoring ASCII case.
#[must_use]
pub fn by_name(name: &str) -> Option<Arc<PuzzleSpec>> {
    SampleName::from_str(name, true).ok().map(SampleName::spec)
}
