use std::fmt::Display;

/// The state of a single grid cell.
///
/// A cell starts out `Unknown` and is resolved exactly once, to either `Marked` or
/// `Unmarked`. Resolved cells never change again for the lifetime of a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cell {
    /// Not yet decided.
    #[default]
    Unknown,
    /// Part of a run.
    Marked,
    /// Left blank.
    Unmarked,
}

impl Cell {
    /// Returns `true` if the cell has been resolved to either `Marked` or `Unmarked`.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns `true` if the cell is still `Unknown`.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns `true` if the cell is `Marked`.
    #[must_use]
    pub const fn is_marked(self) -> bool {
        matches!(self, Self::Marked)
    }

    /// The opposite resolved value. `Unknown` stays `Unknown`.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Marked => Self::Unmarked,
            Self::Unmarked => Self::Marked,
            Self::Unknown => Self::Unknown,
        }
    }

    /// Whether a fully resolved candidate value can be laid over this cell, that is,
    /// whether the cell is `Unknown` or already holds the same value.
    #[must_use]
    pub fn accepts(self, candidate: Self) -> bool {
        self == Self::Unknown || self == candidate
    }
}

impl From<bool> for Cell {
    fn from(marked: bool) -> Self {
        if marked { Self::Marked } else { Self::Unmarked }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Marked => write!(f, "##"),
            Self::Unmarked => write!(f, ". "),
            Self::Unknown => write!(f, "  "),
        }
    }
}
