//! The line enumerator and the satisfaction rule.
//!
//! A line is one row or one column. Given its runs and the cells already known, the enumerator
//! produces every fully resolved line consistent with both. Lines are stored as `BitVec`s with
//! a set bit for every marked cell.
//!
//! A line of length `n` holding runs `r_1 .. r_k` is `k` marked runs separated by `k + 1`
//! blank slots. The interior slots need at least one blank each, so
//! `free = n - sum(r) - (k - 1)` blanks remain to be distributed over the slots, and the
//! legal lines correspond one-to-one with the compositions of `free` into `k + 1` parts.

use crate::nonogram::cell::Cell;
use crate::nonogram::error::SolverError;
use crate::nonogram::puzzle::{Runs, min_length};
use bit_vec::BitVec;
use std::fmt::Display;

/// Identifies a row or a column of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineId {
    /// Row `y`.
    Row(usize),
    /// Column `x`.
    Column(usize),
}

impl Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row(y) => write!(f, "row {y}"),
            Self::Column(x) => write!(f, "column {x}"),
        }
    }
}

/// The set of fully resolved lines consistent with a line's runs and its known cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Candidates {
    len: usize,
    lines: Vec<BitVec>,
}

impl Candidates {
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub const fn line_len(&self) -> usize {
        self.len
    }

    /// Iterates over the candidates as bit vectors (set bit = marked).
    pub fn iter(&self) -> impl Iterator<Item = &BitVec> {
        self.lines.iter()
    }

    /// Iterates over the candidates as cell sequences.
    pub fn cells(&self) -> impl Iterator<Item = Vec<Cell>> + '_ {
        self.lines.iter().map(to_cells)
    }

    /// The cells on which every candidate agrees; positions where they disagree are `Unknown`.
    ///
    /// Returns `None` for an empty candidate set, where "agreement" is meaningless.
    #[must_use]
    pub fn consensus(&self) -> Option<Vec<Cell>> {
        let (first, rest) = self.lines.split_first()?;

        let mut always = first.clone();
        let mut ever = first.clone();
        for line in rest {
            always.and(line);
            ever.or(line);
        }

        Some(
            always
                .iter()
                .zip(ever.iter())
                .map(|(always, ever)| match (always, ever) {
                    (true, _) => Cell::Marked,
                    (false, false) => Cell::Unmarked,
                    (false, true) => Cell::Unknown,
                })
                .collect(),
        )
    }
}

/// Converts a resolved line to cells.
#[must_use]
pub fn to_cells(line: &BitVec) -> Vec<Cell> {
    line.iter().map(Cell::from).collect()
}

/// Enumerates every fully resolved line that has exactly the runs `runs` and agrees with every
/// known cell of `partial`.
///
/// Zero-length runs are ignored, so both `[]` and `[0]` yield the single all-blank line (if it
/// agrees with `partial`). If the runs cannot fit in `partial.len()` cells the result is empty.
#[must_use]
pub fn legal_lines(runs: &[usize], partial: &[Cell]) -> Candidates {
    let runs: Runs = runs.iter().copied().filter(|&run| run > 0).collect();
    let len = partial.len();
    let mut lines = Vec::new();

    let needed = min_length(&runs);
    if needed <= len {
        let mut line = BitVec::from_elem(len, false);
        place(&runs, partial, 0, 0, len - needed, &mut line, &mut lines);
    }

    Candidates { len, lines }
}

/// Places run `index` at or after `pos`, spending between zero and `free` spare blanks in the
/// slot before it, and recurses on the remaining runs.
///
/// Cells are checked against `partial` as they are written, so a slot or run that contradicts
/// a known cell prunes the whole subtree.
fn place(
    runs: &[usize],
    partial: &[Cell],
    index: usize,
    pos: usize,
    free: usize,
    line: &mut BitVec,
    out: &mut Vec<BitVec>,
) {
    let Some(&run) = runs.get(index) else {
        // Everything after the last run is blank.
        if partial[pos..].iter().all(|cell| cell.accepts(Cell::Unmarked)) {
            out.push(line.clone());
        }
        return;
    };

    let reserved = usize::from(index > 0);
    for extra in 0..=free {
        let start = pos + reserved + extra;
        if !partial[pos..start]
            .iter()
            .all(|cell| cell.accepts(Cell::Unmarked))
        {
            // A longer slot still covers the offending cell.
            break;
        }

        let end = start + run;
        if partial[start..end]
            .iter()
            .all(|cell| cell.accepts(Cell::Marked))
        {
            (start..end).for_each(|i| line.set(i, true));
            place(runs, partial, index + 1, end, free - extra, line, out);
            (start..end).for_each(|i| line.set(i, false));
        }
    }
}

/// Number of ways to distribute `free` blanks over `slots` slots, i.e.
/// `C(free + slots - 1, slots - 1)`. This is the size of the candidate set of a line with
/// `slots - 1` runs and no known cells.
#[must_use]
pub fn composition_count(free: usize, slots: usize) -> u128 {
    if slots == 0 {
        return u128::from(free == 0);
    }
    let n = (free + slots - 1) as u128;
    let k = (slots - 1) as u128;
    (1..=k).fold(1u128, |acc, i| acc * (n - k + i) / i)
}

/// Checks whether a fully resolved line has exactly the runs `runs`.
///
/// The line is scanned left to right. Marked cells are consumed into the current expected run;
/// a blank may only appear outside a run or exactly where a run ends. Overrunning a run, or
/// reaching the end with runs left over, fails. Zero-length runs in `runs` expect nothing.
///
/// # Errors
///
/// Returns [`SolverError::UnresolvedLine`] if `cells` contains an `Unknown` cell: satisfaction
/// is only defined for resolved lines.
pub fn satisfies(cells: &[Cell], runs: &[usize]) -> Result<bool, SolverError> {
    if cells.iter().any(|cell| cell.is_unknown()) {
        return Err(SolverError::UnresolvedLine);
    }

    let mut expected = runs.iter().copied().filter(|&run| run > 0);
    let mut remaining = 0;
    let mut in_run = false;

    for cell in cells {
        if cell.is_marked() {
            if !in_run {
                let Some(run) = expected.next() else {
                    return Ok(false);
                };
                remaining = run;
                in_run = true;
            }
            if remaining == 0 {
                return Ok(false);
            }
            remaining -= 1;
        } else if in_run {
            if remaining != 0 {
                return Ok(false);
            }
            in_run = false;
        }
    }

    Ok(remaining == 0 && expected.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn parse(s: &str) -> Vec<Cell> {
        s.chars()
            .map(|c| match c {
                '#' => Cell::Marked,
                '.' => Cell::Unmarked,
                _ => Cell::Unknown,
            })
            .collect()
    }

    fn render(line: &BitVec) -> String {
        line.iter().map(|b| if b { '#' } else { '.' }).collect()
    }

    fn all_lines(len: usize) -> impl Iterator<Item = Vec<Cell>> {
        (0..1u32 << len).map(move |bits| (0..len).map(|i| Cell::from((bits >> i) & 1 == 1)).collect())
    }

    #[test]
    fn test_enumerate_example() {
        let lines = legal_lines(&[1, 2], &parse("??????"))
            .iter()
            .map(render)
            .sorted()
            .collect_vec();
        assert_eq!(
            lines,
            vec!["#.##..", "#..##.", "#...##", ".#.##.", ".#..##", "..#.##"]
        );
    }

    #[test]
    fn test_enumerate_counts_match_compositions() {
        let cases: &[&[usize]] = &[&[], &[1], &[3], &[1, 1], &[2, 1], &[1, 2, 1], &[4, 4]];
        for len in 0..=10 {
            for runs in cases {
                let needed = min_length(runs);
                let lines = legal_lines(runs, &vec![Cell::Unknown; len]);
                if needed > len {
                    assert!(lines.is_empty(), "{runs:?} in {len}");
                    continue;
                }
                let expected = composition_count(len - needed, runs.len() + 1);
                assert_eq!(lines.len() as u128, expected, "{runs:?} in {len}");
                for cells in lines.cells() {
                    assert!(satisfies(&cells, runs).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_enumerate_sound_and_complete_on_partial_lines() {
        let mut rng = fastrand::Rng::with_seed(7);
        let cases: &[&[usize]] = &[&[], &[1], &[2], &[1, 1], &[3, 1], &[1, 1, 1]];
        for _ in 0..200 {
            let len = rng.usize(1..=8);
            let partial: Vec<Cell> = (0..len)
                .map(|_| match rng.u8(0..4) {
                    0 => Cell::Marked,
                    1 => Cell::Unmarked,
                    _ => Cell::Unknown,
                })
                .collect();
            let runs = cases[rng.usize(..cases.len())];

            let found = legal_lines(runs, &partial).cells().sorted().collect_vec();
            let expected = all_lines(len)
                .filter(|line| partial.iter().zip(line).all(|(p, c)| p.accepts(*c)))
                .filter(|line| satisfies(line, runs).unwrap())
                .sorted()
                .collect_vec();
            assert_eq!(found, expected, "{runs:?} over {partial:?}");
        }
    }

    #[test]
    fn test_enumerate_respects_knowns() {
        let lines = legal_lines(&[2], &parse("?#??"));
        assert_eq!(lines.iter().map(render).sorted().collect_vec(), vec!["##..", ".##."]);
    }

    #[test]
    fn test_zero_run_has_one_candidate() {
        let lines = legal_lines(&[0], &parse("???"));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.iter().map(render).collect_vec(), vec!["..."]);
    }

    #[test]
    fn test_empty_runs_checked_against_knowns() {
        assert_eq!(legal_lines(&[], &parse("?.?")).len(), 1);
        assert!(legal_lines(&[], &parse("?#?")).is_empty());
    }

    #[test]
    fn test_infeasible_runs() {
        assert!(legal_lines(&[2, 2], &parse("????")).is_empty());
        assert!(legal_lines(&[3], &parse("#.??")).is_empty());
    }

    #[test]
    fn test_consensus() {
        let lines = legal_lines(&[3], &parse("????"));
        assert_eq!(lines.consensus(), Some(parse("?##?")));

        let lines = legal_lines(&[1], &parse("?#??"));
        assert_eq!(lines.consensus(), Some(parse(".#..")));

        assert_eq!(legal_lines(&[5], &parse("????")).consensus(), None);
    }

    #[test]
    fn test_composition_count() {
        assert_eq!(composition_count(0, 1), 1);
        assert_eq!(composition_count(3, 1), 1);
        assert_eq!(composition_count(3, 2), 4);
        assert_eq!(composition_count(2, 3), 6);
        assert_eq!(composition_count(10, 5), 1001);
    }

    #[test]
    fn test_satisfies() {
        assert!(satisfies(&parse("#.##.."), &[1, 2]).unwrap());
        assert!(satisfies(&parse("..#.##"), &[1, 2]).unwrap());
        assert!(!satisfies(&parse("#.###."), &[1, 2]).unwrap());
        assert!(!satisfies(&parse("##.##."), &[1, 2]).unwrap());
        assert!(!satisfies(&parse("#....."), &[1, 2]).unwrap());
        assert!(!satisfies(&parse("#.#.#."), &[1, 2]).unwrap());
        assert!(satisfies(&parse("...."), &[]).unwrap());
        assert!(!satisfies(&parse("..#."), &[]).unwrap());
    }

    #[test]
    fn test_satisfies_zero_runs() {
        assert!(satisfies(&parse("..."), &[0]).unwrap());
        assert!(satisfies(&parse("#.."), &[1, 0]).unwrap());
        assert!(!satisfies(&parse("#.#"), &[1, 0]).unwrap());
    }

    #[test]
    fn test_satisfies_rejects_unknown() {
        assert_eq!(
            satisfies(&parse("#?."), &[1]),
            Err(SolverError::UnresolvedLine)
        );
    }

    #[test]
    fn test_line_id_display() {
        assert_eq!(LineId::Row(3).to_string(), "row 3");
        assert_eq!(LineId::Column(0).to_string(), "column 0");
    }
}
