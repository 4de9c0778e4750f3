#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Hypothesis search over a nonogram, exposed as a lazy stream of grids.
//!
//! The search is depth-first over an explicit stack of frames. Each frame owns one
//! [`SearchNode`] and moves through three states:
//!
//! 1. **Start**: the frame's grid is reported as a progress snapshot.
//! 2. **Deducing**: the node is checked for contradictions (an infeasible node is popped), then
//!    one deduction pass runs. A pass that fixed cells is reported and deduction continues. At
//!    fixity a complete grid is a solution; otherwise a branching cell is chosen.
//! 3. **Branching**: one child frame is pushed per value of the branching cell, in the order
//!    given by the phase strategy. When both children are done the frame is popped.
//!
//! Nothing runs until the consumer calls [`Iterator::next`], and each call does only enough work
//! to produce the next event. Dropping the [`Search`] cancels it.

use crate::nonogram::cache::SearchNode;
use crate::nonogram::cell::Cell;
use crate::nonogram::contradiction::{self, Verdict};
use crate::nonogram::error::SolverError;
use crate::nonogram::grid::Grid;
use crate::nonogram::phase::{PhaseOrder, PhaseOrderImpls, UnmarkedFirst};
use crate::nonogram::puzzle::PuzzleSpec;
use crate::nonogram::selection::{CellSelection, CellSelectionImpls, MinCandidates};
use crate::nonogram::solver::{Outcome, SearchStats, Solver};
use std::fmt::Debug;
use std::iter::FusedIterator;
use std::sync::Arc;
use tracing::debug;

/// Strategy types plugged into a [`Search`].
pub trait SearchConfig: Debug + Clone {
    /// Chooses the cell to branch on.
    type CellSelector: CellSelection + Debug + Clone + Default;
    /// Chooses which value of that cell is tried first.
    type PhaseOrder: PhaseOrder + Debug + Clone + Default;
}

/// Fewest-candidates cell selection, unmarked tried first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultConfig;

impl SearchConfig for DefaultConfig {
    type CellSelector = MinCandidates;
    type PhaseOrder = UnmarkedFirst;
}

/// Strategies chosen at runtime, e.g. from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DynamicConfig;

impl SearchConfig for DynamicConfig {
    type CellSelector = CellSelectionImpls;
    type PhaseOrder = PhaseOrderImpls;
}

/// When the search stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Stop at the first solved grid.
    #[default]
    FirstSolution,
    /// Keep backtracking after each solution until the search space is exhausted.
    AllSolutions,
}

/// One item of the search stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// An intermediate grid: a frame's starting point or the result of a productive deduction
    /// pass. May be partial and, inside a failing hypothesis, may not lead to any solution.
    Progress(Grid),
    /// A complete grid satisfying every row and column.
    Solved(Grid),
    /// No (further) solution exists. Always the last event of a stream that runs to the end.
    Exhausted,
}

impl SearchEvent {
    /// The grid carried by the event, if any.
    #[must_use]
    pub const fn grid(&self) -> Option<&Grid> {
        match self {
            Self::Progress(grid) | Self::Solved(grid) => Some(grid),
            Self::Exhausted => None,
        }
    }

    /// `true` for [`SearchEvent::Solved`].
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    Start,
    Deducing,
    Branching {
        x: usize,
        y: usize,
        phases: [Cell; 2],
        next: usize,
    },
}

#[derive(Debug, Clone)]
struct Frame {
    node: SearchNode,
    state: FrameState,
}

impl Frame {
    const fn new(node: SearchNode) -> Self {
        Self {
            node,
            state: FrameState::Start,
        }
    }
}

/// A lazy, resumable nonogram search.
///
/// Yields `Result<SearchEvent, SolverError>`. The stream is fused: after a terminal event
/// ([`SearchEvent::Solved`] in first-solution mode, [`SearchEvent::Exhausted`] otherwise) or an
/// error, `next` returns `None`.
///
/// ```
/// use nonogram_solver::nonogram::samples;
/// use nonogram_solver::nonogram::search::{Search, SearchEvent};
///
/// let last = Search::new(samples::easy())
///     .filter_map(Result::ok)
///     .last();
/// assert!(matches!(last, Some(SearchEvent::Solved(_))));
/// ```
#[derive(Debug, Clone)]
pub struct Search<Config: SearchConfig = DefaultConfig> {
    stack: Vec<Frame>,
    selector: Config::CellSelector,
    phases: Config::PhaseOrder,
    mode: SearchMode,
    stats: SearchStats,
    done: bool,
}

impl Search<DefaultConfig> {
    /// Searches `spec` from an all-unknown grid with the default strategies.
    #[must_use]
    pub fn new(spec: Arc<PuzzleSpec>) -> Self {
        Self::with_grid(Grid::new(spec))
    }

    /// Searches from a caller-supplied starting grid with the default strategies.
    ///
    /// Cells already resolved in `grid` are taken as given.
    #[must_use]
    pub fn with_grid(grid: Grid) -> Self {
        Self::configured(grid, SearchMode::default())
    }
}

impl<Config: SearchConfig> Search<Config> {
    /// Searches from `grid` with default-constructed strategies of `Config`.
    #[must_use]
    pub fn configured(grid: Grid, mode: SearchMode) -> Self {
        Self::from_parts(
            grid,
            Config::CellSelector::default(),
            Config::PhaseOrder::default(),
            mode,
        )
    }

    /// Searches from `grid` with explicit strategy instances.
    ///
    /// # Arguments
    ///
    /// * `grid` - The starting grid. All-unknown for a fresh puzzle.
    /// * `selector` - Picks the cell to branch on at fixity.
    /// * `phases` - Orders the two values tried on that cell.
    /// * `mode` - Whether to stop at the first solution.
    #[must_use]
    pub fn from_parts(
        grid: Grid,
        selector: Config::CellSelector,
        phases: Config::PhaseOrder,
        mode: SearchMode,
    ) -> Self {
        Self {
            stack: vec![Frame::new(SearchNode::new(grid))],
            selector,
            phases,
            mode,
            stats: SearchStats::default(),
            done: false,
        }
    }

    /// Replaces the stop condition.
    #[must_use]
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// The current stop condition.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Number of live frames. Zero once the search has finished.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// `true` once the stream has produced its last item.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.done
    }

    /// Advances the top frame by one state transition.
    ///
    /// Returns the event produced by the transition, if any.
    fn step(&mut self) -> Result<Option<SearchEvent>, SolverError> {
        let depth = self.stack.len().saturating_sub(1);
        let Some(frame) = self.stack.last_mut() else {
            self.done = true;
            return Ok(Some(SearchEvent::Exhausted));
        };

        match frame.state {
            FrameState::Start => {
                frame.state = FrameState::Deducing;
                Ok(Some(SearchEvent::Progress(frame.node.grid().clone())))
            }
            FrameState::Deducing => {
                if let Verdict::Infeasible { line } = contradiction::check(&frame.node)? {
                    debug!(%line, depth, "dead end");
                    self.stats.dead_ends += 1;
                    self.stack.pop();
                    return Ok(None);
                }

                let pass = frame.node.deduce()?;
                self.stats.deduction_passes += 1;
                if pass.changed() {
                    self.stats.cells_deduced += pass.fixed;
                    return Ok(Some(SearchEvent::Progress(frame.node.grid().clone())));
                }

                if frame.node.grid().complete() {
                    let grid = frame.node.grid().clone();
                    self.stats.solutions += 1;
                    debug!(depth, solutions = self.stats.solutions, "solution found");
                    match self.mode {
                        SearchMode::FirstSolution => {
                            self.done = true;
                            self.stack.clear();
                        }
                        SearchMode::AllSolutions => {
                            self.stack.pop();
                        }
                    }
                    return Ok(Some(SearchEvent::Solved(grid)));
                }

                let (x, y) = self
                    .selector
                    .pick(&frame.node)
                    .ok_or(SolverError::NoBranchingCell)?;
                let phases = self.phases.phases(x, y, &frame.node);
                self.stats.branches += 1;
                debug!(x, y, first = ?phases[0], depth, "branching");
                frame.state = FrameState::Branching {
                    x,
                    y,
                    phases,
                    next: 0,
                };
                Ok(None)
            }
            FrameState::Branching { x, y, phases, next } => {
                let Some(&value) = phases.get(next) else {
                    self.stack.pop();
                    return Ok(None);
                };
                frame.state = FrameState::Branching {
                    x,
                    y,
                    phases,
                    next: next + 1,
                };
                let child = frame.node.hypothesize(x, y, value)?;
                self.stack.push(Frame::new(child));
                self.stats.max_depth = self.stats.max_depth.max(depth + 1);
                Ok(None)
            }
        }
    }
}

impl<Config: SearchConfig> Iterator for Search<Config> {
    type Item = Result<SearchEvent, SolverError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.step() {
                Ok(Some(event)) => {
                    self.stats.events += 1;
                    return Some(Ok(event));
                }
                Ok(None) => {}
                Err(e) => {
                    self.done = true;
                    self.stack.clear();
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl<Config: SearchConfig> FusedIterator for Search<Config> {}

impl<Config: SearchConfig> Solver for Search<Config> {
    /// Pulls events until the next solution or the end of the stream.
    ///
    /// `Exhausted` only means unsatisfiable when no solution came before it.
    fn solve(&mut self) -> Result<Outcome, SolverError> {
        while let Some(event) = self.next() {
            match event? {
                SearchEvent::Solved(grid) => return Ok(Outcome::Solved(grid)),
                SearchEvent::Exhausted if self.stats.solutions == 0 => {
                    return Ok(Outcome::Unsatisfiable);
                }
                SearchEvent::Exhausted => break,
                SearchEvent::Progress(_) => {}
            }
        }
        Err(SolverError::Finished)
    }

    /// Switches to [`SearchMode::AllSolutions`] and drains the stream.
    fn solutions(&mut self) -> Result<Vec<Grid>, SolverError> {
        if self.done {
            return Err(SolverError::Finished);
        }
        self.mode = SearchMode::AllSolutions;
        let mut solutions = Vec::new();
        for event in self.by_ref() {
            if let SearchEvent::Solved(grid) = event? {
                solutions.push(grid);
            }
        }
        Ok(solutions)
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
