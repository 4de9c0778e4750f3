#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use nonogram_solver::nonogram::brute_force::BruteForce;
use nonogram_solver::nonogram::grid::Grid;
use nonogram_solver::nonogram::parser::parse_nonogram_file;
use nonogram_solver::nonogram::phase::PhaseOrderType;
use nonogram_solver::nonogram::puzzle::PuzzleSpec;
use nonogram_solver::nonogram::samples::SampleName;
use nonogram_solver::nonogram::search::{DynamicConfig, Search, SearchEvent, SearchMode};
use nonogram_solver::nonogram::selection::CellSelectionType;
use nonogram_solver::nonogram::solver::{SearchStats, Solver};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::warn;

/// Defines the command-line interface for the nonogram solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "nonogram",
    version,
    about = "A nonogram solver",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `dir`, `sample`, `random`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

impl Cli {
    /// Whether debug logging was requested, wherever the flag was given.
    pub(crate) fn debug(&self) -> bool {
        match &self.command {
            Some(
                Commands::File { common, .. }
                | Commands::Dir { common, .. }
                | Commands::Sample { common, .. }
                | Commands::Random { common, .. },
            ) => common.debug,
            Some(Commands::Completions { .. }) | None => self.common.debug,
        }
    }
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.non` puzzle file under a directory.
    Dir {
        /// Path to the directory.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve one of the built-in sample puzzles.
    Sample {
        /// Which sample to solve.
        #[arg(long, value_enum)]
        name: SampleName,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate a random picture, derive its clues and solve them.
    Random {
        /// Number of columns.
        #[arg(long, default_value_t = 10)]
        width: usize,

        /// Number of rows.
        #[arg(long, default_value_t = 10)]
        height: usize,

        /// Probability that a cell of the picture is marked.
        #[arg(long, default_value_t = 0.5)]
        density: f64,

        /// Seed for the picture generator. Random if omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging of branching, dead ends and solutions.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Re-check every solution against the clues before reporting it.
    #[arg(long, default_value_t = false)]
    pub(crate) verify: bool,

    /// Print search and memory statistics after solving.
    #[arg(long, default_value_t = false)]
    pub(crate) stats: bool,

    /// Print every intermediate grid, not only the solutions.
    #[arg(long, default_value_t = false)]
    pub(crate) steps: bool,

    /// Enumerate all solutions instead of stopping at the first.
    #[arg(long, default_value_t = false)]
    pub(crate) all: bool,

    /// Use the exhaustive brute-force solver. Only feasible for small puzzles.
    #[arg(long, default_value_t = false)]
    pub(crate) brute_force: bool,

    /// How the search picks the cell to branch on.
    #[arg(long, default_value_t = CellSelectionType::MinCandidates)]
    pub(crate) cell_selection: CellSelectionType,

    /// Which value the search tries first on the branching cell.
    #[arg(long, default_value_t = PhaseOrderType::UnmarkedFirst)]
    pub(crate) phase_order: PhaseOrderType,

    /// Stop after this many search events.
    #[arg(long)]
    pub(crate) max_steps: Option<usize>,
}

/// What a single solver run produced.
#[derive(Debug, Clone, Default)]
pub(crate) struct Report {
    /// Solutions, in the order they were found.
    pub solutions: Vec<Grid>,
    /// `false` when the step limit cut the search short.
    pub finished: bool,
    /// Solver counters.
    pub stats: SearchStats,
    /// Time spent solving.
    pub elapsed: Duration,
}

/// Solves a directory of puzzle files.
/// This function iterates over all `.non` files in the directory, parses each file,
/// solves it, and reports the results.
///
/// # Errors
///
/// If the path is not a directory, or a puzzle file cannot be parsed or solved.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "non") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }

        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Parses a puzzle file, solves it and reports the results.
///
/// # Errors
///
/// If the file does not exist or cannot be parsed, or the solver fails.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    let time = Instant::now();
    let spec = parse_nonogram_file(path)
        .map_err(|e| format!("Error parsing puzzle file {}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    solve_and_report(Arc::new(spec), common, Some(path), parse_time)
}

/// Solves a built-in sample puzzle.
///
/// # Errors
///
/// If the solver fails.
pub(crate) fn solve_sample(name: SampleName, common: &CommonOptions) -> Result<(), String> {
    solve_and_report(name.spec(), common, None, Duration::ZERO)
}

/// Generates a random picture, derives its clues and solves them.
///
/// # Errors
///
/// If the dimensions are zero or the density is not a probability, or the solver fails.
pub(crate) fn solve_random(
    width: usize,
    height: usize,
    density: f64,
    seed: Option<u64>,
    common: &CommonOptions,
) -> Result<(), String> {
    if !(0.0..=1.0).contains(&density) {
        return Err(format!("Density must be between 0 and 1, got {density}"));
    }

    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    println!("Seed: {seed}");
    let mut rng = fastrand::Rng::with_seed(seed);

    let time = Instant::now();
    let picture: Vec<Vec<bool>> = (0..height)
        .map(|_| (0..width).map(|_| rng.f64() < density).collect())
        .collect();
    let spec = PuzzleSpec::from_picture(&picture).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    solve_and_report(Arc::new(spec), common, None, parse_time)
}

/// Runs the solver selected by `common` over `spec`.
///
/// # Errors
///
/// If the solver reports an internal error, or brute force is asked to handle too many cells.
pub(crate) fn solve(spec: Arc<PuzzleSpec>, common: &CommonOptions) -> Result<Report, String> {
    if let Err(e) = epoch::advance() {
        warn!(error = %e, "could not refresh allocator statistics");
    }

    let time = Instant::now();
    let grid = Grid::new(spec);
    let mut report = Report::default();

    if common.brute_force {
        let mut solver = BruteForce::new(grid).map_err(|e| e.to_string())?;
        if common.all {
            report.solutions = solver.solutions().map_err(|e| e.to_string())?;
        } else {
            report
                .solutions
                .extend(solver.solve().map_err(|e| e.to_string())?.grid().cloned());
        }
        report.finished = true;
        report.stats = solver.stats();
    } else {
        let mode = if common.all {
            SearchMode::AllSolutions
        } else {
            SearchMode::FirstSolution
        };
        let mut search = Search::<DynamicConfig>::from_parts(
            grid,
            common.cell_selection.to_impl(),
            common.phase_order.to_impl(),
            mode,
        );

        let limit = common.max_steps.unwrap_or(usize::MAX);
        for (step, event) in search.by_ref().take(limit).enumerate() {
            match event.map_err(|e| e.to_string())? {
                SearchEvent::Progress(grid) if common.steps => {
                    println!("Step {step}:\n{grid}\n");
                }
                SearchEvent::Solved(grid) => {
                    if common.steps {
                        println!("Step {step} (solved):\n{grid}\n");
                    }
                    report.solutions.push(grid);
                }
                SearchEvent::Progress(_) | SearchEvent::Exhausted => {}
            }
        }
        report.finished = search.is_finished();
        report.stats = search.stats();
    }

    report.elapsed = time.elapsed();
    Ok(report)
}

/// Checks every solution against the clues of its puzzle.
///
/// # Errors
///
/// If some solution is incomplete or breaks a clue.
pub(crate) fn verify_solutions(solutions: &[Grid]) -> Result<(), String> {
    if solutions.is_empty() {
        println!("UNSATISFIABLE");
        return Ok(());
    }
    for (i, grid) in solutions.iter().enumerate() {
        let ok = grid.complete() && grid.correct();
        println!("Verified solution {}: {ok}", i + 1);
        if !ok {
            return Err(format!("Solution {} failed verification:\n{grid}", i + 1));
        }
    }
    Ok(())
}

/// Solves `spec` and reports results including stats and verification.
///
/// This function is a convenience wrapper around `solve`, `verify_solutions`, and `print_stats`.
///
/// # Arguments
/// * `spec` - The puzzle, typically parsed from a file.
/// * `common` - `CommonOptions` providing solver configuration.
/// * `label` - An optional label for the problem (e.g. file path).
/// * `parse_time` - The time taken to parse or generate the puzzle.
///
/// # Errors
///
/// If solving or verification fails.
pub(crate) fn solve_and_report(
    spec: Arc<PuzzleSpec>,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<(), String> {
    for line in header(&spec, label) {
        println!("{line}");
    }
    println!("{spec}\n");

    let report = solve(Arc::clone(&spec), common)?;
    let (allocated_mib, resident_mib) = memory_usage();

    if common.verify {
        verify_solutions(&report.solutions)?;
    }

    if common.stats {
        print_stats(parse_time, &spec, &report, allocated_mib, resident_mib);
    }

    if !common.steps {
        for grid in &report.solutions {
            println!("{grid}\n");
        }
    }

    match (report.solutions.len(), report.finished) {
        (0, true) => println!("UNSATISFIABLE"),
        (0, false) => println!("UNKNOWN (step limit reached)"),
        (n, true) if common.all => println!("SOLVED ({n} solutions)"),
        (n, false) if common.all => println!("SOLVED ({n} solutions so far, step limit reached)"),
        _ => println!("SOLVED"),
    }
    Ok(())
}

/// The lines naming the puzzle before it is drawn.
fn header(spec: &PuzzleSpec, label: Option<&Path>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(path) = label {
        lines.push(format!("Solving: {}", path.display()));
    }
    if let Some(name) = spec.name() {
        lines.push(format!("Puzzle: {name}"));
    }
    lines
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage() -> (f64, f64) {
    if let Err(e) = epoch::advance() {
        warn!(error = %e, "could not refresh allocator statistics");
    }

    let allocated_bytes = stats::allocated::mib().and_then(|m| m.read()).unwrap_or(0);
    let resident_bytes = stats::resident::mib().and_then(|m| m.read()).unwrap_or(0);

    (
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    )
}

/// Helper function to print a single statistic line in a formatted table row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The raw count for the statistic.
/// * `elapsed` - The elapsed time in seconds, used to calculate the rate.
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing or generating the puzzle.
/// * `spec` - The puzzle.
/// * `report` - What the solver produced.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
pub(crate) fn print_stats(
    parse_time: Duration,
    spec: &PuzzleSpec,
    report: &Report,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = report.elapsed.as_secs_f64();
    let s = &report.stats;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Grid", format!("{} x {}", spec.width(), spec.height()));
    stat_line("Cells", spec.width() * spec.height());
    stat_line("Marked cells", spec.total_marked());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Deduction passes", s.deduction_passes, elapsed_secs);
    stat_line("Cells deduced", s.cells_deduced);
    stat_line_with_rate("Branches", s.branches, elapsed_secs);
    stat_line("Dead ends", s.dead_ends);
    stat_line("Max depth", s.max_depth);
    stat_line_with_rate("Events", s.events, elapsed_secs);
    stat_line("Solutions", s.solutions);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use nonogram_solver::nonogram::samples;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sample_command() {
        let cli = Cli::try_parse_from([
            "nonogram",
            "sample",
            "--name",
            "ambiguous",
            "--all",
            "--phase-order",
            "marked-first",
        ])
        .unwrap();
        let Some(Commands::Sample { name, common }) = cli.command else {
            panic!("expected the sample command");
        };
        assert_eq!(name, SampleName::Ambiguous);
        assert!(common.all);
        assert_eq!(common.phase_order, PhaseOrderType::MarkedFirst);
        assert_eq!(common.cell_selection, CellSelectionType::MinCandidates);
    }

    #[test]
    fn test_sample_header_names_puzzle_once() {
        assert_eq!(header(&samples::easy(), None), ["Puzzle: easy"]);
        assert_eq!(
            header(&samples::easy(), Some(Path::new("easy.non"))),
            ["Solving: easy.non", "Puzzle: easy"]
        );
    }

    #[test]
    fn test_parse_bare_path() {
        let cli = Cli::try_parse_from(["nonogram", "puzzle.non", "--debug"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("puzzle.non")));
        assert!(cli.command.is_none());
        assert!(cli.debug());
    }

    #[test]
    fn test_solve_all_solutions() {
        let common = CommonOptions {
            all: true,
            ..CommonOptions::default()
        };
        let report = solve(samples::ambiguous(), &common).unwrap();
        assert_eq!(report.solutions.len(), 2);
        assert!(report.finished);
    }

    #[test]
    fn test_solve_with_step_limit() {
        let common = CommonOptions {
            max_steps: Some(1),
            ..CommonOptions::default()
        };
        let report = solve(samples::hard_picture(), &common).unwrap();
        assert!(report.solutions.is_empty());
        assert!(!report.finished);
    }

    #[test]
    fn test_brute_force_agrees() {
        let common = CommonOptions {
            all: true,
            brute_force: true,
            ..CommonOptions::default()
        };
        let brute = solve(samples::ambiguous(), &common).unwrap();
        let search = solve(
            samples::ambiguous(),
            &CommonOptions {
                brute_force: false,
                ..common
            },
        )
        .unwrap();
        assert_eq!(brute.solutions.len(), search.solutions.len());
    }

    #[test]
    fn test_verify_solutions() {
        let mut grid = Grid::new(samples::ambiguous());
        grid.mark(0, 0).unwrap();
        grid.mark(1, 0).unwrap();
        grid.unmark(0, 1).unwrap();
        grid.unmark(1, 1).unwrap();
        assert!(verify_solutions(&[grid]).is_err());
        assert!(verify_solutions(&[]).is_ok());
    }
}
