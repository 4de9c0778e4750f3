#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! # nonogram
//!
//! `nonogram` is a command-line nonogram (picross) solver. It alternates line-by-line deduction
//! with hypothesis search, and can also fall back to an exhaustive brute-force solver for small
//! puzzles.
//!
//! ## Usage
//!
//! ```sh
//! nonogram [OPTIONS] [PATH] [COMMAND]
//! ```
//!
//! -   `path`: If provided without a subcommand, it's treated as a path to a puzzle file.
//!
//! ### Subcommands
//!
//! 1.  **`file`**: Solve a puzzle file (`nonogram file --path puzzle.non`).
//! 2.  **`dir`**: Solve every `.non` file under a directory (`nonogram dir --path puzzles/`).
//! 3.  **`sample`**: Solve a built-in sample (`nonogram sample --name hard`).
//! 4.  **`random`**: Solve the clues of a random picture
//!     (`nonogram random --width 15 --height 15 --density 0.6 --seed 7`).
//! 5.  **`completions`**: Print shell completions (`nonogram completions bash`).
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Log branching, dead ends and solutions to stderr.
//! -   `--verify`: Re-check every solution against the clues.
//! -   `--stats`: Print search and memory statistics.
//! -   `--steps`: Print every intermediate grid.
//! -   `--all`: Enumerate all solutions.
//! -   `--brute-force`: Use the exhaustive solver.
//! -   `--cell-selection <min-candidates|fixed-order>`: Branching cell heuristic.
//! -   `--phase-order <unmarked-first|marked-first|majority>`: Value tried first.
//! -   `--max-steps <N>`: Stop after `N` search events.
//!
//! Set `RUST_LOG` for finer control over logging, e.g. `RUST_LOG=nonogram_solver=trace`.

mod command_line;

use crate::command_line::cli::{
    Cli, Commands, solve_dir, solve_file, solve_random, solve_sample,
};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

/// Global allocator using `tikv-jemallocator` for memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Installs the `tracing` subscriber. `--debug` forces debug level; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point.
///
/// Parses command-line arguments, dispatches to the appropriate command handler,
/// and exits non-zero on error.
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug());

    let result = match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Sample { name, common }) => solve_sample(name, &common),
        Some(Commands::Random {
            width,
            height,
            density,
            seed,
            common,
        }) => solve_random(width, height, density, seed, &common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "nonogram", &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_file(&path, &cli.common),
            None => Err("No command provided. Use --help for more information.".to_owned()),
        },
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
