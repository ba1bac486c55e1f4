use clap::Parser;
use env_logger::Env;
use npuzzle_solver::solver::{Solver, SolverConfig};
use npuzzle_solver::utils::read_board_file;
use std::path::PathBuf;
use std::process;

/// Solves every puzzle file given and prints `<file>: <moves>`, with -1 for unsolvable boards.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Puzzle files to check
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// Give up on a puzzle after expanding this many boards
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Skip boards that were already expanded in the same search lane
    #[clap(long)]
    closed_set: bool,

    /// Log search progress to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = SolverConfig {
        max_expansions: args.max_expansions,
        closed_set: args.closed_set,
    };

    let mut failures = 0;
    for path in &args.files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match read_board_file(path).and_then(|board| Solver::with_config(&board, &config)) {
            Ok(solver) => println!("{}: {}", name, solver.moves()),
            Err(e) => {
                println!("{}: error ({})", name, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        process::exit(1);
    }
}
