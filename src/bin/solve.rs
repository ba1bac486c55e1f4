use clap::Parser;
use env_logger::Env;
use npuzzle_solver::solver::{Solver, SolverConfig};
use npuzzle_solver::utils::{read_board_file, render_outcome};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the puzzle file (dimension followed by the tiles in row-major order)
    board_file: PathBuf,

    /// Give up after expanding this many boards
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Skip boards that were already expanded in the same search lane
    #[clap(long)]
    closed_set: bool,

    /// Print the direction the blank slides at each step
    #[clap(long)]
    directions: bool,

    /// Log search progress to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let board = read_board_file(&args.board_file).unwrap_or_else(|e| {
        eprintln!("Failed to load {}: {}", args.board_file.display(), e);
        process::exit(1);
    });

    let config = SolverConfig {
        max_expansions: args.max_expansions,
        closed_set: args.closed_set,
    };
    let solver = Solver::with_config(&board, &config).unwrap_or_else(|e| {
        eprintln!("Failed to solve {}: {}", args.board_file.display(), e);
        process::exit(2);
    });

    print!("{}", render_outcome(&solver));
    if args.directions {
        if let Some(directions) = solver.directions() {
            let names: Vec<String> = directions.iter().map(ToString::to_string).collect();
            println!("Blank moves: {}", names.join(" "));
        }
    }
}
