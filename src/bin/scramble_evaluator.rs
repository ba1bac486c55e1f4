use clap::Parser;
use env_logger::Env;
use npuzzle_solver::board::Board;
use npuzzle_solver::error::ErrorKind;
use npuzzle_solver::solver::{Solver, SolverConfig};
use std::process;

/// Solves a series of seeded random boards and reports how hard the search found them.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Board dimension
    #[clap(short, long, default_value_t = 3)]
    dimension: usize,

    /// Number of boards to generate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Scramble by this many random blank slides from the goal instead of shuffling
    /// every tile (shuffled boards are unsolvable about half the time)
    #[clap(long)]
    steps: Option<usize>,

    /// Abort a board after expanding this many boards
    #[clap(long, default_value_t = 2_000_000)]
    max_expansions: usize,

    /// Skip boards that were already expanded in the same search lane
    #[clap(long)]
    closed_set: bool,

    /// Log search progress to stderr
    #[clap(short, long)]
    verbose: bool,
}

#[derive(Default)]
struct Tally {
    solvable: usize,
    unsolvable: usize,
    aborted: usize,
    total_moves: usize,
    total_expanded: usize,
}

fn main() {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = SolverConfig {
        max_expansions: Some(args.max_expansions),
        closed_set: args.closed_set,
    };

    println!(
        "Evaluating {} boards of dimension {}...",
        args.boards, args.dimension
    );

    let mut tally = Tally::default();
    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let generated = match args.steps {
            Some(steps) => Board::scrambled(args.dimension, steps, current_seed),
            None => Board::random_with_seed(args.dimension, current_seed),
        };
        let board = generated.unwrap_or_else(|e| {
            eprintln!("Cannot generate board: {}", e);
            process::exit(1);
        });

        match Solver::with_config(&board, &config) {
            Ok(solver) => {
                let stats = solver.stats();
                tally.total_expanded += stats.total_expanded();
                if solver.is_solvable() {
                    tally.solvable += 1;
                    tally.total_moves += solver.moves() as usize;
                } else {
                    tally.unsolvable += 1;
                }
                println!(
                    "  Seed: {:<6} Moves: {:<4} Expanded: {:<9} Frontier peak: {}",
                    current_seed,
                    solver.moves(),
                    stats.total_expanded(),
                    stats.max_frontier
                );
            }
            Err(e) if e.kind() == ErrorKind::SearchAborted => {
                tally.aborted += 1;
                println!("  Seed: {:<6} {}", current_seed, e);
            }
            Err(e) => {
                eprintln!("Seed {}: {}", current_seed, e);
                process::exit(2);
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Solvable: {}", tally.solvable);
    println!("Unsolvable: {}", tally.unsolvable);
    println!("Aborted: {}", tally.aborted);
    if tally.solvable > 0 {
        println!(
            "Average moves (solvable): {:.2}",
            tally.total_moves as f64 / tally.solvable as f64
        );
    }
    let finished = tally.solvable + tally.unsolvable;
    if finished > 0 {
        println!(
            "Average expansions (finished): {:.2}",
            tally.total_expanded as f64 / finished as f64
        );
    }
}
