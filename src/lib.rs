//! # N-Puzzle Solver Library
//!
//! This library models the sliding-tile puzzle (8-puzzle, 15-puzzle and larger square
//! variants) and finds minimum-move solutions with A* search. Unsolvable boards are
//! detected by searching a "twin" board alongside the input: exactly one of the two can
//! reach the goal.
//!
//! It is used by three binaries:
//! - `solve`: Reads one puzzle file and prints the minimum number of moves and every
//!   board on the way to the goal.
//! - `puzzle_checker`: Solves a batch of puzzle files and prints one move count per file.
//! - `scramble_evaluator`: Generates seeded random boards and reports search statistics.
//!
//! ## Modules
//! - `board`: The immutable `Board`, its heuristics, neighbors and twin, plus `Direction`.
//! - `solver`: The dual-lane A* `Solver` and its `SolverConfig`.
//! - `error`: `PuzzleError` and its `ErrorKind` classification.
//! - `utils`: Parsing puzzle files and rendering solver output.

pub mod board;
pub mod error;
pub mod solver;
pub mod utils;
