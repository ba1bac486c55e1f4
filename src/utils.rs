use crate::board::Board;
use crate::error::PuzzleError;
use crate::solver::Solver;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Parses a puzzle description into a `Board`.
///
/// The text holds whitespace-separated integers: the dimension N first, then the N² tiles
/// in row-major order, with `0` for the blank. Line breaks carry no meaning.
///
/// # Arguments
/// * `s`: The puzzle text.
///
/// # Returns
/// * `Ok(Board)` if the text describes a valid board.
/// * `Err(PuzzleError::Parse)` if a token is not a non-negative integer, the dimension is
///   missing, or there are too few or too many tiles.
/// * Any other malformed-input `PuzzleError` raised by [`Board::from_tiles`].
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_str;
///
/// let board = board_from_str("3\n 8 1 3\n 4 0 2\n 7 6 5\n").unwrap();
/// assert_eq!(board.tile(0, 0), 8);
/// assert_eq!(board.blank_position(), (1, 1));
///
/// assert!(board_from_str("2\n 1 2\n 3").is_err());
/// assert!(board_from_str("2\n 1 2\n 3 x").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board, PuzzleError> {
    let mut tokens = s.split_whitespace();

    let dimension_token = tokens
        .next()
        .ok_or_else(|| PuzzleError::Parse("input is empty, expected a dimension".to_string()))?;
    let dimension: usize = dimension_token.parse().map_err(|_| {
        PuzzleError::Parse(format!("invalid dimension '{}'", dimension_token))
    })?;

    let tiles = tokens
        .enumerate()
        .map(|(i, token)| {
            token.parse::<u32>().map_err(|_| {
                PuzzleError::Parse(format!("invalid tile '{}' at position {}", token, i))
            })
        })
        .collect::<Result<Vec<u32>, PuzzleError>>()?;

    let expected = dimension.saturating_mul(dimension);
    if tiles.len() != expected {
        return Err(PuzzleError::Parse(format!(
            "expected {} tiles for dimension {}, found {}",
            expected,
            dimension,
            tiles.len()
        )));
    }

    Board::from_tiles(dimension, tiles)
}

/// Reads and parses a puzzle file. See [`board_from_str`] for the format.
pub fn read_board_file(path: &Path) -> Result<Board, PuzzleError> {
    let content = fs::read_to_string(path).map_err(|e| {
        PuzzleError::Parse(format!("failed to read {}: {}", path.display(), e))
    })?;
    board_from_str(&content)
}

/// Formats a solver outcome: either `No solution possible`, or the move count followed by
/// every board on the solution path.
pub fn render_outcome(solver: &Solver) -> String {
    let mut output = String::new();
    match solver.solution() {
        None => output.push_str("No solution possible\n"),
        Some(path) => {
            // Writing into a String never fails.
            let _ = writeln!(output, "Minimum number of moves = {}", solver.moves());
            for board in path {
                let _ = writeln!(output, "{}", board);
            }
        }
    }
    output
}
