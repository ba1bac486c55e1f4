//! Error types shared by the board, the solver and the puzzle file loader.
//!
//! Every failure falls into one of three classes (see [`ErrorKind`]):
//! bad input handed to a constructor, a broken internal invariant, or a
//! search that ran past its configured expansion budget.

use thiserror::Error;

/// Coarse classification of a [`PuzzleError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a grid or puzzle text that does not describe a valid board.
    MalformedInput,
    /// The library reached a state that a well-formed board can never produce.
    InvariantViolation,
    /// The search exceeded `SolverConfig::max_expansions`.
    SearchAborted,
}

/// Errors produced while building boards or running the solver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("board dimension must be at least 2, found {0}")]
    DimensionTooSmall(usize),

    #[error("row {row} has {len} tiles, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("expected {expected} tiles for the board, found {found}")]
    TileCountMismatch { expected: usize, found: usize },

    #[error("tile {value} at ({row}, {col}) is outside the range 0..{limit}")]
    TileOutOfRange {
        value: u32,
        row: usize,
        col: usize,
        limit: usize,
    },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u32 },

    #[error("cannot parse puzzle: {0}")]
    Parse(String),

    #[error("internal invariant violated: {0}")]
    Invariant(&'static str),

    #[error("search aborted after {expanded} expansions")]
    SearchAborted { expanded: usize },
}

impl PuzzleError {
    /// Returns the class this error belongs to.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::error::{ErrorKind, PuzzleError};
    /// assert_eq!(PuzzleError::DimensionTooSmall(1).kind(), ErrorKind::MalformedInput);
    /// assert_eq!(PuzzleError::SearchAborted { expanded: 10 }.kind(), ErrorKind::SearchAborted);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            PuzzleError::DimensionTooSmall(_)
            | PuzzleError::NotSquare { .. }
            | PuzzleError::TileCountMismatch { .. }
            | PuzzleError::TileOutOfRange { .. }
            | PuzzleError::DuplicateTile { .. }
            | PuzzleError::Parse(_) => ErrorKind::MalformedInput,
            PuzzleError::Invariant(_) => ErrorKind::InvariantViolation,
            PuzzleError::SearchAborted { .. } => ErrorKind::SearchAborted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let malformed = [
            PuzzleError::DimensionTooSmall(0),
            PuzzleError::NotSquare {
                row: 1,
                len: 2,
                expected: 3,
            },
            PuzzleError::TileCountMismatch {
                expected: 9,
                found: 8,
            },
            PuzzleError::TileOutOfRange {
                value: 9,
                row: 0,
                col: 0,
                limit: 9,
            },
            PuzzleError::DuplicateTile { value: 4 },
            PuzzleError::Parse("bad".to_string()),
        ];
        for err in &malformed {
            assert_eq!(err.kind(), ErrorKind::MalformedInput, "{}", err);
        }
        assert_eq!(
            PuzzleError::Invariant("blank missing").kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(
            PuzzleError::SearchAborted { expanded: 3 }.kind(),
            ErrorKind::SearchAborted
        );
    }

    #[test]
    fn test_error_messages() {
        let err = PuzzleError::TileOutOfRange {
            value: 12,
            row: 2,
            col: 1,
            limit: 9,
        };
        assert_eq!(
            err.to_string(),
            "tile 12 at (2, 1) is outside the range 0..9"
        );
        assert_eq!(
            PuzzleError::SearchAborted { expanded: 50 }.to_string(),
            "search aborted after 50 expansions"
        );
    }
}
