//! Board representation for the N-puzzle.
//!
//! This module defines:
//! - `Direction`: the four ways the blank can slide.
//! - `Board`: an immutable N×N arrangement of the tiles `0..N²`, with `0` as the blank,
//!   together with the number of moves used to reach it and its cached heuristics.
//!
//! Heuristics are computed once when a board is built. Boards produced by [`Board::slide`]
//! derive theirs from the parent, since a slide moves a single tile by one cell.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::PuzzleError;

/// Smallest supported board dimension.
pub const MIN_DIMENSION: usize = 2;

/// A direction in which the blank slides.
///
/// Sliding the blank `Up` swaps it with the tile directly above it, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order neighbors are generated.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the `(row, col)` offset applied to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Returns the direction that undoes this one.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An immutable snapshot of a puzzle configuration.
///
/// Tiles are stored in row-major order. Equality, hashing and ordering only look at the
/// dimension and the tiles: the same arrangement reached with a different move count is
/// the same state.
///
/// # Examples
/// ```
/// use npuzzle_solver::board::Board;
///
/// let board = Board::new(vec![vec![8, 1, 3], vec![4, 0, 2], vec![7, 6, 5]]).unwrap();
/// assert_eq!(board.dimension(), 3);
/// assert_eq!(board.hamming(), 5);
/// assert_eq!(board.manhattan(), 10);
/// assert!(!board.is_goal());
/// assert_eq!(board.neighbors().len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    dimension: usize,
    tiles: Vec<u32>,
    moves: usize,
    /// Number of non-blank tiles away from their goal cell.
    misplaced: usize,
    /// Sum of the Manhattan distances of the non-blank tiles.
    distance: usize,
    /// Row-major index of the blank.
    blank: usize,
}

/// Whether `value` sits in its goal cell when stored at `index`. The blank is never "home"
/// for heuristic purposes.
fn is_home(value: u32, index: usize) -> bool {
    value != 0 && value as usize == index + 1
}

/// Manhattan distance between the cell at `index` and the goal cell of `value`.
fn tile_distance(dimension: usize, value: u32, index: usize) -> usize {
    if value == 0 {
        return 0;
    }
    let goal = value as usize - 1;
    let (row, col) = (index / dimension, index % dimension);
    let (goal_row, goal_col) = (goal / dimension, goal % dimension);
    row.abs_diff(goal_row) + col.abs_diff(goal_col)
}

impl Board {
    /// Builds a board from an N×N grid, where `grid[r][c]` is the tile in row `r`, column `c`.
    ///
    /// # Arguments
    /// * `grid`: The rows of the board, top to bottom.
    ///
    /// # Returns
    /// * `Ok(Board)` with `moves() == 0`.
    /// * `Err(PuzzleError)` if the grid has fewer than two rows, is not square, or does not
    ///   contain every value `0..N²` exactly once.
    pub fn new(grid: Vec<Vec<u32>>) -> Result<Self, PuzzleError> {
        let dimension = grid.len();
        if dimension < MIN_DIMENSION {
            return Err(PuzzleError::DimensionTooSmall(dimension));
        }
        if let Some((row, cells)) = grid
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != dimension)
        {
            return Err(PuzzleError::NotSquare {
                row,
                len: cells.len(),
                expected: dimension,
            });
        }
        Self::from_tiles(dimension, grid.into_iter().flatten().collect())
    }

    /// Builds a board from its tiles listed in row-major order.
    ///
    /// # Arguments
    /// * `dimension`: The side length N, at least [`MIN_DIMENSION`].
    /// * `tiles`: Exactly N² values, a permutation of `0..N²`.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::board::Board;
    /// use npuzzle_solver::error::PuzzleError;
    ///
    /// let board = Board::from_tiles(2, vec![1, 2, 3, 0]).unwrap();
    /// assert!(board.is_goal());
    ///
    /// let duplicate = Board::from_tiles(2, vec![1, 1, 3, 0]);
    /// assert_eq!(duplicate.unwrap_err(), PuzzleError::DuplicateTile { value: 1 });
    /// ```
    pub fn from_tiles(dimension: usize, tiles: Vec<u32>) -> Result<Self, PuzzleError> {
        if dimension < MIN_DIMENSION {
            return Err(PuzzleError::DimensionTooSmall(dimension));
        }
        let cells = dimension
            .checked_mul(dimension)
            .ok_or_else(|| PuzzleError::Parse(format!("dimension {} is too large", dimension)))?;
        if tiles.len() != cells {
            return Err(PuzzleError::TileCountMismatch {
                expected: cells,
                found: tiles.len(),
            });
        }

        let mut seen = vec![false; cells];
        for (index, &value) in tiles.iter().enumerate() {
            let slot = value as usize;
            if slot >= cells {
                return Err(PuzzleError::TileOutOfRange {
                    value,
                    row: index / dimension,
                    col: index % dimension,
                    limit: cells,
                });
            }
            if seen[slot] {
                return Err(PuzzleError::DuplicateTile { value });
            }
            seen[slot] = true;
        }

        Self::assemble(dimension, tiles, 0)
    }

    /// Returns the goal board `1, 2, …, N²-1, 0` of the given dimension.
    pub fn goal(dimension: usize) -> Result<Self, PuzzleError> {
        if dimension < MIN_DIMENSION {
            return Err(PuzzleError::DimensionTooSmall(dimension));
        }
        let cells = dimension * dimension;
        let tiles = (1..cells as u32).chain(std::iter::once(0)).collect();
        Self::from_tiles(dimension, tiles)
    }

    /// Creates a board whose tiles are a uniformly random permutation, driven by `seed`.
    ///
    /// The same seed always produces the same board. Roughly half of all such boards are
    /// unsolvable.
    pub fn random_with_seed(dimension: usize, seed: u64) -> Result<Self, PuzzleError> {
        let goal = Self::goal(dimension)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut tiles = goal.tiles;
        tiles.shuffle(&mut rng);
        Self::assemble(dimension, tiles, 0)
    }

    /// Creates a solvable board by sliding the blank `steps` times at random, starting from
    /// the goal. A slide never immediately undoes the previous one.
    ///
    /// The returned board has `moves() == 0`: it is a fresh starting position.
    pub fn scrambled(dimension: usize, steps: usize, seed: u64) -> Result<Self, PuzzleError> {
        let mut board = Self::goal(dimension)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut last: Option<Direction> = None;

        for _ in 0..steps {
            let candidates: Vec<(Direction, Board)> = Direction::ALL
                .iter()
                .filter(|dir| last.map_or(true, |prev| **dir != prev.opposite()))
                .filter_map(|&dir| board.slide(dir).map(|next| (dir, next)))
                .collect();
            let (dir, next) = candidates
                .choose(&mut rng)
                .cloned()
                .ok_or(PuzzleError::Invariant("blank has no legal slide"))?;
            last = Some(dir);
            board = next;
        }

        Ok(Board { moves: 0, ..board })
    }

    /// Computes every derived field from scratch.
    fn assemble(dimension: usize, tiles: Vec<u32>, moves: usize) -> Result<Self, PuzzleError> {
        let blank = tiles
            .iter()
            .position(|&value| value == 0)
            .ok_or(PuzzleError::Invariant("board has no blank tile"))?;
        let misplaced = tiles
            .iter()
            .enumerate()
            .filter(|&(index, &value)| value != 0 && !is_home(value, index))
            .count();
        let distance = tiles
            .iter()
            .enumerate()
            .map(|(index, &value)| tile_distance(dimension, value, index))
            .sum();

        Ok(Board {
            dimension,
            tiles,
            moves,
            misplaced,
            distance,
            blank,
        })
    }

    /// Returns the side length N.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the number of moves taken from the starting board to reach this one.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Returns the tiles in row-major order.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `dimension()`.
    pub fn tile(&self, r: usize, c: usize) -> u32 {
        assert!(c < self.dimension, "column {} out of bounds", c);
        self.tiles[r * self.dimension + c]
    }

    /// Returns the `(row, col)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.dimension, self.blank % self.dimension)
    }

    /// Returns `true` if the tiles read `1, 2, …, N²-1, 0` in row-major order.
    /// The move count plays no part.
    pub fn is_goal(&self) -> bool {
        // With every numbered tile home, the only free cell left for the blank is the last.
        self.misplaced == 0
    }

    /// Moves so far plus the number of non-blank tiles out of place.
    pub fn hamming(&self) -> usize {
        self.moves + self.misplaced
    }

    /// Moves so far plus the sum of each non-blank tile's Manhattan distance to its goal cell.
    ///
    /// This is the `g + h` priority used by the solver.
    pub fn manhattan(&self) -> usize {
        self.moves + self.distance
    }

    /// Slides the blank one cell in `direction`.
    ///
    /// # Returns
    /// * `Some(Board)` with `moves() == self.moves() + 1`.
    /// * `None` if the blank is already on that edge.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::board::{Board, Direction};
    ///
    /// let board = Board::from_tiles(2, vec![1, 2, 0, 3]).unwrap();
    /// let solved = board.slide(Direction::Right).unwrap();
    /// assert!(solved.is_goal());
    /// assert_eq!(solved.moves(), 1);
    /// assert!(board.slide(Direction::Left).is_none());
    /// ```
    pub fn slide(&self, direction: Direction) -> Option<Board> {
        let (row, col) = self.blank_position();
        let (dr, dc) = direction.offset();
        let target_row = row.checked_add_signed(dr)?;
        let target_col = col.checked_add_signed(dc)?;
        if target_row >= self.dimension || target_col >= self.dimension {
            return None;
        }

        let target = target_row * self.dimension + target_col;
        let value = self.tiles[target];
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);

        // Only `value` moves, from `target` into the old blank cell.
        let distance = self.distance - tile_distance(self.dimension, value, target)
            + tile_distance(self.dimension, value, self.blank);
        let misplaced = self.misplaced - usize::from(!is_home(value, target))
            + usize::from(!is_home(value, self.blank));

        Some(Board {
            dimension: self.dimension,
            tiles,
            moves: self.moves + 1,
            misplaced,
            distance,
            blank: target,
        })
    }

    /// Returns every board reachable by a single slide of the blank: two at a corner,
    /// three on an edge, four in the interior.
    pub fn neighbors(&self) -> BTreeSet<Board> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.slide(dir))
            .collect()
    }

    /// Returns the board obtained by swapping the first pair of horizontally adjacent,
    /// non-blank tiles, scanning rows top to bottom and each row left to right.
    ///
    /// Exactly one of a board and its twin is solvable. The twin keeps this board's move
    /// count.
    ///
    /// # Errors
    /// Returns `PuzzleError::Invariant` if no such pair exists, which a valid board of
    /// dimension 2 or more cannot produce.
    pub fn twin(&self) -> Result<Board, PuzzleError> {
        let n = self.dimension;
        for row in 0..n {
            for col in 0..n - 1 {
                let index = row * n + col;
                if self.tiles[index] != 0 && self.tiles[index + 1] != 0 {
                    let mut tiles = self.tiles.clone();
                    tiles.swap(index, index + 1);
                    return Self::assemble(n, tiles, self.moves);
                }
            }
        }
        Err(PuzzleError::Invariant(
            "no adjacent pair of non-blank tiles to swap",
        ))
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        self.tiles.hash(state);
    }
}

impl Ord for Board {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dimension
            .cmp(&other.dimension)
            .then_with(|| self.tiles.cmp(&other.tiles))
    }
}

impl PartialOrd for Board {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Board {
    /// Writes N on the first line, then one line per row with each tile right-aligned.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let largest = self.dimension * self.dimension - 1;
        let width = largest.to_string().len().max(2);
        writeln!(f, "{}", self.dimension)?;
        for row in self.tiles.chunks(self.dimension) {
            for value in row {
                write!(f, "{:>width$} ", value, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
