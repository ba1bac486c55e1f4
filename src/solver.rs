//! A* solver for the N-puzzle that also decides solvability.
//!
//! Two searches run in lock-step: one from the given board and one from its twin
//! (see [`Board::twin`]). Exactly one of the two can reach the goal, so whichever lane
//! dequeues a goal board first settles the question without any parity computation.
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::rc::Rc;

use crate::board::{Board, Direction};
use crate::error::PuzzleError;

/// Tuning knobs for a [`Solver`] run.
///
/// The default runs without a budget and without a closed set, expanding a board again
/// whenever it is reached through a different path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Upper bound on the number of expanded boards across both lanes. Going past it
    /// fails the run with `PuzzleError::SearchAborted`.
    pub max_expansions: Option<usize>,
    /// Keep a per-lane set of already expanded boards and skip them when popped again.
    pub closed_set: bool,
}

/// Counters collected while searching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards expanded by the lane that started from the input board.
    pub main_expanded: usize,
    /// Boards expanded by the lane that started from the twin.
    pub twin_expanded: usize,
    /// Largest frontier size seen in either lane.
    pub max_frontier: usize,
}

impl SearchStats {
    pub fn total_expanded(&self) -> usize {
        self.main_expanded + self.twin_expanded
    }
}

/// A frontier entry. Parents are shared, so sibling nodes point at one ancestor chain.
#[derive(Debug)]
struct Node {
    board: Board,
    parent: Option<Rc<Node>>,
    depth: usize,
}

/// Heap entry ordered by `(priority, sequence)`, smallest first.
#[derive(Debug)]
struct Entry {
    priority: usize,
    sequence: u64,
    node: Rc<Node>,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The popped board was the goal.
    Solved,
    /// A board was popped and expanded, or skipped as already closed.
    Progressed,
    /// Nothing left to pop. Only reachable with a closed set.
    Exhausted,
}

/// One of the two searches.
struct Lane {
    name: &'static str,
    frontier: BinaryHeap<Entry>,
    next_sequence: u64,
    closed: Option<HashSet<Board>>,
    expanded: usize,
    max_frontier: usize,
    solved: Option<Rc<Node>>,
}

impl Lane {
    fn new(name: &'static str, root: Board, closed_set: bool) -> Self {
        let mut lane = Lane {
            name,
            frontier: BinaryHeap::new(),
            next_sequence: 0,
            closed: closed_set.then(HashSet::new),
            expanded: 0,
            max_frontier: 0,
            solved: None,
        };
        lane.push(Node {
            board: root,
            parent: None,
            depth: 0,
        });
        lane
    }

    fn push(&mut self, node: Node) {
        let entry = Entry {
            priority: node.board.manhattan(),
            sequence: self.next_sequence,
            node: Rc::new(node),
        };
        self.next_sequence += 1;
        self.frontier.push(entry);
        self.max_frontier = self.max_frontier.max(self.frontier.len());
    }

    fn step(&mut self) -> Step {
        if self.solved.is_some() {
            return Step::Solved;
        }
        let current = match self.frontier.pop() {
            Some(entry) => entry.node,
            None => return Step::Exhausted,
        };

        if let Some(closed) = self.closed.as_mut() {
            if !closed.insert(current.board.clone()) {
                return Step::Progressed;
            }
        }

        if current.board.is_goal() {
            debug!(
                "{} lane reached the goal at depth {} after {} expansions",
                self.name, current.depth, self.expanded
            );
            self.solved = Some(current);
            return Step::Solved;
        }

        self.expanded += 1;
        trace!(
            "{} lane expanding depth {} priority {}",
            self.name,
            current.depth,
            current.board.manhattan()
        );

        let parent_board = current.parent.as_ref().map(|parent| &parent.board);
        let closed = self.closed.as_ref();
        let children: Vec<Node> = current
            .board
            .neighbors()
            .into_iter()
            .filter(|neighbor| parent_board != Some(neighbor))
            .filter(|neighbor| closed.map_or(true, |set| !set.contains(neighbor)))
            .map(|board| Node {
                board,
                parent: Some(Rc::clone(&current)),
                depth: current.depth + 1,
            })
            .collect();
        for child in children {
            self.push(child);
        }
        Step::Progressed
    }
}

/// Walks the parent chain from `goal` back to the root and returns the boards root first.
fn path_to(goal: &Rc<Node>) -> Vec<Board> {
    let mut path = Vec::with_capacity(goal.depth + 1);
    let mut cursor = Some(goal);
    while let Some(node) = cursor {
        path.push(node.board.clone());
        cursor = node.parent.as_ref();
    }
    path.reverse();
    path
}

/// Result of solving one board. The whole search runs inside the constructor.
///
/// # Examples
/// ```
/// use npuzzle_solver::board::Board;
/// use npuzzle_solver::solver::Solver;
///
/// let board = Board::from_tiles(3, vec![1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
/// let solver = Solver::new(&board).unwrap();
/// assert!(solver.is_solvable());
/// assert_eq!(solver.moves(), 1);
///
/// let swapped = Board::from_tiles(3, vec![1, 2, 3, 4, 5, 6, 8, 7, 0]).unwrap();
/// let solver = Solver::new(&swapped).unwrap();
/// assert!(!solver.is_solvable());
/// assert_eq!(solver.moves(), -1);
/// assert!(solver.solution().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Solver {
    solution: Option<Vec<Board>>,
    stats: SearchStats,
}

impl Solver {
    /// Solves `initial` with the default [`SolverConfig`].
    pub fn new(initial: &Board) -> Result<Self, PuzzleError> {
        Self::with_config(initial, &SolverConfig::default())
    }

    /// Solves `initial`, alternating one step of the main lane with one step of the twin
    /// lane until one of them settles the outcome.
    ///
    /// # Errors
    /// * `PuzzleError::SearchAborted` if `config.max_expansions` is exceeded.
    /// * `PuzzleError::Invariant` if the board has no twin or both lanes run dry.
    pub fn with_config(initial: &Board, config: &SolverConfig) -> Result<Self, PuzzleError> {
        let mut main = Lane::new("main", initial.clone(), config.closed_set);
        let mut twin = Lane::new("twin", initial.twin()?, config.closed_set);
        let mut twin_exhausted = false;
        debug!(
            "solving {}x{} board with manhattan priority {}",
            initial.dimension(),
            initial.dimension(),
            initial.manhattan()
        );

        let solvable = loop {
            match main.step() {
                Step::Solved => break true,
                Step::Exhausted if twin_exhausted => {
                    return Err(PuzzleError::Invariant("both search lanes ran out of boards"))
                }
                Step::Exhausted => break false,
                Step::Progressed => {}
            }
            check_budget(config, &main, &twin)?;

            if !twin_exhausted {
                match twin.step() {
                    Step::Solved => break false,
                    Step::Exhausted => {
                        debug!("twin lane exhausted, continuing main lane alone");
                        twin_exhausted = true;
                    }
                    Step::Progressed => {}
                }
                check_budget(config, &main, &twin)?;
            }
        };

        let stats = SearchStats {
            main_expanded: main.expanded,
            twin_expanded: twin.expanded,
            max_frontier: main.max_frontier.max(twin.max_frontier),
        };
        let solution = if solvable {
            let goal = main
                .solved
                .as_ref()
                .ok_or(PuzzleError::Invariant("solved lane holds no goal node"))?;
            Some(path_to(goal))
        } else {
            None
        };
        debug!(
            "search finished: solvable={} moves={} expanded={}",
            solvable,
            solution.as_ref().map_or(-1, |path| path.len() as isize - 1),
            stats.total_expanded()
        );

        Ok(Solver { solution, stats })
    }

    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Number of moves in the solution, or `-1` if the board is unsolvable.
    pub fn moves(&self) -> isize {
        self.solution
            .as_ref()
            .map_or(-1, |path| path.len() as isize - 1)
    }

    /// The boards from the initial one to the goal, or `None` if the board is unsolvable.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// The direction the blank slides at each step of the solution.
    pub fn directions(&self) -> Option<Vec<Direction>> {
        let path = self.solution.as_ref()?;
        path.windows(2)
            .map(|pair| {
                Direction::ALL
                    .into_iter()
                    .find(|&dir| pair[0].slide(dir).as_ref() == Some(&pair[1]))
            })
            .collect()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

fn check_budget(config: &SolverConfig, main: &Lane, twin: &Lane) -> Result<(), PuzzleError> {
    let expanded = main.expanded + twin.expanded;
    match config.max_expansions {
        Some(limit) if expanded > limit => {
            debug!("expansion budget of {} exceeded", limit);
            Err(PuzzleError::SearchAborted { expanded })
        }
        _ => Ok(()),
    }
}
