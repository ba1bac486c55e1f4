use npuzzle_solver::board::Board;
use npuzzle_solver::error::ErrorKind;
use npuzzle_solver::solver::{Solver, SolverConfig};
use npuzzle_solver::utils::read_board_file;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

fn board3(tiles: [u32; 9]) -> Board {
    Board::from_tiles(3, tiles.to_vec()).unwrap()
}

fn closed_set() -> SolverConfig {
    SolverConfig {
        max_expansions: None,
        closed_set: true,
    }
}

/// Optimal move count by plain breadth-first search, or `None` if the goal is unreachable.
fn bfs_moves(start: &Board) -> Option<usize> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start.clone());
    queue.push_back(start.clone());
    while let Some(board) = queue.pop_front() {
        if board.is_goal() {
            return Some(board.moves());
        }
        for neighbor in board.neighbors() {
            if seen.insert(neighbor.clone()) {
                queue.push_back(neighbor);
            }
        }
    }
    None
}

/// Solvability from the permutation parity of the tiles.
fn parity_solvable(board: &Board) -> bool {
    let tiles: Vec<u32> = board.tiles().iter().copied().filter(|&v| v != 0).collect();
    let inversions: usize = tiles
        .iter()
        .enumerate()
        .map(|(i, &v)| tiles[i + 1..].iter().filter(|&&w| w < v).count())
        .sum();
    let (blank_row, _) = board.blank_position();
    if board.dimension() % 2 == 1 {
        inversions % 2 == 0
    } else {
        (inversions + blank_row) % 2 == 1
    }
}

fn assert_valid_solution(initial: &Board, solver: &Solver) {
    let path = solver.solution().expect("solvable board must have a path");
    assert_eq!(solver.moves(), path.len() as isize - 1);
    assert_eq!(&path[0], initial);
    assert!(path.last().unwrap().is_goal());
    for pair in path.windows(2) {
        assert!(
            pair[0].neighbors().contains(&pair[1]),
            "consecutive boards must be one slide apart:\n{}\n{}",
            pair[0],
            pair[1]
        );
    }
    for board in path {
        assert!(board.manhattan() >= board.hamming());
        assert!(board.hamming() >= board.moves());
    }
    let goal = path.last().unwrap();
    assert_eq!(goal.hamming(), goal.moves());
    assert_eq!(goal.manhattan(), goal.moves());

    let directions = solver.directions().unwrap();
    assert_eq!(directions.len(), path.len() - 1);
    let mut replay = initial.clone();
    for dir in directions {
        replay = replay.slide(dir).expect("replayed slide must be legal");
    }
    assert!(replay.is_goal());
    assert_eq!(replay, Board::goal(initial.dimension()).unwrap());
}

#[test]
fn test_scenario_already_goal() {
    let board = board3([1, 2, 3, 4, 5, 6, 7, 8, 0]);
    let solver = Solver::new(&board).unwrap();
    assert!(solver.is_solvable());
    assert_eq!(solver.moves(), 0);
    assert_eq!(solver.solution().unwrap().len(), 1);
}

#[test]
fn test_scenario_one_move() {
    let board = board3([1, 2, 3, 4, 5, 6, 7, 0, 8]);
    let solver = Solver::new(&board).unwrap();
    assert!(solver.is_solvable());
    assert_eq!(solver.moves(), 1);
    assert_valid_solution(&board, &solver);
}

#[test]
fn test_scenario_swapped_tiles_unsolvable() {
    let board = board3([1, 2, 3, 4, 5, 6, 8, 7, 0]);
    let solver = Solver::new(&board).unwrap();
    assert!(!solver.is_solvable());
    assert_eq!(solver.moves(), -1);
    assert!(solver.solution().is_none());
}

#[test]
fn test_scenario_reference_board_is_optimal() {
    let board = board3([8, 1, 3, 4, 0, 2, 7, 6, 5]);
    let solver = Solver::new(&board).unwrap();
    assert!(solver.is_solvable());
    let optimal = bfs_moves(&board).unwrap();
    assert!(optimal > 0);
    assert_eq!(solver.moves(), optimal as isize);
    assert_valid_solution(&board, &solver);

    let again = Solver::new(&board).unwrap();
    assert_eq!(again.solution(), solver.solution(), "search must be deterministic");
    assert_eq!(again.stats(), solver.stats());
}

#[test]
fn test_every_two_by_two_board() {
    let mut tiles = vec![0u32, 1, 2, 3];
    let mut permutations = Vec::new();
    // Heap's algorithm over the 24 arrangements.
    fn heap_permute(k: usize, tiles: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
        if k == 1 {
            out.push(tiles.clone());
            return;
        }
        for i in 0..k {
            heap_permute(k - 1, tiles, out);
            let j = if k % 2 == 0 { i } else { 0 };
            tiles.swap(j, k - 1);
        }
    }
    heap_permute(4, &mut tiles, &mut permutations);
    assert_eq!(permutations.len(), 24);

    for tiles in permutations {
        let board = Board::from_tiles(2, tiles).unwrap();
        let twin = board.twin().unwrap();
        assert_ne!(
            parity_solvable(&board),
            parity_solvable(&twin),
            "exactly one of board and twin is solvable:\n{}",
            board
        );

        let solver = Solver::new(&board).unwrap();
        assert_eq!(solver.is_solvable(), parity_solvable(&board), "{}", board);
        match bfs_moves(&board) {
            Some(optimal) => {
                assert_eq!(solver.moves(), optimal as isize);
                assert_valid_solution(&board, &solver);
            }
            None => assert_eq!(solver.moves(), -1),
        }
    }
}

#[test]
fn test_random_three_by_three_parity() {
    for seed in 0..12 {
        let board = Board::random_with_seed(3, seed).unwrap();
        let solver = Solver::with_config(&board, &closed_set()).unwrap();
        assert_eq!(
            solver.is_solvable(),
            parity_solvable(&board),
            "seed {}:\n{}",
            seed,
            board
        );
        assert_eq!(solver.moves() == -1, !solver.is_solvable());
        if solver.is_solvable() {
            assert_eq!(solver.moves(), bfs_moves(&board).unwrap() as isize);
            assert_valid_solution(&board, &solver);
        }
    }
}

#[test]
fn test_scrambled_boards_are_solvable() {
    for seed in 0..5 {
        let board = Board::scrambled(4, 18, seed).unwrap();
        assert!(parity_solvable(&board));
        let solver = Solver::with_config(&board, &closed_set()).unwrap();
        assert!(solver.is_solvable());
        assert!(solver.moves() <= 18);
        assert_valid_solution(&board, &solver);
    }
}

#[test]
fn test_budget_reports_aborted_search() {
    // Reaching depth 14 takes at least 14 expansions in the main lane alone.
    let board = board3([8, 1, 3, 4, 0, 2, 7, 6, 5]);
    let config = SolverConfig {
        max_expansions: Some(10),
        closed_set: false,
    };
    let err = Solver::with_config(&board, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SearchAborted);
    assert!(err.to_string().contains("search aborted after 11 expansions"));
}

#[test]
fn test_sample_puzzle_files() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("puzzles");
    let expected = [
        ("puzzle2x2-06.txt", 6),
        ("puzzle2x2-unsolvable.txt", -1),
        ("puzzle3x3-00.txt", 0),
        ("puzzle3x3-01.txt", 1),
        ("puzzle3x3-04.txt", 4),
        ("puzzle3x3-unsolvable.txt", -1),
        ("puzzle4x4-03.txt", 3),
    ];
    for (name, moves) in expected {
        let board = read_board_file(&dir.join(name)).unwrap();
        let solver = Solver::new(&board).unwrap();
        assert_eq!(solver.moves(), moves, "{}", name);
    }

    let example = read_board_file(&dir.join("puzzle3x3-example.txt")).unwrap();
    assert_eq!(example, board3([8, 1, 3, 4, 0, 2, 7, 6, 5]));
}
