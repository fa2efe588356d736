//! Board tests

use duel_tetris::core::Board;
use duel_tetris::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, EMPTY, GARBAGE_COLOR};

fn fill_row(board: &mut Board, y: i8, except: Option<i8>) {
    for x in 0..BOARD_WIDTH as i8 {
        if Some(x) != except {
            board.set(x, y, GARBAGE_COLOR);
        }
    }
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert_eq!(board.filled_count(), 0);
    assert!(board.is_valid(0, 0));
    assert!(board.is_valid(9, 19));
    assert!(!board.is_valid(-1, 0));
    assert!(!board.is_valid(0, BOARD_HEIGHT as i8));
}

#[test]
fn test_collides_is_pure() {
    let mut board = Board::new();
    board.set(4, 1, 3);
    for rotation in [Rotation::North, Rotation::East, Rotation::South, Rotation::West] {
        for x in -2..10 {
            let first = board.collides(PieceKind::T, rotation, x, 0);
            let second = board.collides(PieceKind::T, rotation, x, 0);
            assert_eq!(first, second);
        }
    }
    assert!(board.collides(PieceKind::T, Rotation::North, 3, 0));
    assert!(!board.collides(PieceKind::T, Rotation::North, 6, 0));
}

#[test]
fn test_collides_against_walls_and_floor() {
    let board = Board::new();
    // Flat I fills columns x..x+3 of its top row.
    assert!(!board.collides(PieceKind::I, Rotation::North, 6, 0));
    assert!(board.collides(PieceKind::I, Rotation::North, 7, 0));
    assert!(board.collides(PieceKind::I, Rotation::North, -1, 0));
    // Vertical I spans four rows.
    assert!(!board.collides(PieceKind::I, Rotation::East, 0, 16));
    assert!(board.collides(PieceKind::I, Rotation::East, 0, 17));
}

#[test]
fn test_clear_shifts_rows_down() {
    let mut board = Board::new();
    fill_row(&mut board, 19, None);
    board.set(2, 18, 5);
    board.set(7, 0, 1);

    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(board.get(2, 19), Some(5));
    assert_eq!(board.get(2, 18), Some(EMPTY));
    assert_eq!(board.get(7, 1), Some(1));
    assert!(board.row(0).iter().all(|&c| c == EMPTY));
}

#[test]
fn test_adjacent_full_rows_clear_together() {
    let mut board = Board::new();
    fill_row(&mut board, 17, None);
    fill_row(&mut board, 18, Some(4));
    fill_row(&mut board, 19, None);
    board.set(0, 16, 2);

    assert_eq!(board.clear_full_rows(), 2);
    assert_eq!(board.get(4, 19), Some(EMPTY));
    assert_eq!(board.get(0, 18), Some(2));
    for y in 0..BOARD_HEIGHT as usize {
        assert!(!board.is_row_full(y), "row {y} still full");
    }
}

#[test]
fn test_garbage_row_pushes_up() {
    let mut board = Board::new();
    board.set(5, 0, 7);
    board.set(1, 19, 3);

    board.push_garbage_row(6);
    // Top row fell off; old bottom row moved up.
    assert_eq!(board.get(5, 0), Some(EMPTY));
    assert_eq!(board.get(1, 18), Some(3));
    for x in 0..BOARD_WIDTH as i8 {
        let expected = if x == 6 { EMPTY } else { GARBAGE_COLOR };
        assert_eq!(board.get(x, 19), Some(expected));
    }
}

#[test]
fn test_lock_shape_writes_piece_color() {
    let mut board = Board::new();
    board.lock_shape(PieceKind::O, Rotation::North, 4, 18);
    assert_eq!(board.filled_count(), 4);
    assert_eq!(board.get(4, 18), Some(PieceKind::O.color()));
    assert_eq!(board.get(5, 19), Some(PieceKind::O.color()));
}
