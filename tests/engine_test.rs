//! Tests for the game state machine through the public API.

use tictactoe_core::{Cell, GameState, GameStatus, Mark, MoveError};

fn play(moves: &[usize]) -> GameState {
    let mut state = GameState::new();
    for &pos in moves {
        state = state.apply(pos).expect("legal move");
    }
    state
}

#[test]
fn test_top_row_win() {
    // X: 0, 1, 2 against O: 4, 7.
    let state = play(&[0, 4, 1, 7, 2]);
    assert_eq!(state.status(), GameStatus::Won(Mark::X));
}

#[test]
fn test_draw_game() {
    // Final board: X O X / X O O / O X X - no completed line.
    let state = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(state.status(), GameStatus::Draw);
    assert!(state.board().is_full());
}

#[test]
fn test_out_of_bounds_rejected() {
    let state = GameState::new();
    assert_eq!(state.apply(10), Err(MoveError::InvalidPosition(10)));
    // Rejection leaves the state untouched.
    assert!(state.board().is_clear());
}

#[test]
fn test_replayed_cell_rejected() {
    let state = play(&[4]);
    assert_eq!(state.apply(4), Err(MoveError::CellOccupied(4)));
}

#[test]
fn test_apply_returns_new_state() {
    let state = play(&[0]);
    let next = state.apply(4).expect("legal move");
    assert_eq!(state.board().get(4), Some(Cell::Empty));
    assert_eq!(next.board().get(4), Some(Cell::Occupied(Mark::O)));
    assert_ne!(state, next);
}

#[test]
fn test_turns_alternate_from_x() {
    let mut state = GameState::new();
    let mut expected = Mark::X;
    for pos in [0, 1, 2, 4, 3] {
        assert_eq!(state.to_move(), expected);
        state = state.apply(pos).expect("legal move");
        expected = expected.opponent();
    }
}

#[test]
fn test_finished_game_accepts_no_moves() {
    let state = play(&[0, 4, 1, 7, 2]);
    for pos in 0..9 {
        assert!(state.apply(pos).is_err());
    }
}
