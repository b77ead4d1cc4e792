//! Game state machine: turn alternation and move application.

use super::rules;
use super::types::{Board, Cell, GameStatus, Mark, BOARD_CELLS};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Errors that can occur when applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The position is outside the board.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    InvalidPosition(usize),

    /// The target cell is already occupied.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// The game has already reached a terminal state.
    #[display("Game is already over")]
    GameAlreadyOver,
}

impl std::error::Error for MoveError {}

/// Complete game state: board, mark to move, and status.
///
/// States are immutable values. [`GameState::apply`] returns a new state
/// and leaves its input untouched; the caller owns persistence of the
/// result. Once the status is terminal no further moves are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GameState {
    board: Board,
    to_move: Mark,
    status: GameStatus,
}

impl GameState {
    /// Creates a new game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::X,
            status: GameStatus::InProgress,
        }
    }

    /// Reconstructs a state from a stored snapshot.
    ///
    /// The status is recomputed from the board rather than trusted, so a
    /// stale stored status cannot disagree with the cells.
    #[instrument(skip(board))]
    pub fn from_snapshot(board: Board, to_move: Mark) -> Self {
        let status = rules::evaluate(&board);
        Self {
            board,
            to_move,
            status,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move. After a terminal move this stays on the
    /// mark that just moved.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Applies a move for the current mark, returning the resulting state.
    ///
    /// # Errors
    ///
    /// - [`MoveError::InvalidPosition`] if `pos` is outside 0-8.
    /// - [`MoveError::CellOccupied`] if the target cell is occupied,
    ///   regardless of status.
    /// - [`MoveError::GameAlreadyOver`] if the game is terminal.
    #[instrument(skip(self), fields(mark = ?self.to_move, board = %self.board))]
    pub fn apply(&self, pos: usize) -> Result<GameState, MoveError> {
        if pos >= BOARD_CELLS {
            return Err(MoveError::InvalidPosition(pos));
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::CellOccupied(pos));
        }
        if self.status.is_terminal() {
            return Err(MoveError::GameAlreadyOver);
        }

        let mut board = self.board.clone();
        board.set(pos, Cell::Occupied(self.to_move));

        let status = rules::evaluate(&board);
        let to_move = if status.is_terminal() {
            self.to_move
        } else {
            self.to_move.opponent()
        };

        Ok(GameState {
            board,
            to_move,
            status,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_with_x() {
        let state = GameState::new();
        assert_eq!(state.to_move(), Mark::X);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert!(state.board().is_clear());
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let state = GameState::new();
        let next = state.apply(4).unwrap();
        assert!(state.board().is_clear());
        assert_eq!(next.board().get(4), Some(Cell::Occupied(Mark::X)));
    }

    #[test]
    fn test_turn_alternates_while_in_progress() {
        let state = GameState::new();
        let next = state.apply(0).unwrap();
        assert_eq!(next.to_move(), Mark::O);
        let next = next.apply(4).unwrap();
        assert_eq!(next.to_move(), Mark::X);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let state = GameState::new();
        assert_eq!(state.apply(10), Err(MoveError::InvalidPosition(10)));
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let state = GameState::new().apply(4).unwrap();
        assert_eq!(state.apply(4), Err(MoveError::CellOccupied(4)));
    }

    #[test]
    fn test_winning_move_freezes_mover() {
        // X: 0, 1, 2 (top row); O: 4, 7.
        let state = play(&[0, 4, 1, 7, 2]);
        assert_eq!(state.status(), GameStatus::Won(Mark::X));
        assert_eq!(state.to_move(), Mark::X);
    }

    #[test]
    fn test_terminal_state_rejects_further_moves() {
        let state = play(&[0, 4, 1, 7, 2]);
        // Occupied cell reports occupancy even after the game is over.
        assert_eq!(state.apply(0), Err(MoveError::CellOccupied(0)));
        // Empty cell reports the finished game.
        assert_eq!(state.apply(5), Err(MoveError::GameAlreadyOver));
    }

    #[test]
    fn test_from_snapshot_recomputes_status() {
        let state = play(&[0, 4, 1, 7, 2]);
        let restored = GameState::from_snapshot(state.board().clone(), Mark::O);
        assert_eq!(restored.status(), GameStatus::Won(Mark::X));
    }

    fn play(moves: &[usize]) -> GameState {
        let mut state = GameState::new();
        for &pos in moves {
            state = state.apply(pos).unwrap();
        }
        state
    }
}
