//! Terminal-state evaluation for tic-tac-toe.
//!
//! Pure functions over board snapshots. [`evaluate`] is the single source
//! of truth for terminal detection: the state machine and the search engine
//! both consume it, so win logic cannot diverge between them.

use super::types::{Board, Cell, GameStatus};
use tracing::instrument;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Evaluates the terminal status of a board.
///
/// Checks the 8 lines before the full-board check, so a board that is both
/// full and won reports the win, not a draw. Returns
/// [`GameStatus::InProgress`] when neither applies.
#[instrument]
pub fn evaluate(board: &Board) -> GameStatus {
    for [a, b, c] in LINES {
        if let Some(Cell::Occupied(mark)) = board.get(a)
            && board.get(b) == Some(Cell::Occupied(mark))
            && board.get(c) == Some(Cell::Occupied(mark))
        {
            return GameStatus::Won(mark);
        }
    }

    if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}
