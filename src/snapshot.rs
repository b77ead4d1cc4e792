//! Storage-boundary encoding for game snapshots.
//!
//! Collaborators that persist games exchange boards as an ordered sequence
//! of exactly 9 cell tokens, joined with commas on the wire (`"X,,O,,,,,,"`),
//! plus a turn marker (`"X"` / `"O"`) and a status string (`"playing"`,
//! `"X_wins"`, `"O_wins"`, `"draw"`). Anything else is a malformed snapshot
//! and is rejected before it reaches the engine.

use crate::game::{Board, Cell, GameStatus, Mark, BOARD_CELLS};
use std::str::FromStr;
use tracing::instrument;

/// Errors raised while decoding a stored snapshot.
///
/// Surfaced to the caller as a data-integrity fault; never retried
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SnapshotError {
    /// The board text did not split into exactly 9 tokens.
    #[display("Snapshot has {} cells, expected {}", _0, BOARD_CELLS)]
    WrongLength(usize),

    /// A cell token was not one of `""`, `"X"`, `"O"`.
    #[display("Invalid cell token '{}'", _0)]
    InvalidToken(String),

    /// The turn marker was not `"X"` or `"O"`.
    #[display("Invalid turn marker '{}'", _0)]
    InvalidTurn(String),

    /// The status string was not a known status.
    #[display("Invalid status '{}'", _0)]
    InvalidStatus(String),
}

impl std::error::Error for SnapshotError {}

/// Encodes a board as the comma-joined 9-token wire string.
pub fn encode_board(board: &Board) -> String {
    board
        .cells()
        .iter()
        .map(|c| c.token())
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes a board from its wire string.
///
/// An empty string decodes to a fresh board, matching how stored games
/// begin life before any move is recorded.
///
/// # Errors
///
/// Returns [`SnapshotError`] if the text does not hold exactly 9 valid
/// cell tokens.
#[instrument]
pub fn decode_board(text: &str) -> Result<Board, SnapshotError> {
    if text.is_empty() {
        return Ok(Board::new());
    }

    let tokens: Vec<&str> = text.split(',').collect();
    if tokens.len() != BOARD_CELLS {
        return Err(SnapshotError::WrongLength(tokens.len()));
    }

    let mut board = Board::new();
    for (pos, token) in tokens.iter().enumerate() {
        let cell = Cell::from_token(token)
            .ok_or_else(|| SnapshotError::InvalidToken(token.to_string()))?;
        board.set(pos, cell);
    }
    Ok(board)
}

/// Decodes a turn marker.
///
/// # Errors
///
/// Returns [`SnapshotError::InvalidTurn`] for anything but `"X"` or `"O"`.
pub fn decode_turn(text: &str) -> Result<Mark, SnapshotError> {
    Mark::from_str(text).map_err(|_| SnapshotError::InvalidTurn(text.to_string()))
}

/// Encodes a status as its wire string.
pub fn encode_status(status: GameStatus) -> String {
    match status {
        GameStatus::InProgress => "playing".to_string(),
        GameStatus::Won(mark) => format!("{}_wins", mark),
        GameStatus::Draw => "draw".to_string(),
    }
}

/// Decodes a status from its wire string.
///
/// # Errors
///
/// Returns [`SnapshotError::InvalidStatus`] for unknown status text.
pub fn decode_status(text: &str) -> Result<GameStatus, SnapshotError> {
    match text {
        "playing" => Ok(GameStatus::InProgress),
        "X_wins" => Ok(GameStatus::Won(Mark::X)),
        "O_wins" => Ok(GameStatus::Won(Mark::O)),
        "draw" => Ok(GameStatus::Draw),
        _ => Err(SnapshotError::InvalidStatus(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn test_fresh_board_round_trip() {
        let board = Board::new();
        let wire = encode_board(&board);
        assert_eq!(wire, ",,,,,,,,");
        assert_eq!(decode_board(&wire).unwrap(), board);
    }

    #[test]
    fn test_played_board_round_trip() {
        let state = GameState::new().apply(4).unwrap().apply(0).unwrap();
        let wire = encode_board(state.board());
        assert_eq!(wire, "O,,,,X,,,,");
        assert_eq!(&decode_board(&wire).unwrap(), state.board());
    }

    #[test]
    fn test_empty_text_is_fresh_board() {
        assert_eq!(decode_board("").unwrap(), Board::new());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(
            decode_board("X,O,X"),
            Err(SnapshotError::WrongLength(3))
        );
        assert_eq!(
            decode_board("X,,,,,,,,,"),
            Err(SnapshotError::WrongLength(10))
        );
    }

    #[test]
    fn test_invalid_token_rejected() {
        assert_eq!(
            decode_board("X,Z,,,,,,,"),
            Err(SnapshotError::InvalidToken("Z".to_string()))
        );
    }

    #[test]
    fn test_turn_markers() {
        assert_eq!(decode_turn("X").unwrap(), Mark::X);
        assert_eq!(decode_turn("O").unwrap(), Mark::O);
        assert_eq!(
            decode_turn("Q"),
            Err(SnapshotError::InvalidTurn("Q".to_string()))
        );
    }

    #[test]
    fn test_status_strings() {
        for status in [
            GameStatus::InProgress,
            GameStatus::Won(Mark::X),
            GameStatus::Won(Mark::O),
            GameStatus::Draw,
        ] {
            assert_eq!(decode_status(&encode_status(status)).unwrap(), status);
        }
        assert_eq!(encode_status(GameStatus::Won(Mark::X)), "X_wins");
        assert_eq!(
            decode_status("finished"),
            Err(SnapshotError::InvalidStatus("finished".to_string()))
        );
    }
}
