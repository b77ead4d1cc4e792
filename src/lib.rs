//! Tic-tac-toe engine: rules, optimal-play search, and session management.
//!
//! # Architecture
//!
//! - **Game**: the state machine - board, move legality, turn alternation,
//!   and terminal-state detection
//! - **Search**: minimax adversary that plays optimally over a board
//!   snapshot
//! - **Snapshot**: the storage-boundary encoding collaborators use to
//!   exchange boards, turn markers, and status strings
//! - **Session**: one game per session ID with the opponent kind chosen
//!   at creation, behind a store that serializes concurrent moves
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{choose_move, GameState, GameStatus};
//!
//! let state = GameState::new();
//! let state = state.apply(0)?;
//!
//! // Let the engine answer for O.
//! let result = choose_move(state.board(), state.to_move());
//! let state = state.apply(result.index.unwrap())?;
//! assert_eq!(state.status(), GameStatus::InProgress);
//! # Ok::<(), tictactoe_core::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod game;
mod search;
mod session;
mod snapshot;

// Crate-level exports - Game state machine
pub use game::{evaluate, Board, Cell, GameState, GameStatus, Mark, MoveError, BOARD_CELLS, CENTER, LINES};

// Crate-level exports - Search engine
pub use search::{choose_move, SearchResult};

// Crate-level exports - Session management
pub use session::{MatchSession, OpponentKind, SessionError, SessionId, SessionStore, TurnReport};

// Crate-level exports - Snapshot codec
pub use snapshot::{
    decode_board, decode_status, decode_turn, encode_board, encode_status, SnapshotError,
};
