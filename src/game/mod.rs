//! Game state machine for tic-tac-toe.

mod rules;
mod state;
mod types;

pub use rules::{evaluate, LINES};
pub use state::{GameState, MoveError};
pub use types::{Board, Cell, GameStatus, Mark, BOARD_CELLS, CENTER};
