//! Core domain types for tic-tac-toe.

use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// Index of the center cell.
pub const CENTER: usize = 4;

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the wire token for this cell: `""`, `"X"`, or `"O"`.
    pub fn token(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Occupied(Mark::X) => "X",
            Cell::Occupied(Mark::O) => "O",
        }
    }

    /// Parses a wire token into a cell.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "" => Some(Cell::Empty),
            "X" => Some(Cell::Occupied(Mark::X)),
            "O" => Some(Cell::Occupied(Mark::O)),
            _ => None,
        }
    }
}

// Cells cross the boundary as their wire tokens, so a serialized board
// is exactly the 9-token sequence collaborators exchange.
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Cell::from_token(&token)
            .ok_or_else(|| D::Error::custom(format!("invalid cell token '{}'", token)))
    }
}

impl JsonSchema for Cell {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Cell".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "enum": ["", "X", "O"]
        })
    }
}

/// 3x3 tic-tac-toe board.
///
/// Publicly read-only; mutation goes through [`GameState::apply`] so the
/// board can only hold states reachable by legal play. Serializes as the
/// 9-token row-major sequence from the snapshot contract.
///
/// [`GameState::apply`]: super::GameState::apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    /// Gets the cell at the given position, or `None` out of bounds.
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Checks if the cell at the given position is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// Checks if every cell is empty.
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Sets the cell at the given position.
    ///
    /// Callers validate `pos`; `GameState::apply` is the checked entry point.
    pub(crate) fn set(&mut self, pos: usize, cell: Cell) {
        self.cells[pos] = cell;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Single-line rendering for logs: `X.O|.X.|..O`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            if row > 0 {
                f.write_str("|")?;
            }
            for col in 0..3 {
                let symbol = match self.cells[row * 3 + col] {
                    Cell::Empty => ".",
                    Cell::Occupied(Mark::X) => "X",
                    Cell::Occupied(Mark::O) => "O",
                };
                f.write_str(symbol)?;
            }
        }
        Ok(())
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended with a winner.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true if no further moves are accepted.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Returns the winner, if the game was won.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::Won(mark) => Some(mark),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opponent_is_involution() {
        for mark in Mark::iter() {
            assert_eq!(mark.opponent().opponent(), mark);
        }
    }

    #[test]
    fn test_cell_token_round_trip() {
        for cell in [
            Cell::Empty,
            Cell::Occupied(Mark::X),
            Cell::Occupied(Mark::O),
        ] {
            assert_eq!(Cell::from_token(cell.token()), Some(cell));
        }
        assert_eq!(Cell::from_token("Z"), None);
    }

    #[test]
    fn test_board_starts_clear() {
        let board = Board::new();
        assert!(board.is_clear());
        assert!(!board.is_full());
        assert_eq!(board.get(9), None);
    }

    #[test]
    fn test_board_display_single_line() {
        let mut board = Board::new();
        board.set(0, Cell::Occupied(Mark::X));
        board.set(4, Cell::Occupied(Mark::O));
        assert_eq!(board.to_string(), "X..|.O.|...");
    }
}
