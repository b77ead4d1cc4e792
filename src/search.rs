//! Optimal-play search engine.
//!
//! Full-depth minimax over board snapshots. The 9-cell bound keeps the
//! tree small enough that no pruning or depth limit is needed, and the
//! terminal evaluator truncates most branches well before depth 9.

use crate::game::{evaluate, Board, Cell, GameStatus, Mark, BOARD_CELLS, CENTER};
use tracing::instrument;

/// Outcome of a search: the chosen cell and its game-theoretic score.
///
/// The score is from the maximizing mark's perspective: 1 for a forced
/// win, 0 for a draw, -1 for a forced loss. `index` is `None` when the
/// board has no empty cell or is already terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen cell index, if any move exists.
    pub index: Option<usize>,
    /// Score in {-1, 0, 1} for the maximizing mark.
    pub score: i32,
}

/// Chooses the optimal move for `maximizing` on the given board.
///
/// The mark to move at the root is `maximizing` itself. When several moves
/// tie on score the lowest cell index wins, so the result is deterministic.
/// A completely empty board short-circuits to the center cell: always a
/// best opening, and fixed policy rather than a search artifact.
#[instrument(skip(board), fields(board = %board))]
pub fn choose_move(board: &Board, maximizing: Mark) -> SearchResult {
    if board.is_clear() {
        return SearchResult {
            index: Some(CENTER),
            score: 0,
        };
    }

    let mut scratch = board.clone();
    minimax(&mut scratch, maximizing, maximizing)
}

/// Recursive minimax step. `to_move` places next; scores stay relative to
/// `maximizing`. Mutations on `board` are undone before returning.
fn minimax(board: &mut Board, to_move: Mark, maximizing: Mark) -> SearchResult {
    match evaluate(board) {
        GameStatus::Won(winner) => {
            let score = if winner == maximizing { 1 } else { -1 };
            return SearchResult { index: None, score };
        }
        GameStatus::Draw => return SearchResult { index: None, score: 0 },
        GameStatus::InProgress => {}
    }

    let mut best: Option<SearchResult> = None;
    for pos in 0..BOARD_CELLS {
        if !board.is_empty(pos) {
            continue;
        }

        board.set(pos, Cell::Occupied(to_move));
        let score = minimax(board, to_move.opponent(), maximizing).score;
        board.set(pos, Cell::Empty);

        // Strict comparison keeps the first candidate on ties, so equal
        // scores resolve to the lowest index.
        let improves = match best {
            None => true,
            Some(b) if to_move == maximizing => score > b.score,
            Some(b) => score < b.score,
        };
        if improves {
            best = Some(SearchResult {
                index: Some(pos),
                score,
            });
        }
    }

    // An in-progress board always has at least one empty cell.
    best.expect("in-progress board has a legal move")
}
