//! Game session management.
//!
//! A session pairs one game with the opponent kind chosen at creation.
//! The store serializes every read-modify-write against a session behind
//! its lock, so two concurrent moves cannot both land on a stale snapshot.

use crate::game::{GameState, GameStatus, Mark, MoveError};
use crate::search;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Kind of the second participant, chosen at game creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    /// Two humans alternate moves; no automated replies.
    Human,
    /// The engine answers every legal human move that leaves the game
    /// in progress.
    #[serde(rename = "bot")]
    Engine,
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// A session with this ID already exists.
    #[display("Session '{}' already exists", _0)]
    #[from(ignore)]
    SessionExists(SessionId),

    /// No session with this ID.
    #[display("Session '{}' not found", _0)]
    #[from(ignore)]
    SessionNotFound(SessionId),

    /// The move was rejected by the game.
    #[display("Invalid move: {}", _0)]
    Move(MoveError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Move(err) => Some(err),
            _ => None,
        }
    }
}

/// What a completed turn reports back for rendering or storage: the board
/// snapshot, the next mark to move, the status, and the engine's reply
/// position when one was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TurnReport {
    /// Board snapshot as the 9-token sequence.
    pub board: crate::game::Board,
    /// Next mark to move (the mover itself once the game is terminal).
    pub turn: Mark,
    /// Game status after the turn.
    pub status: GameStatus,
    /// Cell the engine answered with, if it moved this turn.
    pub reply: Option<usize>,
}

/// A game session: one game plus the opponent kind.
#[derive(Debug, Clone)]
pub struct MatchSession {
    /// Session ID.
    pub id: SessionId,
    /// The game state.
    pub state: GameState,
    /// Kind of the second participant.
    pub opponent: OpponentKind,
}

impl MatchSession {
    /// Creates a new session.
    #[instrument]
    pub fn new(id: SessionId, opponent: OpponentKind) -> Self {
        info!(session_id = %id, ?opponent, "Creating new game session");
        Self {
            id,
            state: GameState::new(),
            opponent,
        }
    }

    /// Plays one turn: applies the human move, then lets the engine answer
    /// if the opponent is automated and the game is still in progress.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the human move is rejected; the session is
    /// left unchanged in that case.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn play(&mut self, pos: usize) -> Result<TurnReport, MoveError> {
        let after = self.state.apply(pos).inspect_err(|err| {
            warn!(pos, error = %err, "Rejected move");
        })?;
        self.state = after;

        let mut reply = None;
        if self.opponent == OpponentKind::Engine && self.state.status() == GameStatus::InProgress {
            reply = self.engine_move();
        }

        info!(
            board = %self.state.board(),
            status = ?self.state.status(),
            reply,
            "Turn completed"
        );
        Ok(self.report(reply))
    }

    /// Lets the engine open the game when it owns the first move.
    ///
    /// Returns `None` when the opponent is human, the board is not empty,
    /// or the game is over.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn engine_opening(&mut self) -> Option<TurnReport> {
        if self.opponent != OpponentKind::Engine
            || !self.state.board().is_clear()
            || self.state.status().is_terminal()
        {
            return None;
        }
        let reply = self.engine_move();
        reply.map(|pos| self.report(Some(pos)))
    }

    /// Searches and applies the engine's move for the mark to move.
    fn engine_move(&mut self) -> Option<usize> {
        let mark = self.state.to_move();
        let found = search::choose_move(self.state.board(), mark);
        let pos = found.index?;

        debug!(?mark, pos, score = found.score, "Engine chose move");
        match self.state.apply(pos) {
            Ok(next) => {
                self.state = next;
                Some(pos)
            }
            // The search only proposes empty cells on an in-progress
            // board, so this branch is unreachable in practice.
            Err(err) => {
                warn!(pos, error = %err, "Engine move rejected");
                None
            }
        }
    }

    /// Builds the turn report for the current state.
    fn report(&self, reply: Option<usize>) -> TurnReport {
        TurnReport {
            board: self.state.board().clone(),
            turn: self.state.to_move(),
            status: self.state.status(),
            reply,
        }
    }
}

/// In-memory store of game sessions.
///
/// All operations lock the whole map for their read-modify-write cycle,
/// which serializes concurrent moves against the same session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, MatchSession>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a new session and returns its opening report.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionExists`] if the ID is taken.
    #[instrument(skip(self))]
    pub fn create(
        &self,
        id: SessionId,
        opponent: OpponentKind,
    ) -> Result<TurnReport, SessionError> {
        let mut sessions = self.sessions.lock().unwrap();

        if sessions.contains_key(&id) {
            warn!(session_id = %id, "Session already exists");
            return Err(SessionError::SessionExists(id));
        }

        let session = MatchSession::new(id.clone(), opponent);
        let report = session.report(None);
        sessions.insert(id, session);
        Ok(report)
    }

    /// Plays one turn in a session, holding the lock across the whole
    /// fetch-apply-store cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionNotFound`] for unknown IDs and
    /// [`SessionError::Move`] for rejected moves.
    #[instrument(skip(self))]
    pub fn play(&self, id: &str, pos: usize) -> Result<TurnReport, SessionError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::SessionNotFound(id.to_string()))?;
        Ok(session.play(pos)?)
    }

    /// Returns the current report for a session.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Option<TurnReport> {
        let sessions = self.sessions.lock().unwrap();
        let report = sessions.get(id).map(|s| s.report(None));
        if report.is_none() {
            debug!(session_id = id, "Session not found");
        }
        report
    }

    /// Removes a session, returning true if it existed.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> bool {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.remove(id).is_some()
    }

    /// Lists all active session IDs.
    #[instrument(skip(self))]
    pub fn list(&self) -> Vec<SessionId> {
        let sessions = self.sessions.lock().unwrap();
        sessions.keys().cloned().collect()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
