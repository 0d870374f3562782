//! Error types for the crossline server.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// An inbound payload that could not be decoded.
#[derive(Debug, Clone, Display, Error)]
#[display("Protocol error: {} at {}:{}", message, file, line)]
pub struct ProtocolError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProtocolError {
    /// Creates a new protocol error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Malformed message: {}", err))
    }
}

/// The peer is gone; the message was not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Connection closed")]
pub struct SendError;

/// Why a move was refused.
///
/// A refused move never changes the board. The reason reaches the client
/// only when the server runs with `reject_illegal_moves` enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveRejection {
    /// The sender is not seated in any game.
    #[display("Not in a game")]
    NoGame,
    /// The game is waiting for an opponent or has already ended.
    #[display("Game is not active")]
    GameNotActive,
    /// The other seat is on turn.
    #[display("Not your turn")]
    NotYourTurn,
    /// The cell index is outside 0-8.
    #[display("Cell out of range")]
    CellOutOfRange,
    /// The cell already holds a mark.
    #[display("Cell already occupied")]
    CellOccupied,
}

impl From<crossline_tictactoe::MoveError> for MoveRejection {
    fn from(err: crossline_tictactoe::MoveError) -> Self {
        use crossline_tictactoe::MoveError;
        match err {
            MoveError::GameOver => MoveRejection::GameNotActive,
            MoveError::WrongPlayer(_) => MoveRejection::NotYourTurn,
            MoveError::SquareOccupied(_) => MoveRejection::CellOccupied,
        }
    }
}
