//! Wire messages exchanged with game clients.
//!
//! Every frame is a JSON object with a `type` field. Field names are part of
//! the contract with the browser client and must not change.

use crate::error::{MoveRejection, ProtocolError};
use crossline_tictactoe::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Unique identifier for a connected player.
pub type PlayerId = String;

/// Reason sent to the remaining player when the opponent's connection drops.
pub const OPPONENT_DISCONNECTED: &str = "opponent disconnected";

/// Messages sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask to be seated in a game.
    JoinGame {
        /// Display name shown to the opponent.
        #[serde(default)]
        player_name: String,
    },
    /// Place a mark on the board.
    MakeMove {
        /// Cell index, expected in 0-8. Anything else is refused by the
        /// game authority rather than the decoder.
        cell: i64,
    },
    /// Start the current game over.
    ResetGame {},
}

/// Names of the players in each seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatNames {
    /// Name of the X player.
    #[serde(rename = "X")]
    pub x: String,
    /// Name of the O player.
    #[serde(rename = "O")]
    pub o: String,
}

/// How a game came to an end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameEnding {
    /// A seat's connection closed mid-game.
    Abandoned {
        /// Human-readable reason.
        reason: String,
    },
    /// The board was decided by play. `None` marks a draw.
    Decided {
        /// Indices of the winning line.
        winning_cells: Option<[usize; 3]>,
    },
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Number of open connections.
    PlayersOnline {
        /// Connection count.
        count: usize,
    },
    /// The receiver has been seated.
    GameJoined {
        /// The receiver's id.
        player_id: PlayerId,
        /// The receiver's seat.
        symbol: Mark,
    },
    /// Both seats are filled and the board is fresh.
    GameStart {
        /// Seat names.
        players: SeatNames,
    },
    /// A move was accepted and the game goes on.
    MoveMade {
        /// The whole board after the move.
        board: Board,
        /// The seat now on turn.
        current_turn: Mark,
    },
    /// The game has ended.
    GameOver {
        /// Winning seat, `None` for draws and abandoned games.
        winner: Option<Mark>,
        /// Decided or abandoned.
        #[serde(flatten)]
        ending: GameEnding,
    },
    /// A protocol violation by the receiver.
    Error {
        /// Human-readable message.
        message: String,
    },
    /// The receiver's move was refused. Only sent when explicit rejections
    /// are enabled.
    MoveRejected {
        /// Why the move was refused.
        reason: MoveRejection,
    },
}

impl ServerMessage {
    /// A decided game: `line` is `None` for a draw.
    pub fn game_over(winner: Option<Mark>, line: Option<[usize; 3]>) -> Self {
        ServerMessage::GameOver {
            winner,
            ending: GameEnding::Decided {
                winning_cells: line,
            },
        }
    }

    /// An abandoned game, as seen by the remaining player.
    pub fn opponent_left() -> Self {
        ServerMessage::GameOver {
            winner: None,
            ending: GameEnding::Abandoned {
                reason: OPPONENT_DISCONNECTED.to_string(),
            },
        }
    }

    /// Message tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::PlayersOnline { .. } => "players_online",
            ServerMessage::GameJoined { .. } => "game_joined",
            ServerMessage::GameStart { .. } => "game_start",
            ServerMessage::MoveMade { .. } => "move_made",
            ServerMessage::GameOver { .. } => "game_over",
            ServerMessage::Error { .. } => "error",
            ServerMessage::MoveRejected { .. } => "move_rejected",
        }
    }

    /// Encodes the message as a JSON text frame.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decodes a client text frame.
#[instrument(skip(text), fields(len = text.len()))]
pub fn decode(text: &str) -> Result<ClientMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossline_tictactoe::{Player, Position, Square};
    use serde_json::json;

    #[test]
    fn test_decode_client_messages() {
        assert_eq!(
            decode(r#"{"type":"join_game","player_name":"Ana"}"#).unwrap(),
            ClientMessage::JoinGame {
                player_name: "Ana".to_string()
            }
        );
        assert_eq!(
            decode(r#"{"type":"make_move","cell":4}"#).unwrap(),
            ClientMessage::MakeMove { cell: 4 }
        );
        assert_eq!(
            decode(r#"{"type":"reset_game"}"#).unwrap(),
            ClientMessage::ResetGame {}
        );
    }

    #[test]
    fn test_missing_player_name_defaults_to_empty() {
        assert_eq!(
            decode(r#"{"type":"join_game"}"#).unwrap(),
            ClientMessage::JoinGame {
                player_name: String::new()
            }
        );
    }

    #[test]
    fn test_out_of_range_cell_still_decodes() {
        assert_eq!(
            decode(r#"{"type":"make_move","cell":-3}"#).unwrap(),
            ClientMessage::MakeMove { cell: -3 }
        );
    }

    #[test]
    fn test_malformed_payloads_rejected() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"cell":1}"#).is_err());
        assert!(decode(r#"{"type":"fly_away"}"#).is_err());
        assert!(decode(r#"{"type":"make_move","cell":"four"}"#).is_err());
    }

    #[test]
    fn test_move_made_shape() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        let msg = ServerMessage::MoveMade {
            board,
            current_turn: Player::O,
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "type": "move_made",
                "board": ["X", "", "", "", "", "", "", "", ""],
                "current_turn": "O"
            })
        );
    }

    #[test]
    fn test_game_over_shapes() {
        assert_eq!(
            serde_json::to_value(ServerMessage::game_over(Some(Player::X), Some([0, 1, 2])))
                .unwrap(),
            json!({"type": "game_over", "winner": "X", "winning_cells": [0, 1, 2]})
        );
        assert_eq!(
            serde_json::to_value(ServerMessage::game_over(None, None)).unwrap(),
            json!({"type": "game_over", "winner": null, "winning_cells": null})
        );
        assert_eq!(
            serde_json::to_value(ServerMessage::opponent_left()).unwrap(),
            json!({"type": "game_over", "winner": null, "reason": "opponent disconnected"})
        );
    }

    #[test]
    fn test_game_start_uses_seat_keys() {
        let msg = ServerMessage::GameStart {
            players: SeatNames {
                x: "Ana".to_string(),
                o: "Bo".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"type": "game_start", "players": {"X": "Ana", "O": "Bo"}})
        );
    }

    #[test]
    fn test_rejection_reason_snake_case() {
        let msg = ServerMessage::MoveRejected {
            reason: MoveRejection::CellOutOfRange,
        };
        assert_eq!(
            msg.to_json().unwrap(),
            r#"{"type":"move_rejected","reason":"cell_out_of_range"}"#
        );
    }
}
