//! Crossline server library - two-player tic-tac-toe over WebSockets.
//!
//! # Architecture
//!
//! - **Registry**: open connections and the live player count
//! - **Authority**: matchmaking, move validation, win/draw and abandonment
//! - **Lobby**: the single entry point that routes transport events
//! - **Transport**: axum WebSocket endpoint feeding the lobby
//!
//! The rules themselves live in `crossline_tictactoe`.
//!
//! # Example
//!
//! ```no_run
//! use crossline_server::{Lobby, ServerConfig, SharedLobby, serve};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default().with_port(8080);
//! let lobby = SharedLobby::new(Lobby::from_config(&config));
//! serve(&config, lobby).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod authority;
mod config;
mod connection;
mod error;
mod lobby;
mod protocol;
mod registry;
mod session;
mod transport;

// Crate-level exports - Game core
pub use authority::{ALREADY_IN_GAME, GameAuthority, JoinOutcome, MoveOutcome};
pub use registry::ConnectionRegistry;
pub use session::{GameId, GameSession, Player};

// Crate-level exports - Connections and routing
pub use connection::{ChannelConnection, Connection, ConnectionRef, deliver};
pub use lobby::{Lobby, SharedLobby};

// Crate-level exports - Wire protocol
pub use protocol::{
    ClientMessage, GameEnding, OPPONENT_DISCONNECTED, PlayerId, SeatNames, ServerMessage, decode,
};

// Crate-level exports - Configuration and errors
pub use config::ServerConfig;
pub use error::{ConfigError, MoveRejection, ProtocolError, SendError};

// Crate-level exports - Transport
pub use transport::{handle_socket, router, serve};
