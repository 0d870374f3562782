//! Routes connection events and client messages to the game core.

use crate::authority::{GameAuthority, JoinOutcome};
use crate::config::ServerConfig;
use crate::connection::{ConnectionRef, deliver};
use crate::protocol::{ClientMessage, PlayerId, ServerMessage, decode};
use crate::registry::ConnectionRegistry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument, warn};

/// The connection registry and the game authority behind one front door.
///
/// All state changes go through `&mut self`, one message at a time, so a
/// game can never observe a half-applied move.
#[derive(Debug, Default)]
pub struct Lobby {
    registry: ConnectionRegistry,
    authority: GameAuthority,
    reject_illegal_moves: bool,
}

impl Lobby {
    /// Creates an empty lobby.
    pub fn new(reject_illegal_moves: bool) -> Self {
        Self {
            reject_illegal_moves,
            ..Self::default()
        }
    }

    /// Creates an empty lobby configured from server settings.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(*config.reject_illegal_moves())
    }

    /// Number of open connections.
    pub fn online_count(&self) -> usize {
        self.registry.online_count()
    }

    /// Read access to the games.
    pub fn authority(&self) -> &GameAuthority {
        &self.authority
    }

    /// Registers a new connection and returns its player id.
    pub fn connect(&mut self, connection: ConnectionRef) -> PlayerId {
        self.registry.on_connect(connection)
    }

    /// Tears down everything held by a closed connection.
    ///
    /// Safe to call more than once; only the first call has any effect.
    #[instrument(skip(self))]
    pub fn disconnect(&mut self, player_id: &str) {
        if !self.registry.on_disconnect(player_id) {
            return;
        }
        self.authority.disconnect(player_id);
        self.registry.broadcast_count();
    }

    /// Decodes a text frame and handles it. Malformed frames are logged and
    /// dropped without a reply.
    #[instrument(skip(self, text))]
    pub fn handle_text(&mut self, player_id: &str, text: &str) {
        match decode(text) {
            Ok(message) => self.dispatch(player_id, message),
            Err(e) => warn!(error = %e, payload = %text, "Ignoring malformed message"),
        }
    }

    /// Handles one decoded client message.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, player_id: &str, message: ClientMessage) {
        let Some(connection) = self.registry.connection(player_id).cloned() else {
            debug!("Ignoring message from closed connection");
            return;
        };

        match message {
            ClientMessage::JoinGame { player_name } => {
                let outcome = self
                    .authority
                    .join(player_id.to_string(), player_name, connection);
                // A refused join is the offender's business alone.
                if outcome != JoinOutcome::Rejected {
                    self.registry.broadcast_count();
                }
            }
            ClientMessage::MakeMove { cell } => {
                if let Err(reason) = self.authority.make_move(player_id, cell) {
                    debug!(cell, %reason, "Move refused");
                    if self.reject_illegal_moves {
                        deliver(connection.as_ref(), ServerMessage::MoveRejected { reason });
                    }
                }
            }
            ClientMessage::ResetGame {} => {
                self.authority.reset(player_id);
            }
        }
    }
}

/// Clonable, thread-safe handle to a [`Lobby`].
///
/// A single mutex serialises every event. Handlers never await while
/// holding it.
#[derive(Debug, Clone, Default)]
pub struct SharedLobby {
    inner: Arc<Mutex<Lobby>>,
}

impl SharedLobby {
    /// Wraps a lobby for sharing between connection tasks.
    pub fn new(lobby: Lobby) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lobby)),
        }
    }

    /// Locks the lobby. A panic in another handler does not take the
    /// server down with it; the state it left behind is used as is.
    pub fn lock(&self) -> MutexGuard<'_, Lobby> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Lobby::connect`].
    pub fn connect(&self, connection: ConnectionRef) -> PlayerId {
        self.lock().connect(connection)
    }

    /// See [`Lobby::disconnect`].
    pub fn disconnect(&self, player_id: &str) {
        self.lock().disconnect(player_id)
    }

    /// See [`Lobby::handle_text`].
    pub fn handle_text(&self, player_id: &str, text: &str) {
        self.lock().handle_text(player_id, text)
    }

    /// See [`Lobby::online_count`].
    pub fn online_count(&self) -> usize {
        self.lock().online_count()
    }
}
