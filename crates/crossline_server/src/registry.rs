//! Registry of open client connections.

use crate::connection::{ConnectionRef, deliver};
use crate::protocol::{PlayerId, ServerMessage};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Tracks every open connection and the live player count.
///
/// Each connection gets a fresh id on arrival. The online count is the
/// number of registered connections, so it cannot drift from the set it
/// describes.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<PlayerId, ConnectionRef>,
    next_id: u64,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection, broadcasts the new count and returns the id
    /// allocated to it.
    #[instrument(skip(self, connection))]
    pub fn on_connect(&mut self, connection: ConnectionRef) -> PlayerId {
        self.next_id += 1;
        let player_id = format!("player_{}", self.next_id);
        self.connections.insert(player_id.clone(), connection);

        info!(player_id = %player_id, online = self.online_count(), "Player connected");
        self.broadcast_count();
        player_id
    }

    /// Forgets a connection.
    ///
    /// Returns `false` when the id is unknown, so a second disconnect for
    /// the same connection is a no-op. The caller broadcasts the new count
    /// after tearing down the player's game.
    #[instrument(skip(self))]
    pub fn on_disconnect(&mut self, player_id: &str) -> bool {
        match self.connections.remove(player_id) {
            Some(_) => {
                info!(online = self.online_count(), "Player disconnected");
                true
            }
            None => {
                debug!("Ignoring disconnect for unknown player");
                false
            }
        }
    }

    /// Number of open connections.
    pub fn online_count(&self) -> usize {
        self.connections.len()
    }

    /// The connection registered under the id.
    pub fn connection(&self, player_id: &str) -> Option<&ConnectionRef> {
        self.connections.get(player_id)
    }

    /// Sends `players_online` to every open connection.
    pub fn broadcast_count(&self) {
        let count = self.online_count();
        debug!(count, "Broadcasting player count");
        for connection in self.connections.values() {
            deliver(connection.as_ref(), ServerMessage::PlayersOnline { count });
        }
    }
}
