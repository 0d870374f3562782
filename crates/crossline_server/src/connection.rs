//! Outbound side of a client connection.
//!
//! The game core never touches sockets. It holds [`ConnectionRef`]s and
//! pushes [`ServerMessage`]s into them; the transport decides how they reach
//! the wire.

use crate::error::SendError;
use crate::protocol::ServerMessage;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// A handle that can carry messages to one client.
pub trait Connection: Send + Sync + fmt::Debug {
    /// Whether the peer can still receive messages.
    fn is_open(&self) -> bool;

    /// Queues a message for the peer without waiting for it to be written.
    fn send(&self, message: ServerMessage) -> Result<(), SendError>;
}

/// Shared handle to a connection.
pub type ConnectionRef = Arc<dyn Connection>;

/// Connection backed by an unbounded channel drained by a writer task.
///
/// The connection counts as closed once the receiving half is dropped,
/// which happens when the writer task stops.
#[derive(Debug, Clone, derive_new::new)]
pub struct ChannelConnection {
    tx: UnboundedSender<ServerMessage>,
}

impl Connection for ChannelConnection {
    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    fn send(&self, message: ServerMessage) -> Result<(), SendError> {
        self.tx.send(message).map_err(|_| SendError)
    }
}

/// Fire-and-forget delivery: closed connections are skipped, failures are
/// logged and swallowed.
pub fn deliver(connection: &dyn Connection, message: ServerMessage) {
    let kind = message.kind();
    if !connection.is_open() {
        debug!(kind, "Skipping send to closed connection");
        return;
    }
    if let Err(e) = connection.send(message) {
        warn!(kind, error = %e, "Dropped outbound message");
    }
}
