//! WebSocket transport.
//!
//! Each socket is split in two: a writer task drains the connection's
//! outbound channel into the socket, and the reader loop feeds inbound
//! frames to the lobby. The lobby hears about the socket exactly once when
//! it closes, however it closes.

use crate::config::ServerConfig;
use crate::connection::ChannelConnection;
use crate::lobby::SharedLobby;
use crate::protocol::ServerMessage;
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

/// Builds the HTTP router: WebSocket upgrades on `/` and `/ws`, plus a
/// health probe.
pub fn router(lobby: SharedLobby) -> Router {
    Router::new()
        .route("/", get(ws_handler))
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .with_state(lobby)
}

async fn health() -> &'static str {
    "ok"
}

async fn ws_handler(ws: WebSocketUpgrade, State(lobby): State<SharedLobby>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, lobby))
}

/// Runs one client connection to completion.
#[instrument(skip_all, fields(player_id = tracing::field::Empty))]
pub async fn handle_socket(socket: WebSocket, lobby: SharedLobby) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    let player_id = lobby.connect(Arc::new(ChannelConnection::new(tx)));
    tracing::Span::current().record("player_id", player_id.as_str());

    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let text = match message.to_json() {
                Ok(text) => text,
                Err(e) => {
                    error!(error = %e, "Failed to encode outbound message");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                debug!("Socket closed while writing");
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => lobby.handle_text(&player_id, text.as_str()),
            Ok(Message::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                Ok(text) => lobby.handle_text(&player_id, text),
                Err(e) => warn!(error = %e, "Ignoring non-UTF-8 binary frame"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Socket error");
                break;
            }
        }
    }

    lobby.disconnect(&player_id);
    writer.abort();
}

/// Binds the configured address and serves until Ctrl-C.
#[instrument(skip_all, fields(addr = %config.bind_address()))]
pub async fn serve(config: &ServerConfig, lobby: SharedLobby) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(addr = %listener.local_addr()?, "Crossline server listening");

    axum::serve(listener, router(lobby))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
