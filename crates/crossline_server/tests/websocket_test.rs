//! Drives the real axum router over WebSocket connections.

use crossline_server::{Lobby, SharedLobby, router};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> (SocketAddr, SharedLobby) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let lobby = SharedLobby::new(Lobby::new(false));
    let app = router(lobby.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, lobby)
}

async fn connect(addr: SocketAddr) -> Client {
    let (ws, _) = connect_async(format!("ws://{}/", addr)).await.unwrap();
    ws
}

async fn send(ws: &mut Client, value: Value) {
    ws.send(Message::Text(value.to_string().into())).await.unwrap();
}

/// Next message that is not a player-count update.
async fn next_game_message(ws: &mut Client) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for a message")
            .expect("stream ended")
            .expect("socket error");
        if let Message::Text(text) = frame {
            let value: Value = serde_json::from_str(text.as_str()).unwrap();
            if value["type"] != "players_online" {
                return value;
            }
        }
    }
}

#[tokio::test]
async fn test_two_players_over_websockets() {
    let (addr, _lobby) = spawn_server().await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;

    send(&mut a, json!({"type": "join_game", "player_name": "Ana"})).await;
    let joined = next_game_message(&mut a).await;
    assert_eq!(joined["type"], "game_joined");
    assert_eq!(joined["symbol"], "X");

    send(&mut b, json!({"type": "join_game", "player_name": "Bo"})).await;
    let start = json!({"type": "game_start", "players": {"X": "Ana", "O": "Bo"}});
    assert_eq!(next_game_message(&mut a).await, start);
    let joined = next_game_message(&mut b).await;
    assert_eq!(joined["symbol"], "O");
    assert_eq!(next_game_message(&mut b).await, start);

    // Garbage does not cost the sender its connection.
    a.send(Message::Text("definitely not json".into())).await.unwrap();

    send(&mut a, json!({"type": "make_move", "cell": 0})).await;
    let made = json!({
        "type": "move_made",
        "board": ["X", "", "", "", "", "", "", "", ""],
        "current_turn": "O"
    });
    assert_eq!(next_game_message(&mut a).await, made);
    assert_eq!(next_game_message(&mut b).await, made);

    a.close(None).await.unwrap();
    assert_eq!(
        next_game_message(&mut b).await,
        json!({"type": "game_over", "winner": null, "reason": "opponent disconnected"})
    );
}

#[tokio::test]
async fn test_player_count_follows_connections() {
    let (addr, lobby) = spawn_server().await;
    let mut a = connect(addr).await;

    let first = a.next().await.unwrap().unwrap();
    let value: Value = serde_json::from_str(first.to_text().unwrap()).unwrap();
    assert_eq!(value, json!({"type": "players_online", "count": 1}));

    let mut b = connect(addr).await;
    let second = a.next().await.unwrap().unwrap();
    let value: Value = serde_json::from_str(second.to_text().unwrap()).unwrap();
    assert_eq!(value, json!({"type": "players_online", "count": 2}));

    b.close(None).await.unwrap();
    let third = tokio::time::timeout(Duration::from_secs(5), a.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let value: Value = serde_json::from_str(third.to_text().unwrap()).unwrap();
    assert_eq!(value, json!({"type": "players_online", "count": 1}));
    assert_eq!(lobby.online_count(), 1);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (addr, _lobby) = spawn_server().await;
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("ok"));
}
