use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use gomoku_relay::api::events::ServerMessage;
use gomoku_relay::api::server::serve;
use gomoku_relay::{Config, PairingMode};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start(mode: PairingMode) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Config {
        mode,
        seed: Some(7),
        ..Config::default()
    };
    tokio::spawn(async move { serve(listener, &config, std::future::pending()).await });
    addr
}

async fn client(addr: SocketAddr) -> Client {
    let (ws, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    ws
}

async fn send(ws: &mut Client, event: Value) {
    ws.send(Message::text(event.to_string())).await.unwrap();
}

async fn recv(ws: &mut Client) -> ServerMessage {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for a message")
            .expect("stream ended")
            .unwrap();
        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn assert_silent(ws: &mut Client) {
    let next = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(next.is_err(), "expected no message, got {next:?}");
}

fn game_start(message: ServerMessage) -> u8 {
    match message {
        ServerMessage::GameStart { color, .. } => color.into(),
        other => panic!("expected gameStart, got {other:?}"),
    }
}

#[tokio::test]
async fn quick_match_pairs_and_relays() {
    let addr = start(PairingMode::Quick).await;

    let mut a = client(addr).await;
    assert_eq!(recv(&mut a).await, ServerMessage::WaitingForPlayer);

    let mut b = client(addr).await;
    let a_color = game_start(recv(&mut a).await);
    let b_color = game_start(recv(&mut b).await);
    assert_ne!(a_color, b_color);

    let mv = json!({"x": 7, "y": 7, "player": a_color});
    send(&mut a, json!({"type": "makeMove", "payload": mv})).await;
    assert_eq!(recv(&mut b).await, ServerMessage::OpponentMove(mv));

    send(&mut b, json!({"type": "restartRequest"})).await;
    assert_eq!(recv(&mut a).await, ServerMessage::RestartApproval);
    assert_silent(&mut b).await;
}

#[tokio::test]
async fn closing_a_socket_notifies_the_peer() {
    let addr = start(PairingMode::Quick).await;

    let mut a = client(addr).await;
    recv(&mut a).await;
    let mut b = client(addr).await;
    recv(&mut a).await;
    recv(&mut b).await;

    a.close(None).await.unwrap();
    assert_eq!(recv(&mut b).await, ServerMessage::OpponentDisconnected);

    send(
        &mut b,
        json!({"type": "makeMove", "payload": {"x": 1, "y": 1, "player": 2}}),
    )
    .await;
    assert_silent(&mut b).await;

    // A fresh connection waits rather than pairing with the survivor.
    let mut c = client(addr).await;
    assert_eq!(recv(&mut c).await, ServerMessage::WaitingForPlayer);
}

#[tokio::test]
async fn private_rooms() {
    let addr = start(PairingMode::Room).await;

    let mut a = client(addr).await;
    let mut b = client(addr).await;
    let mut c = client(addr).await;

    send(&mut a, json!({"type": "createRoom"})).await;
    let code = match recv(&mut a).await {
        ServerMessage::RoomCreated { room_code } => room_code,
        other => panic!("expected roomCreated, got {other:?}"),
    };

    send(
        &mut b,
        json!({"type": "joinRoom", "payload": {"roomCode": code.to_lowercase()}}),
    )
    .await;
    let a_color = game_start(recv(&mut a).await);
    let b_color = game_start(recv(&mut b).await);
    assert_ne!(a_color, b_color);

    send(&mut c, json!({"type": "joinRoom", "payload": {"roomCode": code}})).await;
    assert_eq!(
        recv(&mut c).await,
        ServerMessage::ErrorMsg {
            message: "Room is full!".to_string()
        }
    );
}

#[tokio::test]
async fn malformed_frames_are_ignored() {
    let addr = start(PairingMode::Room).await;
    let mut a = client(addr).await;

    a.send(Message::text("not json")).await.unwrap();
    send(&mut a, json!({"type": "teleport"})).await;
    send(&mut a, json!({"type": "joinRoom", "payload": {"roomCode": "0000"}})).await;
    assert_eq!(
        recv(&mut a).await,
        ServerMessage::ErrorMsg {
            message: "Room not found!".to_string()
        }
    );
}
