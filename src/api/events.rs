use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::matchmaking::pairing::Color;
use crate::matchmaking::registry::ConnectionId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    CreateRoom,
    JoinRoom { room_code: String },
    // Opaque to the server: `{x, y, player}` by convention, never validated.
    MakeMove(Value),
    RestartRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    RoomCreated {
        room_code: String,
    },
    ErrorMsg {
        message: String,
    },
    WaitingForPlayer,
    GameStart {
        color: Color,
        opponent_id: ConnectionId,
    },
    OpponentMove(Value),
    RestartApproval,
    OpponentDisconnected,
}

impl ServerMessage {
    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::ErrorMsg {
            message: err.to_string(),
        }
    }
}
