use rand::RngExt;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::matchmaking::registry::ConnectionId;

/// Side of the board. Black moves first. On the wire black is `1` and white `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => 1,
            Color::White => 2,
        }
    }
}

impl TryFrom<u8> for Color {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Color::Black),
            2 => Ok(Color::White),
            other => Err(format!("invalid color {other}, expected 1 or 2")),
        }
    }
}

/// Two connections and their sides. The sides always differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub first: (ConnectionId, Color),
    pub second: (ConnectionId, Color),
}

impl Pairing {
    /// One fair coin flip decides `first`'s side; `second` gets the other.
    pub fn with_random_colors(first: ConnectionId, second: ConnectionId, rng: &mut StdRng) -> Self {
        let first_color = if rng.random_bool(0.5) {
            Color::Black
        } else {
            Color::White
        };
        Self {
            first: (first, first_color),
            second: (second, first_color.opposite()),
        }
    }

    pub fn members(&self) -> [(ConnectionId, ConnectionId, Color); 2] {
        [
            (self.first.0, self.second.0, self.first.1),
            (self.second.0, self.first.0, self.second.1),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingResult {
    Paired(Pairing),
    Waiting,
}
