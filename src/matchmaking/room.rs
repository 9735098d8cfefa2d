use std::collections::HashMap;
use std::fmt;

use rand::RngExt;
use rand::rngs::StdRng;

use crate::error::RoomError;
use crate::matchmaking::pairing::Pairing;
use crate::matchmaking::registry::ConnectionId;

const CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const CODE_LEN: usize = 4;
// 36^4
const CODE_SPACE: usize = 1_679_616;

/// Short shareable room code, always upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn generate(rng: &mut StdRng) -> Self {
        let code = (0..CODE_LEN)
            .map(|_| char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())]))
            .collect();
        Self(code)
    }

    /// Normalizes user input so `ab3x` and ` AB3X ` find the same room.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct Room {
    pub owner: ConnectionId,
    /// Set once a second member joins. No further joins after that.
    pub pairing: Option<Pairing>,
}

impl Room {
    pub fn members(&self) -> Vec<ConnectionId> {
        match self.pairing {
            Some(pairing) => vec![pairing.first.0, pairing.second.0],
            None => vec![self.owner],
        }
    }

    pub fn is_full(&self) -> bool {
        self.pairing.is_some()
    }
}

#[derive(Debug, Default)]
pub struct Rooms {
    rooms: HashMap<RoomCode, Room>,
}

impl Rooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a room owned by `owner` under a fresh code, redrawing on collision.
    pub fn create_room(
        &mut self,
        owner: ConnectionId,
        rng: &mut StdRng,
    ) -> Result<RoomCode, RoomError> {
        if self.rooms.len() >= CODE_SPACE {
            return Err(RoomError::CodeSpaceExhausted);
        }
        let code = loop {
            let code = RoomCode::generate(rng);
            if !self.rooms.contains_key(&code) {
                break code;
            }
        };
        self.rooms.insert(
            code.clone(),
            Room {
                owner,
                pairing: None,
            },
        );
        Ok(code)
    }

    /// Joins an open room. The owner and the joiner become a pairing with
    /// random sides, owner first.
    pub fn join_room(
        &mut self,
        joiner: ConnectionId,
        code: &RoomCode,
        rng: &mut StdRng,
    ) -> Result<Pairing, RoomError> {
        let room = self.rooms.get_mut(code).ok_or(RoomError::NotFound)?;
        if room.is_full() {
            return Err(RoomError::Full);
        }
        if room.owner == joiner {
            return Err(RoomError::AlreadyInRoom);
        }
        let pairing = Pairing::with_random_colors(room.owner, joiner, rng);
        room.pairing = Some(pairing);
        Ok(pairing)
    }

    pub fn get(&self, code: &RoomCode) -> Option<&Room> {
        self.rooms.get(code)
    }

    pub fn remove(&mut self, code: &RoomCode) -> Option<Room> {
        self.rooms.remove(code)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
