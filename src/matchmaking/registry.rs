use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::events::ServerMessage;
use crate::matchmaking::pairing::Color;
use crate::matchmaking::room::RoomCode;

/// Transport-issued identity of one open channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unpaired,
    Paired,
}

/// Transient attributes of a live connection.
///
/// `opponent` is a lookup key, not ownership: the peer may already be gone
/// from the registry, and callers must treat a failed lookup as "no opponent".
#[derive(Debug)]
pub struct Connection {
    pub color: Option<Color>,
    pub opponent: Option<ConnectionId>,
    pub room: Option<RoomCode>,
    outbox: Outbox,
}

impl Connection {
    pub fn state(&self) -> ConnectionState {
        if self.opponent.is_some() {
            ConnectionState::Paired
        } else {
            ConnectionState::Unpaired
        }
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    /// Drops color and opponent. Room membership is handled by the caller.
    pub fn clear_pairing(&mut self) {
        self.color = None;
        self.opponent = None;
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    connections: HashMap<ConnectionId, Connection>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unpaired entry. Ids are unique per transport, so an existing
    /// entry with the same id is replaced.
    pub fn register(&mut self, id: ConnectionId, outbox: Outbox) {
        self.connections.insert(
            id,
            Connection {
                color: None,
                opponent: None,
                room: None,
                outbox,
            },
        );
    }

    /// Removes the entry and hands back the former opponent for cascade cleanup.
    pub fn unregister(&mut self, id: ConnectionId) -> Option<ConnectionId> {
        self.connections.remove(&id).and_then(|conn| conn.opponent)
    }

    pub fn lookup(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn lookup_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(&id)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    /// The sender's opponent, only if that opponent is still registered.
    pub fn live_opponent(&self, id: ConnectionId) -> Option<ConnectionId> {
        self.lookup(id)
            .and_then(|conn| conn.opponent)
            .filter(|opponent| self.contains(*opponent))
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outbox() -> Outbox {
        mpsc::unbounded_channel().0
    }

    #[test]
    fn register_starts_unpaired() {
        let mut registry = Registry::new();
        let id = ConnectionId::new();
        registry.register(id, outbox());

        let conn = registry.lookup(id).unwrap();
        assert_eq!(conn.state(), ConnectionState::Unpaired);
        assert!(conn.color.is_none());
        assert!(conn.room.is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregister_returns_former_opponent() {
        let mut registry = Registry::new();
        let a = ConnectionId::new();
        let b = ConnectionId::new();
        registry.register(a, outbox());
        registry.register(b, outbox());
        registry.lookup_mut(a).unwrap().opponent = Some(b);

        assert_eq!(registry.unregister(a), Some(b));
        assert!(registry.lookup(a).is_none());
        assert_eq!(registry.unregister(a), None);
        assert_eq!(registry.unregister(b), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn dangling_opponent_is_not_live() {
        let mut registry = Registry::new();
        let a = ConnectionId::new();
        let gone = ConnectionId::new();
        registry.register(a, outbox());
        registry.lookup_mut(a).unwrap().opponent = Some(gone);

        assert_eq!(registry.lookup(a).unwrap().state(), ConnectionState::Paired);
        assert_eq!(registry.live_opponent(a), None);
    }

    #[test]
    fn connection_ids_are_distinct() {
        assert_ne!(ConnectionId::new(), ConnectionId::new());
    }
}
