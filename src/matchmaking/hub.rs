//! Single owner of all matchmaking state.
//!
//! Connection tasks never touch the registry, lobby or rooms directly. They
//! send `HubEvent`s through a `HubHandle`, and `Hub::run` applies them one at a
//! time, so no handler ever observes another half-way through.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;

use crate::api::events::{ClientMessage, ServerMessage};
use crate::config::PairingMode;
use crate::error::RoomError;
use crate::matchmaking::lobby::Lobby;
use crate::matchmaking::pairing::{Pairing, PairingResult};
use crate::matchmaking::registry::{ConnectionId, ConnectionState, Outbox, Registry};
use crate::matchmaking::room::{RoomCode, Rooms};

#[derive(Debug)]
pub enum HubEvent {
    Connected(ConnectionId, Outbox),
    Message(ConnectionId, ClientMessage),
    Disconnected(ConnectionId),
}

/// Cloneable entry point held by every connection task.
#[derive(Debug, Clone)]
pub struct HubHandle {
    sender: mpsc::Sender<HubEvent>,
}

impl HubHandle {
    /// Spawns the hub task and returns a handle to it.
    pub fn spawn(hub: Hub, buffer: usize) -> Self {
        let (sender, receiver) = mpsc::channel(buffer);
        tokio::spawn(hub.run(receiver));
        Self { sender }
    }

    pub async fn connect(&self, id: ConnectionId, outbox: Outbox) {
        self.send(HubEvent::Connected(id, outbox)).await;
    }

    pub async fn message(&self, id: ConnectionId, message: ClientMessage) {
        self.send(HubEvent::Message(id, message)).await;
    }

    pub async fn disconnect(&self, id: ConnectionId) {
        self.send(HubEvent::Disconnected(id)).await;
    }

    async fn send(&self, event: HubEvent) {
        if self.sender.send(event).await.is_err() {
            tracing::warn!("hub is gone, dropping event");
        }
    }
}

pub struct Hub {
    mode: PairingMode,
    pub(crate) registry: Registry,
    pub(crate) lobby: Lobby,
    pub(crate) rooms: Rooms,
    pub(crate) rng: StdRng,
}

impl Hub {
    pub fn new(mode: PairingMode, rng: StdRng) -> Self {
        Self {
            mode,
            registry: Registry::new(),
            lobby: Lobby::new(),
            rooms: Rooms::new(),
            rng,
        }
    }

    pub fn from_seed(mode: PairingMode, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self::new(mode, StdRng::seed_from_u64(seed))
    }

    pub async fn run(mut self, mut receiver: mpsc::Receiver<HubEvent>) {
        tracing::info!(mode = ?self.mode, "hub started");

        while let Some(event) = receiver.recv().await {
            self.handle_event(event);
        }

        tracing::info!("hub loop ended");
    }

    pub fn handle_event(&mut self, event: HubEvent) {
        match event {
            HubEvent::Connected(id, outbox) => self.on_connect(id, outbox),
            HubEvent::Message(id, message) => self.on_message(id, message),
            HubEvent::Disconnected(id) => self.on_disconnect(id),
        }
    }

    pub fn on_connect(&mut self, id: ConnectionId, outbox: Outbox) {
        tracing::info!(connection = %id, "connection registered");
        self.registry.register(id, outbox);

        if self.mode == PairingMode::Quick {
            match self.lobby.try_pair(id, &mut self.rng) {
                PairingResult::Waiting => {
                    tracing::debug!(connection = %id, "waiting for an opponent");
                    self.send(id, ServerMessage::WaitingForPlayer);
                }
                PairingResult::Paired(pairing) => self.start_game(pairing),
            }
        }
    }

    pub fn on_message(&mut self, id: ConnectionId, message: ClientMessage) {
        match message {
            ClientMessage::CreateRoom => {
                if let Err(err) = self.create_room(id) {
                    tracing::debug!(connection = %id, %err, "create room rejected");
                    self.send(id, ServerMessage::error(err));
                }
            }
            ClientMessage::JoinRoom { room_code } => {
                if let Err(err) = self.join_room(id, &room_code) {
                    tracing::debug!(connection = %id, room = %room_code, %err, "join room rejected");
                    self.send(id, ServerMessage::error(err));
                }
            }
            ClientMessage::MakeMove(payload) => {
                self.relay(id, ServerMessage::OpponentMove(payload));
            }
            ClientMessage::RestartRequest => {
                self.relay(id, ServerMessage::RestartApproval);
            }
        }
    }

    fn create_room(&mut self, owner: ConnectionId) -> Result<(), RoomError> {
        self.ensure_free(owner)?;
        let code = self.rooms.create_room(owner, &mut self.rng)?;
        tracing::info!(connection = %owner, room = %code, "room created");

        if let Some(conn) = self.registry.lookup_mut(owner) {
            conn.room = Some(code.clone());
        }
        self.send(
            owner,
            ServerMessage::RoomCreated {
                room_code: code.to_string(),
            },
        );
        Ok(())
    }

    fn join_room(&mut self, joiner: ConnectionId, raw_code: &str) -> Result<(), RoomError> {
        self.ensure_free(joiner)?;
        let code = RoomCode::normalize(raw_code);
        let pairing = self.rooms.join_room(joiner, &code, &mut self.rng)?;
        tracing::info!(connection = %joiner, room = %code, "room joined");

        if let Some(conn) = self.registry.lookup_mut(joiner) {
            conn.room = Some(code);
        }
        self.start_game(pairing);
        Ok(())
    }

    /// Room requests are only valid for registered, unpaired connections that
    /// are not already in a room.
    fn ensure_free(&self, id: ConnectionId) -> Result<(), RoomError> {
        if self.mode != PairingMode::Room {
            return Err(RoomError::RoomsDisabled);
        }
        match self.registry.lookup(id) {
            Some(conn) if conn.room.is_none() && conn.state() == ConnectionState::Unpaired => {
                Ok(())
            }
            _ => Err(RoomError::AlreadyInRoom),
        }
    }

    fn start_game(&mut self, pairing: Pairing) {
        for (me, opponent, color) in pairing.members() {
            if let Some(conn) = self.registry.lookup_mut(me) {
                conn.color = Some(color);
                conn.opponent = Some(opponent);
            }
        }
        tracing::info!(
            first = %pairing.first.0,
            first_color = ?pairing.first.1,
            second = %pairing.second.0,
            "game started"
        );
        for (me, opponent, color) in pairing.members() {
            self.send(
                me,
                ServerMessage::GameStart {
                    color,
                    opponent_id: opponent,
                },
            );
        }
    }

    /// Queues `message` for `to` without waiting. Unknown ids are ignored.
    ///
    /// Outboxes are unbounded, so a slow reader delays its own messages but
    /// never loses them. A closed outbox means the socket task is already on
    /// its way to a disconnect.
    pub(crate) fn send(&self, to: ConnectionId, message: ServerMessage) {
        let Some(conn) = self.registry.lookup(to) else {
            tracing::trace!(connection = %to, "no such connection, message dropped");
            return;
        };
        if conn.outbox().send(message).is_err() {
            tracing::debug!(connection = %to, "outbox closed, message dropped");
        }
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn waiting(&self) -> Option<ConnectionId> {
        self.lobby.waiting()
    }
}
