use crate::api::events::ServerMessage;
use crate::matchmaking::hub::Hub;
use crate::matchmaking::registry::ConnectionId;

impl Hub {
    /// Tears down everything `id` took part in and forgets it.
    ///
    /// Safe to call more than once: an id that is no longer registered is a
    /// late or duplicate cleanup and does nothing.
    pub fn on_disconnect(&mut self, id: ConnectionId) {
        let Some(conn) = self.registry.lookup(id) else {
            tracing::debug!(connection = %id, "disconnect for unknown connection ignored");
            return;
        };
        let room = conn.room.clone();
        let opponent = conn.opponent;

        if self.lobby.leave(id) {
            tracing::debug!(connection = %id, "left the waiting slot");
        }

        if let Some(code) = room
            && let Some(room) = self.rooms.remove(&code)
        {
            if room.is_full() {
                tracing::debug!(room = %code, "room closed");
            } else {
                tracing::debug!(room = %code, "unmatched room discarded");
            }
            for member in room.members() {
                if let Some(conn) = self.registry.lookup_mut(member) {
                    conn.room = None;
                }
            }
        }

        // Only notify a peer that still points back at us.
        if let Some(opponent) = opponent
            && let Some(peer) = self.registry.lookup_mut(opponent)
            && peer.opponent == Some(id)
        {
            peer.clear_pairing();
            self.send(opponent, ServerMessage::OpponentDisconnected);
            tracing::info!(connection = %opponent, "opponent disconnected");
        }

        self.registry.unregister(id);
        tracing::info!(connection = %id, "connection unregistered");
    }
}
