use crate::api::events::ServerMessage;
use crate::matchmaking::hub::Hub;
use crate::matchmaking::registry::ConnectionId;

impl Hub {
    /// Forwards `message` unchanged to the sender's current opponent.
    ///
    /// A sender with no live opponent is the normal tail of a disconnect race,
    /// so nothing is sent and nothing is reported.
    pub fn relay(&self, sender: ConnectionId, message: ServerMessage) {
        match self.registry.live_opponent(sender) {
            Some(opponent) => {
                tracing::trace!(from = %sender, to = %opponent, "relaying");
                self.send(opponent, message);
            }
            None => {
                tracing::trace!(connection = %sender, "no opponent, relay skipped");
            }
        }
    }
}
