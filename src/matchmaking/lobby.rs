use rand::rngs::StdRng;

use crate::matchmaking::pairing::{Pairing, PairingResult};
use crate::matchmaking::registry::ConnectionId;

/// Quick-match queue with room for a single waiting connection.
#[derive(Debug, Default)]
pub struct Lobby {
    waiting: Option<ConnectionId>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_pair(&mut self, id: ConnectionId, rng: &mut StdRng) -> PairingResult {
        match self.waiting.take() {
            // Re-offering the waiting connection keeps it waiting.
            Some(waiting) if waiting == id => {
                self.waiting = Some(waiting);
                PairingResult::Waiting
            }
            Some(waiting) => PairingResult::Paired(Pairing::with_random_colors(waiting, id, rng)),
            None => {
                self.waiting = Some(id);
                PairingResult::Waiting
            }
        }
    }

    /// Clears the slot if `id` holds it. Returns whether it did.
    pub fn leave(&mut self, id: ConnectionId) -> bool {
        if self.waiting == Some(id) {
            self.waiting = None;
            true
        } else {
            false
        }
    }

    pub fn waiting(&self) -> Option<ConnectionId> {
        self.waiting
    }
}
