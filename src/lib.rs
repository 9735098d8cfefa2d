pub mod api;
pub mod config;
pub mod error;
pub mod matchmaking;

pub use config::{Config, PairingMode};
pub use matchmaking::hub::{Hub, HubHandle};
