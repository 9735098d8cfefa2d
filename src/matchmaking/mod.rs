pub mod hub;
pub mod lifecycle;
pub mod lobby;
pub mod pairing;
pub mod registry;
pub mod relay;
pub mod room;
