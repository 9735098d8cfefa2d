use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Parser, ValueEnum};

/// How connections find an opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PairingMode {
    /// Pair each new connection with whoever is already waiting.
    Quick,
    /// Pair only through `createRoom` / `joinRoom` with a shared code.
    Room,
}

/// Runtime configuration. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "gomoku_relay", about = "Two-player pairing and move relay server")]
pub struct Config {
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "PAIRING_MODE", value_enum, default_value_t = PairingMode::Quick)]
    pub mode: PairingMode,

    /// Events buffered in front of the hub.
    #[arg(long, env = "EVENT_BUFFER", default_value_t = 1024)]
    pub event_buffer: usize,

    /// Fixed seed for color draws and room codes.
    #[arg(long, env = "PAIRING_SEED")]
    pub seed: Option<u64>,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            mode: PairingMode::Quick,
            event_buffer: 1024,
            seed: None,
        }
    }
}
