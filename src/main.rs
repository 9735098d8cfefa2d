use clap::Parser;
use tracing_subscriber::EnvFilter;

use gomoku_relay::{Config, api};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::parse();
    tracing::info!(?config, "starting gomoku relay");

    if let Err(err) = api::server::start_server(config).await {
        tracing::error!(%err, "server exited with an error");
        std::process::exit(1);
    }
}
