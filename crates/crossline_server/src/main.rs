//! Crossline - game server entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use crossline_server::{Lobby, ServerConfig, SharedLobby, serve};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            host,
            reject_illegal_moves,
        } => run_server(config, port, host, reject_illegal_moves).await,
        Command::Config { config } => print_config(&config),
    }
}

/// Run the WebSocket game server
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_server(
    config_path: PathBuf,
    port: Option<u16>,
    host: Option<String>,
    reject_illegal_moves: bool,
) -> Result<()> {
    initialize_tracing();

    let mut config = load_config(&config_path)?;
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if reject_illegal_moves {
        config = config.with_reject_illegal_moves(true);
    }

    info!(
        addr = %config.bind_address(),
        reject_illegal_moves = config.reject_illegal_moves(),
        "Starting crossline server"
    );

    let lobby = SharedLobby::new(Lobby::from_config(&config));
    serve(&config, lobby)
        .await
        .with_context(|| format!("Server on {} failed", config.bind_address()))
}

fn print_config(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", toml::to_string(&config)?);
    Ok(())
}

fn load_config(config_path: &Path) -> Result<ServerConfig> {
    Ok(ServerConfig::load(Some(config_path))?)
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crossline_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
