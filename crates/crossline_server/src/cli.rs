//! Command-line interface for crossline.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Crossline - two-player tic-tac-toe matchmaking server
#[derive(Parser, Debug)]
#[command(name = "crossline")]
#[command(about = "Two-player tic-tac-toe server over WebSockets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "crossline.toml")]
        config: PathBuf,

        /// Port to bind to (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config and HOST)
        #[arg(long)]
        host: Option<String>,

        /// Tell players why an illegal move was refused
        #[arg(long)]
        reject_illegal_moves: bool,
    },

    /// Print the effective configuration as TOML and exit
    Config {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "crossline.toml")]
        config: PathBuf,
    },
}
