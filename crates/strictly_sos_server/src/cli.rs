//! Command-line interface for strictly_sos.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly SOS - Two-player letter placement game server
#[derive(Parser, Debug)]
#[command(name = "strictly_sos")]
#[command(about = "WebSocket server for the SOS letter game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the WebSocket game server
    Serve {
        /// Host to bind to (overrides HOST and the settings file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides PORT and the settings file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a settings file and print the resolved room defaults
    CheckConfig {
        /// Path to a TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
