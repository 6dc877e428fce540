//! Strictly SOS - game server binary.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_sos_server::{AppState, RoomRegistry, ServerSettings, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match cli.command {
        Command::Serve { host, port, config } => run_server(host, port, config).await,
        Command::CheckConfig { config } => check_config(config),
    }
}

/// Run the WebSocket game server
#[instrument]
async fn run_server(host: Option<String>, port: Option<u16>, config: Option<PathBuf>) -> Result<()> {
    let settings = ServerSettings::load(config.as_deref())?.with_overrides(host, port);
    settings.validate()?;

    let registry = RoomRegistry::new(settings.room().clone());
    let app = router(&settings, AppState::new(registry));

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(
        address = %address,
        path = %settings.room_path(),
        "Listening on ws://{}{}",
        address,
        settings.room_path()
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// Validate settings and print the resolved defaults
#[instrument]
fn check_config(config: Option<PathBuf>) -> Result<()> {
    let settings = ServerSettings::load(config.as_deref())?;
    settings.validate()?;
    let game = settings.room().resolve()?;

    println!("listen:      {}", settings.bind_address());
    println!("room path:   {}", settings.room_path());
    println!("grid:        {}x{}", game.width(), game.height());
    println!("mode:        {}", game.mode());
    println!("target word: {}", game.target_word());
    Ok(())
}
