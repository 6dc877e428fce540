//! Server settings: listen address, room name and room defaults.

use crate::error::ServerError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_sos::RoomOptions;
use tracing::{debug, info, instrument};

/// Environment variable overriding the listen host.
pub const HOST_VAR: &str = "HOST";

/// Environment variable overriding the listen port.
pub const PORT_VAR: &str = "PORT";

/// Settings for the WebSocket server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Name under which the room type is exposed (`/<room_name>`).
    #[serde(default = "default_room_name")]
    room_name: String,

    /// Room options used where a client leaves a field unset.
    #[serde(default)]
    room: RoomOptions,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    2567
}

fn default_room_name() -> String {
    "sos_room".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            room_name: default_room_name(),
            room: RoomOptions::default(),
        }
    }
}

impl ServerSettings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ServerError::settings(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ServerError::settings(format!("Failed to parse settings: {}", e)))?;

        info!(room_name = %settings.room_name, "Settings loaded successfully");
        Ok(settings)
    }

    /// Loads settings from `path` when given, then applies `HOST` and `PORT`
    /// from the process environment.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ServerError> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.with_env(|name| std::env::var(name).ok())
    }

    /// Applies `HOST` and `PORT` as resolved by `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        if let Some(host) = lookup(HOST_VAR).filter(|h| !h.is_empty()) {
            debug!(host = %host, "Host taken from environment");
            self.host = host;
        }
        if let Some(port) = lookup(PORT_VAR).filter(|p| !p.is_empty()) {
            self.port = port
                .parse()
                .map_err(|e| ServerError::settings(format!("Invalid {} {:?}: {}", PORT_VAR, port, e)))?;
            debug!(port = self.port, "Port taken from environment");
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Address to bind, as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Route path of the room endpoint.
    pub fn room_path(&self) -> String {
        format!("/{}", self.room_name)
    }

    /// Checks that the room defaults resolve to a playable configuration.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.room_name.is_empty() || self.room_name.contains('/') {
            return Err(ServerError::settings(format!(
                "Invalid room name {:?}",
                self.room_name
            )));
        }
        self.room.resolve()?;
        Ok(())
    }
}
