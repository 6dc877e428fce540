//! Server error types.

use derive_more::{Display, Error};
use strictly_sos::{ConfigError, RoomId};

/// Errors raised by the server around the game core.
#[derive(Debug, Clone, Display, Error)]
pub enum ServerError {
    /// The room's task has stopped accepting commands.
    #[display("Room {} is closed", _0)]
    RoomClosed(#[error(not(source))] RoomId),

    /// Room options failed validation.
    #[display("{}", _0)]
    Config(ConfigError),

    /// Server settings could not be loaded.
    #[display("Settings error: {} at {}:{}", message, file, line)]
    Settings {
        /// Error message.
        message: String,
        /// Line number where error occurred.
        line: u32,
        /// Source file where error occurred.
        file: &'static str,
    },
}

impl ServerError {
    /// Creates a settings error with caller location tracking.
    #[track_caller]
    pub fn settings(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self::Settings {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<ConfigError> for ServerError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
