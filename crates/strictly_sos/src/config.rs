//! Room configuration: caller options, defaults and validation.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Default grid width.
pub const DEFAULT_GRID_WIDTH: i64 = 6;
/// Default grid height.
pub const DEFAULT_GRID_HEIGHT: i64 = 6;
/// Default target word.
pub const DEFAULT_TARGET_WORD: &str = "OSO";
/// Largest board a room may be created with.
pub const MAX_CELLS: usize = 1_000_000;
/// Length every target word must have for detection to run.
pub const WORD_LENGTH: usize = 3;

/// Which straight-line directions count towards a sequence.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum GameMode {
    /// Horizontal and vertical lines only.
    #[serde(rename = "horizontal-vertical")]
    #[strum(serialize = "horizontal-vertical")]
    LinesOnly,
    /// Horizontal, vertical and both diagonals.
    #[default]
    #[serde(rename = "all-directions")]
    #[strum(serialize = "all-directions")]
    AllDirections,
}

/// Options supplied by whoever creates a room. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomOptions {
    /// Grid width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_size_x: Option<i64>,
    /// Grid height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_size_y: Option<i64>,
    /// Direction set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<GameMode>,
    /// Word that scores, case-insensitive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_word: Option<String>,
}

impl RoomOptions {
    /// Fills fields left unset here from `fallback`.
    pub fn or(self, fallback: &RoomOptions) -> Self {
        Self {
            grid_size_x: self.grid_size_x.or(fallback.grid_size_x),
            grid_size_y: self.grid_size_y.or(fallback.grid_size_y),
            game_mode: self.game_mode.or(fallback.game_mode),
            target_word: self
                .target_word
                .filter(|w| !w.trim().is_empty())
                .or_else(|| fallback.target_word.clone()),
        }
    }

    /// Applies defaults, normalizes the target word and validates dimensions.
    ///
    /// # Errors
    ///
    /// Fails when either grid dimension is below 1.
    #[instrument]
    pub fn resolve(&self) -> Result<GameConfig, ConfigError> {
        let width = self.grid_size_x.unwrap_or(DEFAULT_GRID_WIDTH);
        let height = self.grid_size_y.unwrap_or(DEFAULT_GRID_HEIGHT);
        if width < 1 || height < 1 {
            return Err(ConfigError::new(format!(
                "Grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let width = usize::try_from(width)
            .map_err(|e| ConfigError::new(format!("Grid width out of range: {}", e)))?;
        let height = usize::try_from(height)
            .map_err(|e| ConfigError::new(format!("Grid height out of range: {}", e)))?;
        if width.saturating_mul(height) > MAX_CELLS {
            return Err(ConfigError::new(format!(
                "Grid {}x{} exceeds {} cells",
                width, height, MAX_CELLS
            )));
        }

        // An empty word counts as unset.
        let target_word = self
            .target_word
            .as_deref()
            .filter(|w| !w.trim().is_empty())
            .unwrap_or(DEFAULT_TARGET_WORD)
            .to_uppercase();
        if target_word.chars().count() != WORD_LENGTH {
            warn!(
                target_word = %target_word,
                "Target word is not three letters; sequence detection disabled"
            );
        }

        let config = GameConfig {
            width,
            height,
            mode: self.game_mode.unwrap_or_default(),
            target_word,
        };
        debug!(?config, "Resolved room configuration");
        Ok(config)
    }
}

/// Resolved, immutable configuration of one room.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid width, at least 1.
    width: usize,
    /// Grid height, at least 1.
    height: usize,
    /// Direction set.
    mode: GameMode,
    /// Uppercased target word.
    target_word: String,
}

impl GameConfig {
    /// The target word as exactly three characters, or `None` when the
    /// configured word has another length and detection is disabled.
    pub fn word(&self) -> Option<[char; WORD_LENGTH]> {
        let chars: Vec<char> = self.target_word.chars().collect();
        chars.try_into().ok()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH as usize,
            height: DEFAULT_GRID_HEIGHT as usize,
            mode: GameMode::AllDirections,
            target_word: DEFAULT_TARGET_WORD.to_string(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
