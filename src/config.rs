//! Game configuration loaded from a TOML file.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings shared by both front-ends.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct NimConfig {
    /// File used by save and load.
    #[serde(default = "default_save_path")]
    save_path: PathBuf,

    /// Display name of the human player.
    #[serde(default = "default_human_name")]
    human_name: String,

    /// Display name of the computer player.
    #[serde(default = "default_computer_name")]
    computer_name: String,

    /// Log file written by the terminal UI.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_save_path() -> PathBuf {
    PathBuf::from(strictly_nim::save_file::DEFAULT_SAVE_PATH)
}

#[instrument]
fn default_human_name() -> String {
    "Human".to_string()
}

#[instrument]
fn default_computer_name() -> String {
    "Computer".to_string()
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_nim_tui.log")
}

impl Default for NimConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            human_name: default_human_name(),
            computer_name: default_computer_name(),
            log_file: default_log_file(),
        }
    }
}

impl NimConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(save_path = %config.save_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the save file path.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
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
