//! Arcade configuration loaded from TOML.

use std::path::{Path, PathBuf};

use arcade_tictactoe::{Difficulty, Mark};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ArcadeConfig::ledger_path`].
pub const LEDGER_PATH_ENV: &str = "ARCADE_LEDGER_PATH";

/// Settings for an arcade session.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ArcadeConfig {
    /// JSON file holding every player profile.
    #[serde(default = "default_ledger_path")]
    ledger_path: PathBuf,

    /// Difficulty used when none is given on the command line.
    #[serde(default)]
    difficulty: Difficulty,

    /// Mark played by the human; the computer plays the other one.
    #[serde(default = "default_human_mark")]
    human_mark: Mark,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("players.json")
}

fn default_human_mark() -> Mark {
    Mark::X
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            ledger_path: default_ledger_path(),
            difficulty: Difficulty::default(),
            human_mark: default_human_mark(),
            log_filter: default_log_filter(),
        }
    }
}

impl ArcadeConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(ledger_path = %config.ledger_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Like [`from_file`](Self::from_file), but a missing file yields the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies `ARCADE_LEDGER_PATH` if set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(LEDGER_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => self.with_ledger_path(path),
            _ => self,
        }
    }

    /// Replaces the ledger path.
    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
