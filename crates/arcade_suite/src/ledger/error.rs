//! Ledger error types.

use std::path::PathBuf;

use derive_more::{Display, Error};
use tracing::instrument;

/// Persistence failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Ledger I/O error: {} at {}:{}", message, file, line)]
pub struct LedgerIoError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LedgerIoError {
    /// Creates a new I/O error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for LedgerIoError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for LedgerIoError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Serialization error: {}", err))
    }
}

/// Error returned by ledger operations.
///
/// Every variant leaves the ledger exactly as it was before the call.
#[derive(Debug, Clone, Display)]
pub enum LedgerError {
    /// No profile has this exact name.
    #[display("Player '{name}' not found")]
    PlayerNotFound {
        /// Requested name.
        name: String,
    },

    /// A profile with this exact name already exists.
    #[display("Player '{name}' already exists")]
    DuplicatePlayer {
        /// Requested name.
        name: String,
    },

    /// Player names must contain a non-whitespace character.
    #[display("Player name cannot be empty")]
    EmptyName,

    /// The ledger file could not be read or written.
    #[display("{_0}")]
    Io(LedgerIoError),
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LedgerIoError> for LedgerError {
    fn from(err: LedgerIoError) -> Self {
        LedgerError::Io(err)
    }
}

impl From<std::io::Error> for LedgerError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(LedgerIoError::from(err))
    }
}

impl From<serde_json::Error> for LedgerError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Io(LedgerIoError::from(err))
    }
}

/// Why stored ledger content could not be turned into profiles.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ProfileParseError {
    /// The content is not a JSON object of profile objects.
    #[display("malformed ledger: {_0}")]
    Malformed(String),

    /// A profile has no `name` field.
    #[display("profile under key '{key}' has no name")]
    MissingName {
        /// Map key of the offending profile.
        key: String,
    },

    /// A profile's `name` differs from the key it is stored under.
    #[display("profile under key '{key}' is named '{name}'")]
    NameMismatch {
        /// Map key of the offending profile.
        key: String,
        /// Name stored inside the profile.
        name: String,
    },

    /// A profile's name is blank.
    #[display("profile under key '{key}' has an empty name")]
    EmptyName {
        /// Map key of the offending profile.
        key: String,
    },
}

impl std::error::Error for ProfileParseError {}

impl From<serde_json::Error> for ProfileParseError {
    fn from(err: serde_json::Error) -> Self {
        ProfileParseError::Malformed(err.to_string())
    }
}

/// Non-fatal notice that the ledger file was unreadable and an empty ledger
/// was used instead. Existing history may have been lost.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Could not load player data from {}: {}. Starting fresh.", path.display(), reason)]
pub struct CorruptDataWarning {
    /// File that failed to load.
    pub path: PathBuf,
    /// What was wrong with it.
    pub reason: String,
}
