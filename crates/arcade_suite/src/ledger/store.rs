//! Durable storage for the ledger.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use crate::ledger::{CorruptDataWarning, Ledger, LedgerError, LedgerIoError};

/// Result of loading a ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLedger {
    /// The ledger read from storage, or an empty one.
    pub ledger: Ledger,
    /// Present when stored data was unreadable and has been replaced by an
    /// empty ledger.
    pub warning: Option<CorruptDataWarning>,
}

/// Where a ledger lives between sessions.
pub trait LedgerStore {
    /// Reads the whole ledger.
    ///
    /// Missing storage yields an empty ledger. Unreadable or malformed
    /// content yields an empty ledger plus a [`CorruptDataWarning`].
    ///
    /// # Errors
    ///
    /// Implementations may return [`LedgerError::Io`] for failures they
    /// cannot recover from; [`JsonFileStore`] never does.
    fn load(&self) -> Result<LoadedLedger, LedgerError>;

    /// Replaces the stored ledger with `ledger`.
    ///
    /// All or nothing: on error the previously stored ledger is intact.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] if the ledger could not be written.
    fn save(&self, ledger: &Ledger) -> Result<(), LedgerError>;
}

/// Ledger stored as a human-readable JSON file.
///
/// Saves go to a temporary file in the same directory which is then renamed
/// over the target, so a failed save never leaves a truncated file behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Creating JsonFileStore");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn corrupt(&self, reason: String) -> LoadedLedger {
        let warning = CorruptDataWarning {
            path: self.path.clone(),
            reason,
        };
        warn!(%warning, "Ledger file unreadable, starting with an empty ledger");
        LoadedLedger {
            ledger: Ledger::new(),
            warning: Some(warning),
        }
    }
}

impl LedgerStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<LoadedLedger, LedgerError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No ledger file yet");
                return Ok(LoadedLedger {
                    ledger: Ledger::new(),
                    warning: None,
                });
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Ok(self.corrupt(format!("not valid UTF-8: {}", e)));
            }
            Err(e) => {
                return Ok(self.corrupt(format!("unreadable: {}", e)));
            }
        };

        match Ledger::from_json(&content) {
            Ok(ledger) => {
                info!(players = ledger.len(), "Ledger loaded");
                Ok(LoadedLedger {
                    ledger,
                    warning: None,
                })
            }
            Err(e) => Ok(self.corrupt(e.to_string())),
        }
    }

    #[instrument(skip(self, ledger), fields(path = %self.path.display(), players = ledger.len()))]
    fn save(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        let json = ledger.to_json()?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            LedgerIoError::new(format!(
                "Failed to replace '{}': {}",
                self.path.display(),
                e.error
            ))
        })?;

        debug!(bytes = json.len(), "Ledger saved");
        Ok(())
    }
}
