//! Durable player ledger: profiles, cumulative scores and high scores.

mod error;
mod models;
mod service;
mod stats;
mod store;

pub use error::{CorruptDataWarning, LedgerError, LedgerIoError, ProfileParseError};
pub use models::{Ledger, PlayerProfile, ProfileRecord, TICTACTOE_GAME_ID};
pub use service::{PlayerLedger, ScoreReceipt};
pub use stats::{DEFAULT_HIGH_SCORE_LIMIT, HighScoreEntry, SuiteStatistics};
pub use store::{JsonFileStore, LedgerStore, LoadedLedger};
