//! Arcade suite: player ledger, score keeping and the tic-tac-toe controller.
//!
//! # Architecture
//!
//! - **Ledger**: player profiles persisted as a JSON file, updated with
//!   persist-or-rollback semantics
//! - **Controller**: turn handling, scoring and the active session player
//! - **Players**: console and random sources for the human side's moves
//! - **Config**: TOML settings with environment overrides
//!
//! # Example
//!
//! ```no_run
//! use arcade_suite::{GameSuiteController, JsonFileStore, PlayerLedger};
//! use arcade_tictactoe::{Difficulty, Mark};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn example() -> anyhow::Result<()> {
//! let (ledger, warning) = PlayerLedger::open(JsonFileStore::new("players.json"))?;
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//! let mut controller = GameSuiteController::new(ledger, StdRng::seed_from_u64(7), Mark::X);
//! controller.create_player("Amy")?;
//!
//! let tier = Difficulty::Hard.tier();
//! let state = controller.new_game();
//! let state = controller.apply_human_move(&state, 4)?;
//! let state = controller.computer_move(&state, &tier)?;
//! # let _ = state;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod ledger;
mod orchestrator;
mod players;

// Crate-level exports - Configuration
pub use config::{ArcadeConfig, ConfigError, LEDGER_PATH_ENV};

// Crate-level exports - Controller
pub use controller::{GameReport, GameSuiteController, SessionTally, SuiteError};

// Crate-level exports - Ledger
pub use ledger::{
    CorruptDataWarning, DEFAULT_HIGH_SCORE_LIMIT, HighScoreEntry, JsonFileStore, Ledger,
    LedgerError, LedgerIoError, LedgerStore, LoadedLedger, PlayerLedger, PlayerProfile,
    ProfileParseError, ProfileRecord, ScoreReceipt, SuiteStatistics, TICTACTOE_GAME_ID,
};

// Crate-level exports - Game orchestration
pub use orchestrator::{PlayedGame, play_game};
pub use players::{ConsolePlayer, Player, RandomPlayer};
