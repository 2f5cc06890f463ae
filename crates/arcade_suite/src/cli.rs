//! Command-line interface for the arcade.

use std::path::PathBuf;

use arcade_tictactoe::Difficulty;
use clap::{Parser, Subcommand};

/// Tic-tac-toe arcade with persistent player profiles
#[derive(Parser, Debug)]
#[command(name = "arcade")]
#[command(
    about = "Tic-tac-toe against the computer, with player profiles and high scores",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it doesn't exist)
    #[arg(long, global = true, default_value = "arcade.toml")]
    pub config: PathBuf,

    /// Player ledger file, overriding config and ARCADE_LEDGER_PATH
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every player profile
    Players,

    /// Create a player profile
    Create {
        /// Exact, case-sensitive player name
        #[arg(value_parser = player_name)]
        name: String,
    },

    /// Delete a player profile
    Delete {
        /// Exact, case-sensitive player name
        #[arg(value_parser = player_name)]
        name: String,
    },

    /// Show the best scores per game
    HighScores {
        /// Entries shown per game
        #[arg(long, default_value_t = arcade_suite::DEFAULT_HIGH_SCORE_LIMIT)]
        limit: usize,
    },

    /// Show totals across all players
    Stats,

    /// List the difficulty levels
    Tiers,

    /// Play games for a player using random moves, recording every result
    Simulate {
        /// Player the games are recorded against
        #[arg(short, long, value_parser = player_name)]
        player: String,

        /// Computer difficulty (easy, medium, hard); defaults to the config
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play a game in the terminal
    Play {
        /// Player the game is recorded against
        #[arg(short, long, value_parser = player_name)]
        player: String,

        /// Computer difficulty (easy, medium, hard); defaults to the config
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
}

/// Trims surrounding whitespace so `" Amy "` names the same player as `"Amy"`.
fn player_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("player name cannot be blank".to_string());
    }
    Ok(name.to_string())
}
