//! Tic-tac-toe game logic for the arcade.
//!
//! # Architecture
//!
//! - **Types**: [`Mark`], [`Square`], [`Board`] and the per-turn [`GameState`]
//! - **Rules**: pure win, draw and move-enumeration functions
//! - **Search**: exhaustive minimax with lowest-index tie-breaking ([`best_move`])
//! - **Difficulty**: tiers that blend optimal and random play ([`select_move`])
//! - **Score**: outcome classification and the score formula ([`score`])
//!
//! # Example
//!
//! ```
//! use arcade_tictactoe::{GameState, Mark, best_move};
//!
//! let state = GameState::new().apply_move(0, Mark::X)?;
//! let result = best_move(&state, Mark::O);
//! assert_eq!(result.value, 0);
//! assert_eq!(result.cell, Some(4));
//! # Ok::<(), arcade_tictactoe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod difficulty;
mod error;
mod rules;
mod score;
mod search;
mod types;

pub use difficulty::{Difficulty, DifficultyTier, select_move};
pub use error::{IllegalMoveReason, MoveError};
pub use rules::{LINES, check_winner, is_full, is_terminal, legal_moves};
pub use score::{
    DIFFICULTY_BONUS, DRAW_BASE, LOSS_BASE, MINIMUM_SCORE, MOVE_BONUS, Outcome, WIN_BASE, score,
};
pub use search::{DRAW_VALUE, LOSS_VALUE, SearchResult, WIN_VALUE, best_move};
pub use types::{Board, CELL_COUNT, GameState, Mark, Square};
