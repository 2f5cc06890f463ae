//! Difficulty tiers and blended move selection.
//!
//! Weaker opponents are not weaker searches: every tier uses the same
//! optimal oracle and simply consults it less often, picking a uniformly
//! random legal move the rest of the time.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::search::best_move;
use crate::{GameState, MoveError};

/// How often the computer searches, and how much a game against it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyTier {
    name: &'static str,
    search_probability: f64,
    score_multiplier: u32,
}

impl DifficultyTier {
    /// Searches 30% of the time.
    pub const EASY: Self = Self::fixed("Easy", 0.3, 1);
    /// Searches 70% of the time.
    pub const MEDIUM: Self = Self::fixed("Medium", 0.7, 2);
    /// Always searches.
    pub const HARD: Self = Self::fixed("Hard", 1.0, 3);

    const fn fixed(name: &'static str, search_probability: f64, score_multiplier: u32) -> Self {
        Self {
            name,
            search_probability,
            score_multiplier,
        }
    }

    /// Creates a tier, clamping the probability into `0.0..=1.0` and the
    /// multiplier to at least 1.
    pub fn new(name: &'static str, search_probability: f64, score_multiplier: u32) -> Self {
        let search_probability = if search_probability.is_nan() {
            0.0
        } else {
            search_probability.clamp(0.0, 1.0)
        };
        Self {
            name,
            search_probability,
            score_multiplier: score_multiplier.max(1),
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Chance of consulting the search on each move.
    pub fn search_probability(&self) -> f64 {
        self.search_probability
    }

    /// Positive multiplier applied by the score calculator.
    pub fn score_multiplier(&self) -> u32 {
        self.score_multiplier
    }
}

/// The fixed set of difficulty levels offered to players.
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
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// See [`DifficultyTier::EASY`].
    Easy,
    /// See [`DifficultyTier::MEDIUM`].
    #[default]
    Medium,
    /// See [`DifficultyTier::HARD`].
    Hard,
}

impl Difficulty {
    /// Returns the tier configuration for this level.
    pub fn tier(self) -> DifficultyTier {
        match self {
            Difficulty::Easy => DifficultyTier::EASY,
            Difficulty::Medium => DifficultyTier::MEDIUM,
            Difficulty::Hard => DifficultyTier::HARD,
        }
    }
}

/// Chooses the computer's move for the side to move.
///
/// Draws `r` uniformly from `[0, 1)`; if `r` is below the tier's search
/// probability the optimal move is returned, otherwise a uniformly random
/// legal move.
///
/// # Errors
///
/// Returns [`MoveError::NoLegalMove`] when the state is already terminal.
#[instrument(skip(state, tier, rng), fields(tier = tier.name()))]
pub fn select_move<R: Rng + ?Sized>(
    state: &GameState,
    tier: &DifficultyTier,
    rng: &mut R,
) -> Result<usize, MoveError> {
    if state.is_terminal() {
        return Err(MoveError::NoLegalMove);
    }

    let roll: f64 = rng.gen_range(0.0..1.0);
    if roll < tier.search_probability {
        let result = best_move(state, state.to_move());
        debug!(roll, cell = ?result.cell, "Using search");
        return result.cell.ok_or(MoveError::NoLegalMove);
    }

    let moves = state.legal_moves();
    let cell = moves.choose(rng).copied().ok_or(MoveError::NoLegalMove)?;
    debug!(roll, cell, "Using random move");
    Ok(cell)
}
