//! Game outcomes and score calculation.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{DifficultyTier, GameState, Mark};

/// Base score for a win.
pub const WIN_BASE: u32 = 1000;
/// Base score for a draw.
pub const DRAW_BASE: u32 = 500;
/// Base score for a loss.
pub const LOSS_BASE: u32 = 100;
/// Win bonus per move saved under nine.
pub const MOVE_BONUS: u32 = 50;
/// Bonus per point of tier multiplier.
pub const DIFFICULTY_BONUS: u32 = 200;
/// No completed game scores below this.
pub const MINIMUM_SCORE: u32 = 100;

/// How a game ended, from the human player's point of view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    /// The human completed a line.
    Win,
    /// The computer completed a line.
    Loss,
    /// The board filled with no line.
    Draw,
    /// The game was abandoned before a result. Never scored or recorded.
    Cancelled,
}

impl Outcome {
    /// Classifies `state` for the player holding `human`.
    ///
    /// A state that is not terminal can only end by abandonment, so it maps
    /// to [`Outcome::Cancelled`].
    #[instrument(skip(state))]
    pub fn for_player(state: &GameState, human: Mark) -> Self {
        match state.winner() {
            Some(mark) if mark == human => Outcome::Win,
            Some(_) => Outcome::Loss,
            None if state.is_terminal() => Outcome::Draw,
            None => Outcome::Cancelled,
        }
    }

    /// True for outcomes that earn a score.
    pub fn is_completed(self) -> bool {
        self != Outcome::Cancelled
    }
}

/// Scores a finished game.
///
/// `moves_taken` counts the human's own moves. Faster wins earn a bonus of
/// [`MOVE_BONUS`] per move under nine; draws and losses get none. Every tier
/// adds [`DIFFICULTY_BONUS`] times its multiplier, and the total never drops
/// below [`MINIMUM_SCORE`].
///
/// Returns `None` for [`Outcome::Cancelled`]: abandoned games are not scored.
pub fn score(outcome: Outcome, moves_taken: u32, tier: &DifficultyTier) -> Option<u32> {
    let (base, move_bonus) = match outcome {
        Outcome::Win => (WIN_BASE, 9u32.saturating_sub(moves_taken) * MOVE_BONUS),
        Outcome::Draw => (DRAW_BASE, 0),
        Outcome::Loss => (LOSS_BASE, 0),
        Outcome::Cancelled => return None,
    };
    let difficulty_bonus = tier.score_multiplier().saturating_mul(DIFFICULTY_BONUS);
    let total = base
        .saturating_add(move_bonus)
        .saturating_add(difficulty_bonus);
    Some(total.max(MINIMUM_SCORE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Difficulty};

    #[test]
    fn test_score_matches_published_table() {
        let hard = DifficultyTier::HARD;
        assert_eq!(score(Outcome::Win, 3, &hard), Some(1000 + 300 + 600));
        assert_eq!(score(Outcome::Draw, 5, &hard), Some(500 + 600));
        assert_eq!(score(Outcome::Loss, 4, &hard), Some(100 + 600));
        assert_eq!(
            score(Outcome::Win, 4, &DifficultyTier::EASY),
            Some(1000 + 250 + 200)
        );
    }

    #[test]
    fn test_cancelled_is_not_scored() {
        assert_eq!(score(Outcome::Cancelled, 2, &DifficultyTier::MEDIUM), None);
    }

    #[test]
    fn test_win_bonus_is_non_increasing() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let tier = difficulty.tier();
            let scores: Vec<u32> = (0..=12)
                .map(|moves| score(Outcome::Win, moves, &tier).unwrap())
                .collect();
            assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_draw_and_loss_ignore_move_count() {
        let tier = DifficultyTier::MEDIUM;
        for outcome in [Outcome::Draw, Outcome::Loss] {
            let first = score(outcome, 0, &tier);
            assert!((1..=12).all(|moves| score(outcome, moves, &tier) == first));
        }
    }

    #[test]
    fn test_score_never_below_minimum() {
        let tier = DifficultyTier::new("Floor", 0.0, 1);
        for outcome in [Outcome::Win, Outcome::Draw, Outcome::Loss] {
            assert!(score(outcome, 99, &tier).unwrap() >= MINIMUM_SCORE);
        }
    }

    #[test]
    fn test_outcome_for_player() {
        let x_wins = GameState::from_board(Board::parse("XXX OO_ ___").unwrap()).unwrap();
        assert_eq!(Outcome::for_player(&x_wins, Mark::X), Outcome::Win);
        assert_eq!(Outcome::for_player(&x_wins, Mark::O), Outcome::Loss);

        let drawn = GameState::from_board(Board::parse("XOX OXX OXO").unwrap()).unwrap();
        assert_eq!(Outcome::for_player(&drawn, Mark::X), Outcome::Draw);

        assert_eq!(
            Outcome::for_player(&GameState::new(), Mark::X),
            Outcome::Cancelled
        );
    }
}
