//! Uniformly random stand-in for a human.

use anyhow::Result;
use arcade_tictactoe::GameState;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::Player;

/// Plays a uniformly random legal move every turn.
#[derive(Debug)]
pub struct RandomPlayer<R> {
    name: String,
    rng: R,
}

impl<R: Rng> RandomPlayer<R> {
    /// Creates a random player.
    pub fn new(name: impl Into<String>, rng: R) -> Self {
        Self {
            name: name.into(),
            rng,
        }
    }
}

impl<R: Rng> Player for RandomPlayer<R> {
    fn get_move(&mut self, state: &GameState) -> Result<Option<usize>> {
        let cell = state.legal_moves().choose(&mut self.rng).copied();
        debug!(player = %self.name, ?cell, "Random player chose cell");
        Ok(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
