//! Sources of the human side's moves.

mod console;
mod random;

pub use console::ConsolePlayer;
pub use random::RandomPlayer;

use anyhow::Result;
use arcade_tictactoe::GameState;

/// Something that can make the human's moves.
pub trait Player {
    /// Gets a move for the side to move in `state`.
    ///
    /// Returns the cell (0-8), or `None` to abandon the game.
    fn get_move(&mut self, state: &GameState) -> Result<Option<usize>>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
