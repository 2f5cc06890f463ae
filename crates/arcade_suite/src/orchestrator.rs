//! Runs one game between a [`Player`] and the computer.

use anyhow::Result;
use arcade_tictactoe::{DifficultyTier, GameState};
use derive_getters::Getters;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::controller::{GameReport, GameSuiteController};
use crate::ledger::LedgerStore;
use crate::players::Player;

/// A finished or abandoned game and its recorded result.
#[derive(Debug, Clone, Getters)]
pub struct PlayedGame {
    /// Board at the point the game ended.
    final_state: GameState,
    /// Moves the human made.
    moves_taken: u32,
    report: GameReport,
}

/// Plays a game from the empty board and finalizes it against `player_name`.
///
/// The human side's moves come from `player`; a `None` from it abandons the
/// game, which is finalized as cancelled.
///
/// # Errors
///
/// Fails if the player errors, proposes an illegal move, or the result
/// cannot be recorded.
#[instrument(skip(controller, player, tier), fields(player = %player_name, tier = tier.name()))]
pub fn play_game<S, R, P>(
    controller: &mut GameSuiteController<S, R>,
    player: &mut P,
    tier: &DifficultyTier,
    player_name: &str,
) -> Result<PlayedGame>
where
    S: LedgerStore,
    R: Rng,
    P: Player + ?Sized,
{
    info!("Starting game");
    let mut state = controller.new_game();
    let mut moves_taken = 0u32;

    while !state.is_terminal() {
        if state.to_move() == controller.human_mark() {
            let Some(cell) = player.get_move(&state)? else {
                debug!("Player abandoned the game");
                break;
            };
            state = controller.apply_human_move(&state, cell)?;
            moves_taken += 1;
        } else {
            state = controller.computer_move(&state, tier)?;
        }
    }

    let report = controller.finalize(&state, moves_taken, tier, player_name)?;
    Ok(PlayedGame {
        final_state: state,
        moves_taken,
        report,
    })
}
