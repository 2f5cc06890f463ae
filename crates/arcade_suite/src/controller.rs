//! Game controller: turns, finalization and the active session player.

use arcade_tictactoe::{DifficultyTier, GameState, Mark, MoveError, Outcome, score, select_move};
use derive_getters::Getters;
use derive_more::{Display, From};
use derive_new::new;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::ledger::{LedgerError, LedgerStore, PlayerLedger, PlayerProfile, TICTACTOE_GAME_ID};

/// Error returned by controller operations.
#[derive(Debug, Clone, Display, From)]
pub enum SuiteError {
    /// A move was illegal or requested from a finished game.
    #[display("{_0}")]
    Move(MoveError),
    /// A ledger operation failed.
    #[display("{_0}")]
    Ledger(LedgerError),
    /// The operation needs a logged-in player.
    #[display("No player logged in")]
    #[from(ignore)]
    NotLoggedIn,
}

impl std::error::Error for SuiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SuiteError::Move(err) => Some(err),
            SuiteError::Ledger(err) => Some(err),
            SuiteError::NotLoggedIn => None,
        }
    }
}

/// Results of the games finished in this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct SessionTally {
    wins: u32,
    losses: u32,
    draws: u32,
}

impl SessionTally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Cancelled => {}
        }
    }

    /// Games counted so far.
    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// What finalizing a game produced.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameReport {
    outcome: Outcome,
    /// `None` for cancelled games.
    score: Option<u32>,
    new_high_score: bool,
}

/// Drives human-versus-computer games and records their results.
///
/// Owns the session's [`PlayerLedger`]; nothing else writes to it while the
/// controller is alive.
#[derive(Debug)]
pub struct GameSuiteController<S, R> {
    ledger: PlayerLedger<S>,
    rng: R,
    human: Mark,
    active_player: Option<String>,
    tally: SessionTally,
}

impl<S: LedgerStore, R: Rng> GameSuiteController<S, R> {
    /// Creates a controller where the human plays `human` and the computer
    /// the other mark.
    #[instrument(skip(ledger, rng))]
    pub fn new(ledger: PlayerLedger<S>, rng: R, human: Mark) -> Self {
        info!("Creating GameSuiteController");
        Self {
            ledger,
            rng,
            human,
            active_player: None,
            tally: SessionTally::default(),
        }
    }

    /// Returns the ledger.
    pub fn ledger(&self) -> &PlayerLedger<S> {
        &self.ledger
    }

    /// Results so far this session.
    pub fn tally(&self) -> SessionTally {
        self.tally
    }

    /// The human's mark.
    pub fn human_mark(&self) -> Mark {
        self.human
    }

    /// The computer's mark.
    pub fn computer_mark(&self) -> Mark {
        self.human.opponent()
    }

    /// Name of the logged-in player, if any.
    pub fn active_player(&self) -> Option<&str> {
        self.active_player.as_deref()
    }

    /// Makes `name` the active player.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PlayerNotFound`] if there is no such player.
    #[instrument(skip(self))]
    pub fn login(&mut self, name: &str) -> Result<&PlayerProfile, SuiteError> {
        if !self.ledger.ledger().contains(name) {
            return Err(LedgerError::PlayerNotFound {
                name: name.to_string(),
            }
            .into());
        }
        self.active_player = Some(name.to_string());
        info!(player = %name, "Logged in");
        self.ledger.get(name).ok_or_else(|| {
            SuiteError::from(LedgerError::PlayerNotFound {
                name: name.to_string(),
            })
        })
    }

    /// Clears the active player.
    pub fn logout(&mut self) {
        self.active_player = None;
    }

    /// Creates a player and logs them in.
    ///
    /// # Errors
    ///
    /// See [`PlayerLedger::create_player`]. The active player is unchanged on
    /// error.
    #[instrument(skip(self))]
    pub fn create_player(&mut self, name: &str) -> Result<PlayerProfile, SuiteError> {
        let profile = self.ledger.create_player(name)?;
        self.active_player = Some(name.to_string());
        Ok(profile)
    }

    /// Deletes a player, logging them out if they were active.
    ///
    /// # Errors
    ///
    /// See [`PlayerLedger::delete_player`].
    #[instrument(skip(self))]
    pub fn delete_player(&mut self, name: &str) -> Result<(), SuiteError> {
        self.ledger.delete_player(name)?;
        if self.active_player.as_deref() == Some(name) {
            self.active_player = None;
        }
        Ok(())
    }

    /// Starts a new game: empty board, X to move.
    pub fn new_game(&self) -> GameState {
        GameState::new()
    }

    /// Plays the human's mark on `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::IllegalMove`] for occupied or out-of-range cells,
    /// finished games, or when it is the computer's turn.
    #[instrument(skip(self, state))]
    pub fn apply_human_move(&self, state: &GameState, cell: usize) -> Result<GameState, MoveError> {
        state.apply_move(cell, self.human)
    }

    /// Chooses and plays the computer's move at `tier`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NoLegalMove`] on a finished game and
    /// [`MoveError::IllegalMove`] when it is the human's turn.
    #[instrument(skip(self, state, tier), fields(tier = tier.name()))]
    pub fn computer_move(
        &mut self,
        state: &GameState,
        tier: &DifficultyTier,
    ) -> Result<GameState, MoveError> {
        let cell = select_move(state, tier, &mut self.rng)?;
        debug!(cell, "Computer chose cell");
        state.apply_move(cell, self.computer_mark())
    }

    /// Scores a game and records it against `player`.
    ///
    /// A state that is not terminal is treated as abandoned: the outcome is
    /// [`Outcome::Cancelled`] and neither the ledger nor the tally changes.
    /// `moves_taken` counts the human's own moves.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Ledger`] if the player is unknown or the save
    /// failed; the game is then not counted anywhere.
    #[instrument(skip(self, state, tier), fields(tier = tier.name()))]
    pub fn finalize(
        &mut self,
        state: &GameState,
        moves_taken: u32,
        tier: &DifficultyTier,
        player: &str,
    ) -> Result<GameReport, SuiteError> {
        let outcome = Outcome::for_player(state, self.human);
        let Some(points) = score(outcome, moves_taken, tier) else {
            info!(player = %player, "Game cancelled, nothing recorded");
            return Ok(GameReport::new(outcome, None, false));
        };

        let receipt = self.ledger.record_score(player, TICTACTOE_GAME_ID, points)?;
        self.tally.record(outcome);
        info!(
            player = %player,
            %outcome,
            score = points,
            new_high_score = *receipt.new_high_score(),
            "Game finalized"
        );
        Ok(GameReport::new(outcome, Some(points), *receipt.new_high_score()))
    }

    /// [`finalize`](Self::finalize) for the active player.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::NotLoggedIn`] without an active player, and
    /// otherwise the errors of [`finalize`](Self::finalize).
    pub fn finalize_active(
        &mut self,
        state: &GameState,
        moves_taken: u32,
        tier: &DifficultyTier,
    ) -> Result<GameReport, SuiteError> {
        let player = self.active_player.clone().ok_or(SuiteError::NotLoggedIn)?;
        self.finalize(state, moves_taken, tier, &player)
    }
}
