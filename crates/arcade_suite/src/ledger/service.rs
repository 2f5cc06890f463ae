//! Session-scoped ledger with persist-or-rollback updates.

use chrono::Local;
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, instrument, warn};

use crate::ledger::{CorruptDataWarning, Ledger, LedgerError, LedgerStore, PlayerProfile};

/// Outcome of recording a score.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct ScoreReceipt {
    /// Profile after the score was committed.
    profile: PlayerProfile,
    /// Whether the score beat the previous best for its game.
    new_high_score: bool,
}

/// The live ledger for one session, bound to its store.
///
/// Every mutation builds a candidate ledger, saves it, and only then swaps
/// it in. If the save fails the error is returned and the live ledger is
/// exactly what it was before the call.
#[derive(Debug)]
pub struct PlayerLedger<S> {
    store: S,
    ledger: Ledger,
}

impl<S: LedgerStore> PlayerLedger<S> {
    /// Loads the ledger from `store`.
    ///
    /// The warning, if any, reports that stored data was unreadable and the
    /// session starts from an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] if the store reports an unrecoverable
    /// read failure.
    #[instrument(skip(store))]
    pub fn open(store: S) -> Result<(Self, Option<CorruptDataWarning>), LedgerError> {
        let loaded = store.load()?;
        info!(players = loaded.ledger.len(), "Ledger opened");
        Ok((
            Self {
                store,
                ledger: loaded.ledger,
            },
            loaded.warning,
        ))
    }

    /// Returns the live ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Looks up a profile by exact name.
    pub fn get(&self, name: &str) -> Option<&PlayerProfile> {
        self.ledger.get(name)
    }

    /// Creates and persists a profile for `name`, dated today.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyName`], [`LedgerError::DuplicatePlayer`],
    /// or [`LedgerError::Io`] if the save failed. Nothing changes on error.
    #[instrument(skip(self))]
    pub fn create_player(&mut self, name: &str) -> Result<PlayerProfile, LedgerError> {
        let (candidate, profile) = self.ledger.with_player(name, Local::now().date_naive())?;
        self.commit(candidate)?;
        info!(player = %name, "Player created");
        Ok(profile)
    }

    /// Removes and persists the removal of `name`.
    ///
    /// Not idempotent: deleting a name twice fails the second time.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PlayerNotFound`] or [`LedgerError::Io`].
    /// Nothing changes on error.
    #[instrument(skip(self))]
    pub fn delete_player(&mut self, name: &str) -> Result<(), LedgerError> {
        let candidate = self.ledger.without_player(name)?;
        self.commit(candidate)?;
        info!(player = %name, "Player deleted");
        Ok(())
    }

    /// Records `score` for `name` in `game_id` and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PlayerNotFound`] or [`LedgerError::Io`].
    /// On error the score is not committed and the live ledger is unchanged.
    #[instrument(skip(self))]
    pub fn record_score(
        &mut self,
        name: &str,
        game_id: &str,
        score: u32,
    ) -> Result<ScoreReceipt, LedgerError> {
        let (candidate, new_high_score) = self.ledger.with_score(name, game_id, score)?;
        let profile = candidate
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::PlayerNotFound {
                name: name.to_string(),
            })?;
        self.commit(candidate)?;
        info!(player = %name, game = %game_id, score, new_high_score, "Score recorded");
        Ok(ScoreReceipt::new(profile, new_high_score))
    }

    /// Re-reads the store, replacing the live ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] if storage cannot be read; the live ledger
    /// is kept in that case.
    #[instrument(skip(self))]
    pub fn reload(&mut self) -> Result<Option<CorruptDataWarning>, LedgerError> {
        let loaded = self.store.load()?;
        self.ledger = loaded.ledger;
        Ok(loaded.warning)
    }

    fn commit(&mut self, candidate: Ledger) -> Result<(), LedgerError> {
        match self.store.save(&candidate) {
            Ok(()) => {
                self.ledger = candidate;
                debug!("Ledger committed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Save failed, ledger left unchanged");
                Err(e)
            }
        }
    }
}
