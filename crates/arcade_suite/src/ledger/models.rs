//! Player profiles and the ledger value type.

use chrono::{Local, NaiveDate};
use derive_getters::Getters;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::ledger::{LedgerError, ProfileParseError};

/// Game identifier under which tic-tac-toe scores are kept.
pub const TICTACTOE_GAME_ID: &str = "Tic-Tac-Toe";

/// A player's cumulative history.
///
/// `total_score` is the sum of every recorded score and `high_scores[g]` the
/// best score recorded for game `g`; both only move through
/// [`PlayerProfile::with_score`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PlayerProfile {
    name: String,
    games_played: u32,
    total_score: u64,
    high_scores: IndexMap<String, u32>,
    achievements: Vec<String>,
    created_date: NaiveDate,
}

/// Profile as stored on disk, before validation.
///
/// Only `name` is required; everything else defaults when absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    name: Option<String>,
    games_played: u32,
    total_score: u64,
    high_scores: IndexMap<String, u32>,
    achievements: Vec<String>,
    created_date: Option<NaiveDate>,
}

impl PlayerProfile {
    /// Creates a profile with no games played.
    #[instrument(skip(name), fields(name = %name))]
    pub fn new(name: String, created_date: NaiveDate) -> Self {
        Self {
            name,
            games_played: 0,
            total_score: 0,
            high_scores: IndexMap::new(),
            achievements: Vec::new(),
            created_date,
        }
    }

    /// Validates a stored record stored under `key`.
    ///
    /// A missing creation date defaults to today.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileParseError`] if the name is missing, blank, or
    /// differs from `key`.
    #[instrument(skip(record))]
    pub fn from_record(key: &str, record: ProfileRecord) -> Result<Self, ProfileParseError> {
        let name = record.name.ok_or_else(|| ProfileParseError::MissingName {
            key: key.to_string(),
        })?;
        if name.trim().is_empty() {
            return Err(ProfileParseError::EmptyName {
                key: key.to_string(),
            });
        }
        if name != key {
            return Err(ProfileParseError::NameMismatch {
                key: key.to_string(),
                name,
            });
        }

        Ok(Self {
            name,
            games_played: record.games_played,
            total_score: record.total_score,
            high_scores: record.high_scores,
            achievements: record.achievements,
            created_date: record
                .created_date
                .unwrap_or_else(|| Local::now().date_naive()),
        })
    }

    /// Returns the best score recorded for `game_id`.
    pub fn high_score(&self, game_id: &str) -> Option<u32> {
        self.high_scores.get(game_id).copied()
    }

    /// Mean score per game, rounded to two decimals. Zero before any game.
    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            let average = self.total_score as f64 / f64::from(self.games_played);
            (average * 100.0).round() / 100.0
        }
    }

    /// Returns this profile with one more game and `score` added, and whether
    /// `score` is a new high score for `game_id`.
    ///
    /// A first score for a game always counts as a high score.
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn with_score(&self, game_id: &str, score: u32) -> (Self, bool) {
        let mut updated = self.clone();
        updated.games_played = updated.games_played.saturating_add(1);
        updated.total_score = updated.total_score.saturating_add(u64::from(score));

        let is_high = self.high_score(game_id).is_none_or(|best| score > best);
        if is_high {
            updated.high_scores.insert(game_id.to_string(), score);
        }
        debug!(games_played = updated.games_played, is_high, "Score applied");
        (updated, is_high)
    }
}

/// Every player profile, keyed by exact, case-sensitive name.
///
/// Profiles keep the order they were stored or created in, so a file
/// written by [`Ledger::to_json`] reads back and saves byte for byte.
///
/// A plain value: the mutating operations return a new ledger and leave
/// `self` untouched, so a caller can hold on to the old one until the new
/// one has been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    players: IndexMap<String, PlayerProfile>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when there are no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Looks up a profile by exact name.
    pub fn get(&self, name: &str) -> Option<&PlayerProfile> {
        self.players.get(name)
    }

    /// True if a profile has exactly this name.
    pub fn contains(&self, name: &str) -> bool {
        self.players.contains_key(name)
    }

    /// All profiles in stored order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerProfile> {
        self.players.values()
    }

    /// Returns a ledger with a fresh profile for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyName`] for blank names and
    /// [`LedgerError::DuplicatePlayer`] if the exact name is taken.
    #[instrument(skip(self))]
    pub fn with_player(
        &self,
        name: &str,
        created_date: NaiveDate,
    ) -> Result<(Self, PlayerProfile), LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if self.contains(name) {
            return Err(LedgerError::DuplicatePlayer {
                name: name.to_string(),
            });
        }

        let profile = PlayerProfile::new(name.to_string(), created_date);
        let mut updated = self.clone();
        updated.players.insert(name.to_string(), profile.clone());
        Ok((updated, profile))
    }

    /// Returns a ledger without `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PlayerNotFound`] if there is no such player.
    #[instrument(skip(self))]
    pub fn without_player(&self, name: &str) -> Result<Self, LedgerError> {
        if !self.contains(name) {
            return Err(LedgerError::PlayerNotFound {
                name: name.to_string(),
            });
        }
        let mut updated = self.clone();
        updated.players.shift_remove(name);
        Ok(updated)
    }

    /// Returns a ledger with `score` recorded against `name` for `game_id`,
    /// and whether it is a new high score.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PlayerNotFound`] if there is no such player.
    #[instrument(skip(self))]
    pub fn with_score(
        &self,
        name: &str,
        game_id: &str,
        score: u32,
    ) -> Result<(Self, bool), LedgerError> {
        let profile = self.get(name).ok_or_else(|| LedgerError::PlayerNotFound {
            name: name.to_string(),
        })?;
        let (profile, is_high) = profile.with_score(game_id, score);
        let mut updated = self.clone();
        updated.players.insert(name.to_string(), profile);
        Ok((updated, is_high))
    }

    /// Parses and validates stored ledger content.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileParseError`] if the JSON is malformed or any profile
    /// fails validation. No partial ledger is ever returned.
    #[instrument(skip(content), fields(bytes = content.len()))]
    pub fn from_json(content: &str) -> Result<Self, ProfileParseError> {
        let records: IndexMap<String, ProfileRecord> = serde_json::from_str(content)?;
        let players = records
            .into_iter()
            .map(|(key, record)| {
                let profile = PlayerProfile::from_record(&key, record)?;
                Ok((key, profile))
            })
            .collect::<Result<IndexMap<_, _>, ProfileParseError>>()?;
        debug!(players = players.len(), "Ledger parsed");
        Ok(Self { players })
    }

    /// Serializes the ledger as two-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    #[test]
    fn test_first_score_is_high_score() {
        let profile = PlayerProfile::new("Amy".to_string(), date());
        let (updated, is_high) = profile.with_score(TICTACTOE_GAME_ID, 300);
        assert!(is_high);
        assert_eq!(*updated.games_played(), 1);
        assert_eq!(*updated.total_score(), 300);
        assert_eq!(updated.high_score(TICTACTOE_GAME_ID), Some(300));
        // The input profile is untouched.
        assert_eq!(*profile.games_played(), 0);
    }

    #[test]
    fn test_lower_or_equal_score_keeps_high_score() {
        let profile = PlayerProfile::new("Amy".to_string(), date());
        let (profile, _) = profile.with_score("Snake", 900);
        let (profile, is_high) = profile.with_score("Snake", 900);
        assert!(!is_high);
        let (profile, is_high) = profile.with_score("Snake", 400);
        assert!(!is_high);
        assert_eq!(profile.high_score("Snake"), Some(900));
        assert_eq!(*profile.total_score(), 2200);
        assert_eq!(*profile.games_played(), 3);
    }

    #[test]
    fn test_average_score_rounds_to_two_places() {
        let profile = PlayerProfile::new("Amy".to_string(), date());
        assert_eq!(profile.average_score(), 0.0);
        let (profile, _) = profile.with_score("Snake", 100);
        let (profile, _) = profile.with_score("Snake", 100);
        let (profile, _) = profile.with_score("Snake", 101);
        assert_eq!(profile.average_score(), 100.33);
    }

    #[test]
    fn test_record_defaults_optional_fields() {
        let ledger = Ledger::from_json(r#"{"Bo": {"name": "Bo"}}"#).unwrap();
        let bo = ledger.get("Bo").unwrap();
        assert_eq!(*bo.games_played(), 0);
        assert_eq!(*bo.total_score(), 0);
        assert!(bo.high_scores().is_empty());
        assert!(bo.achievements().is_empty());
    }

    #[test]
    fn test_record_requires_matching_name() {
        assert_eq!(
            Ledger::from_json(r#"{"Bo": {"games_played": 2}}"#),
            Err(ProfileParseError::MissingName {
                key: "Bo".to_string()
            })
        );
        assert_eq!(
            Ledger::from_json(r#"{"Bo": {"name": "bo"}}"#),
            Err(ProfileParseError::NameMismatch {
                key: "Bo".to_string(),
                name: "bo".to_string()
            })
        );
    }

    #[test]
    fn test_negative_counts_are_malformed() {
        let result = Ledger::from_json(r#"{"Bo": {"name": "Bo", "total_score": -5}}"#);
        assert!(matches!(result, Err(ProfileParseError::Malformed(_))));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let (ledger, _) = Ledger::new().with_player("Amy", date()).unwrap();
        let (ledger, _) = ledger.with_player("amy", date()).unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.get("AMY").is_none());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(matches!(
            Ledger::new().with_player("   ", date()),
            Err(LedgerError::EmptyName)
        ));
    }

    #[test]
    fn test_json_layout() {
        let (ledger, _) = Ledger::new().with_player("Amy", date()).unwrap();
        let (ledger, _) = ledger.with_score("Amy", TICTACTOE_GAME_ID, 1200).unwrap();
        let expected = r#"{
  "Amy": {
    "name": "Amy",
    "games_played": 1,
    "total_score": 1200,
    "high_scores": {
      "Tic-Tac-Toe": 1200
    },
    "achievements": [],
    "created_date": "2024-03-14"
  }
}"#;
        assert_eq!(ledger.to_json().unwrap(), expected);
    }
}
