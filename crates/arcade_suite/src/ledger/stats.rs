//! Leaderboards and suite-wide statistics.

use std::collections::BTreeMap;

use derive_getters::Getters;
use derive_new::new;
use tracing::{info, instrument};

use crate::ledger::{Ledger, PlayerProfile};

/// Number of entries per game shown on the high score table.
pub const DEFAULT_HIGH_SCORE_LIMIT: usize = 5;

/// One row on a game's high score table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct HighScoreEntry {
    player: String,
    score: u32,
}

/// Aggregates across every profile in the ledger.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct SuiteStatistics {
    total_players: usize,
    total_games: u64,
    average_games_per_player: f64,
    overall_average_score: f64,
    /// Player with the most games, and that count.
    most_active: (String, u32),
    /// Player with the best average score, and that average.
    highest_average: (String, f64),
}

impl Ledger {
    /// Best scores per game, highest first, at most `limit` per game.
    ///
    /// Equal scores are ordered by player name.
    #[instrument(skip(self))]
    pub fn high_score_table(&self, limit: usize) -> BTreeMap<String, Vec<HighScoreEntry>> {
        let mut table: BTreeMap<String, Vec<HighScoreEntry>> = BTreeMap::new();
        for profile in self.players() {
            for (game, score) in profile.high_scores() {
                table
                    .entry(game.clone())
                    .or_default()
                    .push(HighScoreEntry::new(profile.name().clone(), *score));
            }
        }
        for entries in table.values_mut() {
            entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.player.cmp(&b.player)));
            entries.truncate(limit);
        }
        table
    }

    /// Totals and leaders across all players.
    ///
    /// Returns `None` until at least one game has been recorded.
    #[instrument(skip(self))]
    pub fn suite_statistics(&self) -> Option<SuiteStatistics> {
        let total_players = self.len();
        let total_games: u64 = self.players().map(|p| u64::from(*p.games_played())).sum();
        if total_games == 0 {
            return None;
        }
        let total_score: u64 = self.players().map(|p| *p.total_score()).sum();

        let mut by_name: Vec<&PlayerProfile> = self.players().collect();
        by_name.sort_by(|a, b| a.name().cmp(b.name()));
        let most_active = first_max_by(&by_name, |p| f64::from(*p.games_played()))?;
        let highest_average = first_max_by(&by_name, PlayerProfile::average_score)?;

        let stats = SuiteStatistics {
            total_players,
            total_games,
            average_games_per_player: total_games as f64 / total_players as f64,
            overall_average_score: total_score as f64 / total_games as f64,
            most_active: (most_active.name().clone(), *most_active.games_played()),
            highest_average: (
                highest_average.name().clone(),
                highest_average.average_score(),
            ),
        };
        info!(total_players, total_games, "Suite statistics computed");
        Some(stats)
    }
}

/// First profile in `players` with the greatest key.
fn first_max_by<'a>(
    players: &[&'a PlayerProfile],
    key: impl Fn(&PlayerProfile) -> f64,
) -> Option<&'a PlayerProfile> {
    let mut best: Option<(&'a PlayerProfile, f64)> = None;
    for &profile in players {
        let value = key(profile);
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((profile, value));
        }
    }
    best.map(|(profile, _)| profile)
}
