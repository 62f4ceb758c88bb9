//! Lifetime save record
//!
//! Folds finished runs into the player's persistent totals. Storage is the
//! host's concern; this type only serializes.

use serde::{Deserialize, Serialize};

use crate::sim::RunStats;

/// Persistent lifetime totals across runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRecord {
    /// Wallet balance
    pub coins: u64,
    pub high_score: u64,
    pub max_combo: u32,
    pub total_kills: u64,
    /// Longest run in seconds
    pub max_time_survived: f32,
    pub runs: u32,
}

impl SaveRecord {
    /// Fold a finished (or checkpoint-saved) run into the record.
    /// Returns true if the run set a new high score.
    pub fn merge_run(&mut self, stats: &RunStats) -> bool {
        self.runs += 1;
        self.coins += stats.coins_collected as u64;
        self.total_kills += stats.enemies_defeated as u64;
        self.max_combo = self.max_combo.max(stats.max_combo);
        self.max_time_survived = self.max_time_survived.max(stats.time);

        let new_high = stats.score > self.high_score;
        if new_high {
            log::info!("New high score: {} (was {})", stats.score, self.high_score);
            self.high_score = stats.score;
        }
        new_high
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
