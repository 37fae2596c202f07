//! Hall of fame: the highest-scoring past runs, kept in a [`KeyValueStore`].

use crate::store::KeyValueStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Store key holding the JSON-encoded entry list.
pub const LEADERBOARD_KEY: &str = "dev_econ_leaderboard";

/// Summary of one finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Country name
    pub name: String,
    pub score: i64,
    /// Year the run ended
    pub year: i32,
    /// Game-over reason text
    pub reason: String,
    /// Unix timestamp in milliseconds
    pub date: i64,
}

/// Entries sorted by score, highest first, truncated to `capacity`.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    capacity: usize,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Read the stored entries. A corrupt value is logged and treated as empty.
    pub fn load(store: &dyn KeyValueStore, capacity: usize) -> Result<Self> {
        let mut board = Self::new(capacity);
        if let Some(raw) = store.get(LEADERBOARD_KEY)? {
            match serde_json::from_str::<Vec<LeaderboardEntry>>(&raw) {
                Ok(entries) => {
                    board.entries = entries;
                    board.normalize();
                }
                Err(e) => log::warn!("Ignoring unreadable leaderboard: {}", e),
            }
        }
        Ok(board)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let raw = serde_json::to_string(&self.entries).context("failed to encode leaderboard")?;
        store.set(LEADERBOARD_KEY, &raw)
    }

    /// Remove all stored entries.
    pub fn clear(store: &mut dyn KeyValueStore) -> Result<()> {
        store.remove(LEADERBOARD_KEY)
    }

    /// Insert an entry and return its 1-based rank, or `None` if it did not make the cut.
    pub fn record(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let date = entry.date;
        let name = entry.name.clone();
        self.entries.push(entry);
        self.normalize();
        self.entries
            .iter()
            .position(|e| e.date == date && e.name == name)
            .map(|index| index + 1)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Stable sort keeps earlier entries ahead on equal scores
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }
}
