//! Rating ledger
//!
//! Holds the running rating state of every player seen during one season.
//! Entries are created lazily on first access and never removed; iteration
//! follows discovery order, which the leaderboard relies on to break ties.

use crate::types::{PlayerId, SeriesRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Running state of one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub nickname: PlayerId,
    /// Casing shown in reports; the latest seen wins
    pub display_name: String,
    pub rating: f64,
    pub series_count: u32,
    pub bonus_total: f64,
    pub points_total: f64,
}

impl LedgerEntry {
    /// Create a new entry for a player that has not played yet
    pub fn new(nickname: PlayerId, display_name: String, initial_rating: f64) -> Self {
        Self {
            nickname,
            display_name,
            rating: initial_rating,
            series_count: 0,
            bonus_total: 0.0,
            points_total: 0.0,
        }
    }

    /// Average raw points per series played
    pub fn avg_points(&self) -> f64 {
        if self.series_count == 0 {
            return 0.0;
        }
        self.points_total / self.series_count as f64
    }
}

/// Per-player rating state for one season
#[derive(Debug, Clone)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    index: HashMap<PlayerId, usize>,
    initial_rating: f64,
}

impl Ledger {
    /// Create an empty ledger; new players start at `initial_rating`
    pub fn new(initial_rating: f64) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            initial_rating,
        }
    }

    /// Look up a player without creating an entry
    pub fn get(&self, nickname: &str) -> Option<&LedgerEntry> {
        self.index.get(nickname).map(|&i| &self.entries[i])
    }

    /// Return the player's entry, creating the default one on first access
    pub fn get_or_create(&mut self, nickname: &str) -> &mut LedgerEntry {
        let i = match self.index.get(nickname) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.entries.push(LedgerEntry::new(
                    nickname.to_string(),
                    nickname.to_string(),
                    self.initial_rating,
                ));
                self.index.insert(nickname.to_string(), i);
                i
            }
        };
        &mut self.entries[i]
    }

    /// Current rating, or the initial rating for an unseen player
    pub fn rating_of(&self, nickname: &str) -> f64 {
        self.get(nickname)
            .map(|entry| entry.rating)
            .unwrap_or(self.initial_rating)
    }

    /// Fold one series result into the player's entry
    pub fn commit(&mut self, row: &SeriesRow, delta: f64) {
        let entry = self.get_or_create(&row.nickname);
        entry.display_name = row.display_name.clone();
        entry.rating += delta;
        entry.series_count += 1;
        entry.bonus_total += row.bonus_points;
        entry.points_total += row.points;
    }

    /// All entries in discovery order
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_rating(&self) -> f64 {
        self.entries.iter().map(|entry| entry.rating).sum()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_row(nickname: &str, points: f64, bonus: f64) -> SeriesRow {
        SeriesRow {
            series_index: 1,
            nickname: nickname.to_lowercase(),
            display_name: nickname.to_string(),
            place: 1,
            rank: 1,
            points,
            bonus_points: bonus,
            wins: None,
            games_played: None,
        }
    }

    #[test]
    fn test_get_or_create_initializes_default_entry() {
        let mut ledger = Ledger::new(100.0);
        assert!(ledger.get("don").is_none());

        let entry = ledger.get_or_create("don");
        assert_eq!(entry.rating, 100.0);
        assert_eq!(entry.series_count, 0);
        assert_eq!(entry.bonus_total, 0.0);
        assert_eq!(entry.points_total, 0.0);

        // Second access returns the same entry
        ledger.get_or_create("don").rating = 150.0;
        assert_eq!(ledger.get_or_create("don").rating, 150.0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_rating_of_does_not_create_entries() {
        let ledger = Ledger::new(100.0);
        assert_eq!(ledger.rating_of("ghost"), 100.0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_commit_accumulates_totals() {
        let mut ledger = Ledger::new(100.0);
        ledger.commit(&create_test_row("Don", 12.5, 0.4), 8.0);
        ledger.commit(&create_test_row("DON", 7.5, -0.2), -3.0);

        let entry = ledger.get("don").unwrap();
        assert_eq!(entry.rating, 105.0);
        assert_eq!(entry.series_count, 2);
        assert!((entry.bonus_total - 0.2).abs() < 1e-9);
        assert_eq!(entry.points_total, 20.0);
        assert_eq!(entry.avg_points(), 10.0);
        assert_eq!(entry.display_name, "DON");
    }

    #[test]
    fn test_entries_keep_discovery_order() {
        let mut ledger = Ledger::new(100.0);
        for nickname in ["c", "a", "b", "a"] {
            ledger.get_or_create(nickname);
        }
        let order: Vec<_> = ledger.entries().iter().map(|e| e.nickname.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
        assert_eq!(ledger.total_rating(), 300.0);
    }
}
