//! Leaderboards derived from a finished season
//!
//! Sorting is by raw rating, descending, with a stable sort so players tied on
//! rating keep their discovery order.

use crate::error::{RatingError, Result};
use crate::rating::LedgerEntry;
use crate::season::SeasonRating;
use crate::types::PolicyKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Public leaderboard line with the rounded rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub nickname: String,
    pub rating: i64,
    pub series_count: u32,
}

/// Leaderboard line for players with enough series to qualify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedRow {
    pub nickname: String,
    pub rating: f64,
    pub series_count: u32,
    pub bonus_total: f64,
    pub points_total: f64,
    pub avg_points: f64,
}

/// A single player's leaderboard line and 1-based place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRank {
    pub nickname: String,
    pub rating: i64,
    pub series_count: u32,
    pub place: usize,
}

/// Season-wide figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season: Option<String>,
    pub policy: PolicyKind,
    pub series_processed: usize,
    pub player_count: usize,
    pub qualified_count: usize,
    pub total_rating: f64,
    pub mean_rating: f64,
    pub computed_at: DateTime<Utc>,
}

/// Read-only view over a season rating
#[derive(Debug, Clone, Copy)]
pub struct RatingReport<'a> {
    rating: &'a SeasonRating,
    qualification_min_series: u32,
}

impl<'a> RatingReport<'a> {
    pub fn new(rating: &'a SeasonRating) -> Self {
        Self {
            rating,
            qualification_min_series: 3,
        }
    }

    pub fn with_qualification_min_series(mut self, min_series: u32) -> Self {
        self.qualification_min_series = min_series;
        self
    }

    /// Ledger entries sorted by rating, ties in discovery order
    pub fn ranked(&self) -> Vec<&'a LedgerEntry> {
        let mut entries: Vec<&LedgerEntry> = self.rating.ledger.entries().iter().collect();
        entries.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
        entries
    }

    fn leaderboard_row(&self, entry: &LedgerEntry) -> LeaderboardRow {
        LeaderboardRow {
            nickname: entry.display_name.clone(),
            rating: self.rating.policy.rounding().apply(entry.rating),
            series_count: entry.series_count,
        }
    }

    /// Full leaderboard with ratings rounded per policy
    pub fn current_rating(&self) -> Vec<LeaderboardRow> {
        self.ranked()
            .into_iter()
            .map(|entry| self.leaderboard_row(entry))
            .collect()
    }

    /// Leaderboard restricted to players with enough series played
    pub fn qualified_rating(&self) -> Vec<QualifiedRow> {
        self.ranked()
            .into_iter()
            .filter(|entry| entry.series_count >= self.qualification_min_series)
            .map(|entry| QualifiedRow {
                nickname: entry.display_name.clone(),
                rating: entry.rating,
                series_count: entry.series_count,
                bonus_total: entry.bonus_total,
                points_total: entry.points_total,
                avg_points: entry.avg_points(),
            })
            .collect()
    }

    /// Look up one player and their place on the full leaderboard
    pub fn player_rank(&self, nickname: &str) -> Result<PlayerRank> {
        let key = self.rating.nickname_policy.normalize(nickname);
        self.ranked()
            .into_iter()
            .enumerate()
            .find(|(_, entry)| entry.nickname == key)
            .map(|(i, entry)| {
                let row = self.leaderboard_row(entry);
                PlayerRank {
                    nickname: row.nickname,
                    rating: row.rating,
                    series_count: row.series_count,
                    place: i + 1,
                }
            })
            .ok_or_else(|| {
                RatingError::PlayerNotFound {
                    nickname: nickname.to_string(),
                }
                .into()
            })
    }

    pub fn summary(&self) -> SeasonSummary {
        let ledger = &self.rating.ledger;
        let player_count = ledger.len();
        let total_rating = ledger.total_rating();
        let mean_rating = if player_count == 0 {
            0.0
        } else {
            total_rating / player_count as f64
        };

        SeasonSummary {
            season: self.rating.season.as_ref().map(|s| s.title.clone()),
            policy: self.rating.policy,
            series_processed: self.rating.series_processed(),
            player_count,
            qualified_count: ledger
                .entries()
                .iter()
                .filter(|entry| entry.series_count >= self.qualification_min_series)
                .count(),
            total_rating,
            mean_rating,
            computed_at: self.rating.computed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::rating::test_support::row;
    use crate::rating::{build_policy, Ledger};
    use crate::season::{History, SeasonEngine};
    use crate::types::{RawRow, SeriesHandle};
    use crate::utils::current_timestamp;

    fn raw(place: u32, nickname: &str, points: f64) -> RawRow {
        RawRow {
            place,
            nickname: nickname.to_string(),
            points,
            bonus_points: 0.0,
            wins: None,
            games_played: None,
        }
    }

    fn rate(kind: PolicyKind, series: Vec<Vec<RawRow>>) -> SeasonRating {
        let mut engine =
            SeasonEngine::new(build_policy(kind, &ScoringConfig::default()).unwrap(), 100.0, &[]);
        for (i, rows) in series.into_iter().enumerate() {
            let handle = SeriesHandle {
                id: format!("s{}", i + 1),
                index: i as u32 + 1,
                title: format!("Series {}", i + 1),
            };
            engine.process_series(&handle, rows).unwrap();
        }
        engine.finish(None)
    }

    #[test]
    fn test_current_rating_is_sorted_and_ceiled() {
        let rating = rate(
            PolicyKind::Bank,
            vec![vec![raw(1, "A", 10.0), raw(2, "B", 5.0), raw(3, "C", 1.0)]],
        );
        let board = RatingReport::new(&rating).current_rating();

        // bank = 55: A 100 + 22 - 10, B 100 + 13.2 - 10, C 100 + 9.35 - 10
        let names: Vec<_> = board.iter().map(|r| r.nickname.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(board[0].rating, 112);
        assert_eq!(board[1].rating, 104);
        assert_eq!(board[2].rating, 100);
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        // Seven players: ranks 6 and 7 both just pay the buy-in
        let rows = (1..=7).map(|p| raw(p, &format!("p{}", p), 0.0)).collect();
        let rating = rate(PolicyKind::Bank, vec![rows]);
        let board = RatingReport::new(&rating).current_rating();
        assert_eq!(board[5].nickname, "p6");
        assert_eq!(board[6].nickname, "p7");
    }

    #[test]
    fn test_qualified_rating_requires_min_series() {
        let rating = rate(
            PolicyKind::Bank,
            vec![
                vec![
                    raw(1, "Star", 30.0),
                    raw(2, "A", 10.0),
                    raw(3, "C", 5.0),
                    raw(4, "D", 4.0),
                    raw(5, "E", 3.0),
                ],
                vec![raw(1, "A", 12.0), raw(2, "B", 4.0)],
                vec![raw(1, "B", 9.0), raw(2, "A", 8.0)],
            ],
        );
        let report = RatingReport::new(&rating);
        let qualified = report.qualified_rating();

        assert_eq!(qualified.len(), 1);
        assert_eq!(qualified[0].nickname, "A");
        assert_eq!(qualified[0].series_count, 3);
        assert_eq!(qualified[0].points_total, 30.0);
        assert_eq!(qualified[0].avg_points, 10.0);
        // Star has the best rating but only one series
        assert_eq!(report.current_rating()[0].nickname, "Star");

        let relaxed = report.with_qualification_min_series(1).qualified_rating();
        assert_eq!(relaxed.len(), 6);
    }

    #[test]
    fn test_player_rank_lookup() {
        let rating = rate(
            PolicyKind::SelfPlay,
            vec![vec![raw(1, "Don", 3.0), raw(2, "Sheriff", 2.0), raw(3, "Maniac", 1.0)]],
        );
        let report = RatingReport::new(&rating);

        let rank = report.player_rank("sheriff").unwrap();
        assert_eq!(rank.place, 2);
        assert_eq!(rank.nickname, "Sheriff");
        assert_eq!(rank.series_count, 1);

        let err = report.player_rank("Ghost").unwrap_err();
        assert_eq!(
            err.downcast_ref::<RatingError>(),
            Some(&RatingError::PlayerNotFound {
                nickname: "Ghost".to_string()
            })
        );
    }

    #[test]
    fn test_self_play_rounds_half_up() {
        let rating = rate(
            PolicyKind::SelfPlay,
            vec![vec![raw(1, "A", 3.0), raw(2, "B", 2.0), raw(3, "C", 1.0)]],
        );
        // bank = 55: A 117.5, B 108.15, C 99.35
        let board = RatingReport::new(&rating).current_rating();
        assert_eq!(board[0].rating, 118);
        assert_eq!(board[1].rating, 108);
        assert_eq!(board[2].rating, 99);
    }

    /// Season whose players finished on exactly the given ratings
    fn settled(kind: PolicyKind, ratings: &[(&str, f64)]) -> SeasonRating {
        let mut ledger = Ledger::new(0.0);
        for (nickname, rating) in ratings {
            ledger.commit(&row(nickname, 1), *rating);
        }
        SeasonRating {
            season: None,
            policy: kind,
            nickname_policy: kind.nickname_policy(),
            ledger,
            history: History::new(),
            computed_at: current_timestamp(),
        }
    }

    #[test]
    fn test_self_play_rounds_stored_tenths() {
        let ratings = [("don", 128.45), ("sheriff", 21.45), ("maniac", 2.45)];

        let board = RatingReport::new(&settled(PolicyKind::SelfPlay, &ratings)).current_rating();
        let shown: Vec<_> = board.iter().map(|r| r.rating).collect();
        assert_eq!(shown, vec![128, 21, 3]);

        // Ceiling policies are unaffected by the one-decimal step
        let board = RatingReport::new(&settled(PolicyKind::Bank, &ratings)).current_rating();
        let shown: Vec<_> = board.iter().map(|r| r.rating).collect();
        assert_eq!(shown, vec![129, 22, 3]);
    }

    #[test]
    fn test_summary() {
        let rating = rate(
            PolicyKind::SelfPlay,
            vec![vec![raw(1, "A", 3.0), raw(2, "B", 2.0), raw(3, "C", 1.0)]],
        );
        let summary = RatingReport::new(&rating).summary();
        assert_eq!(summary.series_processed, 1);
        assert_eq!(summary.player_count, 3);
        assert_eq!(summary.qualified_count, 0);
        // Only the bank seed enters the system
        assert!((summary.total_rating - 325.0).abs() < 1e-9);
        assert!(summary.season.is_none());
    }
}
