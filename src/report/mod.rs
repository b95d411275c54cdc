//! Rating reports
//!
//! Leaderboards, qualified standings, single-player lookup and season summary
//! derived from the final ledger of a season.

pub mod leaderboard;

pub use leaderboard::{LeaderboardRow, PlayerRank, QualifiedRow, RatingReport, SeasonSummary};
