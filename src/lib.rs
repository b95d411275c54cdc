//! Mafia Rating - Season rating engine for Mafia tournament series
//!
//! This crate folds the series results of a season into a per-player rating
//! ledger under one of three scoring policies, and derives leaderboards from
//! the final state.

pub mod config;
pub mod error;
pub mod rating;
pub mod report;
pub mod season;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{Ledger, LedgerEntry, ScoringPolicy};
pub use report::RatingReport;
pub use season::{compute_season, ResultsProvider, SeasonEngine, SeasonRating};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
