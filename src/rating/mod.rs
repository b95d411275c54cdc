//! Rating ledger and scoring policies
//!
//! This module provides the per-season rating ledger and the three scoring
//! policies that turn one series of results into rating deltas.

pub mod bank;
pub mod ledger;
pub mod place_fine;
pub mod policy;
pub mod self_play;

// Re-export commonly used types
pub use bank::BankPolicy;
pub use ledger::{Ledger, LedgerEntry};
pub use place_fine::PlaceFinePolicy;
pub use policy::{build_policy, ScoringPolicy, SeriesScore};
pub use self_play::SelfPlayPolicy;
