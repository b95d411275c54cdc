//! Scoring policy trait
//!
//! A scoring policy is a pure function from the participants of one series
//! (with their pre-series ratings) to a rating delta per participant. The
//! engine owns the ledger and commits the deltas; policies never mutate state.

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::rating::bank::BankPolicy;
use crate::rating::place_fine::PlaceFinePolicy;
use crate::rating::self_play::SelfPlayPolicy;
use crate::types::{Participant, PolicyKind, RatingDelta};
use serde::{Deserialize, Serialize};

/// Result of scoring one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesScore {
    /// One delta per participant, in participant order
    pub deltas: Vec<RatingDelta>,
    /// Bank collected for the series, for policies that use one
    pub bank: Option<f64>,
}

/// Trait for turning series results into rating deltas
pub trait ScoringPolicy: Send + Sync + std::fmt::Debug {
    /// Which variant this is
    fn kind(&self) -> PolicyKind;

    /// Score one series
    ///
    /// # Arguments
    /// * `participants` - eligible rows ordered by rank, each with the
    ///   player's rating before the series
    ///
    /// # Returns
    /// Deltas aligned with `participants`, or the first row-level failure
    fn score_series(&self, participants: &[Participant<'_>]) -> Result<SeriesScore>;
}

/// Build the policy for a season from its scoring tables
pub fn build_policy(kind: PolicyKind, config: &ScoringConfig) -> Result<Box<dyn ScoringPolicy>> {
    config.validate()?;

    let policy: Box<dyn ScoringPolicy> = match kind {
        PolicyKind::PlaceFine => Box::new(PlaceFinePolicy::new(config)),
        PolicyKind::Bank => Box::new(BankPolicy::new(config)),
        PolicyKind::SelfPlay => Box::new(SelfPlayPolicy::new(config)),
    };
    Ok(policy)
}

/// Bank of a series: the seed plus every participant's buy-in
pub(crate) fn collect_bank(participants: &[Participant<'_>], seed: f64, buy_in: f64) -> f64 {
    seed + participants
        .iter()
        .map(|p| p.rating_before * buy_in)
        .sum::<f64>()
}

/// Share of a place-keyed fraction table; unlisted ranks get nothing
pub(crate) fn share_for_rank(table: &[f64], rank: u32) -> f64 {
    if rank == 0 {
        return 0.0;
    }
    table.get(rank as usize - 1).copied().unwrap_or(0.0)
}
