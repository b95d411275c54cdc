//! Self-play zero-sum scoring with a top/dops split
//!
//! The bank is the seed plus every participant's buy-in. When nobody in the
//! series earned positive bonus points the whole bank goes to the top three;
//! otherwise the dops pool share is paid out in proportion to each player's
//! positive bonus points and the rest goes to the top three.

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::rating::policy::{collect_bank, share_for_rank, ScoringPolicy, SeriesScore};
use crate::types::{Participant, PolicyKind, RatingDelta};
use tracing::debug;

/// Self-play policy
#[derive(Debug, Clone)]
pub struct SelfPlayPolicy {
    bank_seed: f64,
    buy_in_fraction: f64,
    top_split: Vec<f64>,
    dops_pool_share: f64,
}

impl SelfPlayPolicy {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            bank_seed: config.bank_seed,
            buy_in_fraction: config.buy_in_fraction,
            top_split: config.top_split.clone(),
            dops_pool_share: config.dops_pool_share,
        }
    }
}

/// Sum of strictly positive bonus points in a series
pub fn dops_sum(participants: &[Participant<'_>]) -> f64 {
    participants
        .iter()
        .map(|p| p.row.bonus_points)
        .filter(|bonus| *bonus > 0.0)
        .sum()
}

impl ScoringPolicy for SelfPlayPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::SelfPlay
    }

    fn score_series(&self, participants: &[Participant<'_>]) -> Result<SeriesScore> {
        let bank = collect_bank(participants, self.bank_seed, self.buy_in_fraction);
        let dops_sum = dops_sum(participants);

        let dops_share = if dops_sum <= 0.0 {
            0.0
        } else {
            self.dops_pool_share
        };
        let top_pool = (1.0 - dops_share) * bank;
        let dops_pool = dops_share * bank;
        debug!(
            "Series bank: {:.2} (top pool {:.2}, dops pool {:.2}, dops sum {:.2})",
            bank, top_pool, dops_pool, dops_sum
        );

        let deltas = participants
            .iter()
            .map(|p| {
                let mut delta = -p.rating_before * self.buy_in_fraction;
                delta += share_for_rank(&self.top_split, p.row.rank) * top_pool;
                if p.row.bonus_points > 0.0 && dops_sum > 0.0 {
                    delta += p.row.bonus_points / dops_sum * dops_pool;
                }
                RatingDelta {
                    nickname: p.row.nickname.clone(),
                    delta,
                }
            })
            .collect();

        Ok(SeriesScore {
            deltas,
            bank: Some(bank),
        })
    }
}
