//! Proportional bank redistribution
//!
//! Every participant pays a buy-in of their pre-series rating into a bank
//! seeded with a constant. The bank is paid out to the top finishers by a
//! fixed share table; whatever the table does not allocate is lost.

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::rating::policy::{collect_bank, share_for_rank, ScoringPolicy, SeriesScore};
use crate::types::{Participant, PolicyKind, RatingDelta};
use tracing::debug;

/// Bank policy
#[derive(Debug, Clone)]
pub struct BankPolicy {
    bank_seed: f64,
    buy_in_fraction: f64,
    distribution: Vec<f64>,
}

impl BankPolicy {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            bank_seed: config.bank_seed,
            buy_in_fraction: config.buy_in_fraction,
            distribution: config.bank_distribution.clone(),
        }
    }
}

impl ScoringPolicy for BankPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Bank
    }

    fn score_series(&self, participants: &[Participant<'_>]) -> Result<SeriesScore> {
        let bank = collect_bank(participants, self.bank_seed, self.buy_in_fraction);
        debug!("Series bank: {:.2} from {} players", bank, participants.len());

        let deltas = participants
            .iter()
            .map(|p| {
                let buy_in = p.rating_before * self.buy_in_fraction;
                let payout = share_for_rank(&self.distribution, p.row.rank) * bank;
                RatingDelta {
                    nickname: p.row.nickname.clone(),
                    delta: payout - buy_in,
                }
            })
            .collect();

        Ok(SeriesScore {
            deltas,
            bank: Some(bank),
        })
    }
}
