//! Scoring policy configuration
//!
//! Place-keyed tables are stored as lists where index 0 is first place.

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};

/// Parameters shared by the three scoring policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Rating assigned to a nickname the first time it is seen
    pub initial_rating: f64,
    /// Constant seeded into every series bank
    pub bank_seed: f64,
    /// Share of the pre-series rating each participant pays into the bank
    pub buy_in_fraction: f64,
    /// Fixed fine per place (place-fine policy)
    pub fine_table: Vec<f64>,
    /// Weight of one bonus point in the points effect
    pub bonus_weight: f64,
    /// Weight of one win in the points effect
    pub win_weight: f64,
    /// Multiplier applied before dividing by games played
    pub effect_scale: f64,
    /// Bank share per place (bank policy)
    pub bank_distribution: Vec<f64>,
    /// Split of the top pool between places 1..=3 (self-play policy)
    pub top_split: Vec<f64>,
    /// Share of the bank paid out to bonus-point holders when any exist
    pub dops_pool_share: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            initial_rating: 100.0,
            bank_seed: 25.0,
            buy_in_fraction: 0.1,
            fine_table: vec![
                20.0, 15.0, 10.0, 0.0, -10.0, -15.0, -20.0, -25.0, -30.0, -35.0,
            ],
            bonus_weight: 20.0,
            win_weight: 10.0,
            effect_scale: 5.0,
            bank_distribution: vec![0.40, 0.24, 0.17, 0.11, 0.08],
            top_split: vec![0.50, 0.33, 0.17],
            dops_pool_share: 0.5,
        }
    }
}

impl ScoringConfig {
    /// Validate table shapes and fractions
    pub fn validate(&self) -> Result<()> {
        if !self.initial_rating.is_finite() {
            return Err(RatingError::config("Initial rating must be finite").into());
        }
        if self.bank_seed < 0.0 {
            return Err(RatingError::config("Bank seed cannot be negative").into());
        }
        if !(0.0..=1.0).contains(&self.buy_in_fraction) {
            return Err(RatingError::config("Buy-in fraction must be within [0, 1]").into());
        }
        if self.fine_table.is_empty() {
            return Err(RatingError::config("Fine table cannot be empty").into());
        }
        if self.effect_scale <= 0.0 {
            return Err(RatingError::config("Effect scale must be positive").into());
        }
        validate_fractions("Bank distribution", &self.bank_distribution)?;
        validate_fractions("Top split", &self.top_split)?;
        if !(0.0..=1.0).contains(&self.dops_pool_share) {
            return Err(RatingError::config("Dops pool share must be within [0, 1]").into());
        }
        Ok(())
    }
}

fn validate_fractions(name: &str, fractions: &[f64]) -> Result<()> {
    if fractions.iter().any(|f| *f < 0.0 || !f.is_finite()) {
        return Err(RatingError::config(format!("{} contains a negative share", name)).into());
    }
    let total: f64 = fractions.iter().sum();
    // Tolerate float noise in hand-written tables such as 0.50 + 0.33 + 0.17
    if total > 1.0 + 1e-9 {
        return Err(RatingError::config(format!(
            "{} shares sum to {:.4}, above 1",
            name, total
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config_is_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fine_table.len(), 10);
        assert_eq!(config.fine_table[0], 20.0);
        assert_eq!(config.fine_table[9], -35.0);
    }

    #[test]
    fn test_distribution_above_one_is_rejected() {
        let config = ScoringConfig {
            bank_distribution: vec![0.6, 0.5],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_negative_share_is_rejected() {
        let config = ScoringConfig {
            top_split: vec![0.7, 0.5, -0.2],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_fine_table_is_rejected() {
        let config = ScoringConfig {
            fine_table: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
