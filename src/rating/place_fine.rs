//! Fixed place-fine scoring
//!
//! Every row is scored on its own: a fixed fine (or reward) for the place
//! taken plus a points effect scaled by the games played. There is no bank.

use crate::config::ScoringConfig;
use crate::error::{RatingError, Result};
use crate::rating::policy::{ScoringPolicy, SeriesScore};
use crate::types::{Participant, PolicyKind, RatingDelta};
use tracing::debug;

/// Place-fine policy ("Energy" seasons)
#[derive(Debug, Clone)]
pub struct PlaceFinePolicy {
    fine_table: Vec<f64>,
    bonus_weight: f64,
    win_weight: f64,
    effect_scale: f64,
}

impl PlaceFinePolicy {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            fine_table: config.fine_table.clone(),
            bonus_weight: config.bonus_weight,
            win_weight: config.win_weight,
            effect_scale: config.effect_scale,
        }
    }

    /// Fine for a place; places outside the table are a configuration error
    pub fn place_fine(&self, place: u32) -> Result<f64> {
        if place == 0 || place as usize > self.fine_table.len() {
            return Err(RatingError::config(format!(
                "No fine configured for place {} (table covers 1..={})",
                place,
                self.fine_table.len()
            ))
            .into());
        }
        Ok(self.fine_table[place as usize - 1])
    }

    fn score_row(&self, participant: &Participant<'_>) -> Result<f64> {
        let row = participant.row;
        let fine = self.place_fine(row.place)?;

        let (wins, games) = match (row.wins, row.games_played) {
            (Some(wins), Some(games)) => (wins, games),
            _ => {
                return Err(RatingError::malformed(
                    row.series_index.to_string(),
                    format!("row for '{}' has no wins/games record", row.display_name),
                )
                .into())
            }
        };
        if games == 0 {
            return Err(RatingError::DivisionByZero {
                series_index: row.series_index,
                nickname: row.display_name.clone(),
            }
            .into());
        }

        let points_effect = (row.bonus_points * self.bonus_weight + wins as f64 * self.win_weight)
            * self.effect_scale
            / games as f64;

        Ok(fine + points_effect)
    }
}

impl ScoringPolicy for PlaceFinePolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::PlaceFine
    }

    fn score_series(&self, participants: &[Participant<'_>]) -> Result<SeriesScore> {
        let mut deltas = Vec::with_capacity(participants.len());
        for participant in participants {
            let delta = self.score_row(participant)?;
            debug!(
                "Place {} for '{}': delta {:+.2}",
                participant.row.place, participant.row.nickname, delta
            );
            deltas.push(RatingDelta {
                nickname: participant.row.nickname.clone(),
                delta,
            });
        }

        Ok(SeriesScore { deltas, bank: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::test_support::{participants, row};

    fn policy() -> PlaceFinePolicy {
        PlaceFinePolicy::new(&ScoringConfig::default())
    }

    #[test]
    fn test_winner_with_points_effect() {
        let rows = vec![row("A", 1).bonus(2.0).record(3, 5)];
        let score = policy()
            .score_series(&participants(&rows, &[100.0]))
            .unwrap();

        // (2*20 + 3*10) * 5 / 5 = 70, plus 20 for first place
        assert_eq!(score.deltas.len(), 1);
        assert!((score.deltas[0].delta - 90.0).abs() < 1e-9);
        assert_eq!(score.bank, None);
    }

    #[test]
    fn test_rows_are_independent_of_ratings() {
        let rows = vec![
            row("A", 4).record(0, 4),
            row("B", 10).bonus(-0.5).record(1, 4),
        ];
        let score = policy()
            .score_series(&participants(&rows, &[500.0, 20.0]))
            .unwrap();

        assert_eq!(score.deltas[0].delta, 0.0);
        // -35 + (-10 + 10) * 5 / 4
        assert!((score.deltas[1].delta + 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_games_is_division_by_zero() {
        let rows = vec![row("A", 1).record(0, 0)];
        let err = policy()
            .score_series(&participants(&rows, &[100.0]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_place_outside_table_is_configuration_error() {
        let rows = vec![row("A", 11).record(1, 2)];
        let err = policy()
            .score_series(&participants(&rows, &[100.0]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::ConfigurationError { .. })
        ));
        assert!(policy().place_fine(0).is_err());
    }

    #[test]
    fn test_missing_record_is_malformed() {
        let rows = vec![row("A", 1)];
        let err = policy()
            .score_series(&participants(&rows, &[100.0]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::MalformedResults { .. })
        ));
    }
}
