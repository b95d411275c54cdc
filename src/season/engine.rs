//! Season engine
//!
//! Folds the series of one season into a fresh ledger, strictly in discovery
//! order. Each series is scored against the ratings left by the previous one,
//! so the fold is path dependent and never parallelized. Fetching may run
//! ahead of scoring on a separate task; results are still applied in order.

use crate::config::AppConfig;
use crate::error::{RatingError, Result};
use crate::rating::{build_policy, Ledger, ScoringPolicy};
use crate::season::history::{History, HistoryRecord, SeriesSnapshot};
use crate::season::provider::ResultsProvider;
use crate::types::{
    NicknamePolicy, Participant, PlayerId, PolicyKind, RawRow, SeasonHandle, SeriesHandle,
    SeriesRow,
};
use crate::utils::current_timestamp;
use anyhow::{anyhow, ensure};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Final state of a completed season computation
#[derive(Debug, Clone)]
pub struct SeasonRating {
    pub season: Option<SeasonHandle>,
    pub policy: PolicyKind,
    pub nickname_policy: NicknamePolicy,
    pub ledger: Ledger,
    pub history: History,
    pub computed_at: DateTime<Utc>,
}

impl SeasonRating {
    pub fn series_processed(&self) -> usize {
        self.history.len()
    }
}

/// Sequential season fold over a scoring policy
#[derive(Debug)]
pub struct SeasonEngine {
    policy: Box<dyn ScoringPolicy>,
    nickname_policy: NicknamePolicy,
    exclude: HashSet<PlayerId>,
    ledger: Ledger,
    history: History,
}

impl SeasonEngine {
    /// Create an engine with an empty ledger
    pub fn new(policy: Box<dyn ScoringPolicy>, initial_rating: f64, exclude: &[String]) -> Self {
        let nickname_policy = policy.kind().nickname_policy();
        let exclude = exclude
            .iter()
            .map(|nickname| nickname_policy.normalize(nickname))
            .collect();

        Self {
            policy,
            nickname_policy,
            exclude,
            ledger: Ledger::new(initial_rating),
            history: History::new(),
        }
    }

    /// Create an engine from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let policy = build_policy(config.season.policy, &config.scoring)?;
        Ok(Self::new(
            policy,
            config.scoring.initial_rating,
            &config.season.exclude,
        ))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Whether a raw nickname is rated outside the standings
    pub fn is_excluded(&self, nickname: &str) -> bool {
        self.exclude
            .contains(&self.nickname_policy.normalize(nickname))
    }

    /// Validate, order and filter the raw rows of one series
    pub fn prepare_series(&self, series: &SeriesHandle, rows: Vec<RawRow>) -> Result<Vec<SeriesRow>> {
        let mut places = HashSet::new();
        let mut nicknames = HashSet::new();
        for row in &rows {
            if !places.insert(row.place) {
                return Err(RatingError::malformed(
                    &series.id,
                    format!("place {} appears more than once", row.place),
                )
                .into());
            }
            if !nicknames.insert(self.nickname_policy.normalize(&row.nickname)) {
                return Err(RatingError::malformed(
                    &series.id,
                    format!("'{}' appears more than once", row.nickname),
                )
                .into());
            }
        }

        let mut rows = rows;
        rows.sort_by_key(|row| row.place);

        let mut eligible: Vec<SeriesRow> = Vec::with_capacity(rows.len());
        for raw in rows {
            let nickname = self.nickname_policy.normalize(&raw.nickname);
            if self.exclude.contains(&nickname) {
                warn!(
                    "Dropping excluded player '{}' from series {}",
                    raw.nickname, series.index
                );
                continue;
            }
            let rank = eligible.len() as u32 + 1;
            eligible.push(SeriesRow {
                series_index: series.index,
                nickname,
                display_name: raw.nickname.trim().to_string(),
                place: raw.place,
                rank,
                points: raw.points,
                bonus_points: raw.bonus_points,
                wins: raw.wins,
                games_played: raw.games_played,
            });
        }

        if eligible.is_empty() {
            return Err(RatingError::EmptyResults {
                series_index: series.index,
            }
            .into());
        }
        Ok(eligible)
    }

    /// Score one series and commit it to the ledger.
    ///
    /// Nothing is committed unless every row scored successfully.
    pub fn process_series(&mut self, series: &SeriesHandle, rows: Vec<RawRow>) -> Result<()> {
        let rows = self.prepare_series(series, rows)?;
        let participants: Vec<Participant<'_>> = rows
            .iter()
            .map(|row| Participant {
                row,
                rating_before: self.ledger.rating_of(&row.nickname),
            })
            .collect();

        let score = self.policy.score_series(&participants)?;
        ensure!(
            score.deltas.len() == participants.len(),
            "{} policy returned {} deltas for {} players",
            self.policy_kind(),
            score.deltas.len(),
            participants.len()
        );

        let records: Vec<HistoryRecord> = participants
            .iter()
            .zip(&score.deltas)
            .map(|(p, delta)| HistoryRecord {
                nickname: p.row.nickname.clone(),
                display_name: p.row.display_name.clone(),
                place: p.row.place,
                rank: p.row.rank,
                points: p.row.points,
                bonus_points: p.row.bonus_points,
                rating_before: p.rating_before,
                delta: delta.delta,
                rating_after: p.rating_before + delta.delta,
            })
            .collect();

        for (row, delta) in rows.iter().zip(&score.deltas) {
            debug!("'{}' {:+.2} in series {}", row.nickname, delta.delta, series.index);
            self.ledger.commit(row, delta.delta);
        }

        info!(
            "Processed series {} ({}): {} players{}",
            series.index,
            series.title,
            records.len(),
            score
                .bank
                .map(|bank| format!(", bank {:.2}", bank))
                .unwrap_or_default()
        );

        self.history.push(SeriesSnapshot {
            series_index: series.index,
            series_id: series.id.clone(),
            title: series.title.clone(),
            bank: score.bank,
            records,
        });
        Ok(())
    }

    /// Freeze the engine state into a season rating
    pub fn finish(self, season: Option<SeasonHandle>) -> SeasonRating {
        SeasonRating {
            season,
            policy: self.policy_kind(),
            nickname_policy: self.nickname_policy,
            ledger: self.ledger,
            history: self.history,
            computed_at: current_timestamp(),
        }
    }

    /// Discover the season, then fetch and fold every series in order.
    ///
    /// Up to `prefetch_depth` series are fetched ahead of the one being
    /// scored. Any failure aborts the whole season.
    pub async fn run(
        mut self,
        provider: Arc<dyn ResultsProvider>,
        search_text: &str,
        prefetch_depth: usize,
    ) -> Result<SeasonRating> {
        let season = provider.discover_season(search_text).await?;
        let series = provider.list_series(&season).await?;
        if series.is_empty() {
            return Err(RatingError::TournamentsNotFound {
                season_id: season.id.clone(),
            }
            .into());
        }

        let expected = series.len();
        info!(
            "Rating season '{}' ({} series) with {} policy",
            season.title,
            expected,
            self.policy_kind()
        );

        let (tx, mut rx) = mpsc::channel::<Result<(SeriesHandle, Vec<RawRow>)>>(prefetch_depth.max(1));
        let fetcher = {
            let provider = provider.clone();
            tokio::spawn(async move {
                for handle in series {
                    let fetched = provider
                        .fetch_series_results(&handle)
                        .await
                        .map(|rows| (handle, rows));
                    let failed = fetched.is_err();
                    if tx.send(fetched).await.is_err() || failed {
                        break;
                    }
                }
            })
        };

        while let Some(fetched) = rx.recv().await {
            let outcome = fetched.and_then(|(handle, rows)| self.process_series(&handle, rows));
            if let Err(e) = outcome {
                fetcher.abort();
                return Err(e);
            }
        }

        fetcher
            .await
            .map_err(|e| anyhow!("Series fetcher stopped unexpectedly: {}", e))?;
        ensure!(
            self.history.len() == expected,
            "Only {} of {} series were processed",
            self.history.len(),
            expected
        );

        info!(
            "Season '{}' complete: {} players rated",
            season.title,
            self.ledger.len()
        );
        Ok(self.finish(Some(season)))
    }
}
