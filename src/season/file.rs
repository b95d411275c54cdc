//! File-backed results provider
//!
//! Reads a JSON dump of scraped seasons. Each series keeps its results table
//! as raw cell text, exactly as it appeared on the portal, and is parsed on
//! fetch so malformed tables surface at the same point a live fetch would.

use crate::error::{RatingError, Result};
use crate::season::provider::{parse_result_row, select_season, ResultsProvider};
use crate::types::{RawRow, SeasonHandle, SeriesHandle};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Top-level document of a results dump
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsDump {
    pub seasons: Vec<DumpSeason>,
}

/// A season as stored in the dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpSeason {
    pub id: String,
    pub number: u32,
    pub title: String,
    /// Series in chronological order
    #[serde(default)]
    pub series: Vec<DumpSeries>,
}

/// A series as stored in the dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpSeries {
    pub id: String,
    pub title: String,
    /// Played outside the standings; never listed
    #[serde(default)]
    pub off_standings: bool,
    /// Results table cells; `None` when the page had no results table
    #[serde(default)]
    pub rows: Option<Vec<Vec<String>>>,
}

impl DumpSeason {
    fn handle(&self) -> SeasonHandle {
        SeasonHandle {
            id: self.id.clone(),
            number: self.number,
            title: self.title.clone(),
        }
    }
}

/// Provider backed by a [`ResultsDump`]
#[derive(Debug, Clone)]
pub struct FileResultsProvider {
    dump: ResultsDump,
}

impl FileResultsProvider {
    pub fn new(dump: ResultsDump) -> Self {
        Self { dump }
    }

    /// Load a dump from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read results file {}", path.display()))?;
        let dump = Self::parse(&content)
            .with_context(|| format!("Failed to parse results file {}", path.display()))?;
        info!(
            "Loaded {} season(s) from {}",
            dump.dump.seasons.len(),
            path.display()
        );
        Ok(dump)
    }

    /// Parse a dump from JSON text
    pub fn parse(content: &str) -> Result<Self> {
        let dump: ResultsDump = serde_json::from_str(content)?;
        Ok(Self::new(dump))
    }

    fn find_season(&self, handle: &SeasonHandle) -> Result<&DumpSeason> {
        self.dump
            .seasons
            .iter()
            .find(|season| season.id == handle.id)
            .ok_or_else(|| {
                RatingError::SeasonNotFound {
                    search_text: handle.title.clone(),
                }
                .into()
            })
    }
}

#[async_trait]
impl ResultsProvider for FileResultsProvider {
    async fn discover_season(&self, search_text: &str) -> Result<SeasonHandle> {
        let handles: Vec<SeasonHandle> = self.dump.seasons.iter().map(DumpSeason::handle).collect();
        select_season(&handles, search_text)
    }

    async fn list_series(&self, season: &SeasonHandle) -> Result<Vec<SeriesHandle>> {
        let series: Vec<SeriesHandle> = self
            .find_season(season)?
            .series
            .iter()
            .filter(|series| !series.off_standings)
            .enumerate()
            .map(|(i, series)| SeriesHandle {
                id: series.id.clone(),
                index: i as u32 + 1,
                title: series.title.clone(),
            })
            .collect();

        if series.is_empty() {
            return Err(RatingError::TournamentsNotFound {
                season_id: season.id.clone(),
            }
            .into());
        }
        debug!("Season {} lists {} series", season.id, series.len());
        Ok(series)
    }

    async fn fetch_series_results(&self, series: &SeriesHandle) -> Result<Vec<RawRow>> {
        let stored = self
            .dump
            .seasons
            .iter()
            .flat_map(|season| season.series.iter())
            .find(|s| s.id == series.id)
            .ok_or_else(|| RatingError::malformed(&series.id, "series page not found"))?;

        let rows = stored
            .rows
            .as_ref()
            .ok_or_else(|| RatingError::malformed(&series.id, "results table is absent"))?;

        rows.iter()
            .map(|cells| parse_result_row(&series.id, cells))
            .collect()
    }
}
