//! Results provider interface and implementations
//!
//! This module defines the boundary to the results portal: season discovery,
//! the chronological series list and the per-series results table. The
//! engine only ever talks to a provider through this trait.

use crate::error::{RatingError, Result};
use crate::types::{RawRow, SeasonHandle, SeriesHandle};
use crate::utils::{extract_numbers, parse_decimal};
use async_trait::async_trait;

/// Trait for fetching season results
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultsProvider: Send + Sync {
    /// Find the current season whose title contains `search_text`
    async fn discover_season(&self, search_text: &str) -> Result<SeasonHandle>;

    /// List the season's series in chronological order
    async fn list_series(&self, season: &SeasonHandle) -> Result<Vec<SeriesHandle>>;

    /// Fetch the results table of one series, ordered by place
    async fn fetch_series_results(&self, series: &SeriesHandle) -> Result<Vec<RawRow>>;
}

/// Pick the highest-numbered season whose title contains `search_text`
pub fn select_season<'a, I>(candidates: I, search_text: &str) -> Result<SeasonHandle>
where
    I: IntoIterator<Item = &'a SeasonHandle>,
{
    let needle = search_text.to_lowercase();
    candidates
        .into_iter()
        .filter(|season| season.title.to_lowercase().contains(&needle))
        .max_by_key(|season| season.number)
        .cloned()
        .ok_or_else(|| {
            RatingError::SeasonNotFound {
                search_text: search_text.to_string(),
            }
            .into()
        })
}

/// Parse one row of a results table.
///
/// Cells are `place, nickname, points, bonus` optionally followed by a
/// wins/games cell such as `"3 / 5"`. Numbers may use a decimal comma.
pub fn parse_result_row(series_id: &str, cells: &[String]) -> Result<RawRow> {
    if cells.len() < 4 {
        return Err(RatingError::malformed(
            series_id,
            format!("expected at least 4 cells, got {}", cells.len()),
        )
        .into());
    }

    let place = cells[0].trim().parse::<u32>().map_err(|_| {
        RatingError::malformed(series_id, format!("place '{}' is not a number", cells[0]))
    })?;

    let nickname = cells[1].trim();
    if nickname.is_empty() {
        return Err(RatingError::malformed(series_id, format!("row {} has no nickname", place)).into());
    }

    let points = parse_decimal(&cells[2]).ok_or_else(|| {
        RatingError::malformed(series_id, format!("points '{}' is not a number", cells[2]))
    })?;
    let bonus_points = parse_decimal(&cells[3]).ok_or_else(|| {
        RatingError::malformed(series_id, format!("bonus '{}' is not a number", cells[3]))
    })?;

    let (wins, games_played) = match cells.get(4) {
        Some(record) => match extract_numbers(record).as_slice() {
            [wins, games, ..] => (Some(*wins), Some(*games)),
            _ => {
                return Err(RatingError::malformed(
                    series_id,
                    format!("wins/games cell '{}' is not a record", record),
                )
                .into())
            }
        },
        None => (None, None),
    };

    Ok(RawRow {
        place,
        nickname: nickname.to_string(),
        points,
        bonus_points,
        wins,
        games_played,
    })
}

/// One series held by the static provider
#[derive(Debug, Clone)]
pub struct StaticSeries {
    pub handle: SeriesHandle,
    pub rows: Vec<RawRow>,
}

/// One season held by the static provider
#[derive(Debug, Clone)]
pub struct StaticSeason {
    pub handle: SeasonHandle,
    pub series: Vec<StaticSeries>,
}

/// In-memory provider for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticResultsProvider {
    seasons: Vec<StaticSeason>,
}

impl StaticResultsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a season whose series are given in chronological order
    pub fn with_season(mut self, number: u32, title: &str, series: Vec<Vec<RawRow>>) -> Self {
        let season_id = format!("season-{}", number);
        let series = series
            .into_iter()
            .enumerate()
            .map(|(i, rows)| StaticSeries {
                handle: SeriesHandle {
                    id: format!("{}/series-{}", season_id, i + 1),
                    index: i as u32 + 1,
                    title: format!("Series {}", i + 1),
                },
                rows,
            })
            .collect();

        self.seasons.push(StaticSeason {
            handle: SeasonHandle {
                id: season_id,
                number,
                title: title.to_string(),
            },
            series,
        });
        self
    }

    fn season(&self, handle: &SeasonHandle) -> Result<&StaticSeason> {
        self.seasons
            .iter()
            .find(|season| season.handle.id == handle.id)
            .ok_or_else(|| {
                RatingError::SeasonNotFound {
                    search_text: handle.title.clone(),
                }
                .into()
            })
    }
}

#[async_trait]
impl ResultsProvider for StaticResultsProvider {
    async fn discover_season(&self, search_text: &str) -> Result<SeasonHandle> {
        select_season(self.seasons.iter().map(|s| &s.handle), search_text)
    }

    async fn list_series(&self, season: &SeasonHandle) -> Result<Vec<SeriesHandle>> {
        let series: Vec<_> = self
            .season(season)?
            .series
            .iter()
            .map(|s| s.handle.clone())
            .collect();

        if series.is_empty() {
            return Err(RatingError::TournamentsNotFound {
                season_id: season.id.clone(),
            }
            .into());
        }
        Ok(series)
    }

    async fn fetch_series_results(&self, series: &SeriesHandle) -> Result<Vec<RawRow>> {
        self.seasons
            .iter()
            .flat_map(|season| season.series.iter())
            .find(|s| s.handle.id == series.id)
            .map(|s| s.rows.clone())
            .ok_or_else(|| RatingError::malformed(&series.id, "results table is absent").into())
    }
}
