//! Season processing
//!
//! This module provides the results provider boundary, the sequential season
//! engine and the history it records while folding series into the ledger.

pub mod engine;
pub mod file;
pub mod history;
pub mod provider;

// Re-export commonly used types
pub use engine::{SeasonEngine, SeasonRating};
pub use file::FileResultsProvider;
pub use history::{History, HistoryRecord, SeriesSnapshot};
pub use provider::{parse_result_row, ResultsProvider, StaticResultsProvider};

use crate::config::AppConfig;
use crate::error::Result;
use std::sync::Arc;

/// Compute a season rating from scratch with the configured policy
pub async fn compute_season(
    config: &AppConfig,
    provider: Arc<dyn ResultsProvider>,
) -> Result<SeasonRating> {
    SeasonEngine::from_config(config)?
        .run(
            provider,
            &config.season.search_text,
            config.season.prefetch_depth,
        )
        .await
}
