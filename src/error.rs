//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application. Every variant is fatal to the season computation
//! that raised it.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Season not found: {search_text}")]
    SeasonNotFound { search_text: String },

    #[error("No series found for season {season_id}")]
    TournamentsNotFound { season_id: String },

    #[error("Series {series_index} has no eligible results")]
    EmptyResults { series_index: u32 },

    #[error("Malformed results in series {series_id}: {reason}")]
    MalformedResults { series_id: String, reason: String },

    #[error("Player '{nickname}' has zero games played in series {series_index}")]
    DivisionByZero { series_index: u32, nickname: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Player not found: {nickname}")]
    PlayerNotFound { nickname: String },
}

impl RatingError {
    /// Shorthand for a malformed-results error
    pub fn malformed(series_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResults {
            series_id: series_id.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }
}
