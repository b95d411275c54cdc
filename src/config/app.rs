//! Main application configuration
//!
//! This module defines the primary configuration structures for the rating
//! engine, including environment variable loading, TOML files and validation.

use crate::config::scoring::ScoringConfig;
use crate::error::RatingError;
use crate::types::PolicyKind;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub season: SeasonSettings,
    pub scoring: ScoringConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Season-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSettings {
    /// Scoring policy the season is rated with
    pub policy: PolicyKind,
    /// Text that identifies the season title during discovery
    pub search_text: String,
    /// Players rated outside the standings
    pub exclude: Vec<String>,
    /// How many series the fetcher may run ahead of the engine
    pub prefetch_depth: usize,
    /// Series a player needs to appear in the qualified leaderboard
    pub qualification_min_series: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "mafia-rating".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for SeasonSettings {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Bank,
            search_text: "Магистрейтик".to_string(),
            exclude: Vec::new(),
            prefetch_depth: 4,
            qualification_min_series: 3,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::read_toml_file(path)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Read a TOML file without environment overrides or validation
    pub fn read_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text without touching the environment
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| anyhow!("Invalid TOML configuration: {}", e))
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Season settings
        if let Ok(policy) = env::var("SCORING_POLICY") {
            self.season.policy = policy.parse()?;
        }
        if let Ok(search_text) = env::var("SEASON_SEARCH_TEXT") {
            self.season.search_text = search_text;
        }
        if let Ok(exclude) = env::var("SEASON_EXCLUDE") {
            self.season.exclude = parse_list(&exclude);
        }
        if let Ok(depth) = env::var("PREFETCH_DEPTH") {
            self.season.prefetch_depth = depth
                .parse()
                .map_err(|_| anyhow!("Invalid PREFETCH_DEPTH value: {}", depth))?;
        }
        if let Ok(min_series) = env::var("QUALIFICATION_MIN_SERIES") {
            self.season.qualification_min_series = min_series
                .parse()
                .map_err(|_| anyhow!("Invalid QUALIFICATION_MIN_SERIES value: {}", min_series))?;
        }

        // Scoring settings
        if let Ok(initial) = env::var("INITIAL_RATING") {
            self.scoring.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid INITIAL_RATING value: {}", initial))?;
        }
        if let Ok(seed) = env::var("BANK_SEED") {
            self.scoring.bank_seed = seed
                .parse()
                .map_err(|_| anyhow!("Invalid BANK_SEED value: {}", seed))?;
        }

        Ok(())
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => {
            return Err(RatingError::config(format!(
                "Invalid log level: {}",
                config.service.log_level
            ))
            .into())
        }
    }

    // Validate season settings
    if config.season.prefetch_depth == 0 {
        return Err(RatingError::config("Prefetch depth must be greater than 0").into());
    }
    if config.season.qualification_min_series == 0 {
        return Err(
            RatingError::config("Qualification minimum series must be greater than 0").into(),
        );
    }

    config.scoring.validate()
}
