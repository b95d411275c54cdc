//! Configuration management for the rating engine
//!
//! This module handles all configuration loading from environment variables
//! and TOML files, validation, and default values for scoring tables.

pub mod app;
pub mod scoring;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, SeasonSettings, ServiceSettings};
pub use scoring::ScoringConfig;
