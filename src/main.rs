//! Main entry point for the Mafia season rating tool
//!
//! Loads configuration, reads a results dump, folds the season through the
//! configured scoring policy and prints the requested report as JSON.

use anyhow::Result;
use clap::Parser;
use mafia_rating::config::{validate_config, AppConfig};
use mafia_rating::season::{compute_season, FileResultsProvider};
use mafia_rating::{PolicyKind, RatingReport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Mafia Rating - season standings from series results
#[derive(Parser)]
#[command(
    name = "mafia-rating",
    version,
    about = "Compute Mafia league season ratings from series results",
    long_about = "Folds every series of the current season into a rating ledger using the \
                 place-fine, bank or self-play scoring policy, then prints the leaderboard, \
                 the qualified standings or a single player's place as JSON."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Results dump
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to the JSON dump of scraped season results"
    )]
    results: PathBuf,

    /// Scoring policy override
    #[arg(long, value_name = "POLICY", help = "Override scoring policy (place_fine, bank, self_play)")]
    policy: Option<PolicyKind>,

    /// Additional excluded players
    #[arg(short, long, value_name = "NICK", help = "Exclude a player from the standings (repeatable)")]
    exclude: Vec<String>,

    /// Single-player lookup
    #[arg(short, long, value_name = "NICK", help = "Print one player's rating and place")]
    player: Option<String>,

    /// Qualified standings
    #[arg(long, help = "Print only players with enough series to qualify")]
    qualified: bool,

    /// Season summary
    #[arg(long, help = "Print season summary figures")]
    summary: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without rating")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if let Some(policy) = args.policy {
        config.season.policy = policy;
    }
    config.season.exclude.extend(args.exclude.iter().cloned());

    validate_config(&config)?;
    Ok(config)
}

async fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let provider = Arc::new(FileResultsProvider::from_path(&args.results)?);
    let rating = compute_season(config, provider).await?;
    let report = RatingReport::new(&rating)
        .with_qualification_min_series(config.season.qualification_min_series);

    let output = if let Some(player) = &args.player {
        serde_json::to_string_pretty(&report.player_rank(player)?)?
    } else if args.qualified {
        serde_json::to_string_pretty(&report.qualified_rating())?
    } else if args.summary {
        serde_json::to_string_pretty(&report.summary())?
    } else {
        serde_json::to_string_pretty(&report.current_rating())?
    };
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "{} v{} ({} policy)",
        config.service.name,
        mafia_rating::VERSION,
        config.season.policy
    );

    if args.dry_run {
        info!("Configuration validation successful");
        return Ok(());
    }

    if let Err(e) = run(&args, &config).await {
        error!("Season rating failed: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
