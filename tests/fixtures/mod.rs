//! Test fixtures for integration testing

#![allow(dead_code)]

use mafia_rating::config::AppConfig;
use mafia_rating::season::StaticResultsProvider;
use mafia_rating::{PolicyKind, RawRow};
use std::sync::Arc;

pub const SEASON_TITLE: &str = "Магистрейтик 7 сезон";

/// Result row without a wins/games record
pub fn row(place: u32, nickname: &str, points: f64, bonus_points: f64) -> RawRow {
    RawRow {
        place,
        nickname: nickname.to_string(),
        points,
        bonus_points,
        wins: None,
        games_played: None,
    }
}

/// Result row with a wins/games record, as place-fine seasons report it
pub fn record_row(
    place: u32,
    nickname: &str,
    bonus_points: f64,
    wins: u32,
    games_played: u32,
) -> RawRow {
    RawRow {
        place,
        nickname: nickname.to_string(),
        points: 0.0,
        bonus_points,
        wins: Some(wins),
        games_played: Some(games_played),
    }
}

/// Configuration for `policy` with the default tables
pub fn config_for(policy: PolicyKind, exclude: &[&str]) -> AppConfig {
    let mut config = AppConfig::default();
    config.season.policy = policy;
    config.season.search_text = "магистрейтик".to_string();
    config.season.exclude = exclude.iter().map(|s| s.to_string()).collect();
    config.season.prefetch_depth = 2;
    config
}

/// Provider holding one current season plus an older one with the same name
pub fn provider_with(series: Vec<Vec<RawRow>>) -> Arc<StaticResultsProvider> {
    Arc::new(
        StaticResultsProvider::new()
            .with_season(6, "Магистрейтик 6 сезон", vec![vec![row(1, "Old", 1.0, 0.0)]])
            .with_season(7, SEASON_TITLE, series),
    )
}

/// A realistic four-series season with rotating lineups
pub fn sample_season() -> Vec<Vec<RawRow>> {
    vec![
        vec![
            row(1, "Don", 14.5, 0.6),
            row(2, "Sheriff", 12.0, 0.3),
            row(3, "Maniac", 11.0, 0.0),
            row(4, "Doctor", 9.5, -0.2),
            row(5, "Citizen", 8.0, 0.0),
            row(6, "Host", 7.0, 0.0),
            row(7, "Rookie", 5.5, 0.1),
        ],
        vec![
            row(1, "Sheriff", 15.0, 0.8),
            row(2, "Doctor", 13.5, 0.0),
            row(3, "Don", 10.0, 0.0),
            row(4, "Citizen", 9.0, 0.4),
            row(5, "Maniac", 6.5, -0.3),
        ],
        vec![
            row(1, "Maniac", 13.0, 0.0),
            row(2, "Don", 12.5, 0.0),
            row(3, "Citizen", 10.5, 0.0),
            row(4, "Sheriff", 8.0, 0.0),
            row(5, "Doctor", 7.0, 0.0),
            row(6, "Newcomer", 4.0, 0.0),
        ],
        vec![
            row(1, "Doctor", 16.0, 1.1),
            row(2, "Don", 11.0, 0.2),
            row(3, "Sheriff", 10.0, 0.0),
            row(4, "Maniac", 9.0, 0.0),
        ],
    ]
}
