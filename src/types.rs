//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};

/// Normalized nickname used as the ledger key
pub type PlayerId = String;

/// Which scoring policy a season is rated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Fixed fine per place plus a points effect ("Energy"-style seasons)
    PlaceFine,
    /// Buy-in bank redistributed to the top finishers by share table
    Bank,
    /// Zero-sum bank split between the top three and bonus-point holders
    SelfPlay,
}

impl PolicyKind {
    /// How nicknames are keyed for this policy
    pub fn nickname_policy(self) -> NicknamePolicy {
        match self {
            PolicyKind::PlaceFine | PolicyKind::Bank => NicknamePolicy::CaseSensitive,
            PolicyKind::SelfPlay => NicknamePolicy::CaseInsensitive,
        }
    }

    /// How final ratings are rounded for the leaderboard
    pub fn rounding(self) -> RatingRounding {
        match self {
            PolicyKind::PlaceFine | PolicyKind::Bank => RatingRounding::Ceiling,
            PolicyKind::SelfPlay => RatingRounding::HalfUp,
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyKind::PlaceFine => write!(f, "place_fine"),
            PolicyKind::Bank => write!(f, "bank"),
            PolicyKind::SelfPlay => write!(f, "self_play"),
        }
    }
}

impl std::str::FromStr for PolicyKind {
    type Err = crate::error::RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "place_fine" | "place-fine" | "energy" => Ok(PolicyKind::PlaceFine),
            "bank" => Ok(PolicyKind::Bank),
            "self_play" | "self-play" => Ok(PolicyKind::SelfPlay),
            other => Err(crate::error::RatingError::config(format!(
                "Unknown scoring policy: {}",
                other
            ))),
        }
    }
}

/// Case handling for nickname keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NicknamePolicy {
    CaseSensitive,
    CaseInsensitive,
}

impl NicknamePolicy {
    /// Normalize a raw nickname into a ledger key
    pub fn normalize(self, raw: &str) -> PlayerId {
        let trimmed = raw.trim();
        match self {
            NicknamePolicy::CaseSensitive => trimmed.to_string(),
            NicknamePolicy::CaseInsensitive => trimmed.to_lowercase(),
        }
    }
}

/// Rounding applied to ratings in the public leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingRounding {
    Ceiling,
    HalfUp,
}

impl RatingRounding {
    pub fn apply(self, value: f64) -> i64 {
        match self {
            RatingRounding::Ceiling => value.ceil() as i64,
            RatingRounding::HalfUp => crate::utils::round_half_up(value),
        }
    }
}

/// Opaque reference to a season on the results portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonHandle {
    pub id: String,
    /// Ordinal season number as shown in the season title
    pub number: u32,
    pub title: String,
}

/// Opaque reference to one series of a season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesHandle {
    pub id: String,
    /// 1-based chronological position within the season
    pub index: u32,
    pub title: String,
}

/// One row of a series results table, as delivered by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub place: u32,
    pub nickname: String,
    pub points: f64,
    pub bonus_points: f64,
    pub wins: Option<u32>,
    pub games_played: Option<u32>,
}

/// An eligible row of a series after normalization and exclusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub series_index: u32,
    pub nickname: PlayerId,
    /// Nickname as spelled by the provider
    pub display_name: String,
    /// Place as reported by the provider
    pub place: u32,
    /// 1-based position among eligible rows
    pub rank: u32,
    pub points: f64,
    pub bonus_points: f64,
    pub wins: Option<u32>,
    pub games_played: Option<u32>,
}

/// A series row paired with the player's rating before the series
#[derive(Debug, Clone, PartialEq)]
pub struct Participant<'a> {
    pub row: &'a SeriesRow,
    pub rating_before: f64,
}

/// Rating change for one player in one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDelta {
    pub nickname: PlayerId,
    pub delta: f64,
}
