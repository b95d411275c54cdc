//! Append-only audit trail of processed series

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// One player's line in a processed series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub nickname: PlayerId,
    pub display_name: String,
    pub place: u32,
    pub rank: u32,
    pub points: f64,
    pub bonus_points: f64,
    pub rating_before: f64,
    pub delta: f64,
    pub rating_after: f64,
}

/// Post-series snapshot of every participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub series_index: u32,
    pub series_id: String,
    pub title: String,
    pub bank: Option<f64>,
    pub records: Vec<HistoryRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<SeriesSnapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: SeriesSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn snapshots(&self) -> &[SeriesSnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
