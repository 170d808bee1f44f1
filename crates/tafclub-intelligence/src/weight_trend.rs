// ABOUTME: Weight change trend between the latest observations
// ABOUTME: Change since previous entry, total change since first entry, and direction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::{round_to_tenth, WeightLog};

/// Direction of the most recent change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Latest weight is lower than the previous one
    Down,
    /// Latest weight is higher than the previous one
    Up,
    /// No change, or not enough data
    Steady,
}

/// Summary of a user's weight history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTrend {
    /// Most recent weight
    pub latest: Option<f64>,
    /// When the most recent weight was logged
    pub latest_logged_at: Option<DateTime<Utc>>,
    /// `latest − previous`, one decimal
    pub change_since_previous: Option<f64>,
    /// `latest − first`, one decimal
    pub total_change: Option<f64>,
    /// Direction of `change_since_previous`
    pub direction: TrendDirection,
    /// Number of observations considered
    pub entry_count: usize,
}

/// Compute the trend from observations in any order
#[must_use]
pub fn weight_trend(entries: &[WeightLog]) -> WeightTrend {
    let mut chronological: Vec<&WeightLog> = entries.iter().collect();
    chronological.sort_by(|a, b| a.logged_at.cmp(&b.logged_at));

    let latest = chronological.last().copied();
    let previous = chronological
        .len()
        .checked_sub(2)
        .and_then(|i| chronological.get(i))
        .copied();
    let first = chronological.first().copied();

    let change_since_previous = latest
        .zip(previous)
        .map(|(l, p)| round_to_tenth(l.weight - p.weight));
    let total_change = match (latest, first) {
        (Some(l), Some(f)) if chronological.len() >= 2 => Some(round_to_tenth(l.weight - f.weight)),
        _ => None,
    };

    let direction = match change_since_previous {
        Some(change) if change < 0.0 => TrendDirection::Down,
        Some(change) if change > 0.0 => TrendDirection::Up,
        _ => TrendDirection::Steady,
    };

    WeightTrend {
        latest: latest.map(|l| l.weight),
        latest_logged_at: latest.map(|l| l.logged_at),
        change_since_previous,
        total_change,
        direction,
        entry_count: chronological.len(),
    }
}
