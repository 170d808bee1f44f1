// ABOUTME: Leaderboard value derivation for each metric kind
// ABOUTME: Streak, today and weekly calorie totals, and windowed weight loss per subject
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tafclub_core::constants::leaderboard::WEIGHT_LOSS_WINDOW;
use tafclub_core::models::{FoodEntry, LeaderboardRow, MetricKind, WeightEntry};
use tracing::debug;
use uuid::Uuid;

use crate::date_bucket::{bucket, today, Timestamped, ZoneConvention};
use crate::error::IntelligenceError;
use crate::leaderboard::{rank, RankInput};
use crate::streak::compute_streak;

/// A food log reduced to what the metrics need
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodLog {
    /// When the food was eaten
    pub logged_at: DateTime<Utc>,
    /// Calories in the entry
    pub calories: f64,
}

impl Timestamped for FoodLog {
    fn timestamp(&self) -> DateTime<Utc> {
        self.logged_at
    }
}

impl From<&FoodEntry> for FoodLog {
    fn from(entry: &FoodEntry) -> Self {
        Self {
            logged_at: entry.logged_at,
            calories: entry.calories,
        }
    }
}

/// A weight observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightLog {
    /// When the weight was recorded
    pub logged_at: DateTime<Utc>,
    /// Body weight in kilograms
    pub weight: f64,
}

impl Timestamped for WeightLog {
    fn timestamp(&self) -> DateTime<Utc> {
        self.logged_at
    }
}

impl From<&WeightEntry> for WeightLog {
    fn from(entry: &WeightEntry) -> Self {
        Self {
            logged_at: entry.logged_at,
            weight: entry.weight,
        }
    }
}

/// Everything needed to derive any leaderboard value for one subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectSnapshot {
    /// Subject id
    pub subject_id: Uuid,
    /// Name shown on the leaderboard
    pub display_name: String,
    /// All food logs, any order
    pub food_logs: Vec<FoodLog>,
    /// All weight logs, any order
    pub weight_logs: Vec<WeightLog>,
}

/// Round to one decimal place
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Calories logged on the local day containing `now`, rounded
#[must_use]
pub fn today_calories(food_logs: &[FoodLog], now: DateTime<Utc>, zone: ZoneConvention) -> f64 {
    let current = today(now, zone);
    food_logs
        .iter()
        .filter(|log| bucket(log.logged_at, zone) == current)
        .map(|log| log.calories)
        .sum::<f64>()
        .round()
}

/// Calories logged in the Monday-start week containing `now`, rounded
#[must_use]
pub fn weekly_calories(food_logs: &[FoodLog], now: DateTime<Utc>, zone: ZoneConvention) -> f64 {
    let week = today(now, zone).week_start();
    food_logs
        .iter()
        .filter(|log| bucket(log.logged_at, zone).week_start() == week)
        .map(|log| log.calories)
        .sum::<f64>()
        .round()
}

/// `oldest − latest` over the most recent observations, one decimal
///
/// Positive means weight lost. Fewer than two observations yields 0.
#[must_use]
pub fn weight_loss(weight_logs: &[WeightLog]) -> f64 {
    let mut newest_first: Vec<&WeightLog> = weight_logs.iter().collect();
    newest_first.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
    newest_first.truncate(WEIGHT_LOSS_WINDOW);

    match (newest_first.first(), newest_first.last()) {
        (Some(latest), Some(oldest)) if newest_first.len() >= 2 => {
            round_to_tenth(oldest.weight - latest.weight)
        }
        _ => 0.0,
    }
}

/// Value of `kind` for one subject
#[must_use]
pub fn derive_value(
    kind: MetricKind,
    snapshot: &SubjectSnapshot,
    now: DateTime<Utc>,
    zone: ZoneConvention,
) -> f64 {
    match kind {
        MetricKind::Streak => f64::from(compute_streak(&snapshot.food_logs, now, zone).count),
        MetricKind::TodayCalories => today_calories(&snapshot.food_logs, now, zone),
        MetricKind::WeeklyCalories => weekly_calories(&snapshot.food_logs, now, zone),
        MetricKind::WeightLoss => weight_loss(&snapshot.weight_logs),
    }
}

/// Derive every subject's value for `kind` and rank them
///
/// # Errors
///
/// Returns [`IntelligenceError::NonFiniteValue`] if a derived value is not finite,
/// which only happens when a stored quantity is itself non-finite.
pub fn build_leaderboard(
    kind: MetricKind,
    snapshots: &[SubjectSnapshot],
    now: DateTime<Utc>,
    zone: ZoneConvention,
) -> Result<Vec<LeaderboardRow>, IntelligenceError> {
    let inputs = snapshots
        .iter()
        .map(|snapshot| RankInput {
            subject_id: snapshot.subject_id,
            display_name: snapshot.display_name.clone(),
            value: derive_value(kind, snapshot, now, zone),
        })
        .collect();

    let rows = rank(inputs)?;
    debug!(
        metric = kind.as_str(),
        subjects = rows.len(),
        zone = zone.name(),
        "Leaderboard computed"
    );
    Ok(rows)
}
