// ABOUTME: Leaderboard metric selection and ranked row models
// ABOUTME: MetricKind chooses the aggregate, LeaderboardRow carries the ranked result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Leaderboard dimension being ranked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Current consecutive-day food logging streak
    #[default]
    Streak,
    /// Calories logged in the current Monday-start week
    WeeklyCalories,
    /// Calories logged today
    TodayCalories,
    /// Kilograms lost across the recent weight window
    WeightLoss,
}

impl MetricKind {
    /// Query-string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Streak => "streak",
            Self::WeeklyCalories => "weekly_calories",
            Self::TodayCalories => "today_calories",
            Self::WeightLoss => "weight_loss",
        }
    }
}

impl Display for MetricKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "streak" => Ok(Self::Streak),
            "weekly_calories" => Ok(Self::WeeklyCalories),
            "today_calories" => Ok(Self::TodayCalories),
            "weight_loss" => Ok(Self::WeightLoss),
            _ => Err(AppError::invalid_input(format!(
                "Invalid leaderboard type: {s}"
            ))),
        }
    }
}

/// One ranked leaderboard position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardRow {
    /// Ranked subject (user id)
    #[serde(rename = "id")]
    pub subject_id: Uuid,
    /// Name shown for the subject
    #[serde(rename = "name")]
    pub display_name: String,
    /// Metric value
    pub value: f64,
    /// 1-based position after sorting by value descending
    pub rank: u32,
}
