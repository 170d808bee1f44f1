// ABOUTME: Dashboard summary of today's calories against the daily goal
// ABOUTME: Totals, macros, remaining budget, capped percentage, and streak encouragement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tafclub_core::constants::nutrition::DEFAULT_CALORIE_GOAL;
use tafclub_core::models::FoodEntry;

use crate::date_bucket::{bucket, today, DayKey, ZoneConvention};
use crate::error::IntelligenceError;
use crate::metrics::round_to_tenth;
use crate::streak::{compute_streak, longest_streak};

/// Today's intake for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Local day summarized
    pub day: DayKey,
    /// Calories logged today
    pub total_calories: f64,
    /// Protein grams logged today
    pub total_protein: f64,
    /// Carbohydrate grams logged today
    pub total_carbs: f64,
    /// Fat grams logged today
    pub total_fat: f64,
    /// Number of entries today
    pub entry_count: usize,
    /// Daily calorie goal in effect
    pub goal: f64,
    /// Calories left before reaching the goal, never negative
    pub remaining: f64,
    /// Share of the goal consumed, capped at 100
    pub percent_of_goal: f64,
    /// Whether today's total exceeds the goal
    pub over_goal: bool,
    /// Current logging streak
    pub streak: u32,
    /// Longest logging streak ever
    pub longest_streak: u32,
    /// Encouragement for the current streak
    pub streak_message: String,
}

/// Summarize today's entries
///
/// `entries` may hold the user's full history; only today's entries are totalled,
/// all of them feed the streak. A missing goal falls back to the default.
///
/// # Errors
///
/// Returns [`IntelligenceError::InvalidGoal`] if the goal is not a positive finite number
pub fn summarize_day(
    entries: &[FoodEntry],
    goal: Option<f64>,
    now: DateTime<Utc>,
    zone: ZoneConvention,
) -> Result<DailySummary, IntelligenceError> {
    let goal = goal.unwrap_or(DEFAULT_CALORIE_GOAL);
    if !goal.is_finite() || goal <= 0.0 {
        return Err(IntelligenceError::InvalidGoal(goal));
    }

    let day = today(now, zone);
    let todays: Vec<&FoodEntry> = entries
        .iter()
        .filter(|entry| bucket(entry.logged_at, zone) == day)
        .collect();

    let total_calories: f64 = todays.iter().map(|e| e.calories).sum();
    let total_protein: f64 = todays.iter().filter_map(|e| e.protein).sum();
    let total_carbs: f64 = todays.iter().filter_map(|e| e.carbs).sum();
    let total_fat: f64 = todays.iter().filter_map(|e| e.fat).sum();

    let streak = compute_streak(entries, now, zone).count;

    Ok(DailySummary {
        day,
        total_calories: total_calories.round(),
        total_protein: round_to_tenth(total_protein),
        total_carbs: round_to_tenth(total_carbs),
        total_fat: round_to_tenth(total_fat),
        entry_count: todays.len(),
        goal,
        remaining: (goal - total_calories).max(0.0).round(),
        percent_of_goal: (total_calories / goal * 100.0).min(100.0).round(),
        over_goal: total_calories > goal,
        streak,
        longest_streak: longest_streak(entries, zone),
        streak_message: streak_message(streak),
    })
}

/// Encouragement line shown next to the streak counter
#[must_use]
pub fn streak_message(streak: u32) -> String {
    match streak {
        0 => "Log a meal today to start your streak!".to_owned(),
        1 => "Great start! Log again tomorrow to keep it going.".to_owned(),
        n => format!("{n} days in a row. Keep it up!"),
    }
}
