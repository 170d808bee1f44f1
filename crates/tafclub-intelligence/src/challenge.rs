// ABOUTME: Challenge lifecycle status and per-participant progress
// ABOUTME: Progress is recomputed from logs inside the challenge window on every read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tafclub_core::models::{Challenge, ChallengeStatus, GoalType};

use crate::date_bucket::{bucket, today, DayKey, ZoneConvention};
use crate::metrics::{round_to_tenth, FoodLog, WeightLog};
use crate::streak::compute_streak_for_days;

/// A participant's standing in a challenge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeProgress {
    /// Measured value in the goal type's unit
    pub value: f64,
    /// Value needed to complete the challenge
    pub target: f64,
    /// Share of the target reached, 0 to 100
    pub percent: f64,
    /// Whether the target has been reached
    pub completed: bool,
    /// Unit of `value` and `target`
    pub unit: &'static str,
}

/// Status of a challenge relative to the local day containing `now`
///
/// Both the start and the end day are inclusive.
#[must_use]
pub fn challenge_status(challenge: &Challenge, now: DateTime<Utc>, zone: ZoneConvention) -> ChallengeStatus {
    let current = today(now, zone);
    let (start, end) = window(challenge);
    if current < start {
        ChallengeStatus::Upcoming
    } else if current > end {
        ChallengeStatus::Ended
    } else {
        ChallengeStatus::Active
    }
}

/// Progress of one participant, using only logs dated inside the challenge window
///
/// - `Streak`: current streak as of today (or the last day once ended)
/// - `Calories`: logged days at or under the daily goal; target is the window length
/// - `WeightLoss`: first minus last weight inside the window
#[must_use]
pub fn participant_progress(
    challenge: &Challenge,
    food_logs: &[FoodLog],
    weight_logs: &[WeightLog],
    now: DateTime<Utc>,
    zone: ZoneConvention,
) -> ChallengeProgress {
    let (start, end) = window(challenge);
    let current = today(now, zone);
    let in_window = |day: DayKey| day >= start && day <= end && day <= current;

    let (value, target) = match challenge.goal_type {
        GoalType::Streak => {
            let days: BTreeSet<DayKey> = food_logs
                .iter()
                .map(|log| bucket(log.logged_at, zone))
                .filter(|day| in_window(*day))
                .collect();
            let reference = if current > end { end } else { current };
            let streak = compute_streak_for_days(&days, reference).count;
            (f64::from(streak), challenge.goal_value)
        }
        GoalType::Calories => {
            let mut per_day: BTreeMap<DayKey, f64> = BTreeMap::new();
            for log in food_logs {
                let day = bucket(log.logged_at, zone);
                if in_window(day) {
                    *per_day.entry(day).or_default() += log.calories;
                }
            }
            let under = per_day
                .values()
                .filter(|total| **total <= challenge.goal_value)
                .count();
            let length = start.days_until(end) + 1;
            (under as f64, length as f64)
        }
        GoalType::WeightLoss => {
            let mut inside: Vec<&WeightLog> = weight_logs
                .iter()
                .filter(|log| in_window(bucket(log.logged_at, zone)))
                .collect();
            inside.sort_by(|a, b| a.logged_at.cmp(&b.logged_at));
            let lost = match (inside.first(), inside.last()) {
                (Some(first), Some(last)) if inside.len() >= 2 => {
                    round_to_tenth(first.weight - last.weight)
                }
                _ => 0.0,
            };
            (lost, challenge.goal_value)
        }
    };

    let percent = if target > 0.0 {
        (value / target * 100.0).clamp(0.0, 100.0).round()
    } else {
        0.0
    };

    ChallengeProgress {
        value,
        target,
        percent,
        completed: target > 0.0 && value >= target,
        unit: challenge.goal_type.unit(),
    }
}

fn window(challenge: &Challenge) -> (DayKey, DayKey) {
    (
        DayKey::from_date(challenge.start_date),
        DayKey::from_date(challenge.end_date),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use uuid::Uuid;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn at(m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, m, d, h, 0, 0).unwrap()
    }

    fn challenge(goal_type: GoalType, goal_value: f64) -> Challenge {
        Challenge::new(
            "June",
            None,
            date(6, 1),
            date(6, 10),
            goal_type,
            goal_value,
            Uuid::new_v4(),
        )
        .unwrap()
    }

    fn food(m: u32, d: u32, calories: f64) -> FoodLog {
        FoodLog {
            logged_at: at(m, d, 12),
            calories,
        }
    }

    #[test]
    fn test_status_windows_are_inclusive() {
        let c = challenge(GoalType::Streak, 5.0);
        let zone = ZoneConvention::utc();
        assert_eq!(challenge_status(&c, at(5, 31, 23), zone), ChallengeStatus::Upcoming);
        assert_eq!(challenge_status(&c, at(6, 1, 0), zone), ChallengeStatus::Active);
        assert_eq!(challenge_status(&c, at(6, 10, 23), zone), ChallengeStatus::Active);
        assert_eq!(challenge_status(&c, at(6, 11, 0), zone), ChallengeStatus::Ended);
    }

    #[test]
    fn test_streak_progress_ignores_logs_before_start() {
        let c = challenge(GoalType::Streak, 3.0);
        let logs = [food(5, 30, 1.0), food(5, 31, 1.0), food(6, 1, 1.0), food(6, 2, 1.0)];
        let progress = participant_progress(&c, &logs, &[], at(6, 2, 18), ZoneConvention::utc());
        assert!((progress.value - 2.0).abs() < f64::EPSILON);
        assert!(!progress.completed);
        assert!((progress.percent - 67.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_streak_progress_frozen_after_end() {
        let c = challenge(GoalType::Streak, 3.0);
        let logs = [food(6, 8, 1.0), food(6, 9, 1.0), food(6, 10, 1.0)];
        let progress = participant_progress(&c, &logs, &[], at(6, 20, 9), ZoneConvention::utc());
        assert!((progress.value - 3.0).abs() < f64::EPSILON);
        assert!(progress.completed);
    }

    #[test]
    fn test_calorie_progress_counts_days_under_goal() {
        let c = challenge(GoalType::Calories, 1800.0);
        let logs = [
            food(6, 1, 900.0),
            food(6, 1, 800.0),
            food(6, 2, 2100.0),
            food(6, 3, 1500.0),
        ];
        let progress = participant_progress(&c, &logs, &[], at(6, 4, 8), ZoneConvention::utc());
        assert!((progress.value - 2.0).abs() < f64::EPSILON);
        assert!((progress.target - 10.0).abs() < f64::EPSILON);
        assert_eq!(progress.unit, "cal/day");
    }

    #[test]
    fn test_weight_loss_progress_within_window() {
        let c = challenge(GoalType::WeightLoss, 2.0);
        let weights = [
            WeightLog { logged_at: at(5, 20, 7), weight: 90.0 },
            WeightLog { logged_at: at(6, 1, 7), weight: 85.0 },
            WeightLog { logged_at: at(6, 9, 7), weight: 82.5 },
        ];
        let progress = participant_progress(&c, &[], &weights, at(6, 9, 20), ZoneConvention::utc());
        assert!((progress.value - 2.5).abs() < f64::EPSILON);
        assert!(progress.completed);
        assert!((progress.percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_upcoming_challenge_has_no_progress() {
        let c = challenge(GoalType::Streak, 3.0);
        let progress =
            participant_progress(&c, &[food(5, 30, 1.0)], &[], at(5, 30, 20), ZoneConvention::utc());
        assert!(progress.value.abs() < f64::EPSILON);
    }
}
