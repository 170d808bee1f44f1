// ABOUTME: Consecutive-day logging streak calculation
// ABOUTME: Current streak with a one-day grace period, plus the longest historical run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_bucket::{bucket, today, DayKey, Timestamped, ZoneConvention};

/// A timestamped fact about a subject (a food log or a weight log)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityEvent {
    /// Subject the event belongs to
    pub subject_id: Uuid,
    /// When it was logged
    pub timestamp: DateTime<Utc>,
}

impl Timestamped for ActivityEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Length of the current consecutive-day run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StreakResult {
    /// Number of consecutive days
    pub count: u32,
}

/// Current streak of `events` as seen at `reference_now`
///
/// Same-day events count once. A streak whose latest day is yesterday is still
/// alive; anything older is broken and yields zero.
#[must_use]
pub fn compute_streak<T: Timestamped>(
    events: &[T],
    reference_now: DateTime<Utc>,
    zone: ZoneConvention,
) -> StreakResult {
    let days = distinct_days(events, zone);
    compute_streak_for_days(&days, today(reference_now, zone))
}

/// Current streak over already-bucketed days
#[must_use]
pub fn compute_streak_for_days(days: &BTreeSet<DayKey>, today: DayKey) -> StreakResult {
    let mut descending = days.iter().rev().copied();
    let Some(latest) = descending.next() else {
        return StreakResult::default();
    };
    if latest < today.pred() {
        return StreakResult::default();
    }

    let mut count = 1_u32;
    let mut previous = latest;
    for day in descending {
        match day.days_until(previous) {
            1 => {
                count += 1;
                previous = day;
            }
            0 => {}
            _ => break,
        }
    }
    StreakResult { count }
}

/// Longest run of consecutive logged days anywhere in history
#[must_use]
pub fn longest_streak<T: Timestamped>(events: &[T], zone: ZoneConvention) -> u32 {
    let days = distinct_days(events, zone);
    let mut best = 0_u32;
    let mut run = 0_u32;
    let mut previous: Option<DayKey> = None;
    for day in days {
        run = match previous {
            Some(prev) if prev.days_until(day) == 1 => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }
    best
}

fn distinct_days<T: Timestamped>(events: &[T], zone: ZoneConvention) -> BTreeSet<DayKey> {
    events
        .iter()
        .map(|event| bucket(event.timestamp(), zone))
        .collect()
}
