// ABOUTME: Engine crate computing streaks, leaderboards, and day buckets
// ABOUTME: Pure functions over snapshots fetched by the persistence layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # TAF Club Intelligence
//!
//! Every function here is synchronous and side-effect free. Callers pass the
//! zone convention and the reference "now" explicitly, so identical inputs always
//! produce identical outputs.
//!
//! - [`date_bucket`]: calendar-day keys in a configured zone
//! - [`streak`]: consecutive-day logging streaks
//! - [`leaderboard`]: stable descending ranking
//! - [`metrics`]: per-subject leaderboard values
//! - [`summary`]: today's calorie summary for the dashboard
//! - [`weight_trend`]: weight change between observations
//! - [`challenge`]: challenge status and participant progress

/// Engine error type
pub mod error;

/// Calendar-day bucketing under a single zone convention
pub mod date_bucket;

/// Consecutive-day streak calculation
pub mod streak;

/// Leaderboard ranking
pub mod leaderboard;

/// Leaderboard value derivation per metric kind
pub mod metrics;

/// Daily calorie summary
pub mod summary;

/// Weight change trend
pub mod weight_trend;

/// Challenge lifecycle and progress
pub mod challenge;

pub use challenge::{challenge_status, participant_progress, ChallengeProgress};
pub use date_bucket::{bucket, today, DayKey, Timestamped, ZoneConvention};
pub use error::IntelligenceError;
pub use leaderboard::{rank, RankInput};
pub use metrics::{build_leaderboard, derive_value, FoodLog, SubjectSnapshot, WeightLog};
pub use streak::{
    compute_streak, compute_streak_for_days, longest_streak, ActivityEvent, StreakResult,
};
pub use summary::{summarize_day, DailySummary};
pub use weight_trend::{weight_trend, TrendDirection, WeightTrend};
