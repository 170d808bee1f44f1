// ABOUTME: Stable descending leaderboard ranking
// ABOUTME: Sequential 1-based ranks with no tie compression, non-finite values rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tafclub_core::models::LeaderboardRow;
use uuid::Uuid;

use crate::error::IntelligenceError;

/// An unranked leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankInput {
    /// Subject being ranked
    pub subject_id: Uuid,
    /// Name shown for the subject
    pub display_name: String,
    /// Metric value
    pub value: f64,
}

/// Sort by value descending and number the rows 1, 2, 3, ...
///
/// Equal values keep their input order and still receive distinct ranks.
///
/// # Errors
///
/// Returns [`IntelligenceError::NonFiniteValue`] if any value is NaN or infinite;
/// nothing is ranked in that case.
pub fn rank(rows: Vec<RankInput>) -> Result<Vec<LeaderboardRow>, IntelligenceError> {
    if let Some(bad) = rows.iter().find(|row| !row.value.is_finite()) {
        return Err(IntelligenceError::NonFiniteValue {
            subject_id: bad.subject_id,
            value: bad.value,
        });
    }

    let mut sorted = rows;
    // stable sort keeps input order among equal values
    sorted.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

    Ok(sorted
        .into_iter()
        .zip(1_u32..)
        .map(|(row, rank)| LeaderboardRow {
            subject_id: row.subject_id,
            display_name: row.display_name,
            value: row.value,
            rank,
        })
        .collect())
}
