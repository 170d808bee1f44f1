// ABOUTME: Time-boxed group challenge models
// ABOUTME: Challenge, ChallengeParticipant, GoalType, and ChallengeStatus definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits::MAX_CHALLENGE_NAME_LENGTH;
use crate::errors::{AppError, AppResult};

// ============================================================================
// Enums
// ============================================================================

/// What a challenge measures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Consecutive days with at least one food log
    Streak,
    /// Days kept at or under a daily calorie ceiling
    Calories,
    /// Kilograms lost over the challenge window
    WeightLoss,
}

impl Display for GoalType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "streak" => Ok(Self::Streak),
            "calories" => Ok(Self::Calories),
            "weight_loss" => Ok(Self::WeightLoss),
            _ => Err(AppError::invalid_input(format!("Invalid goal type: {s}"))),
        }
    }
}

impl GoalType {
    /// Database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Streak => "streak",
            Self::Calories => "calories",
            Self::WeightLoss => "weight_loss",
        }
    }

    /// Unit the goal value is expressed in
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Streak => "days",
            Self::Calories => "cal/day",
            Self::WeightLoss => "kg",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Streak => "Daily Logging Streak",
            Self::Calories => "Stay Under Calories",
            Self::WeightLoss => "Weight Loss",
        }
    }
}

/// Lifecycle phase of a challenge relative to today
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeStatus {
    /// Starts on a future day
    Upcoming,
    /// Today falls within the start and end days (inclusive)
    Active,
    /// End day is in the past
    Ended,
}

impl ChallengeStatus {
    /// String representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }

    /// Whether new members may still join; leaving is allowed in every phase
    #[must_use]
    pub const fn accepts_members(&self) -> bool {
        !matches!(self, Self::Ended)
    }
}

impl Display for ChallengeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Structs
// ============================================================================

/// A time-boxed group goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// Unique identifier
    pub id: Uuid,
    /// Short title
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// First calendar day of the challenge
    pub start_date: NaiveDate,
    /// Last calendar day of the challenge (inclusive)
    pub end_date: NaiveDate,
    /// What is being measured
    pub goal_type: GoalType,
    /// Target value in the goal type's unit
    pub goal_value: f64,
    /// Creator, auto-joined on creation
    pub created_by_id: Uuid,
    /// When the challenge was created
    pub created_at: DateTime<Utc>,
}

impl Challenge {
    /// Build and validate a new challenge
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank or overlong name, an end day before the
    /// start day, or a non-finite or negative goal value
    pub fn new(
        name: &str,
        description: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        goal_type: GoalType,
        goal_value: f64,
        created_by_id: Uuid,
    ) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("Missing required fields"));
        }
        if name.chars().count() > MAX_CHALLENGE_NAME_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Challenge name must be at most {MAX_CHALLENGE_NAME_LENGTH} characters"
            )));
        }
        if end_date < start_date {
            return Err(AppError::invalid_input(
                "Challenge end date must not be before its start date",
            ));
        }
        if !goal_value.is_finite() || goal_value < 0.0 {
            return Err(AppError::invalid_input(
                "Goal value must be a non-negative number",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            description: description
                .map(|d| d.trim().to_owned())
                .filter(|d| !d.is_empty()),
            start_date,
            end_date,
            goal_type,
            goal_value,
            created_by_id,
            created_at: Utc::now(),
        })
    }
}

/// Membership of a user in a challenge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeParticipant {
    /// Unique identifier
    pub id: Uuid,
    /// Challenge joined
    pub challenge_id: Uuid,
    /// Member
    pub user_id: Uuid,
    /// When the user joined
    pub joined_at: DateTime<Utc>,
}

impl ChallengeParticipant {
    /// Create a new membership
    #[must_use]
    pub fn new(challenge_id: Uuid, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            challenge_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}
