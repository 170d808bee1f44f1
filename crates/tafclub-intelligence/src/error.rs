// ABOUTME: Error type for engine precondition violations
// ABOUTME: Converts into AppError so handlers can propagate with `?`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tafclub_core::errors::AppError;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Precondition violations detected by the engine
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IntelligenceError {
    /// A ranked value was NaN or infinite
    #[error("Non-finite leaderboard value {value} for subject {subject_id}")]
    NonFiniteValue {
        /// Subject carrying the bad value
        subject_id: Uuid,
        /// The offending value
        value: f64,
    },

    /// Zone name is not a known IANA identifier
    #[error("Unknown time zone: {0}")]
    UnknownZone(String),

    /// Calorie goal must be finite and positive
    #[error("Invalid calorie goal: {0}")]
    InvalidGoal(f64),
}

impl From<IntelligenceError> for AppError {
    fn from(error: IntelligenceError) -> Self {
        match error {
            IntelligenceError::NonFiniteValue { .. } => {
                error!(error = %error, "Leaderboard computation failed");
                Self::internal("Leaderboard could not be computed")
            }
            IntelligenceError::UnknownZone(_) => Self::config_invalid(error.to_string()),
            IntelligenceError::InvalidGoal(_) => Self::invalid_input(error.to_string()),
        }
    }
}
