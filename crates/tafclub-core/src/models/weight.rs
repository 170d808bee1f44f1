// ABOUTME: Body-weight observation models
// ABOUTME: WeightEntry as persisted and NewWeightEntry as submitted by clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits::MAX_WEIGHT_KG;
use crate::errors::{AppError, AppResult};

/// A single weight observation in kilograms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owner of the observation
    pub user_id: Uuid,
    /// Weight in kilograms
    pub weight: f64,
    /// When the weight was measured
    pub logged_at: DateTime<Utc>,
    /// When the row was written
    pub created_at: DateTime<Utc>,
}

/// Validated weight submission
#[derive(Debug, Clone, PartialEq)]
pub struct NewWeightEntry {
    /// Weight in kilograms, strictly positive
    pub weight: f64,
    /// Measurement time; defaults to now
    pub logged_at: DateTime<Utc>,
}

impl NewWeightEntry {
    /// Validate a submission
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` unless the weight is finite, positive, and at most `MAX_WEIGHT_KG`
    pub fn new(weight: f64, logged_at: Option<DateTime<Utc>>) -> AppResult<Self> {
        if !weight.is_finite() || weight <= 0.0 || weight > MAX_WEIGHT_KG {
            return Err(AppError::invalid_input("Valid weight is required"));
        }
        Ok(Self {
            weight,
            logged_at: logged_at.unwrap_or_else(Utc::now),
        })
    }

    /// Materialize into a stored entry for `user_id`
    #[must_use]
    pub fn into_entry(self, user_id: Uuid) -> WeightEntry {
        WeightEntry {
            id: Uuid::new_v4(),
            user_id,
            weight: self.weight,
            logged_at: self.logged_at,
            created_at: Utc::now(),
        }
    }
}
