// ABOUTME: Food logging models for calorie tracking
// ABOUTME: FoodEntry, NewFoodEntry, RecentFood, and FoodSearchResult definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits::{MAX_CALORIES_PER_ENTRY, MAX_FOOD_NAME_LENGTH, MAX_MACRO_GRAMS};
use crate::errors::{AppError, AppResult};

/// A logged food item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Owner of the entry
    pub user_id: Uuid,
    /// Food name as entered or picked from search
    pub name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    pub carbs: Option<f64>,
    /// Fat in grams
    pub fat: Option<f64>,
    /// When the food was eaten
    pub logged_at: DateTime<Utc>,
    /// When the row was written
    pub created_at: DateTime<Utc>,
}

/// Validated food submission
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodEntry {
    /// Trimmed, non-empty name
    pub name: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: Option<f64>,
    /// Carbohydrates in grams
    pub carbs: Option<f64>,
    /// Fat in grams
    pub fat: Option<f64>,
    /// When the food was eaten; defaults to now
    pub logged_at: DateTime<Utc>,
}

impl NewFoodEntry {
    /// Validate a submission
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when the name is blank and `InvalidInput`
    /// for non-finite, negative, or oversized quantities
    pub fn new(
        name: &str,
        calories: f64,
        protein: Option<f64>,
        carbs: Option<f64>,
        fat: Option<f64>,
        logged_at: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("Name and calories are required"));
        }
        if name.chars().count() > MAX_FOOD_NAME_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Food name must be at most {MAX_FOOD_NAME_LENGTH} characters"
            )));
        }
        check_quantity("calories", Some(calories), MAX_CALORIES_PER_ENTRY)?;
        check_quantity("protein", protein, MAX_MACRO_GRAMS)?;
        check_quantity("carbs", carbs, MAX_MACRO_GRAMS)?;
        check_quantity("fat", fat, MAX_MACRO_GRAMS)?;

        Ok(Self {
            name: name.to_owned(),
            calories,
            protein,
            carbs,
            fat,
            logged_at: logged_at.unwrap_or_else(Utc::now),
        })
    }

    /// Materialize into a stored entry for `user_id`
    #[must_use]
    pub fn into_entry(self, user_id: Uuid) -> FoodEntry {
        FoodEntry {
            id: Uuid::new_v4(),
            user_id,
            name: self.name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            logged_at: self.logged_at,
            created_at: Utc::now(),
        }
    }
}

fn check_quantity(field: &str, value: Option<f64>, max: f64) -> AppResult<()> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::invalid_input(format!(
            "{field} must be a non-negative number"
        ))),
        Some(v) if v > max => Err(AppError::invalid_input(format!(
            "{field} must be at most {max}"
        ))),
        _ => Ok(()),
    }
}

/// A frequently logged food, averaged across all of a user's entries with that name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentFood {
    /// Food name
    pub name: String,
    /// Average calories, rounded
    pub calories: i64,
    /// Average protein, rounded
    pub protein: Option<i64>,
    /// Average carbohydrates, rounded
    pub carbs: Option<i64>,
    /// Average fat, rounded
    pub fat: Option<i64>,
    /// Number of times logged
    pub count: i64,
}

/// One product returned by the nutrition database proxy (values per 100g)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    /// Product name
    pub name: String,
    /// Energy in kcal, rounded
    pub calories: i64,
    /// Protein in grams, rounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<i64>,
    /// Carbohydrates in grams, rounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<i64>,
    /// Fat in grams, rounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<i64>,
    /// Serving size label
    pub serving_size: String,
}
