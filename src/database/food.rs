// ABOUTME: Food log database operations
// ABOUTME: Entry CRUD, date-range listing, recent foods aggregation, and leaderboard snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tafclub_core::errors::{AppError, AppResult};
use tafclub_core::models::{FoodEntry, RecentFood};
use tafclub_intelligence::FoodLog;
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid, to_db_timestamp};

/// Food log database operations manager
pub struct FoodManager {
    pool: SqlitePool,
}

impl FoodManager {
    /// Create a new food manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a food entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn create_entry(&self, entry: &FoodEntry) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO food_entries (id, user_id, name, calories, protein, carbs, fat, logged_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(&entry.name)
        .bind(entry.calories)
        .bind(entry.protein)
        .bind(entry.carbs)
        .bind(entry.fat)
        .bind(to_db_timestamp(entry.logged_at))
        .bind(to_db_timestamp(entry.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create food entry: {e}")))?;

        Ok(entry.id)
    }

    /// A user's entries, newest first, optionally limited to `[start, end]`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_entries(
        &self,
        user_id: Uuid,
        range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> AppResult<Vec<FoodEntry>> {
        let rows = match range {
            Some((start, end)) => {
                sqlx::query(
                    r"
                    SELECT id, user_id, name, calories, protein, carbs, fat, logged_at, created_at
                    FROM food_entries
                    WHERE user_id = $1 AND logged_at >= $2 AND logged_at <= $3
                    ORDER BY logged_at DESC
                    ",
                )
                .bind(user_id.to_string())
                .bind(to_db_timestamp(start))
                .bind(to_db_timestamp(end))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, user_id, name, calories, protein, carbs, fat, logged_at, created_at
                    FROM food_entries
                    WHERE user_id = $1
                    ORDER BY logged_at DESC
                    ",
                )
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list food entries: {e}")))?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    /// Delete an entry owned by `user_id`
    ///
    /// Returns `false` when no such entry exists for that user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn delete_entry(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM food_entries WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete food entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Most frequently logged foods, averaged per name
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn recent_foods(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<RecentFood>> {
        let rows = sqlx::query(
            r"
            SELECT name,
                   AVG(calories) AS calories,
                   AVG(protein) AS protein,
                   AVG(carbs) AS carbs,
                   AVG(fat) AS fat,
                   COUNT(*) AS count
            FROM food_entries
            WHERE user_id = $1
            GROUP BY name
            ORDER BY count DESC, MAX(logged_at) DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch recent foods: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| {
                let calories: Option<f64> = row.get("calories");
                let protein: Option<f64> = row.get("protein");
                let carbs: Option<f64> = row.get("carbs");
                let fat: Option<f64> = row.get("fat");
                RecentFood {
                    name: row.get("name"),
                    calories: calories.unwrap_or_default().round() as i64,
                    protein: protein.map(|v| v.round() as i64),
                    carbs: carbs.map(|v| v.round() as i64),
                    fat: fat.map(|v| v.round() as i64),
                    count: row.get("count"),
                }
            })
            .collect())
    }

    /// Every user's food logs keyed by user, for leaderboard snapshots
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn logs_by_user(&self) -> AppResult<HashMap<Uuid, Vec<FoodLog>>> {
        let rows = sqlx::query("SELECT user_id, logged_at, calories FROM food_entries")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch food logs: {e}")))?;

        let mut logs: HashMap<Uuid, Vec<FoodLog>> = HashMap::new();
        for row in &rows {
            let user_id: String = row.get("user_id");
            logs.entry(parse_uuid(&user_id)?)
                .or_default()
                .push(Self::row_to_log(row)?);
        }
        Ok(logs)
    }

    fn row_to_log(row: &SqliteRow) -> AppResult<FoodLog> {
        let logged_at: String = row.get("logged_at");
        Ok(FoodLog {
            logged_at: parse_timestamp(&logged_at)?,
            calories: row.get("calories"),
        })
    }

    fn row_to_entry(row: &SqliteRow) -> AppResult<FoodEntry> {
        let id_str: String = row.get("id");
        let user_id_str: String = row.get("user_id");
        let logged_at_str: String = row.get("logged_at");
        let created_at_str: String = row.get("created_at");

        Ok(FoodEntry {
            id: parse_uuid(&id_str)?,
            user_id: parse_uuid(&user_id_str)?,
            name: row.get("name"),
            calories: row.get("calories"),
            protein: row.get("protein"),
            carbs: row.get("carbs"),
            fat: row.get("fat"),
            logged_at: parse_timestamp(&logged_at_str)?,
            created_at: parse_timestamp(&created_at_str)?,
        })
    }
}
