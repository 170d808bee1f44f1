// ABOUTME: Weight log database operations
// ABOUTME: Entry CRUD, newest-first listing, and per-user logs for leaderboards and challenges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tafclub_core::errors::{AppError, AppResult};
use tafclub_core::models::WeightEntry;
use tafclub_intelligence::WeightLog;
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid, to_db_timestamp};

/// Weight log database operations manager
pub struct WeightManager {
    pool: SqlitePool,
}

impl WeightManager {
    /// Create a new weight manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a weight entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn create_entry(&self, entry: &WeightEntry) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO weight_entries (id, user_id, weight, logged_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(entry.weight)
        .bind(to_db_timestamp(entry.logged_at))
        .bind(to_db_timestamp(entry.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create weight entry: {e}")))?;

        Ok(entry.id)
    }

    /// A user's entries, newest first; all of them when `limit` is `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_entries(&self, user_id: Uuid, limit: Option<u32>) -> AppResult<Vec<WeightEntry>> {
        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map_or(-1, i64::from);
        let rows = sqlx::query(
            r"
            SELECT id, user_id, weight, logged_at, created_at
            FROM weight_entries
            WHERE user_id = $1
            ORDER BY logged_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list weight entries: {e}")))?;

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
        let result = sqlx::query("DELETE FROM weight_entries WHERE id = $1 AND user_id = $2")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete weight entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Every user's weight logs keyed by user, for leaderboard snapshots
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn logs_by_user(&self) -> AppResult<HashMap<Uuid, Vec<WeightLog>>> {
        let rows = sqlx::query("SELECT user_id, logged_at, weight FROM weight_entries")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch weight logs: {e}")))?;

        let mut logs: HashMap<Uuid, Vec<WeightLog>> = HashMap::new();
        for row in &rows {
            let user_id: String = row.get("user_id");
            logs.entry(parse_uuid(&user_id)?)
                .or_default()
                .push(Self::row_to_log(row)?);
        }
        Ok(logs)
    }

    fn row_to_log(row: &SqliteRow) -> AppResult<WeightLog> {
        let logged_at: String = row.get("logged_at");
        Ok(WeightLog {
            logged_at: parse_timestamp(&logged_at)?,
            weight: row.get("weight"),
        })
    }

    fn row_to_entry(row: &SqliteRow) -> AppResult<WeightEntry> {
        let id_str: String = row.get("id");
        let user_id_str: String = row.get("user_id");
        let logged_at_str: String = row.get("logged_at");
        let created_at_str: String = row.get("created_at");

        Ok(WeightEntry {
            id: parse_uuid(&id_str)?,
            user_id: parse_uuid(&user_id_str)?,
            weight: row.get("weight"),
            logged_at: parse_timestamp(&logged_at_str)?,
            created_at: parse_timestamp(&created_at_str)?,
        })
    }
}
