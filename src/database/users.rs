// ABOUTME: User account database operations
// ABOUTME: Signup storage, lookup by email or id, calorie goal updates, and profile listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tafclub_core::errors::{AppError, AppResult};
use tafclub_core::models::{User, UserProfile};
use uuid::Uuid;

use super::{is_unique_violation, parse_timestamp, parse_uuid, to_db_timestamp};

/// User account database operations manager
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a new user
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email is taken, or a database error
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, name, email, password_hash, daily_calorie_goal, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.daily_calorie_goal)
        .bind(to_db_timestamp(user.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::already_exists("User already exists")
            } else {
                AppError::database(format!("Failed to create user: {e}"))
            }
        })?;

        Ok(user.id)
    }

    /// Look up a user by email (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, password_hash, daily_calorie_goal, created_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, password_hash, daily_calorie_goal, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Set or clear the user's daily calorie goal
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist, or a database error
    pub async fn update_calorie_goal(&self, id: Uuid, goal: Option<f64>) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET daily_calorie_goal = $1 WHERE id = $2")
            .bind(goal)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update calorie goal: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User"));
        }
        Ok(())
    }

    /// Every user's id and display name, oldest account first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_profiles(&self) -> AppResult<Vec<UserProfile>> {
        let rows = sqlx::query("SELECT id, name FROM users ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                Ok(UserProfile {
                    id: parse_uuid(&id)?,
                    name: row.get("name"),
                })
            })
            .collect()
    }

    fn row_to_user(row: &SqliteRow) -> AppResult<User> {
        let id_str: String = row.get("id");
        let created_at_str: String = row.get("created_at");

        Ok(User {
            id: parse_uuid(&id_str)?,
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            daily_calorie_goal: row.get("daily_calorie_goal"),
            created_at: parse_timestamp(&created_at_str)?,
        })
    }
}
