// ABOUTME: Challenge and membership database operations
// ABOUTME: Create with creator auto-join, list with members, join, and leave
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tafclub_core::errors::{AppError, AppResult};
use tafclub_core::models::{Challenge, ChallengeParticipant, UserProfile};
use uuid::Uuid;

use super::{is_unique_violation, parse_date, parse_timestamp, parse_uuid, to_db_timestamp};

/// A member as listed under a challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    /// Member id and name
    pub user: UserProfile,
    /// When the member joined
    pub joined_at: DateTime<Utc>,
}

/// A challenge with its creator and members
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeWithMembers {
    /// The challenge
    pub challenge: Challenge,
    /// Creator
    pub created_by: UserProfile,
    /// Members, earliest joiner first
    pub participants: Vec<ParticipantSummary>,
}

impl ChallengeWithMembers {
    /// Whether `user_id` is a member
    #[must_use]
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.iter().any(|p| p.user.id == user_id)
    }
}

/// Challenge database operations manager
pub struct ChallengeManager {
    pool: SqlitePool,
}

impl ChallengeManager {
    /// Create a new challenge manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a challenge and enroll its creator in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails
    pub async fn create_challenge(&self, challenge: &Challenge) -> AppResult<ChallengeParticipant> {
        let creator = ChallengeParticipant::new(challenge.id, challenge.created_by_id);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO challenges (id, name, description, start_date, end_date, goal_type, goal_value, created_by_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(challenge.id.to_string())
        .bind(&challenge.name)
        .bind(&challenge.description)
        .bind(challenge.start_date.format("%Y-%m-%d").to_string())
        .bind(challenge.end_date.format("%Y-%m-%d").to_string())
        .bind(challenge.goal_type.as_str())
        .bind(challenge.goal_value)
        .bind(challenge.created_by_id.to_string())
        .bind(to_db_timestamp(challenge.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create challenge: {e}")))?;

        Self::insert_participant(&mut tx, &creator).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit challenge: {e}")))?;

        Ok(creator)
    }

    /// Get a challenge by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_challenge(&self, id: Uuid) -> AppResult<Option<Challenge>> {
        let row = sqlx::query(
            r"
            SELECT id, name, description, start_date, end_date, goal_type, goal_value, created_by_id, created_at
            FROM challenges
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get challenge: {e}")))?;

        row.map(|r| Self::row_to_challenge(&r)).transpose()
    }

    /// All challenges with creator and members, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_challenges(&self) -> AppResult<Vec<ChallengeWithMembers>> {
        let challenge_rows = sqlx::query(
            r"
            SELECT c.id, c.name, c.description, c.start_date, c.end_date, c.goal_type, c.goal_value,
                   c.created_by_id, c.created_at, u.name AS creator_name
            FROM challenges c
            JOIN users u ON u.id = c.created_by_id
            ORDER BY c.created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list challenges: {e}")))?;

        let participant_rows = sqlx::query(
            r"
            SELECT p.challenge_id, p.user_id, p.joined_at, u.name
            FROM challenge_participants p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.joined_at ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list challenge participants: {e}")))?;

        let mut members: HashMap<Uuid, Vec<ParticipantSummary>> = HashMap::new();
        for row in &participant_rows {
            let challenge_id: String = row.get("challenge_id");
            let user_id: String = row.get("user_id");
            let joined_at: String = row.get("joined_at");
            members
                .entry(parse_uuid(&challenge_id)?)
                .or_default()
                .push(ParticipantSummary {
                    user: UserProfile {
                        id: parse_uuid(&user_id)?,
                        name: row.get("name"),
                    },
                    joined_at: parse_timestamp(&joined_at)?,
                });
        }

        challenge_rows
            .iter()
            .map(|row| {
                let challenge = Self::row_to_challenge(row)?;
                Ok(ChallengeWithMembers {
                    created_by: UserProfile {
                        id: challenge.created_by_id,
                        name: row.get("creator_name"),
                    },
                    participants: members.remove(&challenge.id).unwrap_or_default(),
                    challenge,
                })
            })
            .collect()
    }

    /// Membership of `user_id` in a challenge, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_participant(
        &self,
        challenge_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ChallengeParticipant>> {
        let row = sqlx::query(
            r"
            SELECT id, challenge_id, user_id, joined_at
            FROM challenge_participants
            WHERE challenge_id = $1 AND user_id = $2
            ",
        )
        .bind(challenge_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get participant: {e}")))?;

        row.map(|r| Self::row_to_participant(&r)).transpose()
    }

    /// Enroll a user
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the user is already a member, or a database error
    pub async fn join(&self, challenge_id: Uuid, user_id: Uuid) -> AppResult<ChallengeParticipant> {
        let participant = ChallengeParticipant::new(challenge_id, user_id);
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        Self::insert_participant(&mut conn, &participant).await?;
        Ok(participant)
    }

    /// Remove a user's membership
    ///
    /// Returns `false` when the user was not a member.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn leave(&self, challenge_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM challenge_participants WHERE challenge_id = $1 AND user_id = $2",
        )
        .bind(challenge_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to leave challenge: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_participant(
        conn: &mut SqliteConnection,
        participant: &ChallengeParticipant,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO challenge_participants (id, challenge_id, user_id, joined_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(participant.id.to_string())
        .bind(participant.challenge_id.to_string())
        .bind(participant.user_id.to_string())
        .bind(to_db_timestamp(participant.joined_at))
        .execute(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::invalid_input("Already participating in this challenge")
            } else {
                AppError::database(format!("Failed to add participant: {e}"))
            }
        })?;
        Ok(())
    }

    fn row_to_challenge(row: &SqliteRow) -> AppResult<Challenge> {
        let id_str: String = row.get("id");
        let start_str: String = row.get("start_date");
        let end_str: String = row.get("end_date");
        let goal_type_str: String = row.get("goal_type");
        let created_by_str: String = row.get("created_by_id");
        let created_at_str: String = row.get("created_at");

        Ok(Challenge {
            id: parse_uuid(&id_str)?,
            name: row.get("name"),
            description: row.get("description"),
            start_date: parse_date(&start_str)?,
            end_date: parse_date(&end_str)?,
            goal_type: goal_type_str
                .parse()
                .map_err(|e: AppError| AppError::database(e.to_string()))?,
            goal_value: row.get("goal_value"),
            created_by_id: parse_uuid(&created_by_str)?,
            created_at: parse_timestamp(&created_at_str)?,
        })
    }

    fn row_to_participant(row: &SqliteRow) -> AppResult<ChallengeParticipant> {
        let id_str: String = row.get("id");
        let challenge_id_str: String = row.get("challenge_id");
        let user_id_str: String = row.get("user_id");
        let joined_at_str: String = row.get("joined_at");

        Ok(ChallengeParticipant {
            id: parse_uuid(&id_str)?,
            challenge_id: parse_uuid(&challenge_id_str)?,
            user_id: parse_uuid(&user_id_str)?,
            joined_at: parse_timestamp(&joined_at_str)?,
        })
    }
}
