// ABOUTME: Challenge route handlers for listing, creating, joining, and leaving challenges
// ABOUTME: Listings carry membership flags, lifecycle status, and live per-member progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Challenge routes
//!
//! Progress is never stored; it is recomputed from each member's food and
//! weight logs whenever challenges are listed.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tafclub_core::errors::{AppError, AppResult};
use tafclub_core::models::{Challenge, ChallengeStatus, GoalType, UserProfile};
use tafclub_intelligence::{
    challenge_status, participant_progress, ChallengeProgress, FoodLog, WeightLog, ZoneConvention,
};
use uuid::Uuid;

use crate::database::{ChallengeWithMembers, ParticipantSummary};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::utils::dates::parse_date;
use crate::utils::numbers::Quantity;
use crate::utils::uuid::parse_required_id;

/// Body of POST /api/challenges
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeRequest {
    /// Title
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// First day, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// `streak`, `calories`, or `weight_loss`
    pub goal_type: Option<String>,
    /// Target in the goal type's unit
    pub goal_value: Option<Quantity>,
}

/// Body of POST /api/challenges/join
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinChallengeRequest {
    /// Challenge to join
    pub challenge_id: Option<String>,
}

/// Query of DELETE /api/challenges/join
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveChallengeQuery {
    /// Challenge to leave
    pub challenge_id: Option<String>,
}

/// A member with their computed progress
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    /// Member
    #[serde(flatten)]
    pub summary: ParticipantSummary,
    /// Standing in the challenge
    pub progress: ChallengeProgress,
}

/// A challenge as seen by the requesting user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeView {
    /// Stored challenge fields
    #[serde(flatten)]
    pub challenge: Challenge,
    /// Creator
    pub created_by: UserProfile,
    /// Members, earliest joiner first
    pub participants: Vec<ParticipantView>,
    /// Whether the requester is a member
    pub is_participant: bool,
    /// Whether the requester created it
    pub is_creator: bool,
    /// Number of members
    pub participant_count: usize,
    /// Lifecycle status today
    pub status: ChallengeStatus,
    /// The requester's own progress, when a member
    pub my_progress: Option<ChallengeProgress>,
}

/// Logs of every user, loaded once per listing
struct MemberLogs {
    food: HashMap<Uuid, Vec<FoodLog>>,
    weight: HashMap<Uuid, Vec<WeightLog>>,
}

impl ChallengeView {
    fn build(
        entry: ChallengeWithMembers,
        viewer: Uuid,
        logs: &MemberLogs,
        now: DateTime<Utc>,
        zone: ZoneConvention,
    ) -> Self {
        let participants: Vec<ParticipantView> = entry
            .participants
            .into_iter()
            .map(|summary| {
                let user_id = summary.user.id;
                let food = logs.food.get(&user_id).map_or(&[][..], Vec::as_slice);
                let weight = logs.weight.get(&user_id).map_or(&[][..], Vec::as_slice);
                ParticipantView {
                    progress: participant_progress(&entry.challenge, food, weight, now, zone),
                    summary,
                }
            })
            .collect();

        let my_progress = participants
            .iter()
            .find(|p| p.summary.user.id == viewer)
            .map(|p| p.progress.clone());

        Self {
            status: challenge_status(&entry.challenge, now, zone),
            is_participant: my_progress.is_some(),
            is_creator: entry.challenge.created_by_id == viewer,
            participant_count: participants.len(),
            created_by: entry.created_by,
            participants,
            my_progress,
            challenge: entry.challenge,
        }
    }
}

/// Challenge routes handler
pub struct ChallengeRoutes;

impl ChallengeRoutes {
    /// Create all challenge routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/challenges",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/challenges/join",
                post(Self::handle_join).delete(Self::handle_leave),
            )
            .with_state(resources)
    }

    async fn load_logs(resources: &ServerResources) -> AppResult<MemberLogs> {
        Ok(MemberLogs {
            food: resources.database.food().logs_by_user().await?,
            weight: resources.database.weight().logs_by_user().await?,
        })
    }

    /// Existing challenge or 404; malformed ids cannot exist
    async fn require_challenge(resources: &ServerResources, raw: Option<&str>) -> AppResult<Challenge> {
        let id = parse_required_id(raw, "Challenge ID is required", "Challenge")?;
        resources
            .database
            .challenges()
            .get_challenge(id)
            .await?
            .ok_or_else(|| AppError::not_found("Challenge"))
    }

    /// Handle GET /api/challenges
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let challenges = resources.database.challenges().list_challenges().await?;
        let logs = Self::load_logs(&resources).await?;
        let now = Utc::now();

        let views: Vec<ChallengeView> = challenges
            .into_iter()
            .map(|entry| ChallengeView::build(entry, auth.user_id, &logs, now, resources.zone()))
            .collect();

        Ok((StatusCode::OK, Json(json!({ "challenges": views }))).into_response())
    }

    /// Handle POST /api/challenges
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateChallengeRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;

        let goal_value = match &body.goal_value {
            Some(q) => q.value("goalValue")?,
            None => None,
        };
        let (Some(name), Some(start), Some(end), Some(goal_type), Some(goal_value)) = (
            body.name.as_deref(),
            body.start_date.as_deref(),
            body.end_date.as_deref(),
            body.goal_type.as_deref(),
            goal_value,
        ) else {
            return Err(AppError::missing_field("Missing required fields"));
        };

        let challenge = Challenge::new(
            name,
            body.description,
            parse_date(start, "startDate")?,
            parse_date(end, "endDate")?,
            goal_type.parse::<GoalType>()?,
            goal_value,
            auth.user_id,
        )?;

        let challenges = resources.database.challenges();
        challenges.create_challenge(&challenge).await?;
        AppLogger::log_challenge_event(
            &auth.user_id.to_string(),
            &challenge.id.to_string(),
            "created",
        );

        let created = challenges
            .list_challenges()
            .await?
            .into_iter()
            .find(|c| c.challenge.id == challenge.id)
            .ok_or_else(|| AppError::internal("Created challenge not found"))?;
        let logs = Self::load_logs(&resources).await?;
        let view = ChallengeView::build(created, auth.user_id, &logs, Utc::now(), resources.zone());

        Ok((StatusCode::CREATED, Json(json!({ "challenge": view }))).into_response())
    }

    /// Handle POST /api/challenges/join
    async fn handle_join(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<JoinChallengeRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let challenge = Self::require_challenge(&resources, body.challenge_id.as_deref()).await?;

        if !challenge_status(&challenge, Utc::now(), resources.zone()).accepts_members() {
            return Err(AppError::invalid_input("Challenge has ended"));
        }

        let participant = resources
            .database
            .challenges()
            .join(challenge.id, auth.user_id)
            .await?;
        AppLogger::log_challenge_event(
            &auth.user_id.to_string(),
            &challenge.id.to_string(),
            "joined",
        );

        Ok((StatusCode::CREATED, Json(json!({ "participant": participant }))).into_response())
    }

    /// Handle DELETE /api/challenges/join?challengeId=
    async fn handle_leave(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<LeaveChallengeQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let challenge = Self::require_challenge(&resources, query.challenge_id.as_deref()).await?;

        if !resources
            .database
            .challenges()
            .leave(challenge.id, auth.user_id)
            .await?
        {
            return Err(AppError::invalid_input(
                "Not participating in this challenge",
            ));
        }
        AppLogger::log_challenge_event(
            &auth.user_id.to_string(),
            &challenge.id.to_string(),
            "left",
        );

        Ok((StatusCode::OK, Json(json!({ "success": true }))).into_response())
    }
}
