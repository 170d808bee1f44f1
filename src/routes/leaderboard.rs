// ABOUTME: Leaderboard route handler ranking every member by a selected metric
// ABOUTME: Supports streak, weekly calories, today's calories, and weight loss
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tafclub_core::errors::{AppError, AppResult};
use tafclub_core::models::{LeaderboardRow, MetricKind};
use tafclub_intelligence::{build_leaderboard, SubjectSnapshot};
use tracing::debug;
use uuid::Uuid;

use crate::resources::ServerResources;

/// Query of GET /api/leaderboard
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Metric name; defaults to `streak`
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Ranked rows plus the caller's id so the client can highlight them
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    /// Rows, rank 1 first
    pub leaderboard: Vec<LeaderboardRow>,
    /// Requesting user
    pub current_user_id: Uuid,
}

/// Leaderboard routes handler
pub struct LeaderboardRoutes;

impl LeaderboardRoutes {
    /// Create all leaderboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/leaderboard", get(Self::handle_leaderboard))
            .with_state(resources)
    }

    /// One snapshot per member, including members with no logs
    async fn load_snapshots(resources: &ServerResources) -> AppResult<Vec<SubjectSnapshot>> {
        let profiles = resources.database.users().list_profiles().await?;
        let mut food = resources.database.food().logs_by_user().await?;
        let mut weight = resources.database.weight().logs_by_user().await?;

        Ok(profiles
            .into_iter()
            .map(|profile| SubjectSnapshot {
                food_logs: food.remove(&profile.id).unwrap_or_default(),
                weight_logs: weight.remove(&profile.id).unwrap_or_default(),
                subject_id: profile.id,
                display_name: profile.name,
            })
            .collect())
    }

    /// Handle GET /api/leaderboard?type=
    async fn handle_leaderboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<LeaderboardQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;

        let leaderboard = match query.kind.as_deref().map(str::parse::<MetricKind>) {
            None => Self::rank(&resources, MetricKind::default()).await?,
            Some(Ok(kind)) => Self::rank(&resources, kind).await?,
            Some(Err(_)) => {
                debug!(kind = ?query.kind, "Unknown leaderboard type");
                Vec::new()
            }
        };

        let response = LeaderboardResponse {
            leaderboard,
            current_user_id: auth.user_id,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn rank(resources: &ServerResources, kind: MetricKind) -> AppResult<Vec<LeaderboardRow>> {
        let snapshots = Self::load_snapshots(resources).await?;
        Ok(build_leaderboard(kind, &snapshots, Utc::now(), resources.zone())?)
    }
}
