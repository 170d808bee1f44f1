// ABOUTME: Profile route handlers for the signed-in user
// ABOUTME: Reads account details and sets the personal daily calorie goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tafclub_core::errors::AppError;

use super::auth::UserInfo;
use crate::resources::ServerResources;

/// Body of PUT /api/profile/goal; `null` clears the goal
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    /// Calories per day
    pub daily_calorie_goal: Option<f64>,
}

/// Profile routes handler
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", get(Self::handle_get_profile))
            .route("/api/profile/goal", put(Self::handle_update_goal))
            .with_state(resources)
    }

    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let user = resources
            .database
            .users()
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok((StatusCode::OK, Json(json!({ "user": UserInfo::from(&user) }))).into_response())
    }

    async fn handle_update_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<UpdateGoalRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        if let Some(goal) = body.daily_calorie_goal {
            if !goal.is_finite() || goal <= 0.0 {
                return Err(AppError::invalid_input(
                    "Daily calorie goal must be a positive number",
                ));
            }
        }

        let users = resources.database.users();
        users
            .update_calorie_goal(auth.user_id, body.daily_calorie_goal)
            .await?;
        let user = users
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        Ok((StatusCode::OK, Json(json!({ "user": UserInfo::from(&user) }))).into_response())
    }
}
