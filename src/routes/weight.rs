// ABOUTME: Weight logging route handlers
// ABOUTME: List, create, and delete observations plus the weight trend summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weight routes

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tafclub_core::errors::AppError;
use tafclub_core::models::NewWeightEntry;
use tafclub_intelligence::{weight_trend, WeightLog};

use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::utils::dates::{parse_instant, DayEdge};
use crate::utils::numbers::Quantity;
use crate::utils::uuid::parse_required_id;

/// Query parameters for listing observations
#[derive(Debug, Deserialize)]
pub struct ListWeightQuery {
    /// Maximum number of observations, newest first
    pub limit: Option<u32>,
}

/// Body of POST /api/weight
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWeightRequest {
    /// Weight in kilograms
    pub weight: Option<Quantity>,
    /// Measurement time; defaults to now
    pub logged_at: Option<String>,
}

/// Query carrying an entry id
#[derive(Debug, Deserialize)]
pub struct WeightIdQuery {
    /// Entry id
    pub id: Option<String>,
}

/// Weight routes handler
pub struct WeightRoutes;

impl WeightRoutes {
    /// Create all weight routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/weight",
                get(Self::handle_list)
                    .post(Self::handle_create)
                    .delete(Self::handle_delete),
            )
            .route("/api/weight/trend", get(Self::handle_trend))
            .with_state(resources)
    }

    /// Handle GET /api/weight
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListWeightQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let entries = resources
            .database
            .weight()
            .list_entries(auth.user_id, query.limit)
            .await?;

        Ok((StatusCode::OK, Json(json!({ "entries": entries }))).into_response())
    }

    /// Handle POST /api/weight
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateWeightRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;

        let weight = match &body.weight {
            Some(q) => q
                .value("weight")
                .map_err(|_| AppError::invalid_input("Valid weight is required"))?,
            None => None,
        }
        .ok_or_else(|| AppError::invalid_input("Valid weight is required"))?;
        let logged_at = body
            .logged_at
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|raw| parse_instant(raw, DayEdge::Start, resources.zone(), "loggedAt"))
            .transpose()?;

        let entry = NewWeightEntry::new(weight, logged_at)?.into_entry(auth.user_id);
        resources.database.weight().create_entry(&entry).await?;
        AppLogger::log_entry_event(
            &auth.user_id.to_string(),
            "weight",
            "created",
            &entry.id.to_string(),
        );

        Ok((StatusCode::CREATED, Json(json!({ "entry": entry }))).into_response())
    }

    /// Handle DELETE /api/weight?id=
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<WeightIdQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let id = parse_required_id(query.id.as_deref(), "Entry ID required", "Entry")?;

        if !resources.database.weight().delete_entry(auth.user_id, id).await? {
            return Err(AppError::not_found("Entry"));
        }
        AppLogger::log_entry_event(&auth.user_id.to_string(), "weight", "deleted", &id.to_string());

        Ok((StatusCode::OK, Json(json!({ "success": true }))).into_response())
    }

    /// Handle GET /api/weight/trend
    async fn handle_trend(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let entries = resources
            .database
            .weight()
            .list_entries(auth.user_id, None)
            .await?;
        let logs: Vec<WeightLog> = entries.iter().map(WeightLog::from).collect();

        Ok((StatusCode::OK, Json(json!({ "trend": weight_trend(&logs) }))).into_response())
    }
}
