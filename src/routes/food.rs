// ABOUTME: Food logging route handlers
// ABOUTME: List, create, and delete entries, recent foods, and the nutrition search proxy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food routes
//!
//! All endpoints require a bearer token; entries are only ever visible to
//! their owner.

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
use tafclub_core::constants::nutrition::RECENT_FOODS_LIMIT;
use tafclub_core::errors::AppError;
use tafclub_core::models::NewFoodEntry;

use crate::logging::AppLogger;
use crate::resources::ServerResources;
use crate::utils::dates::{parse_instant, parse_range, DayEdge};
use crate::utils::numbers::{optional_macro, Quantity};
use crate::utils::uuid::parse_required_id;

/// Query parameters for listing entries
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFoodQuery {
    /// Inclusive lower bound (RFC 3339 or `YYYY-MM-DD`)
    pub start_date: Option<String>,
    /// Inclusive upper bound (RFC 3339 or `YYYY-MM-DD`)
    pub end_date: Option<String>,
}

/// Body of POST /api/food
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodRequest {
    /// Food name
    pub name: Option<String>,
    /// Energy in kcal
    pub calories: Option<Quantity>,
    /// Protein grams
    pub protein: Option<Quantity>,
    /// Carbohydrate grams
    pub carbs: Option<Quantity>,
    /// Fat grams
    pub fat: Option<Quantity>,
    /// When it was eaten; defaults to now
    pub logged_at: Option<String>,
}

/// Query carrying an entry id
#[derive(Debug, Deserialize)]
pub struct EntryIdQuery {
    /// Entry id
    pub id: Option<String>,
}

/// Query for the search proxy
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text search terms
    pub q: Option<String>,
}

/// Food routes handler
pub struct FoodRoutes;

impl FoodRoutes {
    /// Create all food routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/food",
                get(Self::handle_list)
                    .post(Self::handle_create)
                    .delete(Self::handle_delete),
            )
            .route("/api/food/recent", get(Self::handle_recent))
            .route("/api/food/search", get(Self::handle_search))
            .with_state(resources)
    }

    /// Handle GET /api/food
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListFoodQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let range = parse_range(
            query.start_date.as_deref(),
            query.end_date.as_deref(),
            resources.zone(),
        )?;

        let entries = resources
            .database
            .food()
            .list_entries(auth.user_id, range)
            .await?;

        Ok((StatusCode::OK, Json(json!({ "entries": entries }))).into_response())
    }

    /// Handle POST /api/food
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateFoodRequest>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;

        let calories = match &body.calories {
            Some(q) => q.value("calories")?,
            None => None,
        };
        let (Some(name), Some(calories)) = (body.name.as_deref(), calories) else {
            return Err(AppError::missing_field("Name and calories are required"));
        };
        let logged_at = body
            .logged_at
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|raw| parse_instant(raw, DayEdge::Start, resources.zone(), "loggedAt"))
            .transpose()?;

        let entry = NewFoodEntry::new(
            name,
            calories,
            optional_macro(body.protein.as_ref(), "protein")?,
            optional_macro(body.carbs.as_ref(), "carbs")?,
            optional_macro(body.fat.as_ref(), "fat")?,
            logged_at,
        )?
        .into_entry(auth.user_id);

        resources.database.food().create_entry(&entry).await?;
        AppLogger::log_entry_event(
            &auth.user_id.to_string(),
            "food",
            "created",
            &entry.id.to_string(),
        );

        Ok((StatusCode::CREATED, Json(json!({ "entry": entry }))).into_response())
    }

    /// Handle DELETE /api/food?id=
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<EntryIdQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let id = parse_required_id(query.id.as_deref(), "Entry ID required", "Entry")?;

        if !resources.database.food().delete_entry(auth.user_id, id).await? {
            return Err(AppError::not_found("Entry"));
        }
        AppLogger::log_entry_event(&auth.user_id.to_string(), "food", "deleted", &id.to_string());

        Ok((StatusCode::OK, Json(json!({ "success": true }))).into_response())
    }

    /// Handle GET /api/food/recent
    async fn handle_recent(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let foods = resources
            .database
            .food()
            .recent_foods(auth.user_id, RECENT_FOODS_LIMIT)
            .await?;

        Ok((StatusCode::OK, Json(json!({ "foods": foods }))).into_response())
    }

    /// Handle GET /api/food/search?q=
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        resources.auth.authenticate(&headers)?;
        let q = query.q.unwrap_or_default();
        let results = resources.food_search.search(&q).await?;

        Ok((StatusCode::OK, Json(json!({ "results": results }))).into_response())
    }
}
