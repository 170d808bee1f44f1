// ABOUTME: Dashboard and history route handlers
// ABOUTME: Today's calorie summary with streaks, and per-day history grouped in the configured zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dashboard routes
//!
//! Both endpoints recompute everything from stored entries on each request.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tafclub_core::constants::limits::{DEFAULT_HISTORY_DAYS, MAX_HISTORY_DAYS};
use tafclub_core::errors::AppError;
use tafclub_core::models::FoodEntry;
use tafclub_intelligence::date_bucket::{day_bounds, friendly_label, group_by_day, recent_days};
use tafclub_intelligence::{summarize_day, today, DayKey, ZoneConvention};

use crate::resources::ServerResources;

/// Query parameters for the history view
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Number of days ending today
    pub days: Option<u32>,
}

/// One local day of food entries
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDay {
    /// Local day
    pub day: DayKey,
    /// "Today", "Yesterday", or a short date
    pub label: String,
    /// Calories logged that day, rounded
    pub total_calories: f64,
    /// Entries of that day, newest first
    pub entries: Vec<FoodEntry>,
}

/// Dashboard routes handler
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard", get(Self::handle_dashboard))
            .route("/api/history", get(Self::handle_history))
            .with_state(resources)
    }

    /// Handle GET /api/dashboard
    async fn handle_dashboard(
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
        let entries = resources
            .database
            .food()
            .list_entries(auth.user_id, None)
            .await?;

        let summary = summarize_day(
            &entries,
            user.daily_calorie_goal,
            Utc::now(),
            resources.zone(),
        )?;

        Ok((StatusCode::OK, Json(json!({ "summary": summary }))).into_response())
    }

    /// Handle GET /api/history?days=
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth.authenticate(&headers)?;
        let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
        if days == 0 || days > MAX_HISTORY_DAYS {
            return Err(AppError::invalid_input(format!(
                "days must be between 1 and {MAX_HISTORY_DAYS}"
            )));
        }

        let now = Utc::now();
        let zone = resources.zone();
        let range = history_range(now, days, zone);
        let entries = resources
            .database
            .food()
            .list_entries(auth.user_id, Some(range))
            .await?;

        Ok((
            StatusCode::OK,
            Json(json!({ "days": build_history(entries, now, days, zone) })),
        )
            .into_response())
    }
}

/// Inclusive UTC range covering the `days` local days ending today
fn history_range(
    now: DateTime<Utc>,
    days: u32,
    zone: ZoneConvention,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let last = today(now, zone);
    let first = last.minus_days(days.saturating_sub(1));
    let (start, _) = day_bounds(first, zone);
    let (_, next) = day_bounds(last, zone);
    (start, next - Duration::microseconds(1))
}

/// Every day in the window, most recent first, including days without entries
fn build_history(
    entries: Vec<FoodEntry>,
    now: DateTime<Utc>,
    days: u32,
    zone: ZoneConvention,
) -> Vec<HistoryDay> {
    let mut groups = group_by_day(entries, zone);
    recent_days(today(now, zone), days)
        .into_iter()
        .map(|day| {
            let entries = groups.remove(&day).unwrap_or_default();
            let total: f64 = entries.iter().map(|e| e.calories).sum();
            let (start, _) = day_bounds(day, zone);
            HistoryDay {
                day,
                label: friendly_label(start, now, zone),
                total_calories: total.round(),
                entries,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tafclub_core::models::NewFoodEntry;
    use uuid::Uuid;

    fn entry(at: DateTime<Utc>, calories: f64) -> FoodEntry {
        NewFoodEntry::new("Soup", calories, None, None, None, Some(at))
            .unwrap()
            .into_entry(Uuid::nil())
    }

    #[test]
    fn test_history_includes_empty_days() {
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 15, 0, 0).unwrap();
        let entries = vec![
            entry(Utc.with_ymd_and_hms(2025, 5, 10, 8, 0, 0).unwrap(), 300.0),
            entry(Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap(), 450.4),
            entry(Utc.with_ymd_and_hms(2025, 5, 8, 19, 0, 0).unwrap(), 700.0),
        ];
        let history = build_history(entries, now, 3, ZoneConvention::utc());

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].label, "Today");
        assert!((history[0].total_calories - 750.0).abs() < f64::EPSILON);
        assert_eq!(history[1].label, "Yesterday");
        assert!(history[1].entries.is_empty());
        assert_eq!(history[2].entries.len(), 1);
    }

    #[test]
    fn test_history_range_spans_whole_days() {
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 15, 0, 0).unwrap();
        let (start, end) = history_range(now, 7, ZoneConvention::utc());
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 5, 4, 0, 0, 0).unwrap());
        assert!(end < Utc.with_ymd_and_hms(2025, 5, 11, 0, 0, 0).unwrap());
        assert!(end > Utc.with_ymd_and_hms(2025, 5, 10, 23, 59, 59).unwrap());
    }
}
