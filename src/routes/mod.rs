// ABOUTME: Route module organization for the tracker HTTP API
// ABOUTME: One route group per domain, each built from the shared server resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module exposes a `XRoutes::routes(resources)` constructor with
//! thin handlers that authenticate, call the persistence layer and the
//! engine, and shape JSON responses.

/// Signup and login
pub mod auth;
/// Challenge listing, creation, and membership
pub mod challenges;
/// Today's summary and day-by-day history
pub mod dashboard;
/// Food entries, recent foods, and search proxy
pub mod food;
/// Liveness and readiness
pub mod health;
/// Ranked leaderboards
pub mod leaderboard;
/// Account details and calorie goal
pub mod profile;
/// Weight entries and trend
pub mod weight;

use std::sync::Arc;

use axum::Router;

use crate::resources::ServerResources;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Challenge route handlers
pub use challenges::ChallengeRoutes;
/// Dashboard route handlers
pub use dashboard::DashboardRoutes;
/// Food route handlers
pub use food::FoodRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Leaderboard route handlers
pub use leaderboard::LeaderboardRoutes;
/// Profile route handlers
pub use profile::ProfileRoutes;
/// Weight route handlers
pub use weight::WeightRoutes;

/// Merge every route group into one router
pub fn api_router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(ProfileRoutes::routes(Arc::clone(resources)))
        .merge(FoodRoutes::routes(Arc::clone(resources)))
        .merge(WeightRoutes::routes(Arc::clone(resources)))
        .merge(DashboardRoutes::routes(Arc::clone(resources)))
        .merge(ChallengeRoutes::routes(Arc::clone(resources)))
        .merge(LeaderboardRoutes::routes(Arc::clone(resources)))
}
