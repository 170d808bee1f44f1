// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds in-memory resources, routers, and signed-up users with tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `tafclub_server`

use std::env;
use std::sync::{Arc, Once};

use anyhow::Result;
use axum::Router;
use tafclub_intelligence::ZoneConvention;
use tafclub_server::{
    config::{AuthConfig, CorsConfig, DatabaseUrl, Environment, FoodSearchConfig, ServerConfig},
    database::Database,
    external::MockFoodSearch,
    models::User,
    resources::ServerResources,
    server::build_router,
};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Signing secret shared by every test server
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration for an in-memory test server
pub fn test_config(zone: ZoneConvention) -> ServerConfig {
    ServerConfig {
        http_port: 0,
        environment: Environment::Testing,
        database_url: DatabaseUrl::Memory,
        timezone: zone,
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_owned(),
            jwt_expiry_hours: 24,
            bcrypt_cost: 4,
        },
        food_search: FoodSearchConfig {
            base_url: "http://127.0.0.1:9".to_owned(),
            cache_ttl_secs: 60,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_owned()],
        },
    }
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::connect(&DatabaseUrl::Memory).await?)
}

/// Resources backed by an in-memory database and the canned food catalog
pub async fn create_test_resources_in(zone: ZoneConvention) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        test_config(zone),
        Arc::new(MockFoodSearch::new()),
    )))
}

/// Resources using the UTC zone convention
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_in(ZoneConvention::utc()).await
}

/// Full router with middleware, as served in production
pub fn app(resources: &Arc<ServerResources>) -> Router {
    build_router(resources)
}

/// Store a user directly and mint a token for them
pub async fn create_test_user(
    resources: &ServerResources,
    name: &str,
    email: &str,
) -> Result<(User, String)> {
    let hash = resources.auth.hash_password("correct-horse").await?;
    let user = User::new(name.to_owned(), email.to_owned(), hash);
    resources.database.users().create_user(&user).await?;
    let token = resources.auth.generate_token(&user)?;
    Ok((user, token))
}
