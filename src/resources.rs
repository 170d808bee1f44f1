// ABOUTME: Centralized resource container shared by every route handler
// ABOUTME: Holds the database, auth manager, food search provider, and server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and handed to each route group as axum state.

use std::sync::Arc;

use tafclub_core::errors::AppResult;
use tafclub_intelligence::ZoneConvention;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::external::{FoodSearchProvider, OpenFoodFactsClient, OpenFoodFactsConfig};

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    /// Persistence
    pub database: Database,
    /// Token issuer and password hasher
    pub auth: Arc<AuthManager>,
    /// Nutrition database lookup
    pub food_search: Arc<dyn FoodSearchProvider>,
    /// Startup configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    #[must_use]
    pub fn new(
        database: Database,
        config: ServerConfig,
        food_search: Arc<dyn FoodSearchProvider>,
    ) -> Self {
        let auth = Arc::new(AuthManager::new(&config.auth));
        Self {
            database,
            auth,
            food_search,
            config: Arc::new(config),
        }
    }

    /// Assemble resources with the live `OpenFoodFacts` client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn with_open_food_facts(database: Database, config: ServerConfig) -> AppResult<Self> {
        let client = OpenFoodFactsClient::new(OpenFoodFactsConfig::from(&config.food_search))?;
        Ok(Self::new(database, config, Arc::new(client)))
    }

    /// Zone used to bucket timestamps into days
    #[must_use]
    pub fn zone(&self) -> ZoneConvention {
        self.config.timezone
    }
}
