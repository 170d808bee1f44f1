// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Defaults, limits, and environment keys for the calorie tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Service identity used in logs and outbound requests
pub mod service_names {
    /// Server binary / log service name
    pub const TAFCLUB_SERVER: &str = "tafclub-server";
    /// `User-Agent` sent to the nutrition database
    pub const FOOD_SEARCH_USER_AGENT: &str = "TAFClub-CalorieTracker/1.0";
}

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Nutrition defaults
pub mod nutrition {
    /// Daily calorie goal applied when a user has not configured one
    pub const DEFAULT_CALORIE_GOAL: f64 = 2000.0;
    /// Number of distinct foods returned by the recent-foods query
    pub const RECENT_FOODS_LIMIT: i64 = 10;
    /// Maximum results returned by the food search proxy
    pub const FOOD_SEARCH_PAGE_SIZE: usize = 10;
    /// Serving size label when the upstream product has none
    pub const DEFAULT_SERVING_SIZE: &str = "per 100g";
    /// Upstream search requests allowed per minute
    pub const FOOD_SEARCH_RATE_LIMIT_PER_MINUTE: usize = 10;
}

/// Leaderboard and weight metric limits
pub mod leaderboard {
    /// Number of most recent weight observations considered for weight loss
    pub const WEIGHT_LOSS_WINDOW: usize = 10;
}

/// Input validation limits
pub mod limits {
    /// Minimum password length accepted at signup
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Maximum food entry name length
    pub const MAX_FOOD_NAME_LENGTH: usize = 200;
    /// Largest calorie value accepted for one food entry
    pub const MAX_CALORIES_PER_ENTRY: f64 = 20_000.0;
    /// Largest protein, carbohydrate, or fat amount accepted for one food entry, in grams
    pub const MAX_MACRO_GRAMS: f64 = 2_000.0;
    /// Largest body weight accepted, in kilograms
    pub const MAX_WEIGHT_KG: f64 = 1_000.0;
    /// Maximum challenge name length
    pub const MAX_CHALLENGE_NAME_LENGTH: usize = 120;
    /// Maximum number of days a history request may span
    pub const MAX_HISTORY_DAYS: u32 = 366;
    /// Default number of days returned by the history endpoint
    pub const DEFAULT_HISTORY_DAYS: u32 = 7;
    /// Default JWT lifetime in hours
    pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
    /// Longest accepted JWT lifetime in hours (one year)
    pub const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 365;
    /// Default food search cache TTL in seconds
    pub const DEFAULT_FOOD_SEARCH_CACHE_TTL_SECS: u64 = 3600;
    /// Longest accepted food search cache TTL in seconds (one week)
    pub const MAX_FOOD_SEARCH_CACHE_TTL_SECS: u64 = 7 * 24 * 3600;
    /// Distinct queries kept in the food search cache
    pub const FOOD_SEARCH_CACHE_CAPACITY: usize = 512;
}

/// Environment variable names read by the server configuration
pub mod env_keys {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// IANA zone used for calendar-day bucketing
    pub const TIMEZONE: &str = "TAFCLUB_TIMEZONE";
    /// JWT signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// JWT lifetime in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// bcrypt work factor
    pub const BCRYPT_COST: &str = "BCRYPT_COST";
    /// Nutrition database base URL
    pub const OPENFOODFACTS_BASE_URL: &str = "OPENFOODFACTS_BASE_URL";
    /// Food search cache TTL
    pub const FOOD_SEARCH_CACHE_TTL_SECS: &str = "FOOD_SEARCH_CACHE_TTL_SECS";
    /// Allowed CORS origins (comma separated, `*` for any)
    pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
    /// Deployment environment name
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default values for configuration
pub mod defaults {
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/tafclub.db";
    /// Default zone convention
    pub const TIMEZONE: &str = "UTC";
    /// Default nutrition database
    pub const OPENFOODFACTS_BASE_URL: &str = "https://world.openfoodfacts.org";
}
