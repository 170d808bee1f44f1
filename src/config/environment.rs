// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database location, zone convention, auth, and food search settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt::{self, Debug, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tafclub_core::constants::{defaults, env_keys, limits, ports};
use tafclub_core::errors::{AppError, AppResult};
use tafclub_intelligence::ZoneConvention;
use tracing::{info, warn};

/// Lowest bcrypt cost accepted by the bcrypt crate
const MIN_BCRYPT_COST: u32 = 4;
/// Highest bcrypt cost accepted by the bcrypt crate
const MAX_BCRYPT_COST: u32 = 31;

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed production instance
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (tests)
    Memory,
}

impl DatabaseUrl {
    /// Parse `sqlite:<path>`, `sqlite::memory:`, or a bare file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:")).unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to a `sqlx` connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Whether this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

/// Token signing and password hashing settings
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Debug for AuthConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Nutrition database proxy settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodSearchConfig {
    /// Base URL of the `OpenFoodFacts` instance
    pub base_url: String,
    /// How long search results stay cached
    pub cache_ttl_secs: u64,
}

/// Cross-origin settings for the web client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Whether any origin is allowed
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Zone used for every calendar-day computation
    pub timezone: ZoneConvention,
    /// Authentication settings
    pub auth: AuthConfig,
    /// Food search proxy settings
    pub food_search: FoodSearchConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable is present but invalid, or if
    /// `JWT_SECRET` is missing in production
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let environment =
            Environment::from_str_or_default(&env_var_or(env_keys::ENVIRONMENT, "development"));

        let config = Self {
            http_port: parse_env(env_keys::HTTP_PORT, ports::DEFAULT_HTTP_PORT)?,
            environment,
            database_url: DatabaseUrl::parse_url(&env_var_or(
                env_keys::DATABASE_URL,
                defaults::DATABASE_URL,
            )),
            timezone: ZoneConvention::from_str(&env_var_or(env_keys::TIMEZONE, defaults::TIMEZONE))?,
            auth: AuthConfig {
                jwt_secret: jwt_secret(environment)?,
                jwt_expiry_hours: parse_env(
                    env_keys::JWT_EXPIRY_HOURS,
                    limits::DEFAULT_JWT_EXPIRY_HOURS,
                )?,
                bcrypt_cost: parse_env(env_keys::BCRYPT_COST, bcrypt::DEFAULT_COST)?,
            },
            food_search: FoodSearchConfig {
                base_url: env_var_or(
                    env_keys::OPENFOODFACTS_BASE_URL,
                    defaults::OPENFOODFACTS_BASE_URL,
                )
                .trim_end_matches('/')
                .to_owned(),
                cache_ttl_secs: parse_env(
                    env_keys::FOOD_SEARCH_CACHE_TTL_SECS,
                    limits::DEFAULT_FOOD_SEARCH_CACHE_TTL_SECS,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or(env_keys::CORS_ORIGINS, "*")),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid setting
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=limits::MAX_JWT_EXPIRY_HOURS).contains(&self.auth.jwt_expiry_hours) {
            return Err(AppError::config_invalid(format!(
                "{} must be between 1 and {}",
                env_keys::JWT_EXPIRY_HOURS,
                limits::MAX_JWT_EXPIRY_HOURS
            )));
        }
        if self.food_search.cache_ttl_secs > limits::MAX_FOOD_SEARCH_CACHE_TTL_SECS {
            return Err(AppError::config_invalid(format!(
                "{} must be at most {}",
                env_keys::FOOD_SEARCH_CACHE_TTL_SECS,
                limits::MAX_FOOD_SEARCH_CACHE_TTL_SECS
            )));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.auth.bcrypt_cost) {
            return Err(AppError::config_invalid(format!(
                "{} must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}",
                env_keys::BCRYPT_COST
            )));
        }
        if !self.food_search.base_url.starts_with("http://")
            && !self.food_search.base_url.starts_with("https://")
        {
            return Err(AppError::config_invalid(format!(
                "{} must be an http(s) URL",
                env_keys::OPENFOODFACTS_BASE_URL
            )));
        }
        if self.environment.is_production() && self.cors.allows_any() {
            warn!("CORS allows any origin in production");
        }
        Ok(())
    }

    /// Summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "TAF Club Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Time Zone: {}\n\
             - JWT Expiry: {}h\n\
             - Food Search: {} (cache {}s)\n\
             - CORS Origins: {}",
            self.http_port,
            self.environment,
            if self.database_url.is_memory() {
                "in-memory"
            } else {
                "SQLite file"
            },
            self.timezone,
            self.auth.jwt_expiry_hours,
            self.food_search.base_url,
            self.food_search.cache_ttl_secs,
            self.cors.allowed_origins.join(", ")
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, using `default` when it is unset
fn parse_env<T: FromStr>(key: &str, default: T) -> AppResult<T>
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

/// `JWT_SECRET`, required in production; a random per-process secret elsewhere
fn jwt_secret(environment: Environment) -> AppResult<String> {
    match env::var(env_keys::JWT_SECRET) {
        Ok(secret) if !secret.trim().is_empty() => Ok(secret),
        _ if environment.is_production() => Err(AppError::config(format!(
            "{} is required in production",
            env_keys::JWT_SECRET
        ))),
        _ => {
            warn!("JWT_SECRET not set; generated a random secret, tokens will not survive restarts");
            Ok(hex::encode(rand::random::<[u8; 32]>()))
        }
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
