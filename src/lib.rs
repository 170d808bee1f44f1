// ABOUTME: Main library entry point for the TAF Club tracker server
// ABOUTME: Wires configuration, persistence, authentication, food search, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # TAF Club Server
//!
//! HTTP backend for a social calorie and weight tracker. Members log food and
//! weight, see a daily summary with their logging streak, compete on
//! leaderboards, and join time-boxed challenges.
//!
//! ## Architecture
//!
//! - **`tafclub-core`**: errors, constants, and domain models
//! - **`tafclub-intelligence`**: pure streak, leaderboard, and date bucketing engine
//! - **this crate**: `SQLite` persistence, JWT auth, the `OpenFoodFacts` proxy,
//!   and the axum routes that tie them together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tafclub_server::config::ServerConfig;
//! use tafclub_server::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("TAF Club server configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT issuing, bearer authentication, and password hashing
pub mod auth;

/// Environment-driven server configuration
pub mod config;

/// `SQLite` persistence with one manager per domain
pub mod database;

/// External API clients (food search)
pub mod external;

/// Structured logging setup
pub mod logging;

/// Shared resources handed to route handlers
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Request parsing helpers
pub mod utils;

/// Error types re-exported from the core crate
pub use tafclub_core::errors;

/// Constants re-exported from the core crate
pub use tafclub_core::constants;

/// Domain models re-exported from the core crate
pub use tafclub_core::models;

/// Streak and leaderboard engine
pub use tafclub_intelligence as intelligence;
