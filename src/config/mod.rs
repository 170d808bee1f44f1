// ABOUTME: Configuration module for the TAF Club server
// ABOUTME: Environment-only configuration parsed once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All settings come from environment variables; there is no config file.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, CorsConfig, DatabaseUrl, Environment, FoodSearchConfig, ServerConfig,
};
