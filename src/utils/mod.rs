// ABOUTME: Utility module organization for request parsing helpers
// ABOUTME: UUID and date/instant parsing shared by the route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Utility functions shared across route handlers

/// Date and instant parsing for query parameters
pub mod dates;
/// UUID parsing with consistent error handling
pub mod uuid;
/// Lenient numeric request fields
pub mod numbers;
