// ABOUTME: Core types and constants for the TAF Club calorie tracker
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # TAF Club Core
//!
//! Foundation crate providing shared types and constants for the TAF Club
//! calorie and weight tracker. It changes rarely, so the engine and server
//! crates can compile against it incrementally.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Users, food and weight entries, challenges, leaderboard rows

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Core data models (User, FoodEntry, WeightEntry, Challenge, `LeaderboardRow`)
pub mod models;
