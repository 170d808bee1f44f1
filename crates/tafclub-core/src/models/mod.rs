// ABOUTME: Core data models for the calorie and weight tracker
// ABOUTME: Re-exports users, food entries, weight entries, challenges, and leaderboard types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data structures shared by the engine, the persistence layer and the
//! HTTP layer. Everything here is serializable and carries no behavior beyond
//! parsing and small invariants.
//!
//! ## Core Models
//!
//! - `User`: account record with an optional daily calorie goal
//! - `FoodEntry`: one logged food with calories and optional macros
//! - `WeightEntry`: one body-weight observation in kilograms
//! - `Challenge`: a time-boxed group goal and its participants
//! - `LeaderboardRow` / `MetricKind`: ranked output for a selected metric

mod challenge;
mod leaderboard;
mod nutrition;
mod user;
mod weight;

// Challenge domain
pub use challenge::{Challenge, ChallengeParticipant, ChallengeStatus, GoalType};

// Leaderboard domain
pub use leaderboard::{LeaderboardRow, MetricKind};

// Nutrition domain
pub use nutrition::{FoodEntry, FoodSearchResult, NewFoodEntry, RecentFood};

// User domain
pub use user::{User, UserProfile};

// Weight domain
pub use weight::{NewWeightEntry, WeightEntry};
