// ABOUTME: External API client modules (OpenFoodFacts product search)
// ABOUTME: Provides the food search provider trait, HTTP client, and test double
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients

/// `OpenFoodFacts` search client with caching and rate limiting
pub mod open_food_facts;

pub use open_food_facts::{
    FoodSearchProvider, MockFoodSearch, OpenFoodFactsClient, OpenFoodFactsConfig,
};
