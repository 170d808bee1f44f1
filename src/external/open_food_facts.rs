// ABOUTME: OpenFoodFacts product search client for the food search proxy
// ABOUTME: Implements query caching, upstream rate limiting, result mapping, and a mock provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `OpenFoodFacts` Client
//!
//! Searches the public `OpenFoodFacts` database and maps products to
//! [`FoodSearchResult`]s. Only products with a name and a non-zero
//! `energy-kcal_100g` value are kept.
//!
//! # Features
//! - Per-query result caching with a configurable TTL, bounded by an LRU capacity
//! - Sliding-window rate limiting of upstream requests
//! - Mock provider for tests

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use serde::Deserialize;
use serde_json::Value;
use tafclub_core::constants::limits::FOOD_SEARCH_CACHE_CAPACITY;
use tafclub_core::constants::nutrition::{
    DEFAULT_SERVING_SIZE, FOOD_SEARCH_PAGE_SIZE, FOOD_SEARCH_RATE_LIMIT_PER_MINUTE,
};
use tafclub_core::constants::service_names::FOOD_SEARCH_USER_AGENT;
use tafclub_core::errors::{AppError, AppResult, ErrorCode};
use tafclub_core::models::FoodSearchResult;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::FoodSearchConfig;

const SERVICE_NAME: &str = "OpenFoodFacts";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of food search results
#[async_trait]
pub trait FoodSearchProvider: Send + Sync {
    /// Search for foods; an empty query yields no results
    ///
    /// # Errors
    ///
    /// Returns an external service error if the upstream lookup fails
    async fn search(&self, query: &str) -> AppResult<Vec<FoodSearchResult>>;
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct OpenFoodFactsConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// Distinct queries kept before the least recently used is evicted
    pub cache_capacity: usize,
    /// Upstream requests allowed per minute
    pub rate_limit_per_minute: usize,
}

impl From<&FoodSearchConfig> for OpenFoodFactsConfig {
    fn from(config: &FoodSearchConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            cache_ttl_secs: config.cache_ttl_secs,
            cache_capacity: FOOD_SEARCH_CACHE_CAPACITY,
            rate_limit_per_minute: FOOD_SEARCH_RATE_LIMIT_PER_MINUTE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    product_name: Option<String>,
    #[serde(default)]
    nutriments: Nutriments,
    serving_size: Option<String>,
}

/// Values arrive as numbers or numeric strings depending on the product
#[derive(Debug, Default, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g")]
    energy_kcal_100g: Option<Value>,
    proteins_100g: Option<Value>,
    carbohydrates_100g: Option<Value>,
    fat_100g: Option<Value>,
}

/// Numeric value, treating zero and unparsable values as absent
fn positive_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (number.is_finite() && number.abs() > 0.0).then_some(number)
}

impl Product {
    fn into_result(self) -> Option<FoodSearchResult> {
        let name = self.product_name.filter(|n| !n.trim().is_empty())?;
        let calories = positive_number(self.nutriments.energy_kcal_100g.as_ref())?;
        Some(FoodSearchResult {
            name,
            calories: calories.round() as i64,
            protein: positive_number(self.nutriments.proteins_100g.as_ref()).map(|v| v.round() as i64),
            carbs: positive_number(self.nutriments.carbohydrates_100g.as_ref())
                .map(|v| v.round() as i64),
            fat: positive_number(self.nutriments.fat_100g.as_ref()).map(|v| v.round() as i64),
            serving_size: self
                .serving_size
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SERVING_SIZE.to_owned()),
        })
    }
}

/// Map raw products to results, dropping incomplete ones
fn map_products(products: Vec<Product>) -> Vec<FoodSearchResult> {
    products
        .into_iter()
        .filter_map(Product::into_result)
        .take(FOOD_SEARCH_PAGE_SIZE)
        .collect()
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// Sliding-window limiter for upstream requests
#[derive(Debug)]
struct RateLimiter {
    requests: Vec<Instant>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    const fn new(limit: usize, window: Duration) -> Self {
        Self {
            requests: Vec::new(),
            limit,
            window,
        }
    }

    /// Record a request if the window has room
    fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        self.requests.retain(|&t| now.duration_since(t) < self.window);
        if self.requests.len() < self.limit {
            self.requests.push(now);
            true
        } else {
            false
        }
    }
}

/// `OpenFoodFacts` search client
pub struct OpenFoodFactsClient {
    config: OpenFoodFactsConfig,
    http_client: reqwest::Client,
    cache: Arc<RwLock<LruCache<String, CacheEntry<Vec<FoodSearchResult>>>>>,
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl OpenFoodFactsClient {
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(FOOD_SEARCH_CACHE_CAPACITY) {
        Some(capacity) => capacity,
        None => NonZeroUsize::MIN,
    };

    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an internal error if the HTTP client cannot be built
    pub fn new(config: OpenFoodFactsConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(FOOD_SEARCH_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute, Duration::from_secs(60));
        let capacity =
            NonZeroUsize::new(config.cache_capacity).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);

        Ok(Self {
            config,
            http_client,
            cache: Arc::new(RwLock::new(LruCache::new(capacity))),
            rate_limiter: Arc::new(RwLock::new(rate_limiter)),
        })
    }

    /// Number of cached queries
    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn cached(&self, key: &str) -> Option<Vec<FoodSearchResult>> {
        let mut cache = self.cache.write().await;
        let entry = cache.get(key)?;
        if Instant::now() < entry.expires_at {
            return Some(entry.data.clone());
        }
        cache.pop(key);
        None
    }

    /// Remember results for `key` until the TTL elapses
    async fn store(&self, key: String, results: Vec<FoodSearchResult>) {
        let ttl = Duration::from_secs(self.config.cache_ttl_secs);
        let Some(expires_at) = Instant::now().checked_add(ttl) else {
            warn!(ttl_secs = self.config.cache_ttl_secs, "Food search cache TTL out of range");
            return;
        };
        self.cache.write().await.put(
            key,
            CacheEntry {
                data: results,
                expires_at,
            },
        );
    }

    async fn fetch(&self, query: &str) -> AppResult<Vec<FoodSearchResult>> {
        if !self.rate_limiter.write().await.try_acquire() {
            warn!(query = %query, "Food search rate limit reached");
            return Err(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "Food search is busy, try again shortly",
            ));
        }

        let url = format!("{}/cgi/search.pl", self.config.base_url);
        let page_size = FOOD_SEARCH_PAGE_SIZE.to_string();
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("HTTP {}", response.status()),
            ));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}"))
        })?;

        Ok(map_products(body.products))
    }
}

#[async_trait]
impl FoodSearchProvider for OpenFoodFactsClient {
    async fn search(&self, query: &str) -> AppResult<Vec<FoodSearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let cache_key = query.to_lowercase();
        if let Some(hit) = self.cached(&cache_key).await {
            debug!(query = %query, "Food search cache hit");
            return Ok(hit);
        }

        let results = self.fetch(query).await?;
        self.store(cache_key, results.clone()).await;
        let cached_queries = self.cache_len().await;
        debug!(
            query = %query,
            results = results.len(),
            cached_queries,
            "Food search completed"
        );
        Ok(results)
    }
}

/// Mock provider for tests (no network)
pub struct MockFoodSearch {
    catalog: Vec<FoodSearchResult>,
}

impl MockFoodSearch {
    /// Create a mock with a small fixed catalog
    #[must_use]
    pub fn new() -> Self {
        let item = |name: &str, calories, protein, carbs, fat| FoodSearchResult {
            name: name.to_owned(),
            calories,
            protein: Some(protein),
            carbs: Some(carbs),
            fat: Some(fat),
            serving_size: DEFAULT_SERVING_SIZE.to_owned(),
        };
        Self {
            catalog: vec![
                item("Greek Yogurt", 97, 9, 4, 5),
                item("Banana", 89, 1, 23, 0),
                item("Chicken Breast", 165, 31, 0, 4),
                item("Brown Rice", 112, 3, 24, 1),
                item("Peanut Butter", 588, 25, 20, 50),
            ],
        }
    }
}

impl Default for MockFoodSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FoodSearchProvider for MockFoodSearch {
    async fn search(&self, query: &str) -> AppResult<Vec<FoodSearchResult>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .catalog
            .iter()
            .filter(|food| food.name.to_lowercase().contains(&needle))
            .take(FOOD_SEARCH_PAGE_SIZE)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: &Value) -> Vec<FoodSearchResult> {
        let response: SearchResponse = serde_json::from_value(body.clone()).unwrap();
        map_products(response.products)
    }

    #[test]
    fn test_products_without_name_or_energy_are_dropped() {
        let results = parse(&json!({
            "products": [
                {"product_name": "Oat Milk", "nutriments": {"energy-kcal_100g": 46.4, "fat_100g": 1.5}},
                {"product_name": "", "nutriments": {"energy-kcal_100g": 10}},
                {"product_name": "Water", "nutriments": {"energy-kcal_100g": 0}},
                {"nutriments": {"energy-kcal_100g": 120}},
                {"product_name": "Mystery"}
            ]
        }));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Oat Milk");
        assert_eq!(results[0].calories, 46);
        assert_eq!(results[0].fat, Some(2));
        assert_eq!(results[0].protein, None);
        assert_eq!(results[0].serving_size, "per 100g");
    }

    #[test]
    fn test_numeric_strings_and_serving_size() {
        let results = parse(&json!({
            "products": [
                {"product_name": "Granola", "serving_size": "45 g",
                 "nutriments": {"energy-kcal_100g": "471", "proteins_100g": "10.6"}}
            ]
        }));
        assert_eq!(results[0].calories, 471);
        assert_eq!(results[0].protein, Some(11));
        assert_eq!(results[0].serving_size, "45 g");
    }

    #[test]
    fn test_results_truncated_to_page_size() {
        let products: Vec<Value> = (0..15)
            .map(|i| json!({"product_name": format!("Food {i}"), "nutriments": {"energy-kcal_100g": 100}}))
            .collect();
        assert_eq!(parse(&json!({ "products": products })).len(), FOOD_SEARCH_PAGE_SIZE);
    }

    #[test]
    fn test_missing_products_field() {
        assert!(parse(&json!({})).is_empty());
    }

    #[test]
    fn test_rate_limiter_window() {
        let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_mock_search_matches_substring() {
        let mock = MockFoodSearch::new();
        let results = mock.search("chick").await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(mock.search("   ").await.unwrap().is_empty());
    }

    fn offline_client(cache_ttl_secs: u64, cache_capacity: usize) -> OpenFoodFactsClient {
        OpenFoodFactsClient::new(OpenFoodFactsConfig {
            base_url: "http://127.0.0.1:9".to_owned(),
            cache_ttl_secs,
            cache_capacity,
            rate_limit_per_minute: 1,
        })
        .unwrap()
    }

    fn banana() -> Vec<FoodSearchResult> {
        MockFoodSearch::new()
            .catalog
            .into_iter()
            .filter(|food| food.name == "Banana")
            .collect()
    }

    #[tokio::test]
    async fn test_client_empty_query_skips_network() {
        let client = offline_client(60, 8);
        assert!(client.search("  ").await.unwrap().is_empty());
        assert_eq!(client.cache_len().await, 0);
    }

    #[tokio::test]
    async fn test_cache_is_bounded_by_capacity() {
        let client = offline_client(60, 3);
        for i in 0..50 {
            client.store(format!("query {i}"), banana()).await;
        }
        assert_eq!(client.cache_len().await, 3);
        assert!(client.cached("query 49").await.is_some());
        assert!(client.cached("query 0").await.is_none());
    }

    #[tokio::test]
    async fn test_cache_hit_serves_without_network() {
        let client = offline_client(60, 8);
        client.store("banana".to_owned(), banana()).await;
        let results = client.search(" Banana ").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_expired_entries_are_evicted_on_read() {
        let client = offline_client(0, 8);
        client.store("banana".to_owned(), banana()).await;
        assert_eq!(client.cache_len().await, 1);
        assert!(client.cached("banana").await.is_none());
        assert_eq!(client.cache_len().await, 0);
    }
}
