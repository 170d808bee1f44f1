// ABOUTME: Integration tests driving the full router over in-process HTTP requests
// ABOUTME: Covers auth, food and weight logging, dashboard, challenges, and leaderboards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use chrono::{Days, Duration, Utc};
use common::{app, create_test_resources, create_test_user};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_ready() {
    let resources = create_test_resources().await.unwrap();

    let health = AxumTestRequest::get("/health")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(health.json()["status"], "healthy");
    assert!(health.headers().contains_key("x-request-id"));

    let ready = AxumTestRequest::get("/ready")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(ready.json()["timezone"], "UTC");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let resources = create_test_resources().await.unwrap();
    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "trace-me-123")
        .send(app(&resources))
        .await;
    assert_eq!(response.headers()["x-request-id"], "trace-me-123");
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_signup_then_login() {
    let resources = create_test_resources().await.unwrap();
    let credentials = json!({
        "name": "Rosa",
        "email": "Rosa@Example.com",
        "password": "tortilla-123"
    });

    let signup = AxumTestRequest::post("/api/auth/signup")
        .json(&credentials)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert!(signup["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(signup["user"]["email"], "rosa@example.com");
    assert!(signup["user"].get("passwordHash").is_none());

    let login = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "rosa@example.com", "password": "tortilla-123" }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(login["user"]["id"], signup["user"]["id"]);

    let profile = AxumTestRequest::get("/api/profile")
        .bearer(login["token"].as_str().unwrap())
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(profile["user"]["name"], "Rosa");
}

#[tokio::test]
async fn test_signup_rejects_duplicates_and_bad_input() {
    let resources = create_test_resources().await.unwrap();
    let body = json!({ "name": "Sam", "email": "sam@example.com", "password": "long-enough" });

    AxumTestRequest::post("/api/auth/signup")
        .json(&body)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    let duplicate = AxumTestRequest::post("/api/auth/signup")
        .json(&json!({ "name": "Sam", "email": "SAM@example.com", "password": "long-enough" }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CONFLICT);
    assert_eq!(duplicate.error_code(), "RESOURCE_ALREADY_EXISTS");

    let missing = AxumTestRequest::post("/api/auth/signup")
        .json(&json!({ "email": "x@example.com" }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing.error_code(), "MISSING_REQUIRED_FIELD");

    AxumTestRequest::post("/api/auth/signup")
        .json(&json!({ "name": "Short", "email": "short@example.com", "password": "abc" }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let resources = create_test_resources().await.unwrap();
    create_test_user(&resources, "Ivy", "ivy@example.com")
        .await
        .unwrap();

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({ "email": "ivy@example.com", "password": "nope-nope-nope" }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let resources = create_test_resources().await.unwrap();
    for uri in [
        "/api/food",
        "/api/weight",
        "/api/dashboard",
        "/api/history",
        "/api/challenges",
        "/api/leaderboard",
        "/api/food/search?q=banana",
    ] {
        let response = AxumTestRequest::get(uri)
            .send(app(&resources))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.error_code(), "AUTH_REQUIRED", "{uri}");
    }

    AxumTestRequest::get("/api/food")
        .bearer("forged.token.value")
        .send(app(&resources))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Food
// ============================================================================

#[tokio::test]
async fn test_food_entry_lifecycle() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Kai", "kai@example.com")
        .await
        .unwrap();

    let created = AxumTestRequest::post("/api/food")
        .bearer(&token)
        .json(&json!({ "name": "Oatmeal", "calories": "350", "protein": 12, "fat": 0 }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let entry = &created["entry"];
    assert_eq!(entry["calories"], 350.0);
    assert_eq!(entry["protein"], 12.0);
    assert_eq!(entry["fat"], Value::Null);

    let listed = AxumTestRequest::get("/api/food")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(listed["entries"].as_array().unwrap().len(), 1);

    let id = entry["id"].as_str().unwrap();
    AxumTestRequest::delete(&format!("/api/food?id={id}"))
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    let again = AxumTestRequest::delete(&format!("/api/food?id={id}"))
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(again.json()["error"]["message"], "Entry not found");
}

#[tokio::test]
async fn test_food_validation_errors() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Lu", "lu@example.com")
        .await
        .unwrap();

    let missing = AxumTestRequest::post("/api/food")
        .bearer(&token)
        .json(&json!({ "name": "Toast" }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing.json()["error"]["message"], "Name and calories are required");

    AxumTestRequest::post("/api/food")
        .bearer(&token)
        .json(&json!({ "name": "Toast", "calories": "lots" }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::delete("/api/food")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::delete("/api/food?id=not-a-uuid")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_food_entries_are_private() {
    let resources = create_test_resources().await.unwrap();
    let (_, owner) = create_test_user(&resources, "Owner", "owner@example.com")
        .await
        .unwrap();
    let (_, other) = create_test_user(&resources, "Other", "other@example.com")
        .await
        .unwrap();

    let created = AxumTestRequest::post("/api/food")
        .bearer(&owner)
        .json(&json!({ "name": "Salad", "calories": 220 }))
        .send(app(&resources))
        .await
        .json();
    let id = created["entry"]["id"].as_str().unwrap();

    let listed = AxumTestRequest::get("/api/food")
        .bearer(&other)
        .send(app(&resources))
        .await
        .json();
    assert!(listed["entries"].as_array().unwrap().is_empty());

    AxumTestRequest::delete(&format!("/api/food?id={id}"))
        .bearer(&other)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_food_list_date_range() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Mo", "mo@example.com")
        .await
        .unwrap();

    for (name, at) in [
        ("Early", "2025-03-01T08:00:00Z"),
        ("Inside", "2025-03-02T23:30:00Z"),
        ("Late", "2025-03-03T00:00:00Z"),
    ] {
        AxumTestRequest::post("/api/food")
            .bearer(&token)
            .json(&json!({ "name": name, "calories": 100, "loggedAt": at }))
            .send(app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let listed = AxumTestRequest::get("/api/food?startDate=2025-03-02&endDate=2025-03-02")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let entries = listed["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Inside");

    // A lone bound is ignored
    let unbounded = AxumTestRequest::get("/api/food?startDate=2025-03-02")
        .bearer(&token)
        .send(app(&resources))
        .await
        .json();
    assert_eq!(unbounded["entries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_recent_foods_and_search() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Noa", "noa@example.com")
        .await
        .unwrap();

    for calories in [100, 120] {
        AxumTestRequest::post("/api/food")
            .bearer(&token)
            .json(&json!({ "name": "Banana", "calories": calories }))
            .send(app(&resources))
            .await;
    }
    AxumTestRequest::post("/api/food")
        .bearer(&token)
        .json(&json!({ "name": "Coffee", "calories": 5 }))
        .send(app(&resources))
        .await;

    let recent = AxumTestRequest::get("/api/food/recent")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let foods = recent["foods"].as_array().unwrap();
    assert_eq!(foods[0]["name"], "Banana");
    assert_eq!(foods[0]["calories"], 110);
    assert_eq!(foods[0]["count"], 2);

    let search = AxumTestRequest::get("/api/food/search?q=yog")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(search["results"][0]["name"], "Greek Yogurt");

    let empty = AxumTestRequest::get("/api/food/search")
        .bearer(&token)
        .send(app(&resources))
        .await
        .json();
    assert!(empty["results"].as_array().unwrap().is_empty());
}

// ============================================================================
// Weight
// ============================================================================

#[tokio::test]
async fn test_weight_entries_and_trend() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Pat", "pat@example.com")
        .await
        .unwrap();

    for (weight, at) in [
        (json!(82.0), "2025-04-01T07:00:00Z"),
        (json!("81.2"), "2025-04-08T07:00:00Z"),
        (json!(80.5), "2025-04-15T07:00:00Z"),
    ] {
        AxumTestRequest::post("/api/weight")
            .bearer(&token)
            .json(&json!({ "weight": weight, "loggedAt": at }))
            .send(app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let limited = AxumTestRequest::get("/api/weight?limit=2")
        .bearer(&token)
        .send(app(&resources))
        .await
        .json();
    let entries = limited["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["weight"], 80.5);

    let trend = AxumTestRequest::get("/api/weight/trend")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(trend["trend"]["latest"], 80.5);
    assert_eq!(trend["trend"]["changeSincePrevious"], -0.7);
    assert_eq!(trend["trend"]["totalChange"], -1.5);
    assert_eq!(trend["trend"]["direction"], "down");
}

#[tokio::test]
async fn test_weight_rejects_invalid_values() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Quin", "quin@example.com")
        .await
        .unwrap();

    for body in [json!({}), json!({ "weight": 0 }), json!({ "weight": "heavy" })] {
        let response = AxumTestRequest::post("/api/weight")
            .bearer(&token)
            .json(&body)
            .send(app(&resources))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json()["error"]["message"], "Valid weight is required");
    }
}

// ============================================================================
// Dashboard and profile
// ============================================================================

#[tokio::test]
async fn test_dashboard_uses_personal_goal() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Rae", "rae@example.com")
        .await
        .unwrap();

    let empty = AxumTestRequest::get("/api/dashboard")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(empty["summary"]["goal"], 2000.0);
    assert_eq!(empty["summary"]["streak"], 0);

    AxumTestRequest::put("/api/profile/goal")
        .bearer(&token)
        .json(&json!({ "dailyCalorieGoal": 1500 }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    AxumTestRequest::post("/api/food")
        .bearer(&token)
        .json(&json!({ "name": "Pasta", "calories": 600, "carbs": 90 }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    let summary = AxumTestRequest::get("/api/dashboard")
        .bearer(&token)
        .send(app(&resources))
        .await
        .json();
    let summary = &summary["summary"];
    assert_eq!(summary["goal"], 1500.0);
    assert_eq!(summary["totalCalories"], 600.0);
    assert_eq!(summary["remaining"], 900.0);
    assert_eq!(summary["streak"], 1);
    assert_eq!(summary["entryCount"], 1);
}

#[tokio::test]
async fn test_goal_update_validation() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Sol", "sol@example.com")
        .await
        .unwrap();

    AxumTestRequest::put("/api/profile/goal")
        .bearer(&token)
        .json(&json!({ "dailyCalorieGoal": -10 }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let cleared = AxumTestRequest::put("/api/profile/goal")
        .bearer(&token)
        .json(&json!({ "dailyCalorieGoal": null }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(cleared["user"]["dailyCalorieGoal"], Value::Null);
}

#[tokio::test]
async fn test_history_groups_by_day() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Tao", "tao@example.com")
        .await
        .unwrap();

    let yesterday = (Utc::now() - Duration::days(1)).to_rfc3339();
    for (calories, at) in [(400, None), (250, None), (300, Some(yesterday))] {
        AxumTestRequest::post("/api/food")
            .bearer(&token)
            .json(&json!({ "name": "Meal", "calories": calories, "loggedAt": at }))
            .send(app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let history = AxumTestRequest::get("/api/history?days=3")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let days = history["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["label"], "Today");
    assert_eq!(days[0]["totalCalories"], 650.0);
    assert_eq!(days[1]["label"], "Yesterday");
    assert_eq!(days[1]["entries"].as_array().unwrap().len(), 1);
    assert!(days[2]["entries"].as_array().unwrap().is_empty());

    AxumTestRequest::get("/api/history?days=0")
        .bearer(&token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Challenges
// ============================================================================

fn active_challenge(goal_type: &str, goal_value: f64) -> Value {
    let today = Utc::now().date_naive();
    json!({
        "name": "Spring Reset",
        "description": "Log every day",
        "startDate": today.checked_sub_days(Days::new(2)).unwrap().to_string(),
        "endDate": today.checked_add_days(Days::new(5)).unwrap().to_string(),
        "goalType": goal_type,
        "goalValue": goal_value
    })
}

#[tokio::test]
async fn test_challenge_create_join_leave() {
    let resources = create_test_resources().await.unwrap();
    let (creator, creator_token) = create_test_user(&resources, "Uma", "uma@example.com")
        .await
        .unwrap();
    let (joiner, joiner_token) = create_test_user(&resources, "Vic", "vic@example.com")
        .await
        .unwrap();

    let created = AxumTestRequest::post("/api/challenges")
        .bearer(&creator_token)
        .json(&active_challenge("streak", 5.0))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let challenge = &created["challenge"];
    assert_eq!(challenge["status"], "active");
    assert_eq!(challenge["isCreator"], true);
    assert_eq!(challenge["isParticipant"], true);
    assert_eq!(challenge["participantCount"], 1);
    assert_eq!(challenge["createdBy"]["id"], creator.id.to_string());
    let challenge_id = challenge["id"].as_str().unwrap().to_owned();

    AxumTestRequest::post("/api/challenges/join")
        .bearer(&joiner_token)
        .json(&json!({ "challengeId": challenge_id }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED);

    let twice = AxumTestRequest::post("/api/challenges/join")
        .bearer(&joiner_token)
        .json(&json!({ "challengeId": challenge_id }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(twice.error_code(), "INVALID_INPUT");

    AxumTestRequest::post("/api/food")
        .bearer(&joiner_token)
        .json(&json!({ "name": "Eggs", "calories": 150 }))
        .send(app(&resources))
        .await;

    let listed = AxumTestRequest::get("/api/challenges")
        .bearer(&joiner_token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let view = &listed["challenges"][0];
    assert_eq!(view["participantCount"], 2);
    assert_eq!(view["isCreator"], false);
    assert_eq!(view["myProgress"]["value"], 1.0);
    assert_eq!(view["myProgress"]["unit"], "days");
    let member = view["participants"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["user"]["id"] == joiner.id.to_string())
        .unwrap();
    assert_eq!(member["progress"]["percent"], 20.0);

    AxumTestRequest::delete(&format!("/api/challenges/join?challengeId={challenge_id}"))
        .bearer(&joiner_token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);

    let not_member = AxumTestRequest::delete(&format!(
        "/api/challenges/join?challengeId={challenge_id}"
    ))
    .bearer(&joiner_token)
    .send(app(&resources))
    .await
    .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        not_member.json()["error"]["message"],
        "Not participating in this challenge"
    );
}

#[tokio::test]
async fn test_challenge_validation_and_lookup_errors() {
    let resources = create_test_resources().await.unwrap();
    let (_, token) = create_test_user(&resources, "Wen", "wen@example.com")
        .await
        .unwrap();

    let missing = AxumTestRequest::post("/api/challenges")
        .bearer(&token)
        .json(&json!({ "name": "Nope" }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing.json()["error"]["message"], "Missing required fields");

    AxumTestRequest::post("/api/challenges")
        .bearer(&token)
        .json(&active_challenge("steps", 1000.0))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let no_id = AxumTestRequest::post("/api/challenges/join")
        .bearer(&token)
        .json(&json!({}))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(no_id.json()["error"]["message"], "Challenge ID is required");

    let unknown = AxumTestRequest::post("/api/challenges/join")
        .bearer(&token)
        .json(&json!({ "challengeId": "7c9e6679-7425-40de-944b-e07fc1f90ae7" }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(unknown.json()["error"]["message"], "Challenge not found");
}

#[tokio::test]
async fn test_ended_challenge_rejects_joins_but_allows_leaving() {
    let resources = create_test_resources().await.unwrap();
    let (_, creator) = create_test_user(&resources, "Xia", "xia@example.com")
        .await
        .unwrap();
    let (_, late) = create_test_user(&resources, "Yan", "yan@example.com")
        .await
        .unwrap();

    let created = AxumTestRequest::post("/api/challenges")
        .bearer(&creator)
        .json(&json!({
            "name": "January",
            "startDate": "2024-01-01",
            "endDate": "2024-01-31",
            "goalType": "calories",
            "goalValue": 1800
        }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["challenge"]["status"], "ended");
    let id = created["challenge"]["id"].as_str().unwrap();

    let response = AxumTestRequest::post("/api/challenges/join")
        .bearer(&late)
        .json(&json!({ "challengeId": id }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["message"], "Challenge has ended");

    AxumTestRequest::delete(&format!("/api/challenges/join?challengeId={id}"))
        .bearer(&creator)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK);
}

// ============================================================================
// Leaderboard
// ============================================================================

#[tokio::test]
async fn test_leaderboard_rankings() {
    let resources = create_test_resources().await.unwrap();
    let (big, big_token) = create_test_user(&resources, "Big Eater", "big@example.com")
        .await
        .unwrap();
    let (small, small_token) = create_test_user(&resources, "Small Eater", "small@example.com")
        .await
        .unwrap();
    let (idle, _) = create_test_user(&resources, "Idle", "idle@example.com")
        .await
        .unwrap();

    for (token, calories) in [(&big_token, 900), (&big_token, 700), (&small_token, 400)] {
        AxumTestRequest::post("/api/food")
            .bearer(token)
            .json(&json!({ "name": "Lunch", "calories": calories }))
            .send(app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let today = AxumTestRequest::get("/api/leaderboard?type=today_calories")
        .bearer(&small_token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(today["currentUserId"], small.id.to_string());
    let rows = today["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["id"], big.id.to_string());
    assert_eq!(rows[0]["value"], 1600.0);
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[2]["id"], idle.id.to_string());
    assert_eq!(rows[2]["value"], 0.0);

    let streak = AxumTestRequest::get("/api/leaderboard")
        .bearer(&small_token)
        .send(app(&resources))
        .await
        .json();
    let rows = streak["leaderboard"].as_array().unwrap();
    assert_eq!(rows[0]["value"], 1.0);
    assert_eq!(rows[1]["value"], 1.0);
    assert_eq!(rows[2]["value"], 0.0);

    let unknown = AxumTestRequest::get("/api/leaderboard?type=steps")
        .bearer(&small_token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(unknown["leaderboard"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_calories_are_rejected_and_leaderboard_stays_up() {
    let resources = create_test_resources().await.unwrap();
    let (_, heavy_token) = create_test_user(&resources, "Heavy", "heavy@example.com")
        .await
        .unwrap();
    let (_, viewer_token) = create_test_user(&resources, "Viewer", "viewer@example.com")
        .await
        .unwrap();

    for calories in [json!(1.0e308), json!("1e999"), json!(20_001)] {
        let response = AxumTestRequest::post("/api/food")
            .bearer(&heavy_token)
            .json(&json!({ "name": "Feast", "calories": calories }))
            .send(app(&resources))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_INPUT");
    }

    AxumTestRequest::post("/api/food")
        .bearer(&heavy_token)
        .json(&json!({ "name": "Feast", "calories": 20_000, "protein": 2_001 }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let weight = AxumTestRequest::post("/api/weight")
        .bearer(&heavy_token)
        .json(&json!({ "weight": 1.0e308 }))
        .send(app(&resources))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(weight.json()["error"]["message"], "Valid weight is required");

    for kind in ["today_calories", "weekly_calories", "weight_loss"] {
        let board = AxumTestRequest::get(&format!("/api/leaderboard?type={kind}"))
            .bearer(&viewer_token)
            .send(app(&resources))
            .await
            .assert_status(StatusCode::OK)
            .json();
        let rows = board["leaderboard"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row["value"] == 0.0));
    }
}

#[tokio::test]
async fn test_leaderboard_weekly_calories_and_weight_loss() {
    let resources = create_test_resources().await.unwrap();
    let (loser, loser_token) = create_test_user(&resources, "Steady", "steady@example.com")
        .await
        .unwrap();
    let (single, single_token) = create_test_user(&resources, "Once", "once@example.com")
        .await
        .unwrap();
    let (idle, _) = create_test_user(&resources, "Idle", "idle-weekly@example.com")
        .await
        .unwrap();

    for (token, calories) in [(&loser_token, 500), (&loser_token, 650), (&single_token, 1400)] {
        AxumTestRequest::post("/api/food")
            .bearer(token)
            .json(&json!({ "name": "Dinner", "calories": calories }))
            .send(app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let now = Utc::now();
    for (token, weight, at) in [
        (&loser_token, 84.0, now - Duration::days(20)),
        (&loser_token, 83.1, now - Duration::days(10)),
        (&loser_token, 81.8, now - Duration::hours(1)),
        (&single_token, 70.0, now - Duration::days(3)),
    ] {
        AxumTestRequest::post("/api/weight")
            .bearer(token)
            .json(&json!({ "weight": weight, "loggedAt": at.to_rfc3339() }))
            .send(app(&resources))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let weekly = AxumTestRequest::get("/api/leaderboard?type=weekly_calories")
        .bearer(&single_token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let rows = weekly["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["id"], single.id.to_string());
    assert_eq!(rows[0]["value"], 1400.0);
    assert_eq!(rows[1]["id"], loser.id.to_string());
    assert_eq!(rows[1]["value"], 1150.0);
    assert_eq!(rows[2]["id"], idle.id.to_string());
    assert_eq!(rows[2]["value"], 0.0);

    let loss = AxumTestRequest::get("/api/leaderboard?type=weight_loss")
        .bearer(&single_token)
        .send(app(&resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    let rows = loss["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["id"], loser.id.to_string());
    assert_eq!(rows[0]["value"], 2.2);
    assert_eq!(rows[0]["rank"], 1);
    let single_row = rows
        .iter()
        .find(|row| row["id"] == single.id.to_string())
        .unwrap();
    assert_eq!(single_row["value"], 0.0);
}
