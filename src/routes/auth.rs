// ABOUTME: Signup and login route handlers
// ABOUTME: Validates credentials, stores bcrypt hashes, and issues bearer tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication routes

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tafclub_core::constants::limits::MIN_PASSWORD_LENGTH;
use tafclub_core::errors::{AppError, AppResult};
use tafclub_core::models::User;
use uuid::Uuid;

use crate::logging::AppLogger;
use crate::resources::ServerResources;

/// Signup request body
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Account details returned to the client
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Personal daily calorie goal
    pub daily_calorie_goal: Option<f64>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            daily_calorie_goal: user.daily_calorie_goal,
        }
    }
}

/// Token plus account details
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token
    pub token: String,
    /// Authenticated account
    pub user: UserInfo,
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/signup", post(Self::handle_signup))
            .route("/api/auth/login", post(Self::handle_login))
            .with_state(resources)
    }

    fn validate_signup(request: &SignupRequest) -> AppResult<()> {
        if request.name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
        {
            return Err(AppError::missing_field("Name, email and password are required"));
        }
        if !request.email.contains('@') {
            return Err(AppError::invalid_input("Invalid email address"));
        }
        if request.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        Ok(())
    }

    /// Handle POST /api/auth/signup
    async fn handle_signup(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SignupRequest>,
    ) -> Result<Response, AppError> {
        Self::validate_signup(&request)?;

        let users = resources.database.users();
        if users.get_user_by_email(&request.email).await?.is_some() {
            AppLogger::log_auth_event(None, "signup", false);
            return Err(AppError::already_exists("User already exists"));
        }

        let password_hash = resources.auth.hash_password(&request.password).await?;
        let user = User::new(
            request.name.trim().to_owned(),
            request.email.trim().to_owned(),
            password_hash,
        );
        users.create_user(&user).await?;

        let token = resources.auth.generate_token(&user)?;
        AppLogger::log_auth_event(Some(&user.id.to_string()), "signup", true);

        let response = AuthResponse {
            token,
            user: UserInfo::from(&user),
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::missing_field("Email and password are required"));
        }

        let user = resources
            .database
            .users()
            .get_user_by_email(&request.email)
            .await?;

        let Some(user) = user else {
            AppLogger::log_auth_event(None, "login", false);
            return Err(AppError::auth_invalid("Invalid email or password"));
        };

        if !resources
            .auth
            .verify_password(&request.password, &user.password_hash)
            .await?
        {
            AppLogger::log_auth_event(Some(&user.id.to_string()), "login", false);
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        let token = resources.auth.generate_token(&user)?;
        AppLogger::log_auth_event(Some(&user.id.to_string()), "login", true);

        let response = AuthResponse {
            token,
            user: UserInfo::from(&user),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
