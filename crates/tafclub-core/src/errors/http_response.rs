// ABOUTME: Axum IntoResponse integration for AppError
// ABOUTME: Serializes errors into the JSON envelope with the mapped HTTP status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use tracing::{error, warn};

use super::{AppError, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = ?self.code, status = status.as_u16(), "{}", self.message);
        } else {
            warn!(code = ?self.code, status = status.as_u16(), "{}", self.message);
        }

        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
