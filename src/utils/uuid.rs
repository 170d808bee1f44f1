// ABOUTME: UUID parsing utilities with consistent client-facing errors
// ABOUTME: Distinguishes absent identifiers from malformed ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tafclub_core::errors::{AppError, AppResult};
use uuid::Uuid;

/// Parse a required identifier from an optional request field
///
/// A blank or absent value yields `missing_message`; a malformed one yields
/// `not_found` for `resource`, since no row can carry that id.
///
/// # Errors
///
/// Returns `MissingRequiredField` or `ResourceNotFound` as described above
pub fn parse_required_id(value: Option<&str>, missing_message: &str, resource: &str) -> AppResult<Uuid> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(missing_message))?;
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(resource))
}
