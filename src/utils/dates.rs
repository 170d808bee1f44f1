// ABOUTME: Query-parameter parsing for instants and calendar dates
// ABOUTME: Plain dates resolve to day bounds in the configured zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tafclub_core::errors::{AppError, AppResult};
use tafclub_intelligence::date_bucket::day_bounds;
use tafclub_intelligence::{DayKey, ZoneConvention};

/// Which end of a day a bare date stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayEdge {
    /// First instant of the day
    Start,
    /// Last representable instant of the day
    End,
}

/// Parse an RFC 3339 instant or a `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` when neither format matches
pub fn parse_instant(
    raw: &str,
    edge: DayEdge,
    zone: ZoneConvention,
    field: &str,
) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_input(format!("Invalid {field}")))?;
    let (start, next) = day_bounds(DayKey::from_date(date), zone);
    Ok(match edge {
        DayEdge::Start => start,
        DayEdge::End => next - Duration::microseconds(1),
    })
}

/// Optional inclusive range; applied only when both ends are present
///
/// # Errors
///
/// Returns `InvalidInput` if either end is malformed or the range is inverted
pub fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
    zone: ZoneConvention,
) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(None);
    };
    let start = parse_instant(start, DayEdge::Start, zone, "startDate")?;
    let end = parse_instant(end, DayEdge::End, zone, "endDate")?;
    if end < start {
        return Err(AppError::invalid_input("endDate must not be before startDate"));
    }
    Ok(Some((start, end)))
}

/// Parse a `YYYY-MM-DD` calendar date
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` if the value is not a date
pub fn parse_date(raw: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::invalid_input(format!("Invalid {field}")))
}
