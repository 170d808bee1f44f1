// ABOUTME: Calendar-day bucketing of timestamps under one configured zone
// ABOUTME: DayKey newtype, day and week bounds, grouping, and friendly day labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tafclub_core::models::{FoodEntry, WeightEntry};

use crate::error::IntelligenceError;

/// Hours probed forward when local midnight does not exist (DST gap at 00:00)
const MAX_MIDNIGHT_PROBE_HOURS: i64 = 24;

/// Anything carrying the instant it was logged at
pub trait Timestamped {
    /// Instant the record was observed
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for DateTime<Utc> {
    fn timestamp(&self) -> DateTime<Utc> {
        *self
    }
}

impl Timestamped for FoodEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.logged_at
    }
}

impl Timestamped for WeightEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.logged_at
    }
}

/// The single global zone used to turn instants into calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneConvention {
    tz: Tz,
}

impl ZoneConvention {
    /// Wrap a named zone
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// UTC convention
    #[must_use]
    pub const fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Underlying zone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.tz
    }

    /// IANA name of the zone
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }
}

impl Default for ZoneConvention {
    fn default() -> Self {
        Self::utc()
    }
}

impl FromStr for ZoneConvention {
    type Err = IntelligenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|_| IntelligenceError::UnknownZone(s.to_owned()))
    }
}

impl Display for ZoneConvention {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// A calendar day in the configured zone
///
/// Two instants share a `DayKey` iff they fall on the same local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Key for an explicit local date
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Local calendar date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// The day before (saturates at the earliest representable date)
    #[must_use]
    pub fn pred(self) -> Self {
        self.0.pred_opt().map_or(self, Self)
    }

    /// The day after (saturates at the latest representable date)
    #[must_use]
    pub fn succ(self) -> Self {
        self.0.succ_opt().map_or(self, Self)
    }

    /// Whole days from `self` to `later`; negative when `later` is earlier
    #[must_use]
    pub fn days_until(self, later: Self) -> i64 {
        later.0.signed_duration_since(self.0).num_days()
    }

    /// Monday of the week containing this day
    #[must_use]
    pub fn week_start(self) -> Self {
        let offset = u64::from(self.0.weekday().num_days_from_monday());
        self.0.checked_sub_days(Days::new(offset)).map_or(self, Self)
    }

    /// Step back `days` days (saturating)
    #[must_use]
    pub fn minus_days(self, days: u32) -> Self {
        self.0
            .checked_sub_days(Days::new(u64::from(days)))
            .map_or(self, Self)
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Truncate an instant to its local calendar day
#[must_use]
pub fn bucket(timestamp: DateTime<Utc>, zone: ZoneConvention) -> DayKey {
    DayKey(timestamp.with_timezone(&zone.tz).date_naive())
}

/// The local day containing `now`
#[must_use]
pub fn today(now: DateTime<Utc>, zone: ZoneConvention) -> DayKey {
    bucket(now, zone)
}

/// First valid local instant of `date`, expressed in UTC
fn local_day_start(date: NaiveDate, zone: ZoneConvention) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=MAX_MIDNIGHT_PROBE_HOURS)
        .filter_map(|hours| midnight.checked_add_signed(Duration::hours(hours)))
        .find_map(|local| zone.tz.from_local_datetime(&local).earliest())
        .map_or_else(|| midnight.and_utc(), |start| start.with_timezone(&Utc))
}

/// UTC instants bounding a local day as `[start, end)`
#[must_use]
pub fn day_bounds(day: DayKey, zone: ZoneConvention) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        local_day_start(day.0, zone),
        local_day_start(day.succ().0, zone),
    )
}

/// UTC instants bounding the Monday-start week containing `now` as `[start, end)`
#[must_use]
pub fn week_bounds(now: DateTime<Utc>, zone: ZoneConvention) -> (DateTime<Utc>, DateTime<Utc>) {
    let monday = today(now, zone).week_start();
    let next_monday = monday
        .0
        .checked_add_days(Days::new(7))
        .map_or(monday, DayKey);
    (
        local_day_start(monday.0, zone),
        local_day_start(next_monday.0, zone),
    )
}

/// Group records by local day
///
/// Iterate the map in reverse for most-recent-first history views.
pub fn group_by_day<T, I>(items: I, zone: ZoneConvention) -> BTreeMap<DayKey, Vec<T>>
where
    T: Timestamped,
    I: IntoIterator<Item = T>,
{
    let mut groups: BTreeMap<DayKey, Vec<T>> = BTreeMap::new();
    for item in items {
        groups
            .entry(bucket(item.timestamp(), zone))
            .or_default()
            .push(item);
    }
    groups
}

/// The `count` days ending at `last`, most recent first
#[must_use]
pub fn recent_days(last: DayKey, count: u32) -> Vec<DayKey> {
    (0..count).map(|offset| last.minus_days(offset)).collect()
}

/// "Today", "Yesterday", or a short date such as "Mar 4, 2025"
#[must_use]
pub fn friendly_label(timestamp: DateTime<Utc>, now: DateTime<Utc>, zone: ZoneConvention) -> String {
    let day = bucket(timestamp, zone);
    let current = today(now, zone);
    if day == current {
        "Today".to_owned()
    } else if day == current.pred() {
        "Yesterday".to_owned()
    } else {
        day.0.format("%b %-d, %Y").to_string()
    }
}
