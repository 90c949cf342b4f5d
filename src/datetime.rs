//! The datetime collaborator (spec §9): the only operations the core
//! needs from an opaque UTC instant. `chrono::DateTime<Utc>` gives us the
//! UTC guarantee for free, so `to_utc` is the closest Rust analogue of the
//! "UTC-validate" operation — a conversion, not a fallible check.

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Converts any timezone-aware instant into the UTC instant the core
/// operates on. Infallible: `DateTime::with_timezone` cannot fail.
pub fn to_utc<Tz: TimeZone>(instant: DateTime<Tz>) -> DateTime<Utc> {
    instant.with_timezone(&Utc)
}

pub fn add_minutes(instant: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    instant + Duration::minutes(minutes)
}

pub fn add_days(instant: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    instant + Duration::days(days)
}

/// Whole-day truncation of `a - b`, per spec §6.4.
pub fn whole_day_diff(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (a - b).num_days()
}
