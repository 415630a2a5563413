//! Time utilities: parsing HH:MM[:SS], minute differences, "now" truncated to seconds.

use crate::errors::{AppError, AppResult};
use crate::models::serde_fmt::parse_hms;
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    parse_hms(t.trim())
}

/// Signed difference in minutes (seconds / 60).
/// No cross-midnight correction: `end < start` gives a negative value.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> f64 {
    let duration = end - start;
    duration.num_seconds() as f64 / 60.0
}

/// Current local date-time without sub-second precision.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}
