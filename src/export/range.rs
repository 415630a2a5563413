// src/export/range.rs

use crate::core::report::DateRange;
use crate::errors::{AppError, AppResult};
use crate::utils::date::days_in_month;
use chrono::NaiveDate;

/// Parse --range (anno / mese / giorno / intervallo) into inclusive bounds.
///
/// Supporta:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<DateRange> {
    let (start, end) = match r.split_once(':') {
        Some((start_raw, end_raw)) => {
            let start = start_raw.trim();
            let end = end_raw.trim();

            if start.len() != end.len() {
                return Err(invalid(r, "start and end must have same format"));
            }

            (period_bounds(start)?.0, period_bounds(end)?.1)
        }
        None => period_bounds(r.trim())?,
    };

    if start > end {
        return Err(invalid(r, "start is after end"));
    }

    Ok(DateRange::new(
        Some(start.format("%Y-%m-%d").to_string()),
        Some(end.format("%Y-%m-%d").to_string()),
    ))
}

/// First and last day of a single period expression.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid(p, "invalid year"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(p, "invalid year"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(p, "invalid year"))?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p
                .get(0..4)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid(p, "invalid year"))?;
            let m: u32 = p
                .get(5..7)
                .filter(|_| p.as_bytes()[4] == b'-')
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| invalid(p, "invalid month"))?;
            let last = days_in_month(y, m).ok_or_else(|| invalid(p, "invalid month"))?;

            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid(p, "invalid month"))?;
            let d2 =
                NaiveDate::from_ymd_opt(y, m, last).ok_or_else(|| invalid(p, "invalid month"))?;
            Ok((d1, d2))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| invalid(p, "invalid date"))?;
            Ok((d, d))
        }
        _ => Err(invalid(p, "unsupported --range format")),
    }
}

fn invalid(input: &str, why: &str) -> AppError {
    AppError::InvalidDate(format!("{input}: {why}"))
}
