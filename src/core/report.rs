//! Reporting: record filters, monthly summaries and the tabular projection
//! used by every export format.

use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceRecord;
use crate::models::status::AttendanceStatus;
use crate::models::summary::{DaySummary, MonthSummary, MonthTotals, UserSummary};
use crate::models::user::User;
use crate::utils::date::{all_days_of_month, days_in_month, month_prefix};
use crate::utils::formatting::format_minutes;
use std::collections::HashSet;

/// Inclusive date bounds on "YYYY-MM-DD" strings; either side may be open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: &str) -> bool {
        self.start.as_deref().is_none_or(|s| date >= s)
            && self.end.as_deref().is_none_or(|e| date <= e)
    }
}

/// Conjunctive record filter. Empty filter keeps everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Case-insensitive substring
    pub name: Option<String>,
    /// Exact "YYYY-MM-DD"
    pub date: Option<String>,
    pub date_range: Option<DateRange>,
    pub status: Option<AttendanceStatus>,
}

impl RecordFilter {
    pub fn matches(&self, r: &AttendanceRecord) -> bool {
        let date = r.date_str();

        if let Some(n) = &self.name
            && !r.name.to_lowercase().contains(&n.to_lowercase())
        {
            return false;
        }
        if let Some(d) = &self.date
            && &date != d
        {
            return false;
        }
        if let Some(range) = &self.date_range
            && !range.contains(&date)
        {
            return false;
        }
        if let Some(s) = self.status
            && r.status != s
        {
            return false;
        }
        true
    }
}

pub fn filter(records: &[AttendanceRecord], f: &RecordFilter) -> Vec<AttendanceRecord> {
    records.iter().filter(|r| f.matches(r)).cloned().collect()
}

/// Monthly report over `users` and `records`.
///
/// Every day of the month counts as a potential attendance day, and a day
/// without a `present` record counts as absent. The per-user,
/// per-day and overall views are computed in separate passes: the totals are
/// taken straight from the month's records (whoever they belong to) rather
/// than summed from the other two views.
pub fn summarize(
    users: &[User],
    records: &[AttendanceRecord],
    year: i32,
    month: u32,
) -> AppResult<MonthSummary> {
    let total_days = days_in_month(year, month)
        .ok_or_else(|| AppError::InvalidInput(format!("invalid month {month}")))?;

    let prefix = month_prefix(year, month);
    let month_records: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.date_str().starts_with(&prefix))
        .collect();

    let members: Vec<&User> = users.iter().filter(|u| !u.role.is_admin()).collect();

    // 1️⃣ per user
    let user_rows = members
        .iter()
        .map(|u| {
            let mine: Vec<&AttendanceRecord> = month_records
                .iter()
                .copied()
                .filter(|r| r.name == u.name)
                .collect();

            let c = StatusCounts::from_records(&mine);
            let (total, avg) = durations(&mine);

            UserSummary {
                name: u.name.clone(),
                present_days: c.present,
                late_days: c.late,
                incomplete_days: c.incomplete,
                absent_days: total_days.saturating_sub(c.present),
                absent_records: c.absent,
                total_duration_minutes: round2(total),
                average_duration_minutes: round2(avg),
            }
        })
        .collect();

    // 2️⃣ per day
    let member_names: HashSet<&str> = members.iter().map(|u| u.name.as_str()).collect();
    let member_count = member_names.len() as u32;

    let day_rows = all_days_of_month(year, month)
        .into_iter()
        .map(|d| {
            let day: Vec<&AttendanceRecord> = month_records
                .iter()
                .copied()
                .filter(|r| r.date == d && member_names.contains(r.name.as_str()))
                .collect();

            let c = StatusCounts::from_records(&day);
            let (total, _) = durations(&day);

            DaySummary {
                date: d.format("%Y-%m-%d").to_string(),
                present: c.present,
                late: c.late,
                incomplete: c.incomplete,
                absent: member_count.saturating_sub(c.present),
                absent_records: c.absent,
                total_duration_minutes: round2(total),
            }
        })
        .collect();

    // 3️⃣ overall, from the raw month records
    let c = StatusCounts::from_records(&month_records);
    let (total, avg) = durations(&month_records);
    let slots = member_count * total_days;
    let rate = if slots == 0 {
        0.0
    } else {
        c.attended() as f64 / slots as f64 * 100.0
    };

    let totals = MonthTotals {
        records: month_records.len() as u32,
        present: c.present,
        late: c.late,
        incomplete: c.incomplete,
        absent: slots.saturating_sub(c.present),
        absent_records: c.absent,
        total_duration_minutes: round2(total),
        average_duration_minutes: round2(avg),
        attendance_rate: round2(rate),
    };

    Ok(MonthSummary {
        year,
        month,
        total_days,
        users: user_rows,
        days: day_rows,
        totals,
    })
}

/// Column order of the tabular projection.
pub const TABLE_HEADERS: [&str; 9] = [
    "id",
    "name",
    "date",
    "check_in",
    "check_in_verified",
    "check_out",
    "check_out_verified",
    "duration_minutes",
    "status",
];

/// Fixed-column projection; missing values are empty strings.
pub fn to_table(records: &[AttendanceRecord]) -> Vec<Vec<String>> {
    records.iter().map(record_to_row).collect()
}

pub fn record_to_row(r: &AttendanceRecord) -> Vec<String> {
    vec![
        r.id.to_string(),
        r.name.clone(),
        r.date_str(),
        r.check_in_str(),
        r.check_in_verified.to_string(),
        r.check_out_str(),
        r.check_out_verified.to_string(),
        r.duration_minutes.map(format_minutes).unwrap_or_default(),
        r.status.as_str().to_string(),
    ]
}

#[derive(Default)]
struct StatusCounts {
    present: u32,
    late: u32,
    incomplete: u32,
    absent: u32,
}

impl StatusCounts {
    fn from_records(records: &[&AttendanceRecord]) -> Self {
        let mut c = Self::default();
        for r in records {
            match r.status {
                AttendanceStatus::Present => c.present += 1,
                AttendanceStatus::Late => c.late += 1,
                AttendanceStatus::Incomplete => c.incomplete += 1,
                AttendanceStatus::Absent => c.absent += 1,
            }
        }
        c
    }

    fn attended(&self) -> u32 {
        self.present + self.late + self.incomplete
    }
}

/// (total, average) over records that have a duration.
fn durations(records: &[&AttendanceRecord]) -> (f64, f64) {
    let values: Vec<f64> = records.iter().filter_map(|r| r.duration_minutes).collect();
    let total: f64 = values.iter().sum();
    let avg = if values.is_empty() {
        0.0
    } else {
        total / values.len() as f64
    };
    (total, avg)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
