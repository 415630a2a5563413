use super::serde_fmt;
use super::status::AttendanceStatus;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Check-in written when someone checks out without having checked in.
pub const SENTINEL_CHECK_IN: NaiveTime = NaiveTime::MIN;

/// Daily attendance record (⇔ one object in `attendance.json`).
/// At most one record exists per (name, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: u32,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default, with = "serde_fmt::time_opt")]
    pub check_in: Option<NaiveTime>,
    #[serde(default)]
    pub check_in_verified: bool,
    #[serde(default, with = "serde_fmt::time_opt")]
    pub check_out: Option<NaiveTime>,
    #[serde(default)]
    pub check_out_verified: bool,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub check_in_timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub check_out_timestamp: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    /// Empty record for (name, date); the ledger fills in the event side.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            check_in: None,
            check_in_verified: false,
            check_out: None,
            check_out_verified: false,
            duration_minutes: None,
            status,
            check_in_timestamp: None,
            check_out_timestamp: None,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn check_in_str(&self) -> String {
        fmt_time(self.check_in)
    }

    pub fn check_out_str(&self) -> String {
        fmt_time(self.check_out)
    }

    /// True only for the unverified `00:00:00` placeholder.
    pub fn has_sentinel_check_in(&self) -> bool {
        self.check_in == Some(SENTINEL_CHECK_IN) && !self.check_in_verified
    }
}

fn fmt_time(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format(serde_fmt::TIME_FMT).to_string())
        .unwrap_or_default()
}
