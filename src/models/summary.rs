use serde::Serialize;

/// Monthly attendance report. The three views (`users`, `days`, `totals`)
/// are computed independently and are not guaranteed to add up.
#[derive(Debug, Clone, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub total_days: u32,
    pub users: Vec<UserSummary>,
    pub days: Vec<DaySummary>,
    pub totals: MonthTotals,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub present_days: u32,
    pub late_days: u32,
    pub incomplete_days: u32,
    /// Days in the month minus present days
    pub absent_days: u32,
    /// Records whose status is `absent`
    pub absent_records: u32,
    pub total_duration_minutes: f64,
    pub average_duration_minutes: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DaySummary {
    pub date: String,
    pub present: u32,
    pub late: u32,
    pub incomplete: u32,
    /// Members minus present records that day
    pub absent: u32,
    pub absent_records: u32,
    pub total_duration_minutes: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthTotals {
    pub records: u32,
    pub present: u32,
    pub late: u32,
    pub incomplete: u32,
    pub absent: u32,
    pub absent_records: u32,
    pub total_duration_minutes: f64,
    pub average_duration_minutes: f64,
    /// Percentage of (user, day) slots with an attended record.
    pub attendance_rate: f64,
}
