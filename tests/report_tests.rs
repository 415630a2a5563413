use chrono::{NaiveDate, NaiveTime};
use rattendance::core::report::{
    DateRange, RecordFilter, TABLE_HEADERS, filter, summarize, to_table,
};
use rattendance::errors::AppError;
use rattendance::models::attendance::AttendanceRecord;
use rattendance::models::status::AttendanceStatus;
use rattendance::models::user::{Role, User};

fn rec(
    id: u32,
    name: &str,
    date: &str,
    status: AttendanceStatus,
    minutes: Option<f64>,
) -> AttendanceRecord {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let mut r = AttendanceRecord::new(id, name, d, status);
    if minutes.is_some() {
        r.check_in = NaiveTime::from_hms_opt(9, 0, 0);
        r.check_in_verified = true;
    }
    r.duration_minutes = minutes;
    r
}

fn users() -> Vec<User> {
    vec![
        User::new(1, "Admin", Role::Admin),
        User::new(2, "Alice", Role::User),
        User::new(3, "Bob", Role::User),
    ]
}

fn sample() -> Vec<AttendanceRecord> {
    vec![
        rec(1, "Alice", "2025-03-03", AttendanceStatus::Present, Some(480.0)),
        rec(2, "Bob", "2025-03-03", AttendanceStatus::Late, Some(420.0)),
        rec(3, "Alice", "2025-03-04", AttendanceStatus::Incomplete, None),
        rec(4, "alice cooper", "2025-04-01", AttendanceStatus::Present, Some(300.0)),
    ]
}

#[test]
fn test_filter_name_is_case_insensitive_substring() {
    let f = RecordFilter {
        name: Some("ALICE".into()),
        ..Default::default()
    };
    let ids: Vec<u32> = filter(&sample(), &f).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3, 4]);
}

#[test]
fn test_filter_conjunction_and_inclusive_range() {
    let f = RecordFilter {
        name: Some("alice".into()),
        date_range: Some(DateRange::new(Some("2025-03-01".into()), Some("2025-03-04".into()))),
        status: Some(AttendanceStatus::Incomplete),
        ..Default::default()
    };
    let ids: Vec<u32> = filter(&sample(), &f).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3]);

    let exact = RecordFilter {
        date: Some("2025-03-03".into()),
        ..Default::default()
    };
    assert_eq!(filter(&sample(), &exact).len(), 2);

    assert_eq!(filter(&sample(), &RecordFilter::default()).len(), 4);
}

#[test]
fn test_table_has_fixed_columns_and_empty_missing_fields() {
    let rows = to_table(&sample());
    assert_eq!(TABLE_HEADERS.len(), 9);
    assert_eq!(rows[0].len(), TABLE_HEADERS.len());

    let incomplete = &rows[2];
    assert_eq!(incomplete[3], "");
    assert_eq!(incomplete[5], "");
    assert_eq!(incomplete[7], "");
    assert_eq!(incomplete[8], "incomplete");

    assert_eq!(rows[0][7], "480");
}

#[test]
fn test_summary_per_user_and_per_day() {
    let s = summarize(&users(), &sample(), 2025, 3).unwrap();
    assert_eq!(s.total_days, 31);

    // Admin is excluded from the per-user view
    assert_eq!(s.users.len(), 2);
    let alice = s.users.iter().find(|u| u.name == "Alice").unwrap();
    assert_eq!(alice.present_days, 1);
    assert_eq!(alice.incomplete_days, 1);
    // 31 days minus one present day; the incomplete day still counts as absent
    assert_eq!(alice.absent_days, 30);
    assert_eq!(alice.absent_records, 0);
    assert_eq!(alice.total_duration_minutes, 480.0);
    assert_eq!(alice.average_duration_minutes, 480.0);

    let bob = s.users.iter().find(|u| u.name == "Bob").unwrap();
    assert_eq!(bob.late_days, 1);
    assert_eq!(bob.absent_days, 31);

    assert_eq!(s.days.len(), 31);
    let d3 = s.days.iter().find(|d| d.date == "2025-03-03").unwrap();
    assert_eq!(d3.present, 1);
    assert_eq!(d3.late, 1);
    assert_eq!(d3.absent, 1);
    assert_eq!(d3.total_duration_minutes, 900.0);

    let d10 = s.days.iter().find(|d| d.date == "2025-03-10").unwrap();
    assert_eq!(d10.absent, 2);
}

#[test]
fn test_summary_totals() {
    let s = summarize(&users(), &sample(), 2025, 3).unwrap();
    let t = &s.totals;

    assert_eq!(t.records, 3);
    assert_eq!(t.present, 1);
    assert_eq!(t.late, 1);
    assert_eq!(t.incomplete, 1);
    assert_eq!(t.absent, 2 * 31 - 1);
    assert_eq!(t.absent_records, 0);
    assert_eq!(t.total_duration_minutes, 900.0);
    assert_eq!(t.average_duration_minutes, 450.0);
    assert_eq!(t.attendance_rate, 4.84);
}

#[test]
fn test_summary_leap_february() {
    let s = summarize(&users(), &[], 2024, 2).unwrap();
    assert_eq!(s.total_days, 29);
    assert_eq!(s.days.len(), 29);

    let s = summarize(&users(), &[], 2025, 2).unwrap();
    assert_eq!(s.total_days, 28);
    assert_eq!(s.totals.attendance_rate, 0.0);
}

#[test]
fn test_summary_rejects_invalid_month() {
    assert!(matches!(
        summarize(&users(), &[], 2025, 13),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn test_summary_counts_absent_status_records() {
    let mut records = sample();
    records.push(rec(5, "Bob", "2025-03-05", AttendanceStatus::Absent, None));

    let s = summarize(&users(), &records, 2025, 3).unwrap();

    let bob = s.users.iter().find(|u| u.name == "Bob").unwrap();
    assert_eq!(bob.absent_records, 1);
    assert_eq!(bob.absent_days, 31);

    let d5 = s.days.iter().find(|d| d.date == "2025-03-05").unwrap();
    assert_eq!(d5.absent_records, 1);
    assert_eq!(d5.absent, 2);

    assert_eq!(s.totals.records, 4);
    assert_eq!(s.totals.absent_records, 1);
    // an absent record is not an attended slot
    assert_eq!(s.totals.attendance_rate, 4.84);
}
