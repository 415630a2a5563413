use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rattendance::core::ledger::{AttendanceLedger, TimeEdit};
use rattendance::db::Stores;
use rattendance::errors::AppError;
use rattendance::models::event_type::EventType;
use rattendance::models::status::AttendanceStatus;

fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_check_in_creates_present_record() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    let r = ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2025-03-03", "08:55:10"))
        .unwrap();

    assert_eq!(r.id, 1);
    assert_eq!(r.date_str(), "2025-03-03");
    assert_eq!(r.check_in_str(), "08:55:10");
    assert!(r.check_in_verified);
    assert_eq!(r.check_out, None);
    assert_eq!(r.status, AttendanceStatus::Present);
    assert_eq!(r.check_in_timestamp, Some(at("2025-03-03", "08:55:10")));
}

#[test]
fn test_second_check_in_is_ignored_without_force() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2025-03-03", "08:00:00"))
        .unwrap();
    let r = ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2025-03-03", "10:00:00"))
        .unwrap();

    assert_eq!(r.check_in_str(), "08:00:00");
    assert_eq!(ledger.all().unwrap().len(), 1);

    let forced = ledger
        .record_event_at("Alice", EventType::CheckIn, true, at("2025-03-03", "10:00:00"))
        .unwrap();
    assert_eq!(forced.check_in_str(), "10:00:00");
}

#[test]
fn test_check_out_computes_duration() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2025-03-03", "09:00:00"))
        .unwrap();
    let r = ledger
        .record_event_at("Alice", EventType::CheckOut, false, at("2025-03-03", "17:30:00"))
        .unwrap();

    assert_eq!(r.check_out_str(), "17:30:00");
    assert!(r.check_out_verified);
    assert_eq!(r.duration_minutes, Some(510.0));
    assert_eq!(r.status, AttendanceStatus::Present);
}

#[test]
fn test_repeated_check_out_overwrites() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2025-03-03", "09:00:00"))
        .unwrap();
    ledger
        .record_event_at("Alice", EventType::CheckOut, false, at("2025-03-03", "12:00:00"))
        .unwrap();
    let r = ledger
        .record_event_at("Alice", EventType::CheckOut, false, at("2025-03-03", "18:00:00"))
        .unwrap();

    assert_eq!(r.check_out_str(), "18:00:00");
    assert_eq!(r.duration_minutes, Some(540.0));
}

#[test]
fn test_check_out_without_record_uses_sentinel() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    let r = ledger
        .record_event_at("Bob", EventType::CheckOut, false, at("2025-03-03", "17:00:00"))
        .unwrap();

    assert_eq!(r.check_in_str(), "00:00:00");
    assert!(!r.check_in_verified);
    assert!(r.has_sentinel_check_in());
    assert_eq!(r.check_out_str(), "17:00:00");
    assert_eq!(r.status, AttendanceStatus::Incomplete);
    assert_eq!(r.duration_minutes, None);
}

#[test]
fn test_check_in_after_check_out_only_day_needs_force() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    ledger
        .record_event_at("Bob", EventType::CheckOut, false, at("2025-03-03", "12:00:00"))
        .unwrap();

    // the 00:00:00 placeholder is a set check-in
    let r = ledger
        .record_event_at("Bob", EventType::CheckIn, false, at("2025-03-03", "13:00:00"))
        .unwrap();
    assert_eq!(r.check_in_str(), "00:00:00");
    assert!(!r.check_in_verified);
    assert_eq!(r.check_in_timestamp, None);

    let forced = ledger
        .record_event_at("Bob", EventType::CheckIn, true, at("2025-03-03", "13:00:00"))
        .unwrap();
    assert_eq!(forced.check_in_str(), "13:00:00");
    assert!(forced.check_in_verified);
    assert!(!forced.has_sentinel_check_in());
}

#[test]
fn test_second_check_out_measures_from_placeholder() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    let first = ledger
        .record_event_at("Bob", EventType::CheckOut, false, at("2025-03-03", "17:30:00"))
        .unwrap();
    assert_eq!(first.duration_minutes, None);

    let second = ledger
        .record_event_at("Bob", EventType::CheckOut, false, at("2025-03-03", "17:30:00"))
        .unwrap();
    assert_eq!(second.duration_minutes, Some(1050.0));
    assert_eq!(second.status, AttendanceStatus::Incomplete);
}

#[test]
fn test_one_record_per_name_and_date() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2025-03-03", "09:00:00"))
        .unwrap();
    ledger
        .record_event_at("Bob", EventType::CheckIn, false, at("2025-03-03", "09:05:00"))
        .unwrap();
    let next_day = ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2025-03-04", "09:00:00"))
        .unwrap();

    assert_eq!(ledger.all().unwrap().len(), 3);
    assert_eq!(next_day.id, 3);
}

#[test]
fn test_check_out_before_check_in_is_negative() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    ledger
        .record_event_at("Night", EventType::CheckIn, false, at("2025-03-03", "22:00:00"))
        .unwrap();
    let r = ledger
        .record_event_at("Night", EventType::CheckOut, false, at("2025-03-03", "21:00:00"))
        .unwrap();

    assert_eq!(r.duration_minutes, Some(-60.0));
}

#[test]
fn test_amend_late_and_present() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    let r = ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2025-03-03", "08:00:00"))
        .unwrap();

    let late = ledger
        .amend(r.id, TimeEdit::Set(hm(9, 30)), TimeEdit::Set(hm(17, 0)), hm(9, 0))
        .unwrap();
    assert_eq!(late.status, AttendanceStatus::Late);
    assert_eq!(late.duration_minutes, Some(450.0));
    assert!(!late.check_in_verified);
    assert!(!late.check_out_verified);
    assert_eq!(late.check_out_timestamp, Some(at("2025-03-03", "17:00:00")));

    let present = ledger
        .amend(r.id, TimeEdit::Set(hm(9, 0)), TimeEdit::Keep, hm(9, 0))
        .unwrap();
    assert_eq!(present.status, AttendanceStatus::Present);
    assert_eq!(present.duration_minutes, Some(480.0));
}

#[test]
fn test_amend_clearing_sides() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2025-03-03", "08:00:00"))
        .unwrap();
    let r = ledger
        .record_event_at("Alice", EventType::CheckOut, false, at("2025-03-03", "16:00:00"))
        .unwrap();

    let one_side = ledger
        .amend(r.id, TimeEdit::Keep, TimeEdit::Clear, hm(9, 0))
        .unwrap();
    assert_eq!(one_side.status, AttendanceStatus::Incomplete);
    assert_eq!(one_side.duration_minutes, None);
    assert_eq!(one_side.check_out_timestamp, None);
    // untouched side keeps its flag
    assert!(one_side.check_in_verified);

    let none = ledger
        .amend(r.id, TimeEdit::Clear, TimeEdit::Keep, hm(9, 0))
        .unwrap();
    assert_eq!(none.status, AttendanceStatus::Absent);
}

#[test]
fn test_amend_errors() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    assert!(matches!(
        ledger.amend(1, TimeEdit::Keep, TimeEdit::Keep, hm(9, 0)),
        Err(AppError::InvalidInput(_))
    ));
    assert!(matches!(
        ledger.amend(42, TimeEdit::Set(hm(9, 0)), TimeEdit::Keep, hm(9, 0)),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_record_dates_follow_the_event() {
    let stores = Stores::in_memory();
    let ledger = AttendanceLedger::new(&stores.attendance);

    let r = ledger
        .record_event_at("Alice", EventType::CheckIn, false, at("2024-02-29", "07:00:00"))
        .unwrap();
    assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!(ledger.get(r.id).unwrap().map(|x| x.name), Some("Alice".into()));
}
