//! Attendance ledger: one record per (name, date), reconciled event by event.

use crate::core::report::{self, RecordFilter};
use crate::db::store::Collection;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceRecord, SENTINEL_CHECK_IN};
use crate::models::event_type::EventType;
use crate::models::status::AttendanceStatus;
use crate::utils::time::{minutes_between, now_local};
use chrono::{NaiveDateTime, NaiveTime};

/// Manual change to one side of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeEdit {
    #[default]
    Keep,
    Set(NaiveTime),
    Clear,
}

impl TimeEdit {
    fn apply(self, current: Option<NaiveTime>) -> Option<NaiveTime> {
        match self {
            TimeEdit::Keep => current,
            TimeEdit::Set(t) => Some(t),
            TimeEdit::Clear => None,
        }
    }

    fn is_change(&self) -> bool {
        !matches!(self, TimeEdit::Keep)
    }
}

pub struct AttendanceLedger<'a> {
    records: &'a Collection<AttendanceRecord>,
}

impl<'a> AttendanceLedger<'a> {
    pub fn new(records: &'a Collection<AttendanceRecord>) -> Self {
        Self { records }
    }

    /// Reconcile an event at the current local time.
    pub fn record_event(
        &self,
        name: &str,
        kind: EventType,
        force: bool,
    ) -> AppResult<AttendanceRecord> {
        self.record_event_at(name, kind, force, now_local())
    }

    /// Reconcile an event at `now` into the (name, now.date) record.
    ///
    /// | record | event     | effect                                                        |
    /// |--------|-----------|---------------------------------------------------------------|
    /// | none   | check-in  | new record, verified check-in, `present`                      |
    /// | none   | check-out | new record, verified check-out, `00:00:00` check-in, `incomplete` |
    /// | some   | check-in  | only when `check_in` is unset or `force` (`00:00:00` is set) |
    /// | some   | check-out | always overwritten, duration recomputed when check-in is set  |
    pub fn record_event_at(
        &self,
        name: &str,
        kind: EventType,
        force: bool,
        now: NaiveDateTime,
    ) -> AppResult<AttendanceRecord> {
        let date = now.date();
        let time = now.time();

        let record = self.records.update(|records| {
            if let Some(rec) = records.iter_mut().find(|r| r.name == name && r.date == date) {
                match kind {
                    EventType::CheckIn => {
                        if rec.check_in.is_none() || force {
                            rec.check_in = Some(time);
                            rec.check_in_verified = true;
                            rec.check_in_timestamp = Some(now);
                        } else {
                            tracing::debug!(name, %date, "check-in already set, left untouched");
                        }
                    }
                    EventType::CheckOut => {
                        rec.check_out = Some(time);
                        rec.check_out_verified = true;
                        rec.check_out_timestamp = Some(now);
                        if let Some(check_in) = rec.check_in {
                            rec.duration_minutes = Some(minutes_between(check_in, time));
                        }
                    }
                }
                return Ok(rec.clone());
            }

            let id = next_id(records);
            let rec = match kind {
                EventType::CheckIn => {
                    let mut r = AttendanceRecord::new(id, name, date, AttendanceStatus::Present);
                    r.check_in = Some(time);
                    r.check_in_verified = true;
                    r.check_in_timestamp = Some(now);
                    r
                }
                EventType::CheckOut => {
                    let mut r = AttendanceRecord::new(id, name, date, AttendanceStatus::Incomplete);
                    r.check_in = Some(SENTINEL_CHECK_IN);
                    r.check_in_verified = false;
                    r.check_out = Some(time);
                    r.check_out_verified = true;
                    r.check_out_timestamp = Some(now);
                    r
                }
            };
            records.push(rec.clone());
            Ok(rec)
        })?;

        tracing::info!(
            name,
            date = %record.date,
            event = kind.et_as_str(),
            status = %record.status,
            "attendance event recorded"
        );
        Ok(record)
    }

    /// Manual correction of a record's times.
    ///
    /// Edited sides become unverified. The status is re-derived from what is
    /// left: both times → `late` after `late_after`, else `present`; one side
    /// only → `incomplete`; none → `absent`.
    pub fn amend(
        &self,
        id: u32,
        check_in: TimeEdit,
        check_out: TimeEdit,
        late_after: NaiveTime,
    ) -> AppResult<AttendanceRecord> {
        if !check_in.is_change() && !check_out.is_change() {
            return Err(AppError::InvalidInput(
                "Nothing to do: specify at least --in, --out, --clear-in or --clear-out.".into(),
            ));
        }

        let record = self.records.update(|records| {
            let rec = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| AppError::NotFound(format!("attendance record {id}")))?;
            let date = rec.date;

            if check_in.is_change() {
                rec.check_in = check_in.apply(rec.check_in);
                rec.check_in_verified = false;
                rec.check_in_timestamp = rec.check_in.map(|t| date.and_time(t));
            }
            if check_out.is_change() {
                rec.check_out = check_out.apply(rec.check_out);
                rec.check_out_verified = false;
                rec.check_out_timestamp = rec.check_out.map(|t| date.and_time(t));
            }

            match (rec.check_in, rec.check_out) {
                (Some(start), Some(end)) => {
                    rec.duration_minutes = Some(minutes_between(start, end));
                    rec.status = if start > late_after {
                        AttendanceStatus::Late
                    } else {
                        AttendanceStatus::Present
                    };
                }
                (None, None) => {
                    rec.duration_minutes = None;
                    rec.status = AttendanceStatus::Absent;
                }
                _ => {
                    rec.duration_minutes = None;
                    rec.status = AttendanceStatus::Incomplete;
                }
            }

            Ok(rec.clone())
        })?;

        tracing::info!(id, status = %record.status, "attendance record amended");
        Ok(record)
    }

    pub fn all(&self) -> AppResult<Vec<AttendanceRecord>> {
        self.records.load()
    }

    pub fn get(&self, id: u32) -> AppResult<Option<AttendanceRecord>> {
        Ok(self.records.load()?.into_iter().find(|r| r.id == id))
    }

    pub fn query(&self, filter: &RecordFilter) -> AppResult<Vec<AttendanceRecord>> {
        let records = self.records.load()?;
        Ok(report::filter(&records, filter))
    }
}

fn next_id(records: &[AttendanceRecord]) -> u32 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}
