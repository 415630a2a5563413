//! Formatting utilities used for CLI and export outputs.

use crate::models::status::AttendanceStatus;
use crate::utils::colors::{GREEN, GREY, RED, YELLOW};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Minutes as `HHh MMm` (or `HH:MM` when `short`), rounded to the minute.
pub fn mins2readable(mins: f64, short: bool) -> String {
    let rounded = mins.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    let abs_m = rounded.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Shortest decimal form: `510`, `510.5`, `-12.25`.
pub fn format_minutes(mins: f64) -> String {
    let rounded = (mins * 100.0).round() / 100.0;
    format!("{}", rounded)
}

/// Restituisce una descrizione testuale e un colore ANSI per lo stato.
pub fn describe_status(status: AttendanceStatus) -> (&'static str, &'static str) {
    match status {
        AttendanceStatus::Present => ("Present", GREEN),
        AttendanceStatus::Late => ("Late", YELLOW),
        AttendanceStatus::Incomplete => ("Incomplete", GREY),
        AttendanceStatus::Absent => ("Absent", RED),
    }
}
