use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Number of days in the given month, `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => {
            let leap = (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0);
            Some(if leap { 29 } else { 28 })
        }
        _ => None,
    }
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(last) = days_in_month(year, month) else {
        return Vec::new();
    };

    (1..=last)
        .filter_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .collect()
}

/// "YYYY-MM" prefix used to select a month from "YYYY-MM-DD" strings.
pub fn month_prefix(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

pub fn current_year_month() -> (i32, u32) {
    let t = today();
    (t.year(), t.month())
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn month_name(m: u32) -> &'static str {
    match m {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}
