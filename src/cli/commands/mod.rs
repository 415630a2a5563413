pub mod attend;
pub mod backup;
pub mod config;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod register;
pub mod summary;
pub mod users;

use crate::cli::parser::FilterArgs;
use crate::core::report::{DateRange, RecordFilter};
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::status::AttendanceStatus;
use crate::ui::messages::warning;
use crate::utils::date;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Turn the command-line filter flags into a [`RecordFilter`].
pub(crate) fn build_filter(args: &FilterArgs) -> AppResult<RecordFilter> {
    let check_date = |d: &String| -> AppResult<String> {
        date::parse_date(d)
            .map(|nd| nd.format("%Y-%m-%d").to_string())
            .ok_or_else(|| AppError::InvalidDate(d.clone()))
    };

    let date = args.date.as_ref().map(check_date).transpose()?;

    let date_range = if let Some(r) = &args.range {
        Some(parse_range(r)?)
    } else if args.from.is_some() || args.to.is_some() {
        let start = args.from.as_ref().map(check_date).transpose()?;
        let end = args.to.as_ref().map(check_date).transpose()?;
        if let (Some(s), Some(e)) = (&start, &end)
            && s > e
        {
            return Err(AppError::InvalidDate(format!("--from {s} is after --to {e}")));
        }
        Some(DateRange::new(start, end))
    } else {
        None
    };

    let status = args
        .status
        .as_deref()
        .map(AttendanceStatus::from_code)
        .transpose()?;

    Ok(RecordFilter {
        name: args.name.clone().filter(|n| !n.trim().is_empty()),
        date,
        date_range,
        status,
    })
}
