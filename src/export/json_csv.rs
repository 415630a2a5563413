// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::model::{get_headers, records_to_rows};
use crate::export::notify_export_success;
use crate::models::attendance::AttendanceRecord;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed (the records as stored).
pub(crate) fn export_json(records: &[AttendanceRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(records)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV with the fixed column header.
pub(crate) fn export_csv(records: &[AttendanceRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(get_headers())?;
    for row in records_to_rows(records) {
        wtr.write_record(&row)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
