// src/export/model.rs

use crate::core::report::{TABLE_HEADERS, to_table};
use crate::models::attendance::AttendanceRecord;

/// Header per CSV / XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    TABLE_HEADERS.to_vec()
}

/// Records as string rows in header order.
pub(crate) fn records_to_rows(records: &[AttendanceRecord]) -> Vec<Vec<String>> {
    to_table(records)
}
