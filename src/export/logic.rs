// src/export/logic.rs

use crate::core::ledger::AttendanceLedger;
use crate::core::report::RecordFilter;
use crate::db::Stores;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use std::path::Path;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the records selected by `filter`.
    ///
    /// `file` must be an absolute path. Returns the number of exported records;
    /// nothing is written when the selection is empty.
    pub fn export(
        stores: &Stores,
        format: ExportFormat,
        file: &str,
        filter: &RecordFilter,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::InvalidInput(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let ledger = AttendanceLedger::new(&stores.attendance);
        let mut records = ledger.query(filter)?;
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));

        if records.is_empty() {
            warning("No attendance records found for the selected filters.");
            return Ok(0);
        }

        tracing::debug!(format = format.as_str(), count = records.len(), file, "exporting");

        match format {
            ExportFormat::Csv => export_csv(&records, path)?,
            ExportFormat::Json => export_json(&records, path)?,
            ExportFormat::Xlsx => export_xlsx(&records, path)?,
        }

        Ok(records.len())
    }
}
