// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{get_headers, records_to_rows};
use crate::export::notify_export_success;
use crate::models::attendance::AttendanceRecord;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const STATUS_COL: usize = 8;

/// Export XLSX con styling, colonna stato colorata e auto-larghezza colonne.
pub(crate) fn export_xlsx(records: &[AttendanceRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance").map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let headers = get_headers();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    // ---------------------------
    // Righe
    // ---------------------------
    for (row_index, values) in records_to_rows(records).iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 {
            Color::RGB(0xEAF3FB)
        } else {
            Color::RGB(0xFFFFFF)
        };

        for (col, value) in values.iter().enumerate() {
            let bg = if col == STATUS_COL {
                status_color(value).unwrap_or(band)
            } else {
                band
            };
            write_cell(worksheet, row, col as u16, value, bg)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Date / time as Excel serials, numbers right-aligned, everything else as text.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        ws.write_with_format(row, col, serial, &base.set_num_format(num_format))
            .map_err(to_export_error)?;
    } else if let Ok(num) = s.parse::<f64>() {
        ws.write_with_format(row, col, num, &base.set_align(FormatAlign::Right))
            .map_err(to_export_error)?;
    } else {
        ws.write_with_format(row, col, s, &base)
            .map_err(to_export_error)?;
    }
    Ok(())
}

fn status_color(status: &str) -> Option<Color> {
    match status {
        "present" => Some(Color::RGB(0xC6EFCE)),
        "late" => Some(Color::RGB(0xFFEB9C)),
        "incomplete" => Some(Color::RGB(0xD9D9D9)),
        "absent" => Some(Color::RGB(0xFFC7CE)),
        _ => None,
    }
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
