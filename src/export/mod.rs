pub mod dashboard_report;
pub mod flat;

use std::path::Path;
use std::time::Instant;

use rust_xlsxwriter::{
    ConditionalFormatCell, ConditionalFormatCellRule, Format, FormatBorder, Worksheet, XlsxError,
};
use serde::Serialize;

use crate::analyzer::dashboard::Dashboard;
use crate::config::{AppConfig, RatioBands};
use crate::error::AppError;

pub use dashboard_report::generate_dashboard_report;
pub use flat::{to_csv, to_json_pretty};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub size_bytes: u64,
    pub duration_ms: u64,
}

/// Header: bold white text on blue, thin border.
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

pub fn create_integer_format() -> Format {
    Format::new().set_num_format("#,##0")
}

/// Percent values are stored as 0..100, not as fractions.
pub fn create_ratio_format() -> Format {
    Format::new().set_num_format("0.00")
}

/// Three-level colouring of a ratio column, matching `analyzer::palette::ratio_band`.
/// Red > critical | Orange > warning | Green otherwise.
pub fn apply_ratio_band_format(
    ws: &mut Worksheet,
    first_row: u32,
    col: u16,
    last_row: u32,
    bands: &RatioBands,
) -> Result<(), XlsxError> {
    let green = Format::new()
        .set_background_color("C6EFCE")
        .set_font_color("006100");
    let orange = Format::new()
        .set_background_color("F4B084")
        .set_font_color("833C0C");
    let red = Format::new()
        .set_background_color("FFC7CE")
        .set_font_color("9C0006");

    // Earlier rules take priority.
    ws.add_conditional_format(
        first_row,
        col,
        last_row,
        col,
        &ConditionalFormatCell::new()
            .set_rule(ConditionalFormatCellRule::GreaterThan(bands.critical))
            .set_format(&red),
    )?;
    ws.add_conditional_format(
        first_row,
        col,
        last_row,
        col,
        &ConditionalFormatCell::new()
            .set_rule(ConditionalFormatCellRule::GreaterThan(bands.warning))
            .set_format(&orange),
    )?;
    ws.add_conditional_format(
        first_row,
        col,
        last_row,
        col,
        &ConditionalFormatCell::new()
            .set_rule(ConditionalFormatCellRule::LessThanOrEqualTo(bands.warning))
            .set_format(&green),
    )?;

    Ok(())
}

/// Write an export payload to disk and report its size.
pub fn write_export(
    path: impl AsRef<Path>,
    bytes: &[u8],
    start: Instant,
) -> Result<ExportResult, AppError> {
    let path = path.as_ref();
    std::fs::write(path, bytes)?;
    let result = ExportResult {
        path: path.display().to_string(),
        size_bytes: bytes.len() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    log::info!("Exported {} ({} bytes)", result.path, result.size_bytes);
    Ok(result)
}

pub fn export_dashboard_xlsx(
    path: impl AsRef<Path>,
    dashboard: &Dashboard,
    config: &AppConfig,
) -> Result<ExportResult, AppError> {
    let start = Instant::now();
    let bytes = generate_dashboard_report(dashboard, config)?;
    write_export(path, &bytes, start)
}

/// CSV export of any flat row type. Returns `Ok(None)` when there is nothing
/// to export.
pub fn export_csv<T: Serialize>(
    path: impl AsRef<Path>,
    rows: &[T],
) -> Result<Option<ExportResult>, AppError> {
    let start = Instant::now();
    match to_csv(rows)? {
        Some(text) => Ok(Some(write_export(path, text.as_bytes(), start)?)),
        None => {
            log::warn!("No data to export");
            Ok(None)
        }
    }
}

pub fn export_json<T: Serialize>(
    path: impl AsRef<Path>,
    value: &T,
) -> Result<ExportResult, AppError> {
    let start = Instant::now();
    let text = to_json_pretty(value)?;
    write_export(path, text.as_bytes(), start)
}
