use rust_xlsxwriter::{Chart, ChartType, Workbook, XlsxError};

use crate::analyzer::aggregate::DatasetSummary;
use crate::analyzer::dashboard::Dashboard;
use crate::analyzer::palette::ratio_band;
use crate::analyzer::series::{DistributionPoint, FakeRatioPoint, TrendPoint};
use crate::config::{AppConfig, RatioBands};
use crate::error::AppError;
use crate::export::{
    apply_ratio_band_format, create_header_format, create_integer_format, create_ratio_format,
};

const TREND_SHEET: &str = "Trend";

/// Three-sheet workbook: Summary, Trend (with a line chart) and Products.
/// Returns the XLSX bytes.
pub fn generate_dashboard_report(
    dashboard: &Dashboard,
    config: &AppConfig,
) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    write_summary(&mut wb, &dashboard.summary)?;
    write_trend(&mut wb, &dashboard.series.trend)?;
    write_products(
        &mut wb,
        &dashboard.series.distribution,
        &dashboard.series.fake_ratio,
        &config.ratio_bands,
    )?;
    Ok(wb.save_to_buffer()?)
}

// ── Sheet 1: Summary ─────────────────────────────────────────────────────────

fn write_summary(wb: &mut Workbook, s: &DatasetSummary) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Summary")?;

    let hdr = create_header_format();
    let int = create_integer_format();
    let ratio = create_ratio_format();

    ws.write_with_format(0, 0, "Indicator", &hdr)?;
    ws.write_with_format(0, 1, "Value", &hdr)?;

    let counts: &[(&str, usize)] = &[
        ("Total comments", s.total_comments),
        ("Real comments", s.real_comments),
        ("Fake comments", s.fake_comments),
        ("Products", s.product_count),
        ("Users", s.user_count),
    ];
    for (i, (label, val)) in counts.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, *label)?;
        ws.write_with_format(row, 1, *val as f64, &int)?;
    }
    let row = (counts.len() + 1) as u32;
    ws.write(row, 0, "Fake ratio (%)")?;
    ws.write_with_format(row, 1, s.fake_ratio_percent, &ratio)?;

    ws.set_column_width(0, 22)?;
    ws.set_column_width(1, 14)?;

    Ok(())
}

// ── Sheet 2: Trend ───────────────────────────────────────────────────────────

fn write_trend(wb: &mut Workbook, trend: &[TrendPoint]) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(TREND_SHEET)?;

    let hdr = create_header_format();
    let int = create_integer_format();

    let headers = ["Date", "Real", "Fake"];
    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, *h, &hdr)?;
    }

    for (i, p) in trend.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, p.date.as_str())?;
        ws.write_with_format(row, 1, p.real as f64, &int)?;
        ws.write_with_format(row, 2, p.fake as f64, &int)?;
    }

    ws.set_column_width(0, 14)?;
    ws.set_column_width(1, 10)?;
    ws.set_column_width(2, 10)?;

    if !trend.is_empty() {
        let last = trend.len() as u32;
        let mut chart = Chart::new(ChartType::Line);
        chart.title().set_name("Daily comment trend");
        chart
            .add_series()
            .set_name("Real")
            .set_categories((TREND_SHEET, 1, 0, last, 0))
            .set_values((TREND_SHEET, 1, 1, last, 1));
        chart
            .add_series()
            .set_name("Fake")
            .set_categories((TREND_SHEET, 1, 0, last, 0))
            .set_values((TREND_SHEET, 1, 2, last, 2));
        ws.insert_chart(1, 4, &chart)?;
    }

    Ok(())
}

// ── Sheet 3: Products ────────────────────────────────────────────────────────

fn write_products(
    wb: &mut Workbook,
    distribution: &[DistributionPoint],
    fake_ratio: &[FakeRatioPoint],
    bands: &RatioBands,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Products")?;

    let hdr = create_header_format();
    let int = create_integer_format();
    let ratio = create_ratio_format();

    let headers = ["Product", "Comments", "Fake ratio (%)", "Band"];
    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(0, col as u16, *h, &hdr)?;
    }

    // Both series come out of the same product grouping, in the same order.
    for (i, (d, r)) in distribution.iter().zip(fake_ratio).enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, d.prod_id.as_str())?;
        ws.write_with_format(row, 1, d.count as f64, &int)?;
        ws.write_with_format(row, 2, r.fake_ratio_percent, &ratio)?;
        ws.write(row, 3, ratio_band(r.fake_ratio_percent, bands).color())?;
    }

    let n = distribution.len().min(fake_ratio.len());
    if n > 0 {
        apply_ratio_band_format(ws, 1, 2, n as u32, bands)?;
    }

    ws.set_column_width(0, 18)?;
    ws.set_column_width(1, 12)?;
    ws.set_column_width(2, 16)?;
    ws.set_column_width(3, 10)?;
    ws.set_freeze_panes(1, 0)?;

    Ok(())
}
