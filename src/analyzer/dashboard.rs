//! Visualization payload: summary counters plus chart series for one dataset.
use std::time::Instant;

use serde::Serialize;

use super::aggregate::{aggregate, DatasetSummary};
use super::series::{build_series, DashboardSeries};
use crate::parser::types::ReviewRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: DatasetSummary,
    #[serde(flatten)]
    pub series: DashboardSeries,
}

/// Run aggregation then series construction. Pure: the same records always
/// give the same dashboard.
pub fn build_dashboard(records: &[ReviewRecord]) -> Dashboard {
    let start = Instant::now();
    let agg = aggregate(records);
    let series = build_series(&agg);
    log::info!(
        "Dashboard built: {} comments ({}% fake) over {} products in {} µs",
        agg.summary.total_comments,
        agg.summary.fake_ratio_percent,
        agg.summary.product_count,
        start.elapsed().as_micros()
    );
    Dashboard {
        summary: agg.summary,
        series,
    }
}
