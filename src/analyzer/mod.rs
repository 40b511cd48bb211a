pub mod aggregate;
pub mod dashboard;
pub mod palette;
pub mod series;
pub mod stats;

pub use aggregate::{aggregate, Aggregation, DatasetSummary, TagCounts};
pub use dashboard::{build_dashboard, Dashboard};
pub use palette::{build_chart_palette, product_color, ratio_band, ChartPalette, RatioBand};
pub use series::{
    build_series, DashboardSeries, DistributionPoint, FakeRatioPoint, TrendPoint,
};
