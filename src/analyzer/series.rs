use serde::Serialize;

use super::aggregate::Aggregation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub real: usize,
    pub fake: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionPoint {
    pub prod_id: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FakeRatioPoint {
    pub prod_id: String,
    pub fake_ratio_percent: f64,
}

/// The three chart series derived from one aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSeries {
    pub trend: Vec<TrendPoint>,
    pub distribution: Vec<DistributionPoint>,
    pub fake_ratio: Vec<FakeRatioPoint>,
}

/// Date-ordered real/fake counts. Dates are ISO strings, so the map's
/// lexicographic order is chronological.
pub fn build_trend(agg: &Aggregation) -> Vec<TrendPoint> {
    agg.by_date
        .iter()
        .map(|(date, c)| TrendPoint {
            date: date.clone(),
            real: c.real,
            fake: c.fake,
        })
        .collect()
}

pub fn build_distribution(agg: &Aggregation) -> Vec<DistributionPoint> {
    agg.by_product
        .iter()
        .map(|(prod_id, c)| DistributionPoint {
            prod_id: prod_id.clone(),
            count: c.total,
        })
        .collect()
}

pub fn build_fake_ratio(agg: &Aggregation) -> Vec<FakeRatioPoint> {
    agg.by_product
        .iter()
        .map(|(prod_id, c)| FakeRatioPoint {
            prod_id: prod_id.clone(),
            fake_ratio_percent: c.fake_ratio_percent(),
        })
        .collect()
}

pub fn build_series(agg: &Aggregation) -> DashboardSeries {
    DashboardSeries {
        trend: build_trend(agg),
        distribution: build_distribution(agg),
        fake_ratio: build_fake_ratio(agg),
    }
}
