//! Colour and severity decoration for the chart series. Kept apart from the
//! series themselves so styling never changes what a series contains.
use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use super::series::DashboardSeries;
use crate::config::RatioBands;

pub const REAL_COLOR: &str = "green";
pub const FAKE_COLOR: &str = "red";

/// Severity of a product's fake ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RatioBand {
    #[serde(rename = "green")]
    Normal,
    #[serde(rename = "orange")]
    Warning,
    #[serde(rename = "red")]
    Critical,
}

impl RatioBand {
    pub fn color(&self) -> &'static str {
        match self {
            RatioBand::Normal => "green",
            RatioBand::Warning => "orange",
            RatioBand::Critical => "red",
        }
    }
}

/// Critical : percent > bands.critical
/// Warning  : bands.warning < percent <= bands.critical
/// Normal   : percent <= bands.warning
pub fn ratio_band(percent: f64, bands: &RatioBands) -> RatioBand {
    if percent > bands.critical {
        RatioBand::Critical
    } else if percent > bands.warning {
        RatioBand::Warning
    } else {
        RatioBand::Normal
    }
}

/// Stable HSL colour for a product id, derived from its xxh3 hash.
pub fn product_color(prod_id: &str) -> String {
    let hue = xxh3_64(prod_id.as_bytes()) % 360;
    format!("hsl({}, 70%, 50%)", hue)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStyle {
    pub prod_id: String,
    pub color: String,
    pub band: RatioBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPalette {
    pub real_color: &'static str,
    pub fake_color: &'static str,
    pub products: Vec<ProductStyle>,
}

pub fn build_chart_palette(series: &DashboardSeries, bands: &RatioBands) -> ChartPalette {
    let products = series
        .fake_ratio
        .iter()
        .map(|p| ProductStyle {
            prod_id: p.prod_id.clone(),
            color: product_color(&p.prod_id),
            band: ratio_band(p.fake_ratio_percent, bands),
        })
        .collect();

    ChartPalette {
        real_color: REAL_COLOR,
        fake_color: FAKE_COLOR,
        products,
    }
}
