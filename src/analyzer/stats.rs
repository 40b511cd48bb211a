//! Small numeric helpers shared by the aggregation passes.

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `part / total * 100`, rounded to two decimals. Returns 0.0 when `total`
/// is zero instead of NaN.
pub fn ratio_percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}
