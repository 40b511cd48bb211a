use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::stats::ratio_percent;
use crate::parser::types::{ReviewRecord, Tag};

/// Headline counters for one dataset.
///
/// Untagged records are left out of `total_comments` but still counted in
/// their product's group, so the distribution series can sum to more than
/// `total_comments`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub total_comments: usize,
    pub fake_comments: usize,
    pub real_comments: usize,
    pub fake_ratio_percent: f64,
    pub product_count: usize,
    pub user_count: usize,
}

/// Per-group counts. `total` includes untagged records, so it can exceed
/// `real + fake`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagCounts {
    pub total: usize,
    pub real: usize,
    pub fake: usize,
}

impl TagCounts {
    fn add(&mut self, tag: Option<Tag>) {
        self.total += 1;
        match tag {
            Some(Tag::Real) => self.real += 1,
            Some(Tag::Fake) => self.fake += 1,
            None => {}
        }
    }

    pub fn fake_ratio_percent(&self) -> f64 {
        ratio_percent(self.fake, self.total)
    }
}

/// Everything the series builder needs, keyed by literal date and product id.
/// `BTreeMap` keeps both groupings in ascending key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub summary: DatasetSummary,
    pub by_date: BTreeMap<String, TagCounts>,
    pub by_product: BTreeMap<String, TagCounts>,
}

/// Aggregate a dataset. Never fails: records missing `date`, `prod_id` or
/// `tag` are simply left out of the grouping that needs that field.
pub fn aggregate(records: &[ReviewRecord]) -> Aggregation {
    let mut by_date: BTreeMap<String, TagCounts> = BTreeMap::new();
    let mut by_product: BTreeMap<String, TagCounts> = BTreeMap::new();
    let mut users: HashSet<&str> = HashSet::new();
    let mut real = 0usize;
    let mut fake = 0usize;

    for r in records {
        if r.is_real() {
            real += 1;
        } else if r.is_fake() {
            fake += 1;
        }
        if let Some(date) = &r.date {
            by_date.entry(date.clone()).or_default().add(r.tag);
        }
        if let Some(prod_id) = &r.prod_id {
            by_product.entry(prod_id.clone()).or_default().add(r.tag);
        }
        if let Some(user_id) = r.user_id.as_deref() {
            users.insert(user_id);
        }
    }

    let total = real + fake;
    let summary = DatasetSummary {
        total_comments: total,
        fake_comments: fake,
        real_comments: real,
        fake_ratio_percent: ratio_percent(fake, total),
        product_count: by_product.len(),
        user_count: users.len(),
    };

    log::debug!(
        "Aggregated {} records: {} dates, {} products, {} users",
        records.len(),
        by_date.len(),
        summary.product_count,
        summary.user_count
    );

    Aggregation {
        summary,
        by_date,
        by_product,
    }
}
