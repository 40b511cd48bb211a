use serde::{Deserialize, Serialize};

use super::deserializers::de;

/// Real/fake label attached to a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Real,
    Fake,
}

/// One labelled review observation.
///
/// Every field is optional: upstream data may be incomplete, and the
/// aggregator leaves a record out of whichever grouping needs the missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    #[serde(default, deserialize_with = "de::opt_lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_lenient_string")]
    pub prod_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_lenient_string")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_tag")]
    pub tag: Option<Tag>,
}

impl ReviewRecord {
    pub fn new(date: &str, prod_id: &str, user_id: &str, tag: Tag) -> Self {
        ReviewRecord {
            date: Some(date.to_string()),
            prod_id: Some(prod_id.to_string()),
            user_id: Some(user_id.to_string()),
            tag: Some(tag),
        }
    }

    pub fn is_fake(&self) -> bool {
        self.tag == Some(Tag::Fake)
    }

    pub fn is_real(&self) -> bool {
        self.tag == Some(Tag::Real)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub min: String,
    pub max: String,
}

/// Quick look at a parsed dataset, shown right after upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInfo {
    pub rows: usize,
    pub products: usize,
    pub date_range: Option<DateRange>,
    pub fake_count: usize,
    pub sample: Vec<ReviewRecord>,
}
