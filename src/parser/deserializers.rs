use chrono::{NaiveDate, NaiveDateTime};

use super::types::Tag;

const ISO_DATE_FMT: &str = "%Y-%m-%d";

/// Date layouts seen in uploaded datasets, tried in order.
const DATE_FMTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];
const DATETIME_FMTS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Normalise a date cell to `YYYY-MM-DD`. Returns None for empty or
/// unrecognised strings.
pub fn normalize_date(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d.format(ISO_DATE_FMT).to_string());
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date().format(ISO_DATE_FMT).to_string());
        }
    }
    None
}

/// "real" / "fake" (any case, surrounding whitespace ignored) → Tag.
pub fn parse_tag(s: &str) -> Option<Tag> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("real") {
        Some(Tag::Real)
    } else if trimmed.eq_ignore_ascii_case("fake") {
        Some(Tag::Fake)
    } else {
        None
    }
}

/// "" or whitespace → None, otherwise the trimmed value.
pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Serde-compatible deserializers for use with `#[serde(deserialize_with = "de::...")]`.
pub mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::super::types::Tag;

    /// Accepts a string, a number, a bool or null. Numbers show up when the
    /// backend serialises numeric id columns as-is.
    pub fn opt_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(deserializer)?;
        Ok(match v {
            Value::String(s) => super::non_empty(&s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    /// "real" / "fake" → Some(tag); anything else (including null) → None.
    pub fn opt_tag<'de, D>(deserializer: D) -> Result<Option<Tag>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(deserializer)?;
        Ok(match v {
            Value::String(s) => super::parse_tag(&s),
            _ => None,
        })
    }
}
