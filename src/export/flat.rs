use serde::Serialize;

use crate::error::AppError;

/// Serialize flat rows as CSV: a header line built from the field names, then
/// one line per row. Fields containing a comma, a quote or a newline are
/// quoted with inner quotes doubled. Returns `None` for an empty slice.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<Option<String>, AppError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        wtr.serialize(row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Custom(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| AppError::Custom(e.to_string()))?;
    Ok(Some(text))
}

/// Pretty JSON with two-space indentation.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}
