use std::collections::HashMap;

use crate::error::AppError;

/// Required columns: the import fails if any of them is absent.
const REQUIRED: &[&str] = &["prod_id", "date", "tag"];

/// Optional columns: absent means the field stays empty, reported in the result.
const OPTIONAL: &[&str] = &["user_id"];

/// Maps column names to their index in a CSV record.
pub struct ColumnMap {
    indices: HashMap<String, usize>,
    headers: Vec<String>,
}

impl ColumnMap {
    /// Header fields are trimmed, a leading UTF-8 BOM is dropped.
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut indices = HashMap::new();
        let mut header_list = Vec::new();
        for (i, field) in headers.iter().enumerate() {
            let name = field.trim_start_matches('\u{FEFF}').trim().to_string();
            indices.entry(name.clone()).or_insert(i);
            header_list.push(name);
        }
        ColumnMap {
            indices,
            headers: header_list,
        }
    }

    pub fn get<'a>(&self, record: &'a csv::StringRecord, col: &str) -> Option<&'a str> {
        self.indices.get(col).and_then(|&i| record.get(i))
    }

    pub fn has(&self, col: &str) -> bool {
        self.indices.contains_key(col)
    }

    pub fn all_headers(&self) -> &[String] {
        &self.headers
    }
}

#[derive(Debug)]
pub struct ColumnValidation {
    pub present: Vec<String>,
    pub missing_optional: Vec<String>,
}

/// Returns `AppError::MissingColumns` if any required column is absent.
pub fn validate_columns(col_map: &ColumnMap) -> Result<ColumnValidation, AppError> {
    let missing_required: Vec<String> = REQUIRED
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    if !missing_required.is_empty() {
        return Err(AppError::MissingColumns(missing_required));
    }

    let missing_optional = OPTIONAL
        .iter()
        .filter(|&&c| !col_map.has(c))
        .map(|c| c.to_string())
        .collect();

    Ok(ColumnValidation {
        present: col_map.all_headers().to_vec(),
        missing_optional,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_headers(cols: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(cols.to_vec())
    }

    #[test]
    fn test_column_map_get() {
        let cm = ColumnMap::from_headers(&make_headers(&["date", "prod_id"]));
        let record = csv::StringRecord::from(vec!["2024-01-01", "P1"]);
        assert_eq!(cm.get(&record, "prod_id"), Some("P1"));
        assert_eq!(cm.get(&record, "tag"), None);
    }

    #[test]
    fn test_column_map_strips_bom_and_whitespace() {
        let cm = ColumnMap::from_headers(&make_headers(&["\u{FEFF}date", " tag "]));
        assert!(cm.has("date"));
        assert!(cm.has("tag"));
    }

    #[test]
    fn test_validate_columns_missing_required() {
        let cm = ColumnMap::from_headers(&make_headers(&["date", "user_id"]));
        match validate_columns(&cm).unwrap_err() {
            AppError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["prod_id".to_string(), "tag".to_string()]);
            }
            e => panic!("Expected MissingColumns, got {:?}", e),
        }
    }

    #[test]
    fn test_validate_columns_missing_optional() {
        let cm = ColumnMap::from_headers(&make_headers(&["prod_id", "date", "tag"]));
        let val = validate_columns(&cm).unwrap();
        assert_eq!(val.missing_optional, vec!["user_id".to_string()]);
        assert_eq!(val.present.len(), 3);
    }
}
