use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::parser::columns::{validate_columns, ColumnMap};
use crate::parser::deserializers::{non_empty, normalize_date, parse_tag};
use crate::parser::types::{DatasetInfo, DateRange, ParseWarning, ReviewRecord};

/// Output of `parse_dataset`: the records plus import metadata.
#[derive(Debug)]
pub struct ParseOutput {
    pub records: Vec<ReviewRecord>,
    pub warnings: Vec<ParseWarning>,
    pub total_rows_processed: usize,
    pub skipped_rows: usize,
    pub detected_columns: Vec<String>,
    pub missing_optional_columns: Vec<String>,
    pub parse_duration_ms: u64,
}

/// Check an uploaded filename against the configured extensions.
/// Returns the lowercased extension.
pub fn validate_file_type(filename: &str, config: &AppConfig) -> Result<String, AppError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| AppError::UnsupportedFileType(filename.to_string()))?;

    if config.is_supported_extension(&ext) {
        Ok(ext)
    } else {
        Err(AppError::UnsupportedFileType(filename.to_string()))
    }
}

/// Parse a review dataset from `path`. Only CSV content is read; spreadsheet
/// uploads are accepted by `validate_file_type` but cannot be parsed here.
pub fn parse_dataset(path: impl AsRef<Path>) -> Result<ParseOutput, AppError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if ext.as_deref() != Some("csv") {
        return Err(AppError::UnsupportedFileType(path.display().to_string()));
    }

    let file = std::fs::File::open(path)?;
    let out = parse_dataset_reader(std::io::BufReader::new(file))?;
    log::info!(
        "Parsed {}: {} records, {} skipped in {} ms",
        path.display(),
        out.records.len(),
        out.skipped_rows,
        out.parse_duration_ms
    );
    Ok(out)
}

/// Core parsing logic: accepts any `Read` source.
pub fn parse_dataset_reader<R: Read>(reader: R) -> Result<ParseOutput, AppError> {
    let start = Instant::now();

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(AppError::EmptyFile);
    }
    let col_map = ColumnMap::from_headers(&headers);
    let col_validation = validate_columns(&col_map)?;

    let mut records: Vec<ReviewRecord> = Vec::new();
    let mut warnings: Vec<ParseWarning> = Vec::new();
    let mut skipped = 0usize;
    let mut row_idx = 0usize;

    for result in rdr.records() {
        row_idx += 1;
        // +1 for the header row
        let line = row_idx + 1;

        match result {
            Ok(row) => {
                let record = row_to_record(&col_map, &row, line, &mut warnings);
                records.push(record);
            }
            Err(err) => {
                log::warn!("Skipping line {}: {}", line, err);
                warnings.push(ParseWarning {
                    line,
                    message: err.to_string(),
                });
                skipped += 1;
            }
        }
    }

    if row_idx == 0 {
        return Err(AppError::EmptyFile);
    }

    Ok(ParseOutput {
        records,
        warnings,
        total_rows_processed: row_idx,
        skipped_rows: skipped,
        detected_columns: col_validation.present,
        missing_optional_columns: col_validation.missing_optional,
        parse_duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn row_to_record(
    col_map: &ColumnMap,
    row: &csv::StringRecord,
    line: usize,
    warnings: &mut Vec<ParseWarning>,
) -> ReviewRecord {
    let mut warn = |message: String| warnings.push(ParseWarning { line, message });

    let raw_date = col_map.get(row, "date").and_then(non_empty);
    let date = match raw_date {
        Some(raw) => match normalize_date(&raw) {
            Some(iso) => Some(iso),
            None => {
                warn(format!("Unrecognised date {:?}, kept as-is", raw));
                Some(raw)
            }
        },
        None => {
            warn("Missing date".to_string());
            None
        }
    };

    let prod_id = col_map.get(row, "prod_id").and_then(non_empty);
    if prod_id.is_none() {
        warn("Missing prod_id".to_string());
    }

    let tag = match col_map.get(row, "tag").and_then(non_empty) {
        Some(raw) => {
            let tag = parse_tag(&raw);
            if tag.is_none() {
                warn(format!("Unknown tag {:?}", raw));
            }
            tag
        }
        None => {
            warn("Missing tag".to_string());
            None
        }
    };

    ReviewRecord {
        date,
        prod_id,
        user_id: col_map.get(row, "user_id").and_then(non_empty),
        tag,
    }
}

/// Row count, distinct products, date span, fake count and the first
/// `sample_rows` records.
pub fn inspect_dataset(records: &[ReviewRecord], sample_rows: usize) -> DatasetInfo {
    let products: HashSet<&str> = records.iter().filter_map(|r| r.prod_id.as_deref()).collect();

    let dates = records.iter().filter_map(|r| r.date.as_deref());
    let date_range = dates.clone().min().zip(dates.max()).map(|(min, max)| DateRange {
        min: min.to_string(),
        max: max.to_string(),
    });

    DatasetInfo {
        rows: records.len(),
        products: products.len(),
        date_range,
        fake_count: records.iter().filter(|r| r.is_fake()).count(),
        sample: records.iter().take(sample_rows).cloned().collect(),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::Tag;

    const HDR: &str = "date,prod_id,user_id,tag";

    fn parse(csv: &str) -> ParseOutput {
        parse_dataset_reader(csv.as_bytes()).unwrap()
    }

    fn parse_err(csv: &str) -> AppError {
        parse_dataset_reader(csv.as_bytes()).unwrap_err()
    }

    #[test]
    fn test_basic_rows() {
        let out = parse(&format!(
            "{HDR}\n2024-01-01,P1,U1,real\n2024-01-01,P1,U2,fake\n2024-01-02,P2,U1,fake"
        ));
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.total_rows_processed, 3);
        assert_eq!(out.skipped_rows, 0);
        assert!(out.warnings.is_empty());
        assert_eq!(out.records[1], ReviewRecord::new("2024-01-01", "P1", "U2", Tag::Fake));
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let out = parse("tag,user_id,prod_id,date\nreal,U9,P3,2024-02-01");
        assert_eq!(out.records[0], ReviewRecord::new("2024-02-01", "P3", "U9", Tag::Real));
    }

    #[test]
    fn test_bom_utf8() {
        let out = parse(&format!("\u{FEFF}{HDR}\n2024-01-01,P1,U1,real"));
        assert_eq!(out.records.len(), 1, "BOM must be ignored");
        assert!(out.records[0].date.is_some());
    }

    #[test]
    fn test_dates_are_normalised() {
        let out = parse(&format!("{HDR}\n2024/03/09,P1,U1,real\n09-03-2024,P1,U1,fake"));
        assert_eq!(out.records[0].date.as_deref(), Some("2024-03-09"));
        assert_eq!(out.records[1].date.as_deref(), Some("2024-03-09"));
    }

    #[test]
    fn test_unparseable_date_kept_with_warning() {
        let out = parse(&format!("{HDR}\nsometime,P1,U1,real"));
        assert_eq!(out.records[0].date.as_deref(), Some("sometime"));
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, 2);
    }

    #[test]
    fn test_unknown_and_missing_fields_become_none() {
        let out = parse(&format!("{HDR}\n2024-01-01,P1,,spam\n,,U2,"));
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.records[0].tag, None);
        assert_eq!(out.records[0].user_id, None);
        assert_eq!(out.records[1].date, None);
        assert_eq!(out.records[1].prod_id, None);
        assert_eq!(out.records[1].tag, None);
        // unknown tag + missing date + missing prod_id + missing tag
        assert_eq!(out.warnings.len(), 4);
    }

    #[test]
    fn test_user_id_optional() {
        let out = parse("date,prod_id,tag\n2024-01-01,P1,fake");
        assert_eq!(out.missing_optional_columns, vec!["user_id".to_string()]);
        assert_eq!(out.records[0].user_id, None);
        assert!(out.records[0].is_fake());
    }

    #[test]
    fn test_missing_required_column_error() {
        match parse_err("date,user_id\n2024-01-01,U1") {
            AppError::MissingColumns(cols) => {
                assert!(cols.contains(&"prod_id".to_string()));
                assert!(cols.contains(&"tag".to_string()));
            }
            e => panic!("Expected MissingColumns, got {:?}", e),
        }
    }

    #[test]
    fn test_header_only_is_empty_file() {
        assert!(matches!(parse_err(HDR), AppError::EmptyFile));
    }

    #[test]
    fn test_empty_input_error() {
        assert!(matches!(parse_err(""), AppError::EmptyFile));
    }

    #[test]
    fn test_validate_file_type() {
        let config = AppConfig::default();
        assert_eq!(validate_file_type("reviews.CSV", &config).unwrap(), "csv");
        assert_eq!(validate_file_type("reviews.xlsx", &config).unwrap(), "xlsx");
        assert!(matches!(
            validate_file_type("reviews.txt", &config),
            Err(AppError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            validate_file_type("reviews", &config),
            Err(AppError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_parse_dataset_rejects_spreadsheet() {
        assert!(matches!(
            parse_dataset("upload.xlsx"),
            Err(AppError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_parse_dataset_missing_file() {
        assert!(matches!(
            parse_dataset("/nonexistent/dir/upload.csv"),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn test_inspect_dataset() {
        let out = parse(&format!(
            "{HDR}\n2024-01-03,P1,U1,real\n2024-01-01,P2,U2,fake\n2024-01-02,P1,U3,fake"
        ));
        let info = inspect_dataset(&out.records, 2);
        assert_eq!(info.rows, 3);
        assert_eq!(info.products, 2);
        assert_eq!(info.fake_count, 2);
        assert_eq!(info.sample.len(), 2);
        let range = info.date_range.unwrap();
        assert_eq!(range.min, "2024-01-01");
        assert_eq!(range.max, "2024-01-03");
    }

    #[test]
    fn test_inspect_empty() {
        let info = inspect_dataset(&[], 5);
        assert_eq!(info.rows, 0);
        assert!(info.date_range.is_none());
        assert!(info.sample.is_empty());
    }
}
