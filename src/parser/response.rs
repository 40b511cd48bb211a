//! Decoding of what the backend and the upload page hand to the dashboard:
//! the full-data response body, the stored upload handle and the forecasting
//! service's request and response bodies.
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::parser::types::ReviewRecord;

/// Body of `POST /api/upload/get-full-data`.
#[derive(Debug, Clone, Serialize)]
pub struct FullDataRequest<'a> {
    pub file_path: &'a str,
}

impl<'a> FullDataRequest<'a> {
    pub fn new(file_path: &'a str) -> Self {
        FullDataRequest { file_path }
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Deserialize)]
struct FullDataResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    file_data: Option<FileData>,
}

#[derive(Debug, Deserialize)]
struct FileData {
    #[serde(default)]
    data: Option<Vec<ReviewRecord>>,
}

/// Decode a full-data response into records.
/// A success body without data yields an empty dataset, not an error.
pub fn decode_full_data(body: &str) -> Result<Vec<ReviewRecord>, AppError> {
    let resp: FullDataResponse = serde_json::from_str(body)?;

    if resp.status != "success" {
        return Err(AppError::Backend(
            resp.message
                .unwrap_or_else(|| "Failed to fetch data".to_string()),
        ));
    }

    let records = resp.file_data.and_then(|f| f.data).unwrap_or_default();
    if records.is_empty() {
        log::warn!("Backend returned an empty dataset");
    }
    Ok(records)
}

/// Handle left behind by the upload page for the visualization view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUpload {
    pub path: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub saved_name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub upload_time: Option<String>,
}

impl StoredUpload {
    /// `None` means nothing was uploaded; the caller should navigate back to
    /// the upload page.
    pub fn decode(stored: Option<&str>) -> Result<StoredUpload, AppError> {
        let raw = match stored.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return Err(AppError::MissingUpload),
        };
        let upload: StoredUpload =
            serde_json::from_str(raw).map_err(|e| AppError::InvalidUpload(e.to_string()))?;
        if upload.path.trim().is_empty() {
            return Err(AppError::InvalidUpload("empty file path".to_string()));
        }
        Ok(upload)
    }
}

/// Body of `POST /api/informer/process-and-predict` and `/api/informer/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest<'a> {
    pub file_path: &'a str,
    pub forecast_days: u32,
    pub problem_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prod_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<&'a str>,
}

impl<'a> PredictionRequest<'a> {
    /// Horizon is clamped into the configured range; `problem_type` defaults
    /// to the first configured type and must be one of them.
    pub fn new(
        config: &'a AppConfig,
        file_path: &'a str,
        problem_type: Option<&'a str>,
        forecast_days: Option<u32>,
    ) -> Result<Self, AppError> {
        let problem_type = match problem_type {
            Some(p) => p,
            None => config
                .problem_types
                .first()
                .map(|p| p.value.as_str())
                .ok_or_else(|| AppError::UnsupportedProblemType("none configured".to_string()))?,
        };
        if !config.is_supported_problem_type(problem_type) {
            return Err(AppError::UnsupportedProblemType(problem_type.to_string()));
        }
        let days = config.clamp_forecast_days(forecast_days);
        if forecast_days.is_some_and(|d| d != days) {
            log::debug!("Forecast horizon {:?} clamped to {}", forecast_days, days);
        }
        Ok(PredictionRequest {
            file_path,
            forecast_days: days,
            problem_type,
            prod_id: None,
            output_dir: None,
        })
    }

    pub fn with_prod_id(mut self, prod_id: &'a str) -> Self {
        self.prod_id = Some(prod_id);
        self
    }

    pub fn with_output_dir(mut self, output_dir: &'a str) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One per-product outcome from the forecasting service. Fields the
/// dashboard does not interpret stay in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPrediction {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::parser::deserializers::de::opt_lenient_string")]
    pub product_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProductPrediction {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PredictionSummary {
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub successful_predictions: u64,
    #[serde(default)]
    pub failed_predictions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub problem_type: Option<String>,
    pub predictions: Vec<ProductPrediction>,
    pub summary: Option<PredictionSummary>,
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    available_product_ids: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    problem_type: Option<String>,
    #[serde(default)]
    predictions: Option<Vec<ProductPrediction>>,
    #[serde(default)]
    summary: Option<PredictionSummary>,
}

fn id_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode a forecasting-service response. An error body listing
/// `available_product_ids` means the requested product was not in the file.
pub fn decode_prediction_response(body: &str) -> Result<PredictionResult, AppError> {
    let resp: PredictionResponse = serde_json::from_str(body)?;

    if resp.status != "success" {
        if let Some(ids) = resp.available_product_ids.as_ref().filter(|ids| !ids.is_empty()) {
            let ids: Vec<String> = ids.iter().map(id_to_string).collect();
            return Err(AppError::Backend(format!(
                "No product ID found. Available product IDs: {}",
                ids.join(", ")
            )));
        }
        return Err(AppError::Backend(
            resp.message
                .unwrap_or_else(|| "Prediction request failed".to_string()),
        ));
    }

    let predictions = resp.predictions.unwrap_or_default();
    let failed = predictions.iter().filter(|p| !p.is_success()).count();
    if failed > 0 {
        log::warn!("{} of {} product predictions failed", failed, predictions.len());
    }
    Ok(PredictionResult {
        problem_type: resp.problem_type,
        predictions,
        summary: resp.summary,
    })
}

/// Readiness report from `GET /api/informer/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformerStatus {
    pub status: String,
    #[serde(default)]
    pub informer_path: Option<String>,
    #[serde(default)]
    pub path_exists: bool,
    #[serde(default)]
    pub script_exists: bool,
    #[serde(default)]
    pub environment: Option<InformerEnvironment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InformerEnvironment {
    #[serde(default)]
    pub python_version: Option<String>,
    #[serde(default)]
    pub torch_available: bool,
    #[serde(default)]
    pub cuda_available: bool,
}

impl InformerStatus {
    pub fn is_ready(&self) -> bool {
        self.status == "success" && self.path_exists && self.script_exists
    }
}

pub fn decode_informer_status(body: &str) -> Result<InformerStatus, AppError> {
    let status: InformerStatus = serde_json::from_str(body)?;
    if status.status != "success" {
        return Err(AppError::Backend(format!(
            "Forecasting service reported status '{}'",
            status.status
        )));
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::Tag;

    #[test]
    fn test_decode_success() {
        let body = r#"{
            "status": "success",
            "file_data": {"data": [
                {"date": "2024-01-01", "prod_id": "P1", "user_id": "U1", "tag": "real"},
                {"date": "2024-01-02", "prod_id": 7, "user_id": 3, "tag": "fake"}
            ]}
        }"#;
        let records = decode_full_data(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], ReviewRecord::new("2024-01-01", "P1", "U1", Tag::Real));
        assert_eq!(records[1].prod_id.as_deref(), Some("7"));
        assert_eq!(records[1].user_id.as_deref(), Some("3"));
    }

    #[test]
    fn test_decode_success_without_data() {
        assert!(decode_full_data(r#"{"status": "success"}"#).unwrap().is_empty());
        assert!(decode_full_data(r#"{"status": "success", "file_data": {}}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_decode_error_status() {
        match decode_full_data(r#"{"status": "error", "message": "file not found"}"#) {
            Err(AppError::Backend(msg)) => assert_eq!(msg, "file not found"),
            other => panic!("Expected Backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_invalid_json() {
        assert!(matches!(decode_full_data("<html>"), Err(AppError::Serde(_))));
    }

    #[test]
    fn test_request_body() {
        let json = FullDataRequest::new("/tmp/uploads/a.csv").to_json().unwrap();
        assert_eq!(json, r#"{"file_path":"/tmp/uploads/a.csv"}"#);
    }

    #[test]
    fn test_stored_upload_missing() {
        assert!(matches!(StoredUpload::decode(None), Err(AppError::MissingUpload)));
        assert!(matches!(StoredUpload::decode(Some("  ")), Err(AppError::MissingUpload)));
    }

    #[test]
    fn test_stored_upload_malformed() {
        assert!(matches!(
            StoredUpload::decode(Some("{oops")),
            Err(AppError::InvalidUpload(_))
        ));
        assert!(matches!(
            StoredUpload::decode(Some(r#"{"path": ""}"#)),
            Err(AppError::InvalidUpload(_))
        ));
    }

    #[test]
    fn test_stored_upload_ok() {
        let up = StoredUpload::decode(Some(
            r#"{"path": "/tmp/u/20240101_ab12_reviews.csv", "original_name": "reviews.csv", "size": 2048}"#,
        ))
        .unwrap();
        assert_eq!(up.path, "/tmp/u/20240101_ab12_reviews.csv");
        assert_eq!(up.size, Some(2048));
        assert_eq!(up.saved_name, None);
    }

    #[test]
    fn test_prediction_request_clamps_and_defaults() {
        let config = AppConfig::default();
        let req = PredictionRequest::new(&config, "/tmp/u/a.csv", None, Some(90)).unwrap();
        assert_eq!(req.forecast_days, 30);
        assert_eq!(req.problem_type, "fake_review");
        assert_eq!(
            req.to_json().unwrap(),
            r#"{"file_path":"/tmp/u/a.csv","forecast_days":30,"problem_type":"fake_review"}"#
        );

        let req = PredictionRequest::new(&config, "/tmp/u/a.csv", Some("sales_forecast"), None)
            .unwrap()
            .with_prod_id("P1");
        assert_eq!(req.forecast_days, 7);
        assert_eq!(
            req.to_json().unwrap(),
            r#"{"file_path":"/tmp/u/a.csv","forecast_days":7,"problem_type":"sales_forecast","prod_id":"P1"}"#
        );
    }

    #[test]
    fn test_prediction_request_rejects_unknown_problem_type() {
        let config = AppConfig::default();
        match PredictionRequest::new(&config, "/tmp/u/a.csv", Some("churn"), Some(7)) {
            Err(AppError::UnsupportedProblemType(p)) => assert_eq!(p, "churn"),
            other => panic!("Expected UnsupportedProblemType, got {:?}", other),
        }

        let mut empty = AppConfig::default();
        empty.problem_types.clear();
        assert!(matches!(
            PredictionRequest::new(&empty, "/tmp/u/a.csv", None, None),
            Err(AppError::UnsupportedProblemType(_))
        ));
    }

    #[test]
    fn test_decode_prediction_success() {
        let body = r#"{
            "status": "success",
            "problem_type": "fake_review",
            "predictions": [
                {"status": "success", "product_id": "P1", "forecast": [0.1, 0.2]},
                {"status": "error", "product_id": 42, "message": "not enough history"}
            ],
            "summary": {"total_products": 2, "successful_predictions": 1,
                        "failed_predictions": 1, "original_file": "/tmp/u/a.csv"}
        }"#;
        let result = decode_prediction_response(body).unwrap();
        assert_eq!(result.problem_type.as_deref(), Some("fake_review"));
        assert_eq!(result.predictions.len(), 2);
        assert!(result.predictions[0].is_success());
        assert!(result.predictions[0].extra.contains_key("forecast"));
        assert!(!result.predictions[1].is_success());
        assert_eq!(result.predictions[1].product_id.as_deref(), Some("42"));
        assert_eq!(
            result.summary,
            Some(PredictionSummary {
                total_products: 2,
                successful_predictions: 1,
                failed_predictions: 1,
            })
        );
    }

    #[test]
    fn test_decode_prediction_lists_available_products() {
        let body = r#"{"status": "error", "message": "unknown product", "available_product_ids": ["P1", 7]}"#;
        match decode_prediction_response(body) {
            Err(AppError::Backend(msg)) => {
                assert_eq!(msg, "No product ID found. Available product IDs: P1, 7")
            }
            other => panic!("Expected Backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_prediction_error_message() {
        match decode_prediction_response(r#"{"status": "error", "message": "model missing", "available_product_ids": []}"#) {
            Err(AppError::Backend(msg)) => assert_eq!(msg, "model missing"),
            other => panic!("Expected Backend error, got {:?}", other),
        }
        match decode_prediction_response(r#"{"status": "error"}"#) {
            Err(AppError::Backend(msg)) => assert_eq!(msg, "Prediction request failed"),
            other => panic!("Expected Backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_informer_status() {
        let body = r#"{
            "status": "success",
            "informer_path": "/opt/informer",
            "path_exists": true,
            "script_exists": false,
            "environment": {"python_version": "3.11.4", "torch_available": true, "cuda_available": false}
        }"#;
        let status = decode_informer_status(body).unwrap();
        assert!(!status.is_ready());
        let env = status.environment.unwrap();
        assert!(env.torch_available);
        assert_eq!(env.python_version.as_deref(), Some("3.11.4"));

        assert!(matches!(
            decode_informer_status(r#"{"status": "error"}"#),
            Err(AppError::Backend(_))
        ));
    }
}
