use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Environment variable overriding `api_base_url`.
pub const API_BASE_URL_ENV: &str = "REVIEW_DASHBOARD_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub app_name: String,
    pub version: String,
    pub problem_types: Vec<ProblemType>,
    pub supported_file_types: Vec<String>,
    pub forecast_days: ForecastDaysRange,
    pub ratio_bands: RatioBands,
    pub sample_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemType {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDaysRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

/// Fake-ratio thresholds (percent) used to colour the per-product ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioBands {
    pub warning: f64,
    pub critical: f64,
}

impl Default for ForecastDaysRange {
    fn default() -> Self {
        ForecastDaysRange {
            min: 1,
            max: 30,
            default: 7,
        }
    }
}

impl Default for RatioBands {
    fn default() -> Self {
        RatioBands {
            warning: 20.0,
            critical: 50.0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: "http://localhost:5000".to_string(),
            app_name: "Fake Review Forecasting".to_string(),
            version: "1.0.0".to_string(),
            problem_types: vec![
                ProblemType {
                    value: "fake_review".into(),
                    label: "Fake review forecast".into(),
                },
                ProblemType {
                    value: "sales_forecast".into(),
                    label: "Sales forecast".into(),
                },
            ],
            supported_file_types: vec!["csv".into(), "xlsx".into(), "xls".into()],
            forecast_days: ForecastDaysRange::default(),
            ratio_bands: RatioBands::default(),
            sample_rows: 5,
        }
    }
}

impl AppConfig {
    /// Parse a JSON config document. Missing keys keep their defaults.
    pub fn from_json_str(s: &str) -> Result<AppConfig, AppError> {
        let mut config: AppConfig = serde_json::from_str(s)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<AppConfig, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Defaults plus environment overrides.
    pub fn load_default() -> AppConfig {
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                log::debug!("api_base_url overridden from {}", API_BASE_URL_ENV);
                self.api_base_url = url.to_string();
            }
        }
    }

    pub fn endpoint(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }

    pub fn full_data_url(&self) -> String {
        self.endpoint("api/upload/get-full-data")
    }

    pub fn upload_url(&self) -> String {
        self.endpoint("api/upload/")
    }

    pub fn validate_url(&self) -> String {
        self.endpoint("api/upload/validate")
    }

    pub fn process_and_predict_url(&self) -> String {
        self.endpoint("api/informer/process-and-predict")
    }

    pub fn predict_url(&self) -> String {
        self.endpoint("api/informer/predict")
    }

    pub fn informer_status_url(&self) -> String {
        self.endpoint("api/informer/status")
    }

    pub fn is_supported_problem_type(&self, value: &str) -> bool {
        self.problem_types.iter().any(|p| p.value == value)
    }

    /// Clamp a requested forecast horizon into the configured range,
    /// falling back to the default horizon when none is given.
    pub fn clamp_forecast_days(&self, requested: Option<u32>) -> u32 {
        let range = &self.forecast_days;
        match requested {
            Some(days) => days.clamp(range.min, range.max),
            None => range.default,
        }
    }

    pub fn is_supported_extension(&self, ext: &str) -> bool {
        self.supported_file_types
            .iter()
            .any(|t| t.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}
