use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("File is empty or has no data rows")]
    EmptyFile,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("No uploaded file found, please upload again")]
    MissingUpload,

    #[error("Stored upload data is malformed: {0}")]
    InvalidUpload(String),

    #[error("Unsupported problem type: {0}")]
    UnsupportedProblemType(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("{0}")]
    Custom(String),
}

impl AppError {
    /// True when the view should send the user back to the upload page.
    pub fn requires_reupload(&self) -> bool {
        matches!(self, AppError::MissingUpload | AppError::InvalidUpload(_))
    }
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
