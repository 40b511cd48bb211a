pub mod analyzer;
pub mod config;
pub mod error;
pub mod export;
pub mod parser;
pub mod state;

pub use analyzer::{build_dashboard, Dashboard, DashboardSeries, DatasetSummary};
pub use config::AppConfig;
pub use error::AppError;
pub use parser::{ReviewRecord, Tag};
pub use state::{LoadOutcome, LoadTicket, VisualizationView};

// ─── E2E Integration Tests ──────────────────────────────────────────────────
