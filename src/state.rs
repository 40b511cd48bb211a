use crate::analyzer::dashboard::{build_dashboard, Dashboard};
use crate::error::AppError;
use crate::parser::response::{decode_full_data, StoredUpload};
use crate::parser::types::ReviewRecord;

/// Identifies one load request. A ticket whose generation no longer matches
/// the view's is stale and its result is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub upload: StoredUpload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied,
    Discarded,
}

/// State owned by the visualization view: the dataset it requested and the
/// statistics derived from it. Nothing here is shared process-wide.
#[derive(Debug, Default)]
pub struct VisualizationView {
    generation: u64,
    loading: bool,
    records: Vec<ReviewRecord>,
    dashboard: Dashboard,
}

impl VisualizationView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load from the stored upload handle. A missing or malformed
    /// handle is an error the caller answers by navigating to the upload page.
    pub fn begin_load(&mut self, stored: Option<&str>) -> Result<LoadTicket, AppError> {
        let upload = StoredUpload::decode(stored)?;
        self.generation += 1;
        self.loading = true;
        log::debug!(
            "Load #{} requested for {}",
            self.generation,
            upload.path
        );
        Ok(LoadTicket {
            generation: self.generation,
            upload,
        })
    }

    /// The view was left: any in-flight load becomes stale.
    pub fn navigate_away(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    /// Apply fetched records. Derived statistics are rebuilt from scratch.
    pub fn complete_load(&mut self, ticket: &LoadTicket, records: Vec<ReviewRecord>) -> LoadOutcome {
        if ticket.generation != self.generation {
            log::warn!(
                "Discarding stale load #{} (current #{})",
                ticket.generation,
                self.generation
            );
            return LoadOutcome::Discarded;
        }
        self.dashboard = build_dashboard(&records);
        self.records = records;
        self.loading = false;
        LoadOutcome::Applied
    }

    /// Same as `complete_load`, decoding a raw full-data response body first.
    /// A failed fetch ends the load but keeps the previous statistics.
    pub fn complete_load_from_body(
        &mut self,
        ticket: &LoadTicket,
        body: &str,
    ) -> Result<LoadOutcome, AppError> {
        match decode_full_data(body) {
            Ok(records) => Ok(self.complete_load(ticket, records)),
            Err(e) => {
                if ticket.generation == self.generation {
                    self.loading = false;
                }
                Err(e)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    pub fn snapshot(&self) -> &Dashboard {
        &self.dashboard
    }
}
