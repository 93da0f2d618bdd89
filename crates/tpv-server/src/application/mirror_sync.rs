//! Mirror Synchronizer (Use Case)
//!
//! Pushes every stored record to the spreadsheet as a full replace.

use std::sync::Arc;

use tokio::sync::Mutex;

use tpv::domain::services::sheet_projection;
use tpv::{CallRequestRepository, DomainError, SheetMirror};

pub struct MirrorSynchronizer {
    repo: Arc<dyn CallRequestRepository>,
    mirror: Arc<dyn SheetMirror>,
    /// Held across clear-then-write so two syncs never interleave
    in_flight: Mutex<()>,
}

impl MirrorSynchronizer {
    pub fn new(repo: Arc<dyn CallRequestRepository>, mirror: Arc<dyn SheetMirror>) -> Self {
        Self {
            repo,
            mirror,
            in_flight: Mutex::new(()),
        }
    }

    /// Rewrite the sheet from the store. Returns rows written, header included.
    pub async fn sync(&self) -> Result<usize, DomainError> {
        let _guard = self.in_flight.lock().await;

        let records = self.repo.list_all().await?;
        let table = sheet_projection::project_table(&records);
        let rows = self.mirror.replace_all(table).await?;

        tracing::info!(rows, records = records.len(), "📊 Sheet synchronized");
        Ok(rows)
    }

    /// Fire-and-forget sync; failures are logged only.
    pub fn trigger(self: &Arc<Self>, cause: &'static str) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = this.sync().await {
                tracing::warn!(cause, error = %e, "⚠️  Sheet sync failed");
            }
        });
    }
}
