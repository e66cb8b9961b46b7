//! Simulation history: where recommended prices are saved and listed from.
//!
//! Store failures never abort a run. [`save_best_effort`] and
//! [`fetch_recent_best_effort`] log the error and report "not saved" or an
//! empty history instead.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

use anyhow::Result;
use price_types::record::HistoryRecord;
use tracing::{error, info};

/// Persistence sink and history source for saved simulations.
pub trait HistoryStore {
    /// Append one record.
    fn save(&self, record: &HistoryRecord) -> Result<()>;

    /// Up to `limit` records, most recent first.
    fn fetch_recent(&self, limit: usize) -> Result<Vec<HistoryRecord>>;
}

/// Save `record`, returning whether it was stored.
pub fn save_best_effort(store: &dyn HistoryStore, record: &HistoryRecord) -> bool {
    match store.save(record) {
        Ok(()) => {
            info!(
                price = %format!("{:.2}", record.optimal_price),
                profit = %format!("{:.2}", record.max_profit),
                "Simulation saved"
            );
            true
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Failed to save simulation");
            false
        }
    }
}

/// Recent history, or empty when the store cannot be read.
pub fn fetch_recent_best_effort(store: &dyn HistoryStore, limit: usize) -> Vec<HistoryRecord> {
    store.fetch_recent(limit).unwrap_or_else(|e| {
        error!(error = %format!("{e:#}"), "Failed to read history");
        Vec::new()
    })
}
