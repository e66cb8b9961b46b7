use crate::HistoryStore;
use anyhow::Result;
use dashmap::DashMap;
use price_types::record::HistoryRecord;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-local history, keyed by insertion sequence.
/// Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<DashMap<u64, HistoryRecord>>,
    next_seq: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of saved records.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for MemoryStore {
    fn save(&self, record: &HistoryRecord) -> Result<()> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.inner.insert(seq, record.clone());
        Ok(())
    }

    fn fetch_recent(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let mut entries: Vec<(u64, HistoryRecord)> = self
            .inner
            .iter()
            .map(|r| (*r.key(), r.value().clone()))
            .collect();
        // Newest timestamp first; later insertions win ties.
        entries.sort_by(|(seq_a, a), (seq_b, b)| {
            b.recorded_at_ms
                .cmp(&a.recorded_at_ms)
                .then(seq_b.cmp(seq_a))
        });
        Ok(entries
            .into_iter()
            .take(limit)
            .map(|(_, record)| record)
            .collect())
    }
}
