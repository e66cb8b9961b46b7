use crate::HistoryStore;
use anyhow::{Context, Result};
use price_types::record::HistoryRecord;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// History kept in a file, one JSON object per line, appended on save.
///
/// A missing file reads as empty history. Lines that fail to parse are skipped.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<HistoryRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read history file {}", self.path.display()))
            }
        };

        let records = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(idx, line)| match serde_json::from_str(line) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(line = idx + 1, error = %e, "Skipping malformed history line");
                    None
                }
            })
            .collect();
        Ok(records)
    }
}

impl HistoryStore for JsonlStore {
    fn save(&self, record: &HistoryRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut line = serde_json::to_string(record).context("Failed to encode history record")?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open history file {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("Failed to append to {}", self.path.display()))?;

        debug!(path = %self.path.display(), "History record appended");
        Ok(())
    }

    fn fetch_recent(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let mut records = self.read_all()?;
        // Reversed first so the stable sort puts later lines ahead within one timestamp.
        records.reverse();
        records.sort_by(|a, b| b.recorded_at_ms.cmp(&a.recorded_at_ms));
        records.truncate(limit);
        Ok(records)
    }
}
