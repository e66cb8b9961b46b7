use serde::{Deserialize, Serialize};

/// One saved simulation, as kept by the history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// When the simulation was saved (ms since Unix epoch).
    pub recorded_at_ms: u64,
    pub unit_cost: f64,
    pub fixed_cost: f64,
    pub optimal_price: f64,
    pub max_profit: f64,
}

/// Current wall-clock time in ms since Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
