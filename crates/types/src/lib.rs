pub mod config;
pub mod market;
pub mod record;

pub use config::Config;
pub use market::{CostStructure, DemandModel, MarketParams, Observation};
pub use record::{now_ms, HistoryRecord};
