use crate::market::{CostStructure, MarketParams};
use anyhow::{bail, Context, Result};

/// Accepted range for `DEMAND_SENSITIVITY`.
pub const SENSITIVITY_RANGE: (f64, f64) = (1.0, 5.0);
/// Accepted range for `NOISE_STD`.
pub const NOISE_RANGE: (f64, f64) = (0.0, 100.0);

/// Run configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // ── Costs ──
    pub unit_cost: f64,
    pub fixed_cost: f64,

    // ── Market ──
    pub market: MarketParams,

    // ── History ──
    /// JSON-lines history file. `None` keeps history in memory for this process.
    pub history_path: Option<String>,
    /// How many past simulations to list after a run.
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_cost: 45.0,
            fixed_cost: 2000.0,
            market: MarketParams::default(),
            history_path: None,
            history_limit: 50,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    /// Call `dotenvy::dotenv().ok()` before calling this.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |name: &str, default: String| lookup(name).unwrap_or(default);

        let market = MarketParams {
            sample_size: get("SAMPLE_SIZE", defaults.market.sample_size.to_string())
                .parse()
                .context("Invalid SAMPLE_SIZE")?,
            price_min: get("PRICE_MIN", defaults.market.price_min.to_string())
                .parse()
                .context("Invalid PRICE_MIN")?,
            price_max: get("PRICE_MAX", defaults.market.price_max.to_string())
                .parse()
                .context("Invalid PRICE_MAX")?,
            demand_sensitivity: get(
                "DEMAND_SENSITIVITY",
                defaults.market.demand_sensitivity.to_string(),
            )
            .parse()
            .context("Invalid DEMAND_SENSITIVITY")?,
            base_demand: get("BASE_DEMAND", defaults.market.base_demand.to_string())
                .parse()
                .context("Invalid BASE_DEMAND")?,
            noise_std: get("NOISE_STD", defaults.market.noise_std.to_string())
                .parse()
                .context("Invalid NOISE_STD")?,
            seed: get("SEED", defaults.market.seed.to_string())
                .parse()
                .context("Invalid SEED")?,
        };

        let config = Config {
            unit_cost: get("UNIT_COST", defaults.unit_cost.to_string())
                .parse()
                .context("Invalid UNIT_COST")?,
            fixed_cost: get("FIXED_COST", defaults.fixed_cost.to_string())
                .parse()
                .context("Invalid FIXED_COST")?,
            market,
            history_path: lookup("HISTORY_PATH").filter(|p| !p.trim().is_empty()),
            history_limit: get("HISTORY_LIMIT", defaults.history_limit.to_string())
                .parse()
                .context("Invalid HISTORY_LIMIT")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values outside the ranges the control surface allows.
    pub fn validate(&self) -> Result<()> {
        if !(self.unit_cost >= 0.0 && self.unit_cost.is_finite()) {
            bail!("UNIT_COST must be a finite value >= 0, got {}", self.unit_cost);
        }
        if !(self.fixed_cost >= 0.0 && self.fixed_cost.is_finite()) {
            bail!("FIXED_COST must be a finite value >= 0, got {}", self.fixed_cost);
        }

        let m = &self.market;
        let (s_lo, s_hi) = SENSITIVITY_RANGE;
        if !(s_lo..=s_hi).contains(&m.demand_sensitivity) {
            bail!(
                "DEMAND_SENSITIVITY must be in [{s_lo}, {s_hi}], got {}",
                m.demand_sensitivity
            );
        }
        let (n_lo, n_hi) = NOISE_RANGE;
        if !(n_lo..=n_hi).contains(&m.noise_std) {
            bail!("NOISE_STD must be in [{n_lo}, {n_hi}], got {}", m.noise_std);
        }
        if m.sample_size < 2 {
            bail!("SAMPLE_SIZE must be at least 2, got {}", m.sample_size);
        }
        if !(m.price_min.is_finite() && m.price_max.is_finite()) || m.price_min >= m.price_max {
            bail!(
                "PRICE_MIN must be below PRICE_MAX, got [{}, {}]",
                m.price_min,
                m.price_max
            );
        }
        if !m.base_demand.is_finite() {
            bail!("BASE_DEMAND must be finite, got {}", m.base_demand);
        }
        Ok(())
    }

    pub fn costs(&self) -> CostStructure {
        CostStructure::new(self.unit_cost, self.fixed_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_env_gives_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.unit_cost, 45.0);
        assert_eq!(config.fixed_cost, 2000.0);
        assert_eq!(config.market.demand_sensitivity, 2.5);
        assert_eq!(config.market.noise_std, 20.0);
        assert_eq!(config.history_limit, 50);
        assert!(config.history_path.is_none());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("UNIT_COST", "60"),
            ("FIXED_COST", "150.5"),
            ("DEMAND_SENSITIVITY", "4"),
            ("NOISE_STD", "0"),
            ("SEED", "7"),
            ("HISTORY_PATH", "/tmp/history.jsonl"),
            ("HISTORY_LIMIT", "10"),
        ]))
        .unwrap();
        assert_eq!(config.unit_cost, 60.0);
        assert_eq!(config.fixed_cost, 150.5);
        assert_eq!(config.market.demand_sensitivity, 4.0);
        assert_eq!(config.market.noise_std, 0.0);
        assert_eq!(config.market.seed, 7);
        assert_eq!(config.history_path.as_deref(), Some("/tmp/history.jsonl"));
        assert_eq!(config.history_limit, 10);
    }

    #[test]
    fn test_blank_history_path_is_none() {
        let config = Config::from_lookup(lookup_from(&[("HISTORY_PATH", "  ")])).unwrap();
        assert!(config.history_path.is_none());
    }

    #[test]
    fn test_unparseable_value_errors() {
        let err = Config::from_lookup(lookup_from(&[("UNIT_COST", "cheap")])).unwrap_err();
        assert!(err.to_string().contains("UNIT_COST"), "got: {err}");
    }

    #[test]
    fn test_sensitivity_out_of_range() {
        assert!(Config::from_lookup(lookup_from(&[("DEMAND_SENSITIVITY", "0.5")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("DEMAND_SENSITIVITY", "5.5")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("DEMAND_SENSITIVITY", "5")])).is_ok());
    }

    #[test]
    fn test_noise_out_of_range() {
        assert!(Config::from_lookup(lookup_from(&[("NOISE_STD", "-1")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("NOISE_STD", "101")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("NOISE_STD", "100")])).is_ok());
    }

    #[test]
    fn test_negative_costs_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("UNIT_COST", "-1")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("FIXED_COST", "-0.01")])).is_err());
    }

    #[test]
    fn test_inverted_price_range_rejected() {
        let result = Config::from_lookup(lookup_from(&[("PRICE_MIN", "200"), ("PRICE_MAX", "100")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_tiny_sample_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("SAMPLE_SIZE", "1")])).is_err());
    }

    #[test]
    fn test_costs_accessor() {
        let config = Config::default();
        assert_eq!(config.costs(), CostStructure::new(45.0, 2000.0));
    }

    #[test]
    fn test_partial_lookup_keeps_other_defaults() {
        let config = Config::from_lookup(lookup_from(&[("SEED", "42")])).unwrap();
        assert_eq!(config, Config::default());
    }
}
