use serde::{Deserialize, Serialize};

/// A single (price, quantity sold) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub price: f64,
    /// Units sold at `price`. Never negative.
    pub quantity: f64,
}

/// Linear demand curve: `quantity(price) = slope * price + intercept`.
///
/// A realistic fit has `slope < 0`, but nothing enforces it; a flat or rising
/// curve is still handed to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandModel {
    /// `a` in `q(p) = a·p + b`.
    pub slope: f64,
    /// `b` in `q(p) = a·p + b`.
    pub intercept: f64,
}

impl DemandModel {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Expected units sold at `price`.
    pub fn quantity_at(&self, price: f64) -> f64 {
        self.slope * price + self.intercept
    }
}

/// Per-run cost inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostStructure {
    /// Variable cost per unit sold.
    pub unit_cost: f64,
    /// Cost paid regardless of volume.
    pub fixed_cost: f64,
}

impl CostStructure {
    pub fn new(unit_cost: f64, fixed_cost: f64) -> Self {
        Self {
            unit_cost,
            fixed_cost,
        }
    }
}

/// Parameters of the synthetic market the sample is drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    /// Number of observations to draw.
    pub sample_size: usize,
    /// Lower bound of the uniform price draw.
    pub price_min: f64,
    /// Upper bound of the uniform price draw.
    pub price_max: f64,
    /// How many units demand drops per unit of price (positive magnitude).
    pub demand_sensitivity: f64,
    /// Demand at price zero (true intercept).
    pub base_demand: f64,
    /// Standard deviation of the Gaussian noise added to each quantity.
    pub noise_std: f64,
    /// RNG seed. Same seed, same sample.
    pub seed: u64,
}

impl MarketParams {
    /// Slope of the true demand curve. Sensitivity is applied with a negative sign.
    pub fn true_slope(&self) -> f64 {
        -self.demand_sensitivity
    }
}

impl Default for MarketParams {
    fn default() -> Self {
        Self {
            sample_size: 200,
            price_min: 30.0,
            price_max: 180.0,
            demand_sensitivity: 2.5,
            base_demand: 600.0,
            noise_std: 20.0,
            seed: 42,
        }
    }
}
