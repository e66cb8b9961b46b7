use crate::profit::ProfitFunction;
use crate::solver::{OptimizationResult, SolveStatus};
use price_types::market::CostStructure;
use price_types::record::HistoryRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-width of the price window sampled around the optimum.
const CURVE_HALF_WIDTH: f64 = 50.0;
/// Number of points in the sampled profit curve.
const CURVE_POINTS: usize = 100;

/// Everything a presentation layer needs to show one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub a_coef: f64,
    pub b_coef: f64,
    pub demand_expression: String,
    pub profit_expression: String,
    pub profit_latex: String,
    pub first_derivative: String,
    pub second_derivative: String,
    pub optimal_price: f64,
    pub max_profit: f64,
    pub expected_demand: f64,
    pub is_maximum: bool,
    pub is_valid: bool,
    pub status: SolveStatus,
    /// (price, profit) samples around the optimum; empty when the result is invalid.
    pub profit_curve: Vec<(f64, f64)>,
}

/// A solved run, split into what gets stored and what gets shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Packaged {
    pub record: HistoryRecord,
    pub report: Report,
}

/// Assemble the persistence record and the report. Pure: saving is up to the
/// caller, and only when `result.is_recommendation()`.
pub fn package(
    result: &OptimizationResult,
    profit: &ProfitFunction,
    costs: &CostStructure,
    recorded_at_ms: u64,
) -> Packaged {
    let first = profit.expression.derivative();
    let second = first.derivative();

    let record = HistoryRecord {
        recorded_at_ms,
        unit_cost: costs.unit_cost,
        fixed_cost: costs.fixed_cost,
        optimal_price: result.optimal_price,
        max_profit: result.max_profit,
    };

    let profit_curve = if result.is_valid {
        profit_curve(profit, result.optimal_price)
    } else {
        Vec::new()
    };

    let report = Report {
        a_coef: profit.demand.slope,
        b_coef: profit.demand.intercept,
        demand_expression: profit.demand_expression().to_string(),
        profit_expression: profit.expression.to_string(),
        profit_latex: profit.expression.to_latex(),
        first_derivative: first.to_string(),
        second_derivative: second.to_string(),
        optimal_price: result.optimal_price,
        max_profit: result.max_profit,
        expected_demand: result.expected_demand,
        is_maximum: result.is_maximum,
        is_valid: result.is_valid,
        status: result.status,
        profit_curve,
    };

    Packaged { record, report }
}

/// Profit sampled on `[max(0, center - 50), center + 50]`.
fn profit_curve(profit: &ProfitFunction, center: f64) -> Vec<(f64, f64)> {
    let lo = (center - CURVE_HALF_WIDTH).max(0.0);
    let hi = center + CURVE_HALF_WIDTH;
    let step = (hi - lo) / (CURVE_POINTS - 1) as f64;
    (0..CURVE_POINTS)
        .map(|i| {
            let price = lo + step * i as f64;
            (price, profit.eval(price))
        })
        .collect()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Demand (fitted):  q(p) = {}", self.demand_expression)?;
        writeln!(f, "Profit:           L(p) = {}", self.profit_expression)?;
        writeln!(f, "First derivative: dL/dp = {}", self.first_derivative)?;
        writeln!(f, "Second derivative: d2L/dp2 = {}", self.second_derivative)?;
        if self.is_valid {
            writeln!(f, "Critical price:   p* = {:.2}", self.optimal_price)?;
            writeln!(f, "Profit at p*:     {:.2}", self.max_profit)?;
            writeln!(f, "Demand at p*:     {} units", self.expected_demand as i64)?;
        }
        write!(f, "{}", self.status.message())
    }
}
