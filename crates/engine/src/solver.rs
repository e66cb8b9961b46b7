//! Critical-point solver for the profit function.
//!
//! The profit is a polynomial of degree ≤ 2, so its derivative is affine and has
//! at most one root. The root is classified by the sign of the (constant) second
//! derivative:
//!
//! | profit'               | outcome                    |
//! |-----------------------|----------------------------|
//! | identically zero      | `Degenerate` (flat profit) |
//! | nonzero constant      | `NoCriticalPoint`          |
//! | root not finite       | `NoCriticalPoint`          |
//! | root p* < 0           | `Infeasible`               |
//! | root p*, profit'' < 0 | `Maximum`                  |
//! | root p*, profit'' ≥ 0 | `Minimum`                  |
//!
//! Only `Maximum` is a price recommendation.

use crate::profit::ProfitFunction;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// How a solve attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Nonnegative critical price with negative curvature: the recommended price.
    Maximum,
    /// Nonnegative critical price that is not a maximum. Never recommended.
    Minimum,
    /// The critical price is negative.
    Infeasible,
    /// The derivative is a nonzero constant: profit is linear, no interior optimum.
    NoCriticalPoint,
    /// The derivative is identically zero: every price yields the same profit.
    Degenerate,
}

impl SolveStatus {
    /// Human-readable explanation shown next to the result.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Maximum => "Second derivative is negative: the critical point is a maximum",
            Self::Minimum => "The critical point is a minimum, not a maximum",
            Self::Infeasible => "Optimal price is negative (infeasible)",
            Self::NoCriticalPoint => "Could not compute the optimum: no real critical point",
            Self::Degenerate => "Could not compute the optimum: profit does not depend on price",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maximum => write!(f, "maximum"),
            Self::Minimum => write!(f, "minimum"),
            Self::Infeasible => write!(f, "infeasible"),
            Self::NoCriticalPoint => write!(f, "no critical point"),
            Self::Degenerate => write!(f, "degenerate"),
        }
    }
}

/// Outcome of one solve attempt.
///
/// `optimal_price`, `max_profit` and `expected_demand` are zero unless `is_valid`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub optimal_price: f64,
    pub max_profit: f64,
    pub expected_demand: f64,
    pub is_maximum: bool,
    pub is_valid: bool,
    /// `profit''`, which is `2a` for every profit model.
    pub second_derivative: f64,
    pub status: SolveStatus,
}

impl OptimizationResult {
    fn invalid(status: SolveStatus, second_derivative: f64) -> Self {
        Self {
            optimal_price: 0.0,
            max_profit: 0.0,
            expected_demand: 0.0,
            is_maximum: false,
            is_valid: false,
            second_derivative,
            status,
        }
    }

    /// Valid and a maximum: the only results that may be recommended and saved.
    pub fn is_recommendation(&self) -> bool {
        self.is_valid && self.is_maximum
    }
}

/// Differentiate, find the critical price and classify it.
pub fn solve(profit: &ProfitFunction) -> OptimizationResult {
    let first = profit.expression.derivative();
    let second = first.derivative();
    let curvature = second.coeff(0);

    let root = match first.linear_roots() {
        None => {
            warn!("Profit is flat in price; every price ties");
            return OptimizationResult::invalid(SolveStatus::Degenerate, curvature);
        }
        Some(roots) => match roots.first() {
            Some(&root) => root,
            None => {
                warn!(derivative = %first, "No real roots");
                return OptimizationResult::invalid(SolveStatus::NoCriticalPoint, curvature);
            }
        },
    };

    if !root.is_finite() {
        warn!(critical_price = root, "Critical price is not a finite number");
        return OptimizationResult::invalid(SolveStatus::NoCriticalPoint, curvature);
    }

    if root < 0.0 {
        warn!(
            critical_price = %format!("{:.2}", root),
            "Optimal price is negative (infeasible)"
        );
        return OptimizationResult::invalid(SolveStatus::Infeasible, curvature);
    }

    let is_maximum = curvature < 0.0;
    let status = if is_maximum {
        SolveStatus::Maximum
    } else {
        SolveStatus::Minimum
    };

    let result = OptimizationResult {
        optimal_price: root,
        max_profit: profit.eval(root),
        expected_demand: profit.demand.quantity_at(root),
        is_maximum,
        is_valid: true,
        second_derivative: curvature,
        status,
    };

    if is_maximum {
        info!(
            price = %format!("{:.2}", result.optimal_price),
            profit = %format!("{:.2}", result.max_profit),
            demand = %format!("{:.1}", result.expected_demand),
            "Optimal price found"
        );
    } else {
        warn!(
            price = %format!("{:.2}", result.optimal_price),
            second_derivative = curvature,
            "Critical point is a minimum"
        );
    }
    debug!(first = %first, second = %second, "Derivatives");

    result
}
