use crate::polynomial::Polynomial;
use price_types::market::{CostStructure, DemandModel};
use serde::{Deserialize, Serialize};

/// Profit as a function of price for one demand model and cost structure.
///
/// `profit(p) = p·q(p) - (unit_cost·q(p) + fixed_cost)` with `q(p) = a·p + b`,
/// kept in expanded form:
/// `a·p² + (b - a·unit_cost)·p - (b·unit_cost + fixed_cost)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitFunction {
    pub demand: DemandModel,
    pub costs: CostStructure,
    pub expression: Polynomial,
}

impl ProfitFunction {
    /// Profit at `price`, by substitution into the expanded polynomial.
    pub fn eval(&self, price: f64) -> f64 {
        self.expression.eval(price)
    }

    /// The demand curve as a polynomial in `p`.
    pub fn demand_expression(&self) -> Polynomial {
        Polynomial::new(vec![self.demand.intercept, self.demand.slope])
    }
}

/// Substitute the demand curve into revenue and cost.
pub fn build(demand: DemandModel, costs: CostStructure) -> ProfitFunction {
    let DemandModel {
        slope: a,
        intercept: b,
    } = demand;
    let c = costs.unit_cost;

    let expression = Polynomial::new(vec![
        -(b * c + costs.fixed_cost),
        b - a * c,
        a,
    ]);

    ProfitFunction {
        demand,
        costs,
        expression,
    }
}
