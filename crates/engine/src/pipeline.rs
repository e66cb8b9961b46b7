use crate::error::EngineError;
use crate::estimator;
use crate::generator;
use crate::packager::{self, Packaged};
use crate::profit::{self, ProfitFunction};
use crate::solver::{self, OptimizationResult};
use price_types::market::{DemandModel, Observation};
use price_types::Config;
use tracing::info;

/// Everything one run produced, in pipeline order.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub observations: Vec<Observation>,
    pub demand: DemandModel,
    pub profit: ProfitFunction,
    pub result: OptimizationResult,
    pub packaged: Packaged,
}

/// Generate → fit → build → solve → package, stamping the record with `recorded_at_ms`.
///
/// Only a degenerate sample aborts the run; every solver outcome comes back as data.
pub fn run(config: &Config, recorded_at_ms: u64) -> Result<PipelineRun, EngineError> {
    let costs = config.costs();
    info!(
        unit_cost = costs.unit_cost,
        fixed_cost = costs.fixed_cost,
        sensitivity = config.market.demand_sensitivity,
        noise_std = config.market.noise_std,
        seed = config.market.seed,
        "Running price optimization"
    );

    let observations = generator::generate(&config.market);
    let demand = estimator::fit(&observations)?;
    let profit = profit::build(demand, costs);
    let result = solver::solve(&profit);
    let packaged = packager::package(&result, &profit, &costs, recorded_at_ms);

    Ok(PipelineRun {
        observations,
        demand,
        profit,
        result,
        packaged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SolveStatus;
    use price_types::MarketParams;

    #[test]
    fn test_default_config_recommends_price() {
        let run = run(&Config::default(), 0).unwrap();
        assert_eq!(run.observations.len(), 200);
        assert_eq!(run.result.status, SolveStatus::Maximum);
        assert!(run.result.is_recommendation());
        // True curve gives p* = 142.5; the noisy fit stays close.
        assert!(
            (run.result.optimal_price - 142.5).abs() < 10.0,
            "p*={}",
            run.result.optimal_price
        );
        assert_eq!(run.packaged.record.optimal_price, run.result.optimal_price);
    }

    #[test]
    fn test_single_point_sample_aborts() {
        let config = Config {
            market: MarketParams {
                price_min: 50.0,
                price_max: 50.0,
                ..MarketParams::default()
            },
            ..Config::default()
        };
        let err = run(&config, 0).unwrap_err();
        assert_eq!(err, EngineError::InsufficientData { distinct_prices: 1 });
    }
}
