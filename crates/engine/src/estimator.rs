use crate::error::EngineError;
use price_types::market::{DemandModel, Observation};
use tracing::{info, warn};

/// Ordinary least-squares fit of quantity on price.
///
/// Fails when the sample has fewer than two distinct prices, since the slope is
/// then undetermined. A non-negative slope is returned as-is.
pub fn fit(observations: &[Observation]) -> Result<DemandModel, EngineError> {
    let distinct = distinct_prices(observations);
    if distinct < 2 {
        return Err(EngineError::InsufficientData {
            distinct_prices: distinct,
        });
    }

    let n = observations.len() as f64;
    let mean_p = observations.iter().map(|o| o.price).sum::<f64>() / n;
    let mean_q = observations.iter().map(|o| o.quantity).sum::<f64>() / n;

    let (sxx, sxy) = observations.iter().fold((0.0, 0.0), |(sxx, sxy), o| {
        let dp = o.price - mean_p;
        (sxx + dp * dp, sxy + dp * (o.quantity - mean_q))
    });

    let slope = sxy / sxx;
    let model = DemandModel::new(slope, mean_q - slope * mean_p);

    info!(
        a = %format!("{:.2}", model.slope),
        b = %format!("{:.2}", model.intercept),
        r2 = %format!("{:.4}", r_squared(&model, observations)),
        n = observations.len(),
        "Demand model fitted"
    );
    if model.slope >= 0.0 {
        warn!(a = model.slope, "Fitted demand does not fall with price");
    }

    Ok(model)
}

/// Coefficient of determination of `model` over `observations`.
///
/// Returns 1.0 when the quantities have no variance and the model reproduces them,
/// 0.0 when they have no variance and it does not.
pub fn r_squared(model: &DemandModel, observations: &[Observation]) -> f64 {
    if observations.is_empty() {
        return 0.0;
    }
    let mean_q =
        observations.iter().map(|o| o.quantity).sum::<f64>() / observations.len() as f64;
    let (ss_res, ss_tot) = observations.iter().fold((0.0, 0.0), |(res, tot), o| {
        let r = o.quantity - model.quantity_at(o.price);
        let d = o.quantity - mean_q;
        (res + r * r, tot + d * d)
    });
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// Number of distinct price values, compared exactly.
fn distinct_prices(observations: &[Observation]) -> usize {
    let mut prices: Vec<f64> = observations.iter().map(|o| o.price).collect();
    prices.sort_by(|a, b| a.total_cmp(b));
    prices.dedup();
    prices.len()
}
