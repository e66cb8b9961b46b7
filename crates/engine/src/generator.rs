//! Synthetic demand sample.
//!
//! Prices are drawn uniformly from the configured range, quantities follow the
//! true linear curve `base_demand - sensitivity * price` plus Gaussian noise,
//! clamped at zero. The RNG is seeded so a given [`MarketParams`] always yields
//! the same sample.

use price_types::market::{MarketParams, Observation};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;
use tracing::debug;

/// Draw `params.sample_size` observations from the synthetic market.
pub fn generate(params: &MarketParams) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let standard = Normal::standard();
    let slope = params.true_slope();

    // All prices first, then all noise, so the price sample does not depend on noise_std.
    let prices: Vec<f64> = (0..params.sample_size)
        .map(|_| rng.gen_range(params.price_min..=params.price_max))
        .collect();

    let observations: Vec<Observation> = prices
        .into_iter()
        .map(|price| {
            let base = params.base_demand + slope * price;
            let noise = params.noise_std * standard.sample(&mut rng);
            Observation {
                price,
                quantity: (base + noise).max(0.0),
            }
        })
        .collect();

    debug!(
        n = observations.len(),
        seed = params.seed,
        noise_std = params.noise_std,
        "Generated demand sample"
    );

    observations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64, noise_std: f64) -> MarketParams {
        MarketParams {
            seed,
            noise_std,
            ..MarketParams::default()
        }
    }

    #[test]
    fn test_sample_size_and_non_negative() {
        for seed in [0, 1, 42, 1234, u64::MAX] {
            for noise in [0.0, 20.0, 100.0] {
                let obs = generate(&params(seed, noise));
                assert_eq!(obs.len(), 200);
                assert!(
                    obs.iter().all(|o| o.quantity >= 0.0),
                    "negative quantity for seed={seed} noise={noise}"
                );
            }
        }
    }

    #[test]
    fn test_prices_within_range() {
        let p = MarketParams {
            price_min: 10.0,
            price_max: 12.0,
            ..MarketParams::default()
        };
        let obs = generate(&p);
        assert!(obs.iter().all(|o| (10.0..=12.0).contains(&o.price)));
    }

    #[test]
    fn test_same_seed_same_sample() {
        let a = generate(&params(42, 20.0));
        let b = generate(&params(42, 20.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_sample() {
        let a = generate(&params(1, 20.0));
        let b = generate(&params(2, 20.0));
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_noise_lies_on_true_curve() {
        let p = params(9, 0.0);
        for o in generate(&p) {
            let expected = p.base_demand - p.demand_sensitivity * o.price;
            assert_eq!(o.quantity, expected.max(0.0));
        }
    }

    #[test]
    fn test_noise_does_not_move_prices() {
        let quiet = generate(&params(5, 0.0));
        let noisy = generate(&params(5, 80.0));
        let quiet_prices: Vec<f64> = quiet.iter().map(|o| o.price).collect();
        let noisy_prices: Vec<f64> = noisy.iter().map(|o| o.price).collect();
        assert_eq!(quiet_prices, noisy_prices);
    }

    #[test]
    fn test_clamps_when_curve_goes_negative() {
        // 600 - 5 * 150 = -150 at the top of the range.
        let p = MarketParams {
            demand_sensitivity: 5.0,
            price_min: 130.0,
            price_max: 150.0,
            noise_std: 0.0,
            ..MarketParams::default()
        };
        let obs = generate(&p);
        assert!(obs.iter().any(|o| o.quantity == 0.0));
        assert!(obs.iter().all(|o| o.quantity >= 0.0));
    }

    #[test]
    fn test_empty_sample() {
        let p = MarketParams {
            sample_size: 0,
            ..MarketParams::default()
        };
        assert!(generate(&p).is_empty());
    }
}
