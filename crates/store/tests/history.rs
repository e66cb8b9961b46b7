//! Pipeline results flowing into the history store.

use price_engine::{build, package, run, solve};
use price_store::{fetch_recent_best_effort, save_best_effort, HistoryStore, MemoryStore};
use price_types::{Config, CostStructure, DemandModel, HistoryRecord};

/// Save only what the solver recommends, the way the binary does.
fn save_if_recommended(store: &dyn HistoryStore, config: &Config, at: u64) -> bool {
    let run = run(config, at).unwrap();
    run.result.is_recommendation() && save_best_effort(store, &run.packaged.record)
}

#[test]
fn recommended_run_is_saved_and_listed() {
    let store = MemoryStore::new();
    assert!(save_if_recommended(&store, &Config::default(), 1_000));

    let config = Config {
        unit_cost: 60.0,
        ..Config::default()
    };
    assert!(save_if_recommended(&store, &config, 2_000));

    let history = fetch_recent_best_effort(&store, 50);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].recorded_at_ms, 2_000);
    assert_eq!(history[0].unit_cost, 60.0);
    assert_eq!(history[1].unit_cost, 45.0);
    // Higher unit cost pushes the optimal price up.
    assert!(history[0].optimal_price > history[1].optimal_price);
}

#[test]
fn infeasible_result_is_never_saved() {
    let store = MemoryStore::new();
    let costs = CostStructure::new(1000.0, 2000.0);
    let profit = build(DemandModel::new(-2.0, -3000.0), costs);
    let result = solve(&profit);
    let packaged = package(&result, &profit, &costs, 5);

    if result.is_recommendation() {
        save_best_effort(&store, &packaged.record);
    }
    assert!(store.is_empty());
    assert!(fetch_recent_best_effort(&store, 50).is_empty());
}

#[test]
fn failing_store_does_not_touch_result() {
    struct Unreachable;
    impl HistoryStore for Unreachable {
        fn save(&self, _: &HistoryRecord) -> anyhow::Result<()> {
            anyhow::bail!("database is down")
        }
        fn fetch_recent(&self, _: usize) -> anyhow::Result<Vec<HistoryRecord>> {
            anyhow::bail!("database is down")
        }
    }

    let run = run(&Config::default(), 7).unwrap();
    let before = run.result;
    assert!(!save_best_effort(&Unreachable, &run.packaged.record));
    assert!(fetch_recent_best_effort(&Unreachable, 50).is_empty());
    assert_eq!(run.result, before);
    assert!(run.result.is_recommendation());
}
