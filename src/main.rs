use anyhow::{Context, Result};
use price_engine::SolveStatus;
use price_store::{fetch_recent_best_effort, save_best_effort, HistoryStore, JsonlStore, MemoryStore};
use price_types::{now_ms, Config, HistoryRecord};
use tracing::{error, info, warn};

fn main() -> Result<()> {
    // ── Setup ──
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(false)
        .init();

    info!("Price Optimizer v0.1.0");

    let config = Config::from_env()?;
    info!(
        unit_cost = %config.unit_cost,
        fixed_cost = %config.fixed_cost,
        sensitivity = %config.market.demand_sensitivity,
        noise_std = %config.market.noise_std,
        samples = %config.market.sample_size,
        "Configuration loaded"
    );

    let store: Box<dyn HistoryStore> = match &config.history_path {
        Some(path) => {
            let jsonl = JsonlStore::new(path);
            info!(path = %jsonl.path().display(), "Using history file");
            Box::new(jsonl)
        }
        None => {
            info!("No HISTORY_PATH set; history kept in memory for this run");
            Box::new(MemoryStore::new())
        }
    };

    let report_json = std::env::var("REPORT_JSON")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    // ── Optimize ──
    let run = price_engine::run(&config, now_ms()).context("Demand model could not be fitted")?;
    let report = &run.packaged.report;

    if report_json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to encode report")?
        );
    } else {
        println!("{report}");
    }

    // ── Persist ──
    let saved = if run.result.is_recommendation() {
        save_best_effort(store.as_ref(), &run.packaged.record)
    } else {
        match run.result.status {
            SolveStatus::Minimum => warn!("Critical point is a minimum; not recommending or saving it"),
            status => error!(status = %status, "Could not compute the optimum; nothing saved"),
        }
        false
    };
    if run.result.is_recommendation() && !saved {
        warn!("Result computed but not saved");
    }

    // ── History ──
    let history = fetch_recent_best_effort(store.as_ref(), config.history_limit);
    if history.is_empty() {
        info!("History is empty or could not be read");
    } else {
        println!();
        println!("Recent simulations (last {}):", config.history_limit);
        for record in &history {
            println!("{}", format_record(record));
        }
    }

    Ok(())
}

fn format_record(record: &HistoryRecord) -> String {
    format!(
        "  t={}ms  unit_cost={:.2}  fixed_cost={:.2}  price={:.2}  profit={:.2}",
        record.recorded_at_ms,
        record.unit_cost,
        record.fixed_cost,
        record.optimal_price,
        record.max_profit
    )
}
