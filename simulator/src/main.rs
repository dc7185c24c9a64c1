//! Currex Simulator
//!
//! Drives the calculator and conversion core from the command line.

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use currex_common::{CurrencyCatalog, CurrencyCode};
use currex_fx::RateTable;
use currex_session::SessionConfig;

mod controller;
mod metrics;
mod scenario;

use controller::{SimulationController, SAMPLE_RATES};
use scenario::Scenario;

const CATALOG: &str = r#"[
    {"code": "usd", "display_name": "US Dollar", "symbol": "$"},
    {"code": "twd", "display_name": "New Taiwan Dollar", "symbol": "NT$"},
    {"code": "eur", "display_name": "Euro", "symbol": "€"},
    {"code": "jpy", "display_name": "Japanese Yen", "symbol": "¥"},
    {"code": "gbp", "display_name": "British Pound", "symbol": "£"}
]"#;

/// Currex Simulator CLI
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Calculator and currency conversion simulator")]
struct Args {
    /// Scenario to run
    #[arg(short, long, conflicts_with = "keys")]
    scenario: Option<String>,

    /// Keys to press, e.g. "12+3x4=" (C clear, < backspace, ~ sign, % percent, S swap)
    #[arg(short, long)]
    keys: Option<String>,

    /// Rate table JSON file in the `{"date": ..., "<base>": {...}}` format
    #[arg(short, long)]
    rates: Option<std::path::PathBuf>,

    /// Source currency
    #[arg(long)]
    source: Option<String>,

    /// Target currency
    #[arg(long)]
    target: Option<String>,

    /// Print display snapshots as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = SessionConfig::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Currex Simulator");

    let catalog = CurrencyCatalog::from_json(CATALOG)?;
    if let Some(code) = &args.source {
        config.default_source = CurrencyCode::new(code.as_str());
    }
    if let Some(code) = &args.target {
        config.default_target = CurrencyCode::new(code.as_str());
    }
    for code in [&config.default_source, &config.default_target] {
        match catalog.find(code.as_str()) {
            Some(entry) => info!("{} ({})", entry.display_name, entry.code),
            None => warn!("Unknown currency {}", code),
        }
    }

    let table = match &args.rates {
        Some(path) => RateTable::from_api_json(&std::fs::read_to_string(path)?)?,
        None => RateTable::from_api_json(SAMPLE_RATES)?,
    };
    info!(
        base = %table.base(),
        currencies = table.len(),
        as_of = ?table.as_of(),
        "Loaded rate table"
    );
    let codes: Vec<String> = table.codes().iter().map(|code| code.to_display()).collect();
    info!("Rates available for: {}", codes.join(", "));

    let mut controller = SimulationController::new(config, table, args.json)?;
    controller.initialize().await?;

    let scenario = match (&args.scenario, &args.keys) {
        (Some(name), _) => Scenario::load(name)?,
        (None, Some(keys)) => Scenario::from_keys(keys),
        (None, None) => {
            info!("No scenario or keys given. Available scenarios:");
            for name in Scenario::names() {
                info!("  {}", name);
            }
            return Ok(());
        }
    };

    let outcome = controller.run_scenario(&scenario);

    let metrics = controller.get_metrics();
    let (source, target) = controller.currencies();
    info!("Simulation Summary:");
    info!("  Currencies: {} -> {}", source, target);
    info!(
        "  Actions: {} ({} applied, {} dropped)",
        metrics.total_actions, metrics.applied_actions, metrics.dropped_actions
    );
    info!("  Errors shown: {}", metrics.errors);
    info!(
        "  Conversions: {} available, {} unavailable ({:.0}%)",
        metrics.conversions,
        metrics.unavailable_conversions,
        metrics.availability() * 100.0
    );
    info!("  Code store writes: {}", metrics.persisted_writes);
    info!(
        "  Assertions: {} passed, {} failed",
        metrics.passed_assertions, metrics.failed_assertions
    );

    outcome
}
