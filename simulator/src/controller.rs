//! Simulation controller.

use std::sync::Arc;

use tracing::{info, warn};

use currex_calc::ButtonAction;
use currex_common::CurrencyCode;
use currex_fx::{FxError, RateProvider, RateStore, RateTable, StaticRateProvider};
use currex_session::{CurrencySession, MemoryCodeStore, SessionConfig};

use crate::metrics::SimulationMetrics;
use crate::scenario::{AssertCondition, Scenario, ScenarioStep};

/// Rates used when no rate file is given.
pub const SAMPLE_RATES: &str = r#"{
    "date": "2025-05-20",
    "usd": {"usd": 1, "twd": 32, "eur": 0.5, "jpy": 150, "gbp": 0.75}
}"#;

/// Drives a session through scenario steps.
pub struct SimulationController {
    session: CurrencySession<MemoryCodeStore>,
    provider: StaticRateProvider,
    metrics: SimulationMetrics,
    print_json: bool,
}

impl SimulationController {
    /// Create a controller serving `table` as the only rate source. The
    /// session base follows the table's base.
    pub fn new(
        mut config: SessionConfig,
        table: RateTable,
        print_json: bool,
    ) -> anyhow::Result<Self> {
        if table.base() != &config.base_currency {
            info!(
                configured = %config.base_currency,
                table = %table.base(),
                "Using rate table base"
            );
            config.base_currency = table.base().clone();
        }
        let rates = Arc::new(RateStore::new(config.base_currency.clone()));
        let store = MemoryCodeStore::with_codes(
            config.default_source.as_str(),
            config.default_target.as_str(),
        );
        let session = CurrencySession::new(config, store, rates)?;

        Ok(Self {
            session,
            provider: StaticRateProvider::new("static", table),
            metrics: SimulationMetrics::new(),
            print_json,
        })
    }

    /// Load the initial rate table.
    pub async fn initialize(&mut self) -> anyhow::Result<()> {
        info!(provider = self.provider.name(), "Fetching rates");
        self.session.refresh_rates(&self.provider).await?;

        match self.session.quote() {
            Some(quote) => {
                info!("{}", quote);
                info!("{}", quote.inverse());
            }
            None => warn!(
                source = %self.session.source(),
                target = %self.session.target(),
                "No rate between selected currencies"
            ),
        }
        Ok(())
    }

    /// Run a scenario.
    pub fn run_scenario(&mut self, scenario: &Scenario) -> anyhow::Result<()> {
        info!("Running scenario: {} - {}", scenario.name, scenario.description);

        for step in &scenario.steps {
            self.execute_step(step)?;
        }

        Ok(())
    }

    /// Execute a single scenario step.
    fn execute_step(&mut self, step: &ScenarioStep) -> anyhow::Result<()> {
        match step {
            ScenarioStep::Press { keys } => {
                let actions = ButtonAction::parse_keys(keys)
                    .map_err(|key| anyhow::anyhow!("Unknown key {:?} in {:?}", key, keys))?;
                for action in actions {
                    self.press(action)?;
                }
            }
            ScenarioStep::SetSource { code } => {
                info!("Selecting source currency {}", code.to_uppercase());
                self.session.set_source(code.as_str());
                self.record_conversion();
            }
            ScenarioStep::SetTarget { code } => {
                info!("Selecting target currency {}", code.to_uppercase());
                self.session.set_target(code.as_str());
                self.record_conversion();
            }
            ScenarioStep::FailRateFetch => {
                let error = FxError::ProviderError("simulated outage".to_string());
                self.session.on_rates_failed(&error);
            }
            ScenarioStep::Assert { condition } => self.check(condition)?,
        }
        Ok(())
    }

    fn press(&mut self, action: ButtonAction) -> anyhow::Result<()> {
        let outcome = self.session.handle(action);
        self.metrics.record_action(outcome.applied);

        let snapshot = self.session.snapshot();
        if snapshot.is_error {
            self.metrics.record_error();
        }
        if outcome.reconvert {
            self.record_conversion();
        }

        if self.print_json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            let converted = snapshot
                .converted
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "[{:>2}] {:<24} {:>22}  = {} {}",
                action.to_string(),
                snapshot.expression,
                format!("{} {}", snapshot.result, snapshot.source),
                converted,
                snapshot.target
            );
        }
        Ok(())
    }

    fn record_conversion(&mut self) {
        self.metrics
            .record_conversion(self.session.converted().is_some());
    }

    fn check(&mut self, condition: &AssertCondition) -> anyhow::Result<()> {
        let snapshot = self.session.snapshot();
        let passed = match condition {
            AssertCondition::ResultEquals { value } => &snapshot.result == value,
            AssertCondition::ConvertedEquals { value } => snapshot
                .converted
                .is_some_and(|converted| (converted - value).abs() < 0.005),
            AssertCondition::ConversionUnavailable => snapshot.converted.is_none(),
            AssertCondition::ShowsError => snapshot.is_error,
        };

        if passed {
            self.metrics.record_assertion(true);
            info!(?condition, "Assertion passed");
            Ok(())
        } else {
            self.metrics.record_assertion(false);
            Err(anyhow::anyhow!(
                "Assertion failed: {:?} (result {:?}, converted {:?})",
                condition,
                snapshot.result,
                snapshot.converted
            ))
        }
    }

    /// Currencies currently selected.
    pub fn currencies(&self) -> (&CurrencyCode, &CurrencyCode) {
        (self.session.source(), self.session.target())
    }

    /// Get simulation metrics.
    pub fn get_metrics(&self) -> SimulationMetrics {
        let mut metrics = self.metrics.clone();
        metrics.dropped_actions = self.session.router().dropped();
        metrics.persisted_writes = self.session.store().writes();
        metrics
    }
}
