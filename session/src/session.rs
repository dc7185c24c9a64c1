//! Conversion session: calculator input plus currency selection.

use currex_calc::{ButtonAction, ExpressionEngine};
use currex_common::{CurrencyCode, CurrexError};
use currex_fx::{
    try_convert, ConversionResult, FxError, FxResult, RateProvider, RateQuote, RateTable,
    SharedRateStore,
};
use tracing::{debug, info, instrument, warn};

use crate::config::SessionConfig;
use crate::persistence::CodeStore;
use crate::router::{InputRouter, RouteOutcome};
use crate::snapshot::DisplaySnapshot;

/// Owns the calculator, the selected currencies and the converted amount.
///
/// The converted amount is re-derived explicitly after every change that can
/// affect it: a routed action that changes the result, a currency change or
/// swap, and a rate table update.
pub struct CurrencySession<S: CodeStore> {
    router: InputRouter,
    source: CurrencyCode,
    target: CurrencyCode,
    rates: SharedRateStore,
    store: S,
    converted: ConversionResult,
}

impl<S: CodeStore> CurrencySession<S> {
    /// Create a session, restoring the last-used codes from `store`.
    ///
    /// `rates` must hold tables for the configured base currency.
    pub fn new(config: SessionConfig, store: S, rates: SharedRateStore) -> Result<Self, CurrexError> {
        Self::check_config(&config, &rates).map_err(|e| {
            warn!(code = e.error_code(), error = %e, "Rejected session configuration");
            e
        })?;

        let restore = |code: Option<String>, default: &CurrencyCode| {
            code.map(CurrencyCode::new)
                .filter(|code| !code.as_str().is_empty())
                .unwrap_or_else(|| default.clone())
        };
        let source = restore(store.source_code(), &config.default_source);
        let target = restore(store.target_code(), &config.default_target);

        info!(source = %source, target = %target, "Session started");

        let mut session = Self {
            router: InputRouter::new(config.max_operand_digits),
            source,
            target,
            rates,
            store,
            converted: None,
        };
        session.reconvert();
        Ok(session)
    }

    fn check_config(config: &SessionConfig, rates: &SharedRateStore) -> Result<(), CurrexError> {
        config.validate()?;
        if rates.base() != &config.base_currency {
            return Err(CurrexError::ConfigurationError(format!(
                "rate store serves {} rates, configured base is {}",
                rates.base(),
                config.base_currency
            )));
        }
        Ok(())
    }

    /// Route a button press and re-derive the conversion if needed.
    pub fn handle(&mut self, action: ButtonAction) -> RouteOutcome {
        let outcome = self.router.route(action);
        if outcome.swap {
            self.swap_currencies();
        } else if outcome.reconvert {
            self.reconvert();
        }
        outcome
    }

    /// Exchange source and target, persist both and reconvert.
    pub fn swap_currencies(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
        self.store.set_source_code(self.source.as_str());
        self.store.set_target_code(self.target.as_str());
        debug!(source = %self.source, target = %self.target, "Swapped currencies");
        self.reconvert();
    }

    pub fn set_source(&mut self, code: impl Into<CurrencyCode>) {
        self.source = code.into();
        self.store.set_source_code(self.source.as_str());
        self.reconvert();
    }

    pub fn set_target(&mut self, code: impl Into<CurrencyCode>) {
        self.target = code.into();
        self.store.set_target_code(self.target.as_str());
        self.reconvert();
    }

    /// Re-derive the converted amount from the current result, codes and
    /// rate table.
    pub fn reconvert(&mut self) -> ConversionResult {
        let table = self.rates.snapshot();
        self.converted = match try_convert(self.engine().result(), &self.source, &self.target, &table) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(error = %e, "Conversion unavailable");
                None
            }
        };
        self.converted
    }

    /// Swap in a freshly fetched table and reconvert.
    pub fn on_rates_updated(&mut self, table: RateTable) {
        self.rates.replace(table);
        self.reconvert();
    }

    /// Keep using the last known table after a failed fetch.
    pub fn on_rates_failed(&mut self, error: &FxError) {
        self.rates.record_failure(error);
    }

    /// Fetch rates for the configured base and apply the outcome. The base is
    /// checked against the rate store when the session is created.
    #[instrument(skip(self, provider), fields(provider = provider.name()))]
    pub async fn refresh_rates(&mut self, provider: &dyn RateProvider) -> FxResult<()> {
        let base = self.rates.base().clone();
        match provider.fetch_rates(&base).await {
            Ok(table) => {
                self.on_rates_updated(table);
                Ok(())
            }
            Err(e) => {
                self.on_rates_failed(&e);
                Err(e)
            }
        }
    }

    /// Current exchange rate between source and target.
    pub fn quote(&self) -> Option<RateQuote> {
        self.rates.snapshot().quote(&self.source, &self.target)
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        let engine = self.engine();
        DisplaySnapshot {
            expression: engine.display_expression(),
            result: engine.result().to_string(),
            is_error: engine.is_error(),
            phase: engine.phase(),
            source: self.source.clone(),
            target: self.target.clone(),
            converted: self.converted,
        }
    }

    pub fn engine(&self) -> &ExpressionEngine {
        self.router.engine()
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn source(&self) -> &CurrencyCode {
        &self.source
    }

    pub fn target(&self) -> &CurrencyCode {
        &self.target
    }

    pub fn converted(&self) -> ConversionResult {
        self.converted
    }

    pub fn rates(&self) -> &SharedRateStore {
        &self.rates
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
