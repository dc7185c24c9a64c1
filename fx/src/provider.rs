//! Rate provider trait and implementations.

use async_trait::async_trait;
use currex_common::CurrencyCode;
use tracing::debug;

use crate::error::{FxError, FxResult};
use crate::rate_table::RateTable;

/// Source of whole rate tables, e.g. an HTTP client for a rates API.
///
/// Transport, timeouts and retries belong to the implementation. Any error
/// is treated by callers as "no update".
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Fetch all rates relative to `base`.
    async fn fetch_rates(&self, base: &CurrencyCode) -> FxResult<RateTable>;
}

/// Provider that always serves the same table.
///
/// Useful for offline runs and for restoring the last stored table.
pub struct StaticRateProvider {
    name: String,
    table: RateTable,
}

impl StaticRateProvider {
    pub fn new(name: impl Into<String>, table: RateTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rates(&self, base: &CurrencyCode) -> FxResult<RateTable> {
        if self.table.base() != base {
            return Err(FxError::ProviderError(format!(
                "{} only serves {} rates, requested {}",
                self.name,
                self.table.base(),
                base
            )));
        }
        debug!(provider = %self.name, entries = self.table.len(), "Serving static rates");
        Ok(self.table.clone())
    }
}

/// Mock rate provider for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateProvider {
    name: String,
    table: parking_lot::Mutex<Option<RateTable>>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateProvider {
    /// Create a mock with no table; every fetch fails until one is set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: parking_lot::Mutex::new(None),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Serve this table from now on.
    pub fn set_table(&self, table: RateTable) {
        *self.table.lock() = Some(table);
    }

    /// Fail every fetch from now on.
    pub fn fail(&self) {
        *self.table.lock() = None;
    }

    /// Number of fetches so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateProvider for MockRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_rates(&self, _base: &CurrencyCode) -> FxResult<RateTable> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.table
            .lock()
            .clone()
            .ok_or_else(|| FxError::ProviderError(format!("{} is offline", self.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd_table() -> RateTable {
        RateTable::new(CurrencyCode::usd(), [("twd", 32.0)])
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticRateProvider::new("static", usd_table());

        let table = provider.fetch_rates(&CurrencyCode::usd()).await.unwrap();
        assert_eq!(table.rate(&CurrencyCode::twd()), Some(32.0));

        let result = provider.fetch_rates(&CurrencyCode::eur()).await;
        assert!(matches!(result, Err(FxError::ProviderError(_))));
    }

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockRateProvider::new("mock");
        assert!(provider.fetch_rates(&CurrencyCode::usd()).await.is_err());

        provider.set_table(usd_table());
        assert!(provider.fetch_rates(&CurrencyCode::usd()).await.is_ok());

        provider.fail();
        assert!(provider.fetch_rates(&CurrencyCode::usd()).await.is_err());
        assert_eq!(provider.calls(), 3);
    }
}
