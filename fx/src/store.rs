//! Current rate table snapshot.

use currex_common::CurrencyCode;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{FxError, FxResult};
use crate::provider::RateProvider;
use crate::rate_table::RateTable;

/// Holds the last successfully fetched rate table.
///
/// Readers get an `Arc` snapshot; updates swap the whole table, so a reader
/// never observes a partially updated table. Failed fetches leave the
/// current table in place.
pub struct RateStore {
    base: CurrencyCode,
    current: RwLock<Arc<RateTable>>,
    updates: AtomicU64,
    failures: AtomicU64,
}

impl RateStore {
    /// Create a store with an empty table for `base`.
    pub fn new(base: CurrencyCode) -> Self {
        Self::with_table(RateTable::empty(base))
    }

    /// Create a store seeded with a table, e.g. one restored from disk.
    pub fn with_table(table: RateTable) -> Self {
        Self {
            base: table.base().clone(),
            current: RwLock::new(Arc::new(table)),
            updates: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Base currency requested from providers.
    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Current table.
    pub fn snapshot(&self) -> Arc<RateTable> {
        self.current.read().clone()
    }

    /// Replace the table wholesale, returning the previous one.
    pub fn replace(&self, table: RateTable) -> Arc<RateTable> {
        if table.base() != &self.base {
            warn!(expected = %self.base, actual = %table.base(), "Rate table has unexpected base");
        }
        info!(
            base = %table.base(),
            entries = table.len(),
            fetched_at = %table.fetched_at(),
            "Rate table replaced"
        );
        self.updates.fetch_add(1, Ordering::Relaxed);
        std::mem::replace(&mut *self.current.write(), Arc::new(table))
    }

    /// Record a failed fetch. The current table stays in use.
    pub fn record_failure(&self, error: &FxError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        warn!(
            base = %self.base,
            error = %error,
            retryable = error.is_retryable(),
            entries = self.current.read().len(),
            "Rate fetch failed, keeping last known rates"
        );
    }

    /// Fetch a fresh table from `provider` and swap it in on success.
    #[instrument(skip(self, provider), fields(provider = provider.name(), base = %self.base))]
    pub async fn refresh(&self, provider: &dyn RateProvider) -> FxResult<Arc<RateTable>> {
        match provider.fetch_rates(&self.base).await {
            Ok(table) => {
                self.replace(table);
                Ok(self.snapshot())
            }
            Err(e) => {
                self.record_failure(&e);
                Err(e)
            }
        }
    }

    /// Get store statistics.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            entries: self.current.read().len(),
            updates: self.updates.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Store statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub entries: usize,
    pub updates: u64,
    pub failures: u64,
}

/// Shared rate store.
pub type SharedRateStore = Arc<RateStore>;
