//! Currex FX
//!
//! Rate tables and currency conversion.
//!
//! # Features
//!
//! - Base-relative rate tables decoded from the upstream JSON payload
//! - Pure cross-rate conversion with explicit missing/zero rate guards
//! - Snapshot store that swaps whole tables on each successful fetch
//!
//! # Example
//!
//! ```rust
//! use currex_common::CurrencyCode;
//! use currex_fx::{convert, RateTable};
//!
//! let table = RateTable::new(CurrencyCode::usd(), [("usd", 1.0), ("twd", 32.0)]);
//! let twd = convert("10", &CurrencyCode::usd(), &CurrencyCode::twd(), &table);
//!
//! assert_eq!(twd, Some(320.0));
//! ```

pub mod conversion;
pub mod error;
pub mod provider;
pub mod rate_table;
pub mod store;

pub use conversion::{convert, try_convert, ConversionResult, RateQuote};
pub use error::{FxError, FxResult};
pub use provider::{RateProvider, StaticRateProvider};
pub use rate_table::RateTable;
pub use store::{RateStore, SharedRateStore, StoreStats};

#[cfg(any(test, feature = "test-utils"))]
pub use provider::MockRateProvider;
