//! Currex Session
//!
//! Connects the calculator engine to currency conversion. The
//! [`InputRouter`] filters button presses before they reach the engine, and
//! [`CurrencySession`] re-derives the converted amount after every change to
//! the result, the selected currencies, or the rate table.

pub mod config;
pub mod persistence;
pub mod router;
pub mod session;
pub mod snapshot;

pub use config::SessionConfig;
pub use persistence::{CodeStore, MemoryCodeStore};
pub use router::{InputRouter, RouteOutcome};
pub use session::CurrencySession;
pub use snapshot::DisplaySnapshot;
