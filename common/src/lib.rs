//! Currex Common Types
//!
//! Types shared by the calculator, FX, and session crates: currency codes,
//! the currency catalog, and the common error type.

pub mod catalog;
pub mod currency;
pub mod error;

pub use catalog::*;
pub use currency::*;
pub use error::*;
