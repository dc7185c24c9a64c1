//! FX error types.

use currex_common::CurrencyCode;
use thiserror::Error;

/// Errors that can occur in rate lookup and conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FxError {
    /// The current table has no rate for this code.
    #[error("Rate not available for {0}")]
    RateNotAvailable(CurrencyCode),

    /// The source rate is zero, so no cross-rate exists.
    #[error("Zero rate for {0}")]
    ZeroRate(CurrencyCode),

    /// The amount is not a finite number.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Rate provider failed to deliver a table.
    #[error("Rate provider error: {0}")]
    ProviderError(String),

    /// Rate payload could not be decoded.
    #[error("Invalid rate payload: {0}")]
    InvalidPayload(String),
}

impl FxError {
    /// Whether a later fetch may succeed where this one failed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FxError::ProviderError(_))
    }
}

/// Result type for FX operations.
pub type FxResult<T> = Result<T, FxError>;
