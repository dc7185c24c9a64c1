//! Error types shared across Currex crates.

use thiserror::Error;

/// Errors raised outside the calculation path: loading reference data and
/// validating configuration.
#[derive(Error, Debug)]
pub enum CurrexError {
    /// Currency catalog could not be decoded.
    #[error("Invalid currency catalog: {0}")]
    InvalidCatalog(#[from] serde_json::Error),

    /// Catalog contains the same code twice.
    #[error("Duplicate currency code in catalog: {0}")]
    DuplicateCurrency(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl CurrexError {
    /// Get a stable error code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            CurrexError::InvalidCatalog(_) => "INVALID_CATALOG",
            CurrexError::DuplicateCurrency(_) => "DUPLICATE_CURRENCY",
            CurrexError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        }
    }
}

/// Result type alias for common operations.
pub type Result<T> = std::result::Result<T, CurrexError>;
