//! Session configuration.

use currex_common::{CurrencyCode, CurrexError};

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum digits in one operand. The decimal point and sign don't count.
    pub max_operand_digits: usize,
    /// Base currency requested from the rate provider.
    pub base_currency: CurrencyCode,
    /// Source currency used when none was persisted.
    pub default_source: CurrencyCode,
    /// Target currency used when none was persisted.
    pub default_target: CurrencyCode,
    /// Log level.
    pub log_level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_operand_digits: 9,
            base_currency: CurrencyCode::usd(),
            default_source: CurrencyCode::usd(),
            default_target: CurrencyCode::twd(),
            log_level: "info".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(digits) = std::env::var("CURREX_MAX_OPERAND_DIGITS") {
            if let Ok(digits) = digits.parse() {
                config.max_operand_digits = digits;
            }
        }

        if let Ok(code) = std::env::var("CURREX_BASE_CURRENCY") {
            config.base_currency = CurrencyCode::new(code);
        }

        if let Ok(code) = std::env::var("CURREX_DEFAULT_SOURCE") {
            config.default_source = CurrencyCode::new(code);
        }

        if let Ok(code) = std::env::var("CURREX_DEFAULT_TARGET") {
            config.default_target = CurrencyCode::new(code);
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), CurrexError> {
        if self.max_operand_digits == 0 {
            return Err(CurrexError::ConfigurationError(
                "Max operand digits cannot be 0".to_string(),
            ));
        }

        for (name, code) in [
            ("base currency", &self.base_currency),
            ("default source", &self.default_source),
            ("default target", &self.default_target),
        ] {
            if !code.is_well_formed() {
                return Err(CurrexError::ConfigurationError(format!(
                    "{} must be a three-letter code, got {:?}",
                    name,
                    code.as_str()
                )));
            }
        }

        Ok(())
    }
}
