//! Currency conversion and rate quotes.

use chrono::{DateTime, Utc};
use currex_common::CurrencyCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{FxError, FxResult};
use crate::rate_table::RateTable;

/// Converted amount, absent when no conversion is possible.
pub type ConversionResult = Option<f64>;

/// Convert a displayed amount from `source` to `target`.
///
/// Both rates are relative to the table's base, so the cross-rate is
/// `target_rate / source_rate`. The result is not rounded. The function is
/// pure: identical inputs give bit-identical output.
pub fn try_convert(
    amount: &str,
    source: &CurrencyCode,
    target: &CurrencyCode,
    table: &RateTable,
) -> FxResult<f64> {
    let value = amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FxError::InvalidAmount(amount.to_string()))?;

    let source_rate = table
        .rate(source)
        .ok_or_else(|| FxError::RateNotAvailable(source.clone()))?;
    let target_rate = table
        .rate(target)
        .ok_or_else(|| FxError::RateNotAvailable(target.clone()))?;

    if source_rate == 0.0 {
        return Err(FxError::ZeroRate(source.clone()));
    }

    let converted = value / source_rate * target_rate;
    debug!(
        amount = value,
        source = %source,
        target = %target,
        converted,
        "Converted amount"
    );
    Ok(converted)
}

/// Like [`try_convert`], collapsing every failure to an absent result.
pub fn convert(
    amount: &str,
    source: &CurrencyCode,
    target: &CurrencyCode,
    table: &RateTable,
) -> ConversionResult {
    try_convert(amount, source, target, table).ok()
}

/// Direct exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    /// Units of `target` per unit of `source`.
    pub rate: f64,
    /// When the underlying table was received.
    pub fetched_at: DateTime<Utc>,
}

impl RateQuote {
    /// Inverse quote.
    pub fn inverse(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            rate: 1.0 / self.rate,
            fetched_at: self.fetched_at,
        }
    }
}

impl fmt::Display for RateQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "1 {} = {:.4} {} ({})",
            self.source,
            self.rate,
            self.target,
            self.fetched_at.format("%Y/%m/%d %H:%M")
        )
    }
}
