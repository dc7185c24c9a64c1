//! Immutable view of session state for the presentation layer.

use currex_calc::EnginePhase;
use currex_common::CurrencyCode;
use serde::Serialize;

/// Everything a view needs to draw the calculator and the conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    /// Committed expression followed by the operand being typed.
    pub expression: String,
    /// Displayed result or the error sentinel.
    pub result: String,
    pub is_error: bool,
    pub phase: EnginePhase,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    /// Converted amount, unrounded. `None` when unavailable.
    pub converted: Option<f64>,
}
