//! Rendering of numeric values for the display.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{CalcError, CalcResult};

/// Maximum fractional digits shown for an evaluated result.
pub const MAX_FRACTION_DIGITS: usize = 10;

/// Maximum integer digits shown for an evaluated result.
pub const MAX_INTEGER_DIGITS: usize = 20;

/// Render an evaluated value for display.
///
/// Rounds to at most [`MAX_FRACTION_DIGITS`] fractional digits and strips
/// trailing zeros. Values whose integer part needs more than
/// [`MAX_INTEGER_DIGITS`] digits, and non-finite values, are
/// [`CalcError::Overflow`].
pub fn render(value: f64) -> CalcResult<String> {
    if !value.is_finite() {
        return Err(CalcError::Overflow);
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let rendered = match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    };

    let integer_digits = rendered
        .trim_start_matches('-')
        .split('.')
        .next()
        .map_or(0, str::len);
    if integer_digits > MAX_INTEGER_DIGITS {
        return Err(CalcError::Overflow);
    }

    Ok(rendered)
}

/// Divide an operand by 100, rendered as a plain decimal string.
///
/// Returns `None` when the operand does not parse as a number. A trailing
/// decimal point (`"5."`) is accepted.
pub fn percent_of(operand: &str) -> Option<String> {
    let operand = operand.strip_suffix('.').unwrap_or(operand);
    if operand.is_empty() {
        return None;
    }
    let value = Decimal::from_str(operand).ok()?;
    let percent = value.checked_div(Decimal::ONE_HUNDRED)?.normalize();
    if percent.is_zero() {
        return Some("0".to_string());
    }
    Some(percent.to_string())
}
