//! Calculator error types.

use thiserror::Error;

/// Errors that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A division had a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// The token stream is not `operand (operator operand)*`.
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// The value is not finite or does not fit the display.
    #[error("Result out of range")]
    Overflow,
}

/// Result type for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;
