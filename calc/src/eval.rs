//! Expression tokenizing and evaluation.
//!
//! Expressions are flat infix strings built by the engine, e.g. `12.5+-3×4`.
//! A `-` in operand position is a sign; in operator position it subtracts.

use crate::action::Operator;
use crate::error::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Op(Operator),
}

fn tokenize(expression: &str) -> CalcResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    loop {
        // Operand position
        let mut operand = String::new();
        if chars.peek() == Some(&'-') {
            operand.push('-');
            chars.next();
        }
        while let Some(&c) = chars.peek() {
            if c.is_ascii_digit() || c == '.' {
                operand.push(c);
                chars.next();
            } else {
                break;
            }
        }
        if !operand.chars().any(|c| c.is_ascii_digit()) {
            return Err(CalcError::MalformedExpression(format!(
                "expected operand in {:?}",
                expression
            )));
        }
        let value: f64 = operand.parse().map_err(|_| {
            CalcError::MalformedExpression(format!("invalid operand {:?}", operand))
        })?;
        tokens.push(Token::Number(value));

        // Operator position
        match chars.next() {
            None => return Ok(tokens),
            Some(c) => match Operator::from_symbol(c) {
                Some(op) => tokens.push(Token::Op(op)),
                None => {
                    return Err(CalcError::MalformedExpression(format!(
                        "unexpected {:?} in {:?}",
                        c, expression
                    )))
                }
            },
        }
    }
}

fn apply(op: Operator, lhs: f64, rhs: f64) -> CalcResult<f64> {
    let value = match op {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide => {
            if rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            lhs / rhs
        }
    };
    if !value.is_finite() {
        return Err(CalcError::Overflow);
    }
    Ok(value)
}

fn reduce(values: &mut Vec<f64>, ops: &mut Vec<Operator>) -> CalcResult<()> {
    let malformed = || CalcError::MalformedExpression("operand stack underflow".to_string());
    let op = ops.pop().ok_or_else(malformed)?;
    let rhs = values.pop().ok_or_else(malformed)?;
    let lhs = values.pop().ok_or_else(malformed)?;
    values.push(apply(op, lhs, rhs)?);
    Ok(())
}

/// Evaluate an infix expression with standard precedence.
///
/// `×` and `÷` bind tighter than `+` and `-`; operators of equal precedence
/// associate to the left. Arithmetic is done in `f64`.
pub fn evaluate(expression: &str) -> CalcResult<f64> {
    let tokens = tokenize(expression)?;
    let mut values: Vec<f64> = Vec::new();
    let mut ops: Vec<Operator> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(value) => values.push(value),
            Token::Op(op) => {
                while ops
                    .last()
                    .is_some_and(|top| top.precedence() >= op.precedence())
                {
                    reduce(&mut values, &mut ops)?;
                }
                ops.push(op);
            }
        }
    }
    while !ops.is_empty() {
        reduce(&mut values, &mut ops)?;
    }

    match values.as_slice() {
        [value] => Ok(*value),
        _ => Err(CalcError::MalformedExpression(expression.to_string())),
    }
}
