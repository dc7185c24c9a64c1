//! Button actions delivered by the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Symbol written into the expression string.
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    /// Parse an expression symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Digit 0-9.
    Digit(u8),
    DecimalPoint,
    Operator(Operator),
    Equals,
    Clear,
    Backspace,
    ToggleSign,
    Percent,
    /// Exchange source and target currencies. Never reaches the engine.
    SwapCurrencies,
}

impl ButtonAction {
    /// Map a keyboard character to an action.
    ///
    /// `C` clears, `<` is backspace, `~` toggles the sign and `S` swaps
    /// currencies. Both `*`/`x` and `/` are accepted for the operators.
    pub fn from_key(key: char) -> Option<Self> {
        let action = match key {
            '0'..='9' => ButtonAction::Digit(key as u8 - b'0'),
            '.' => ButtonAction::DecimalPoint,
            '+' => ButtonAction::Operator(Operator::Add),
            '-' => ButtonAction::Operator(Operator::Subtract),
            '*' | 'x' | '×' => ButtonAction::Operator(Operator::Multiply),
            '/' | '÷' => ButtonAction::Operator(Operator::Divide),
            '=' => ButtonAction::Equals,
            'C' | 'c' => ButtonAction::Clear,
            '<' => ButtonAction::Backspace,
            '~' => ButtonAction::ToggleSign,
            '%' => ButtonAction::Percent,
            'S' | 's' => ButtonAction::SwapCurrencies,
            _ => return None,
        };
        Some(action)
    }

    /// Parse a whole key sequence, skipping whitespace.
    pub fn parse_keys(keys: &str) -> Result<Vec<Self>, char> {
        keys.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Self::from_key(c).ok_or(c))
            .collect()
    }

    /// Whether this action edits the in-progress operand.
    pub fn is_operand_entry(&self) -> bool {
        matches!(self, ButtonAction::Digit(_) | ButtonAction::DecimalPoint)
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonAction::Digit(d) => write!(f, "{}", d),
            ButtonAction::DecimalPoint => write!(f, "."),
            ButtonAction::Operator(op) => write!(f, "{}", op),
            ButtonAction::Equals => write!(f, "="),
            ButtonAction::Clear => write!(f, "AC"),
            ButtonAction::Backspace => write!(f, "⌫"),
            ButtonAction::ToggleSign => write!(f, "±"),
            ButtonAction::Percent => write!(f, "%"),
            ButtonAction::SwapCurrencies => write!(f, "⇄"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol('*'), None);
    }

    #[test]
    fn test_precedence() {
        assert!(Operator::Multiply.precedence() > Operator::Add.precedence());
        assert_eq!(Operator::Divide.precedence(), Operator::Multiply.precedence());
    }

    #[test]
    fn test_parse_keys() {
        let actions = ButtonAction::parse_keys("12 x3=").unwrap();
        assert_eq!(
            actions,
            vec![
                ButtonAction::Digit(1),
                ButtonAction::Digit(2),
                ButtonAction::Operator(Operator::Multiply),
                ButtonAction::Digit(3),
                ButtonAction::Equals,
            ]
        );
    }

    #[test]
    fn test_parse_keys_rejects_unknown() {
        assert_eq!(ButtonAction::parse_keys("1+?"), Err('?'));
    }
}
