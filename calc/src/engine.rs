//! Expression engine state machine.

use serde::Serialize;
use tracing::debug;

use crate::action::{ButtonAction, Operator};
use crate::eval::evaluate;
use crate::format::{percent_of, render};

/// Display text shown after a failed evaluation.
pub const ERROR_SENTINEL: &str = "Error";

/// Editable calculator state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EngineState {
    /// Committed operands and operators, e.g. `12+3×`.
    pub expression: String,
    /// Operand being typed.
    pub current_input: String,
    /// Last operator appended to the expression.
    pub last_operator: Option<Operator>,
}

impl EngineState {
    fn reset(&mut self) {
        self.expression.clear();
        self.current_input.clear();
        self.last_operator = None;
    }
}

/// Where the engine is in an entry cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnginePhase {
    /// Typing the first operand.
    Entering,
    /// At least one operator has been committed.
    Chained,
    /// Showing an evaluated result.
    Evaluated,
    /// Showing the error sentinel.
    Error,
}

impl EnginePhase {
    /// Whether the next digit replaces the displayed value.
    pub fn starts_fresh_operand(&self) -> bool {
        matches!(self, EnginePhase::Evaluated | EnginePhase::Error)
    }
}

/// Accumulates button presses into an expression and evaluates it.
#[derive(Debug, Clone)]
pub struct ExpressionEngine {
    state: EngineState,
    result: String,
    phase: EnginePhase,
}

impl ExpressionEngine {
    pub fn new() -> Self {
        Self {
            state: EngineState::default(),
            result: "0".to_string(),
            phase: EnginePhase::Entering,
        }
    }

    /// Apply a button press. Returns `false` when the press was a no-op.
    ///
    /// `SwapCurrencies` is not an engine action and is always a no-op here.
    pub fn apply(&mut self, action: ButtonAction) -> bool {
        match action {
            ButtonAction::Digit(d) => self.digit(d),
            ButtonAction::DecimalPoint => self.decimal_point(),
            ButtonAction::Operator(op) => self.operator(op),
            ButtonAction::Equals => self.equals(),
            ButtonAction::Clear => self.clear(),
            ButtonAction::Backspace => self.backspace(),
            ButtonAction::ToggleSign => self.toggle_sign(),
            ButtonAction::Percent => self.percent(),
            ButtonAction::SwapCurrencies => false,
        }
    }

    /// Displayed result: the operand being typed, the last evaluated value,
    /// or [`ERROR_SENTINEL`].
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn expression(&self) -> &str {
        &self.state.expression
    }

    pub fn current_input(&self) -> &str {
        &self.state.current_input
    }

    pub fn last_operator(&self) -> Option<Operator> {
        self.state.last_operator
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn is_error(&self) -> bool {
        self.phase == EnginePhase::Error
    }

    /// Expression followed by the operand being typed.
    pub fn display_expression(&self) -> String {
        format!("{}{}", self.state.expression, self.state.current_input)
    }

    /// Digits in the operand being typed. Zero when the next digit would
    /// start a fresh operand.
    pub fn operand_digits(&self) -> usize {
        if self.phase.starts_fresh_operand() {
            return 0;
        }
        self.state
            .current_input
            .chars()
            .filter(|c| c.is_ascii_digit())
            .count()
    }

    fn begin_operand(&mut self) {
        if self.phase.starts_fresh_operand() {
            self.state.current_input.clear();
            self.phase = EnginePhase::Entering;
        }
    }

    fn sync_result(&mut self) {
        self.result = if self.state.current_input.is_empty() {
            "0".to_string()
        } else {
            self.state.current_input.clone()
        };
    }

    fn digit(&mut self, d: u8) -> bool {
        if d > 9 {
            return false;
        }
        self.begin_operand();

        let digit = char::from(b'0' + d);
        let input = &mut self.state.current_input;
        if input.trim_start_matches('-') == "0" {
            input.pop();
        }
        input.push(digit);
        self.sync_result();
        true
    }

    fn decimal_point(&mut self) -> bool {
        self.begin_operand();

        let input = &mut self.state.current_input;
        if input.contains('.') {
            return false;
        }
        if input.is_empty() {
            input.push_str("0.");
        } else {
            input.push('.');
        }
        self.sync_result();
        true
    }

    fn backspace(&mut self) -> bool {
        if self.phase == EnginePhase::Evaluated {
            self.begin_operand();
            self.sync_result();
            return true;
        }

        let input = &mut self.state.current_input;
        if input.pop().is_none() {
            return false;
        }
        // A lone sign is not an operand.
        if input.as_str() == "-" {
            input.clear();
        }
        self.sync_result();
        true
    }

    fn toggle_sign(&mut self) -> bool {
        if self.phase.starts_fresh_operand() || self.state.current_input.is_empty() {
            return false;
        }

        let input = &mut self.state.current_input;
        if input.starts_with('-') {
            input.remove(0);
        } else {
            input.insert(0, '-');
        }
        self.sync_result();
        true
    }

    fn percent(&mut self) -> bool {
        if self.phase.starts_fresh_operand() {
            return false;
        }
        let Some(percent) = percent_of(&self.state.current_input) else {
            return false;
        };
        self.state.current_input = percent;
        self.sync_result();
        true
    }

    fn operator(&mut self, op: Operator) -> bool {
        if self.state.current_input.is_empty() {
            return false;
        }

        let operand = std::mem::take(&mut self.state.current_input);
        self.state.expression.push_str(&operand);
        self.state.expression.push(op.symbol());
        self.state.last_operator = Some(op);
        self.phase = EnginePhase::Chained;
        true
    }

    fn equals(&mut self) -> bool {
        let mut combined = self.display_expression();
        if combined
            .chars()
            .last()
            .is_some_and(|c| c == '.' || Operator::from_symbol(c).is_some())
        {
            combined.pop();
        }
        if combined.is_empty() {
            return false;
        }

        match evaluate(&combined).and_then(render) {
            Ok(rendered) => {
                debug!(expression = %combined, result = %rendered, "Evaluated expression");
                self.result = rendered.clone();
                self.state.current_input = rendered;
                self.state.expression.clear();
                self.phase = EnginePhase::Evaluated;
            }
            Err(e) => {
                debug!(expression = %combined, error = %e, "Evaluation failed");
                self.result = ERROR_SENTINEL.to_string();
                self.state.current_input.clear();
                self.state.expression.clear();
                self.phase = EnginePhase::Error;
            }
        }
        true
    }

    fn clear(&mut self) -> bool {
        self.state.reset();
        self.result = "0".to_string();
        self.phase = EnginePhase::Entering;
        true
    }
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn press(engine: &mut ExpressionEngine, keys: &str) {
        for action in ButtonAction::parse_keys(keys).unwrap() {
            engine.apply(action);
        }
    }

    fn run(keys: &str) -> ExpressionEngine {
        let mut engine = ExpressionEngine::new();
        press(&mut engine, keys);
        engine
    }

    #[test]
    fn test_initial_state() {
        let engine = ExpressionEngine::new();
        assert_eq!(engine.result(), "0");
        assert_eq!(engine.expression(), "");
        assert_eq!(engine.current_input(), "");
        assert_eq!(engine.phase(), EnginePhase::Entering);
    }

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(run("05").result(), "5");
        assert_eq!(run("0").result(), "0");
        assert_eq!(run("105").result(), "105");
    }

    #[test]
    fn test_decimal_point_idempotent() {
        let engine = run("3..");
        assert_eq!(engine.current_input(), "3.");

        let engine = run("..");
        assert_eq!(engine.current_input(), "0.");
        assert_eq!(engine.result(), "0.");
    }

    #[test]
    fn test_decimal_after_zero_keeps_zero() {
        assert_eq!(run("0.5").result(), "0.5");
    }

    #[test]
    fn test_backspace() {
        let mut engine = run("12");
        press(&mut engine, "<");
        assert_eq!(engine.result(), "1");
        press(&mut engine, "<");
        assert_eq!(engine.result(), "0");
        assert_eq!(engine.current_input(), "");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut engine = ExpressionEngine::new();
        assert!(!engine.apply(ButtonAction::Backspace));
        assert_eq!(engine.result(), "0");
        assert_eq!(engine.state(), &EngineState::default());
    }

    #[test]
    fn test_backspace_drops_lone_sign() {
        let mut engine = run("5~");
        assert_eq!(engine.result(), "-5");
        press(&mut engine, "<");
        assert_eq!(engine.current_input(), "");
        assert_eq!(engine.result(), "0");
    }

    #[test]
    fn test_toggle_sign() {
        let mut engine = run("7~");
        assert_eq!(engine.result(), "-7");
        press(&mut engine, "~");
        assert_eq!(engine.result(), "7");
    }

    #[test]
    fn test_toggle_sign_on_empty_is_noop() {
        let mut engine = ExpressionEngine::new();
        assert!(!engine.apply(ButtonAction::ToggleSign));
        assert_eq!(engine.current_input(), "");
    }

    #[test]
    fn test_negative_zero_digit_replaces() {
        assert_eq!(run("0~4").result(), "-4");
    }

    #[test]
    fn test_percent() {
        assert_eq!(run("50%").result(), "0.5");
        assert_eq!(run("50%").current_input(), "0.5");
    }

    #[test]
    fn test_percent_on_empty_is_noop() {
        let mut engine = ExpressionEngine::new();
        assert!(!engine.apply(ButtonAction::Percent));
        assert_eq!(engine.result(), "0");
        assert_eq!(engine.current_input(), "");
    }

    #[test]
    fn test_operator_without_operand_is_noop() {
        let mut engine = ExpressionEngine::new();
        assert!(!engine.apply(ButtonAction::Operator(Operator::Add)));
        assert_eq!(engine.expression(), "");

        let mut engine = run("3+");
        assert!(!engine.apply(ButtonAction::Operator(Operator::Multiply)));
        assert_eq!(engine.expression(), "3+");
    }

    #[test]
    fn test_operator_commits_operand() {
        let engine = run("12+");
        assert_eq!(engine.expression(), "12+");
        assert_eq!(engine.current_input(), "");
        assert_eq!(engine.result(), "12");
        assert_eq!(engine.last_operator(), Some(Operator::Add));
        assert_eq!(engine.phase(), EnginePhase::Chained);
    }

    #[test]
    fn test_precedence() {
        let engine = run("2+3x4=");
        assert_eq!(engine.result(), "14");
        assert_eq!(engine.current_input(), "14");
        assert_eq!(engine.expression(), "");
        assert_eq!(engine.phase(), EnginePhase::Evaluated);
    }

    #[test]
    fn test_trailing_operator_dropped() {
        assert_eq!(run("8x").expression(), "8×");
        assert_eq!(run("8x=").result(), "8");
        assert_eq!(run("4.=").result(), "4");
    }

    #[test]
    fn test_equals_on_empty_is_noop() {
        let mut engine = ExpressionEngine::new();
        assert!(!engine.apply(ButtonAction::Equals));
        assert_eq!(engine.result(), "0");
        assert_eq!(engine.phase(), EnginePhase::Entering);
    }

    #[test]
    fn test_division_by_zero_then_fresh_digit() {
        let mut engine = run("6/0=");
        assert_eq!(engine.result(), ERROR_SENTINEL);
        assert!(engine.is_error());
        assert_eq!(engine.current_input(), "");
        assert_eq!(engine.expression(), "");

        press(&mut engine, "7");
        assert_eq!(engine.result(), "7");
        assert_eq!(engine.current_input(), "7");
        assert_eq!(engine.phase(), EnginePhase::Entering);
    }

    #[test]
    fn test_error_ignores_operator_and_equals() {
        let mut engine = run("1/0=");
        assert!(!engine.apply(ButtonAction::Operator(Operator::Add)));
        assert!(!engine.apply(ButtonAction::Equals));
        assert_eq!(engine.result(), ERROR_SENTINEL);
    }

    #[test]
    fn test_overflow_is_error() {
        let mut engine = ExpressionEngine::new();
        press(&mut engine, "999999999x999999999=");
        press(&mut engine, "x999999999=");
        assert_eq!(engine.result(), ERROR_SENTINEL);
    }

    #[test]
    fn test_digit_after_result_replaces() {
        let mut engine = run("2+2=");
        assert_eq!(engine.result(), "4");
        press(&mut engine, "9");
        assert_eq!(engine.result(), "9");
        assert_eq!(engine.expression(), "");
    }

    #[test]
    fn test_operator_after_result_chains() {
        let mut engine = run("2+2=");
        press(&mut engine, "x3=");
        assert_eq!(engine.result(), "12");
    }

    #[test]
    fn test_decimal_after_result_starts_fresh() {
        let engine = run("2+2=.");
        assert_eq!(engine.result(), "0.");
    }

    #[test]
    fn test_backspace_after_result_starts_fresh() {
        let mut engine = run("2+2=");
        assert!(engine.apply(ButtonAction::Backspace));
        assert_eq!(engine.result(), "0");
        assert_eq!(engine.current_input(), "");
        assert_eq!(engine.phase(), EnginePhase::Entering);
    }

    #[test]
    fn test_sign_and_percent_ignore_evaluated_result() {
        let mut engine = run("2+2=");
        assert!(!engine.apply(ButtonAction::ToggleSign));
        assert!(!engine.apply(ButtonAction::Percent));
        assert_eq!(engine.result(), "4");
    }

    #[test]
    fn test_negative_operand_in_chain() {
        assert_eq!(run("3-5~=").result(), "8");
        assert_eq!(run("5~x2=").result(), "-10");
    }

    #[test]
    fn test_fraction_rendering() {
        assert_eq!(run("1/3=").result(), "0.3333333333");
        assert_eq!(run(".1+.2=").result(), "0.3");
    }

    #[test]
    fn test_display_expression() {
        let engine = run("12+3");
        assert_eq!(engine.display_expression(), "12+3");

        // After evaluation only the result remains.
        let engine = run("12+3=");
        assert_eq!(engine.expression(), "");
        assert_eq!(engine.display_expression(), "15");
        assert_eq!(engine.display_expression(), engine.result());
    }

    #[test]
    fn test_operand_digits() {
        assert_eq!(run("12.5").operand_digits(), 3);
        assert_eq!(run("12.5~").operand_digits(), 3);
        assert_eq!(run("12+34=").operand_digits(), 0);
    }

    #[test]
    fn test_clear_resets_everything() {
        for keys in ["", "12+3", "2+3x4=", "6/0=", "5~%"] {
            let mut engine = run(keys);
            assert!(engine.apply(ButtonAction::Clear));
            assert_eq!(engine.result(), "0");
            assert_eq!(engine.expression(), "");
            assert_eq!(engine.current_input(), "");
            assert_eq!(engine.last_operator(), None);
            assert_eq!(engine.phase(), EnginePhase::Entering);
        }
    }

    proptest! {
        #[test]
        fn prop_digit_entry_shows_digits(digits in proptest::collection::vec(0u8..=9, 1..12)) {
            let mut engine = ExpressionEngine::new();
            for d in &digits {
                engine.apply(ButtonAction::Digit(*d));
            }
            let typed: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
            let trimmed = typed.trim_start_matches('0');
            let expected = if trimmed.is_empty() { "0" } else { trimmed };
            prop_assert_eq!(engine.result(), expected);
        }

        #[test]
        fn prop_single_decimal_point(keys in "[0-9.]{1,16}") {
            let engine = run(&keys);
            prop_assert!(engine.current_input().matches('.').count() <= 1);
        }
    }
}
