//! Routing of button presses to the expression engine.

use currex_calc::{ButtonAction, ExpressionEngine};
use tracing::debug;

/// What a routed action did and what the caller should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteOutcome {
    /// The engine state changed, or a swap was requested.
    pub applied: bool,
    /// The converted amount must be re-derived.
    pub reconvert: bool,
    /// Source and target currencies must be exchanged.
    pub swap: bool,
}

impl RouteOutcome {
    fn dropped() -> Self {
        Self::default()
    }

    fn swap() -> Self {
        Self {
            applied: true,
            reconvert: true,
            swap: true,
        }
    }
}

/// Filters button presses and forwards them to the engine.
#[derive(Debug, Clone)]
pub struct InputRouter {
    engine: ExpressionEngine,
    max_operand_digits: usize,
    dropped: u64,
}

impl InputRouter {
    pub fn new(max_operand_digits: usize) -> Self {
        Self {
            engine: ExpressionEngine::new(),
            max_operand_digits,
            dropped: 0,
        }
    }

    /// Route one action.
    ///
    /// `SwapCurrencies` never reaches the engine. Digits and decimal points
    /// are dropped once the operand holds `max_operand_digits` digits.
    pub fn route(&mut self, action: ButtonAction) -> RouteOutcome {
        if action == ButtonAction::SwapCurrencies {
            return RouteOutcome::swap();
        }

        if action.is_operand_entry() && self.engine.operand_digits() >= self.max_operand_digits {
            self.dropped += 1;
            debug!(
                action = %action,
                limit = self.max_operand_digits,
                "Operand length limit reached, dropping input"
            );
            return RouteOutcome::dropped();
        }

        let applied = self.engine.apply(action);
        RouteOutcome {
            applied,
            // Committing an operator leaves the displayed result unchanged.
            reconvert: applied && !matches!(action, ButtonAction::Operator(_)),
            swap: false,
        }
    }

    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    pub fn max_operand_digits(&self) -> usize {
        self.max_operand_digits
    }

    /// Number of actions dropped by the length limit.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use currex_calc::{EngineState, Operator};

    fn route_keys(router: &mut InputRouter, keys: &str) -> Vec<RouteOutcome> {
        ButtonAction::parse_keys(keys)
            .unwrap()
            .into_iter()
            .map(|action| router.route(action))
            .collect()
    }

    #[test]
    fn test_swap_is_intercepted() {
        let mut router = InputRouter::new(9);
        route_keys(&mut router, "12+3");
        let before = router.engine().state().clone();

        let outcome = router.route(ButtonAction::SwapCurrencies);

        assert!(outcome.swap);
        assert!(outcome.reconvert);
        assert_eq!(router.engine().state(), &before);
    }

    #[test]
    fn test_operand_limit() {
        let mut router = InputRouter::new(9);
        route_keys(&mut router, "123456789");
        assert_eq!(router.engine().result(), "123456789");

        let outcome = router.route(ButtonAction::Digit(0));
        assert_eq!(outcome, RouteOutcome::default());
        assert!(!router.route(ButtonAction::DecimalPoint).applied);
        assert_eq!(router.engine().result(), "123456789");
        assert_eq!(router.dropped(), 2);
    }

    #[test]
    fn test_limit_ignores_decimal_point_and_sign() {
        let mut router = InputRouter::new(4);
        route_keys(&mut router, "12.3~4");
        assert_eq!(router.engine().result(), "-12.34");
        assert!(!router.route(ButtonAction::Digit(5)).applied);
    }

    #[test]
    fn test_limit_applies_per_operand() {
        let mut router = InputRouter::new(3);
        route_keys(&mut router, "999+999");
        assert_eq!(router.engine().display_expression(), "999+999");

        route_keys(&mut router, "=");
        assert_eq!(router.engine().result(), "1998");

        // The result is replaced by the next digit, so the limit starts over.
        let outcome = router.route(ButtonAction::Digit(7));
        assert!(outcome.applied);
        assert_eq!(router.engine().result(), "7");
    }

    #[test]
    fn test_operator_does_not_reconvert() {
        let mut router = InputRouter::new(9);
        router.route(ButtonAction::Digit(4));

        let outcome = router.route(ButtonAction::Operator(Operator::Add));
        assert!(outcome.applied);
        assert!(!outcome.reconvert);
    }

    #[test]
    fn test_editing_reconverts() {
        let mut router = InputRouter::new(9);
        for outcome in route_keys(&mut router, "4.5~%<") {
            assert!(outcome.applied);
            assert!(outcome.reconvert);
            assert!(!outcome.swap);
        }
        let outcome = router.route(ButtonAction::Clear);
        assert!(outcome.reconvert);
        assert_eq!(router.engine().state(), &EngineState::default());
    }

    #[test]
    fn test_noop_does_not_reconvert() {
        let mut router = InputRouter::new(9);
        let outcome = router.route(ButtonAction::Backspace);
        assert!(!outcome.applied);
        assert!(!outcome.reconvert);
    }
}
