//! Simulation metrics.

/// Simulation metrics.
#[derive(Debug, Clone, Default)]
pub struct SimulationMetrics {
    /// Total actions pressed.
    pub total_actions: u64,
    /// Actions that changed state.
    pub applied_actions: u64,
    /// Actions dropped by the operand length limit.
    pub dropped_actions: u64,
    /// Actions that left the error sentinel on display.
    pub errors: u64,
    /// Conversions that produced an amount.
    pub conversions: u64,
    /// Conversions with no amount available.
    pub unavailable_conversions: u64,
    /// Currency code writes to the code store.
    pub persisted_writes: usize,
    pub passed_assertions: u64,
    pub failed_assertions: u64,
}

impl SimulationMetrics {
    /// Create new metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pressed action.
    pub fn record_action(&mut self, applied: bool) {
        self.total_actions += 1;
        if applied {
            self.applied_actions += 1;
        }
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Record a re-derived conversion.
    pub fn record_conversion(&mut self, available: bool) {
        if available {
            self.conversions += 1;
        } else {
            self.unavailable_conversions += 1;
        }
    }

    pub fn record_assertion(&mut self, passed: bool) {
        if passed {
            self.passed_assertions += 1;
        } else {
            self.failed_assertions += 1;
        }
    }

    /// Share of conversions that produced an amount.
    pub fn availability(&self) -> f64 {
        let total = self.conversions + self.unavailable_conversions;
        if total == 0 {
            return 0.0;
        }

        self.conversions as f64 / total as f64
    }
}
