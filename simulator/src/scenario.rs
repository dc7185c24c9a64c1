//! Simulation scenarios.

use serde::{Deserialize, Serialize};

/// A simulation scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Steps in the scenario.
    pub steps: Vec<ScenarioStep>,
}

/// A step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioStep {
    /// Press keys, one action per character (see `ButtonAction::from_key`).
    Press { keys: String },
    /// Select the source currency.
    SetSource { code: String },
    /// Select the target currency.
    SetTarget { code: String },
    /// Simulate a failed rate fetch.
    FailRateFetch,
    /// Assert a condition.
    Assert { condition: AssertCondition },
}

/// Conditions that can be asserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AssertCondition {
    /// Displayed result equals.
    ResultEquals { value: String },
    /// Converted amount equals, compared at two decimals.
    ConvertedEquals { value: f64 },
    /// No converted amount is available.
    ConversionUnavailable,
    /// The error sentinel is displayed.
    ShowsError,
}

impl Scenario {
    /// Load a scenario by name.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name {
            "basic-arithmetic" => Ok(Self::basic_arithmetic()),
            "precedence" => Ok(Self::precedence()),
            "division-by-zero" => Ok(Self::division_by_zero()),
            "swap" => Ok(Self::swap()),
            "percent" => Ok(Self::percent()),
            "offline" => Ok(Self::offline()),
            _ => Err(anyhow::anyhow!("Unknown scenario: {}", name)),
        }
    }

    /// Names accepted by [`Scenario::load`].
    pub fn names() -> &'static [&'static str] {
        &[
            "basic-arithmetic",
            "precedence",
            "division-by-zero",
            "swap",
            "percent",
            "offline",
        ]
    }

    /// Ad-hoc scenario that presses the given keys.
    pub fn from_keys(keys: &str) -> Self {
        Self {
            name: "keys".to_string(),
            description: format!("Press {}", keys),
            steps: vec![ScenarioStep::Press {
                keys: keys.to_string(),
            }],
        }
    }

    fn press(keys: &str) -> ScenarioStep {
        ScenarioStep::Press {
            keys: keys.to_string(),
        }
    }

    fn expect(condition: AssertCondition) -> ScenarioStep {
        ScenarioStep::Assert { condition }
    }

    fn expect_result(value: &str) -> ScenarioStep {
        Self::expect(AssertCondition::ResultEquals {
            value: value.to_string(),
        })
    }

    fn basic_arithmetic() -> Self {
        Self {
            name: "basic-arithmetic".to_string(),
            description: "Enter an amount, add to it and convert USD to TWD".to_string(),
            steps: vec![
                Self::press("100"),
                Self::expect_result("100"),
                Self::press("+25.5="),
                Self::expect_result("125.5"),
                Self::expect(AssertCondition::ConvertedEquals { value: 4016.0 }),
            ],
        }
    }

    fn precedence() -> Self {
        Self {
            name: "precedence".to_string(),
            description: "Multiplication binds tighter than addition".to_string(),
            steps: vec![Self::press("2+3x4="), Self::expect_result("14")],
        }
    }

    fn division_by_zero() -> Self {
        Self {
            name: "division-by-zero".to_string(),
            description: "Division by zero shows the error and recovers on the next digit"
                .to_string(),
            steps: vec![
                Self::press("6/0="),
                Self::expect(AssertCondition::ShowsError),
                Self::expect(AssertCondition::ConversionUnavailable),
                Self::press("7"),
                Self::expect_result("7"),
            ],
        }
    }

    fn swap() -> Self {
        Self {
            name: "swap".to_string(),
            description: "Swapping twice restores the conversion".to_string(),
            steps: vec![
                Self::press("10"),
                Self::expect(AssertCondition::ConvertedEquals { value: 320.0 }),
                Self::press("S"),
                Self::expect(AssertCondition::ConvertedEquals { value: 0.3125 }),
                Self::press("S"),
                Self::expect(AssertCondition::ConvertedEquals { value: 320.0 }),
                ScenarioStep::SetTarget {
                    code: "xyz".to_string(),
                },
                Self::expect(AssertCondition::ConversionUnavailable),
            ],
        }
    }

    fn percent() -> Self {
        Self {
            name: "percent".to_string(),
            description: "Percent and sign toggle edit the operand being typed".to_string(),
            steps: vec![
                Self::press("50%"),
                Self::expect_result("0.5"),
                Self::press("~"),
                Self::expect_result("-0.5"),
                Self::press("C%"),
                Self::expect_result("0"),
            ],
        }
    }

    fn offline() -> Self {
        Self {
            name: "offline".to_string(),
            description: "A failed rate fetch keeps the last known table".to_string(),
            steps: vec![
                Self::press("3"),
                ScenarioStep::FailRateFetch,
                Self::expect(AssertCondition::ConvertedEquals { value: 96.0 }),
            ],
        }
    }
}
