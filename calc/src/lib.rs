//! Currex Calculator Engine
//!
//! Turns a stream of calculator button presses into a running display string
//! and a final numeric result.
//!
//! # Features
//!
//! - Operand editing: digits, decimal point, backspace, sign toggle, percent
//! - Operator chaining with standard precedence on evaluation
//! - Bounded result rendering with an error sentinel for failed evaluations
//!
//! # Example
//!
//! ```rust
//! use currex_calc::{ButtonAction, ExpressionEngine, Operator};
//!
//! let mut engine = ExpressionEngine::new();
//! engine.apply(ButtonAction::Digit(2));
//! engine.apply(ButtonAction::Operator(Operator::Add));
//! engine.apply(ButtonAction::Digit(3));
//! engine.apply(ButtonAction::Operator(Operator::Multiply));
//! engine.apply(ButtonAction::Digit(4));
//! engine.apply(ButtonAction::Equals);
//!
//! assert_eq!(engine.result(), "14");
//! ```

pub mod action;
pub mod engine;
pub mod error;
pub mod eval;
pub mod format;

pub use action::{ButtonAction, Operator};
pub use engine::{EnginePhase, EngineState, ExpressionEngine, ERROR_SENTINEL};
pub use error::{CalcError, CalcResult};
pub use eval::evaluate;
pub use format::{percent_of, render};
