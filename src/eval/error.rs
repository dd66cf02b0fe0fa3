use crate::common::{BinaryOperator, Float};
use thiserror::Error;

/// Raised while evaluating an expression; aborts the evaluation with no
/// partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("operator '{op}' requires numeric operands")]
    NonNumericOperands { op: BinaryOperator },
    #[error("cannot negate a value that is not a number")]
    NonNumericNegation,
    #[error("{name} expects {expected} argument(s), got {got}")]
    WrongArgumentCount {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{name}: argument {index} must be a number")]
    ExpectedNumber { name: &'static str, index: usize },
    #[error("{name}: argument {index} must be a list of rolls")]
    ExpectedRolls { name: &'static str, index: usize },
    #[error("{name}: argument {index} must be a die")]
    ExpectedDie { name: &'static str, index: usize },
    #[error("{name} requires a positive count, got {got}")]
    NonPositiveCount { name: &'static str, got: Float },
    #[error("{name} requires a non-negative count, got {got}")]
    NegativeCount { name: &'static str, got: Float },
    #[error("{name} requires at least one roll")]
    EmptyRolls { name: &'static str },
    #[error("{0}")]
    Value(String),
}

impl EvalError {
    /// Free-form error constructor for user-defined functions.
    pub fn value_error(msg: impl ToString) -> Self {
        Self::Value(msg.to_string())
    }
}
