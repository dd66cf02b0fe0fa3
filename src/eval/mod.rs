mod error;
mod tree;

pub use error::EvalError;
pub use tree::{
    ArrayResult, BinaryResult, ConstantResult, DieResult, ExpressionResult, FunctionCallResult,
    GroupResult, ResultNode, UnaryResult,
};

use crate::common::UnaryOperator;
use crate::parse::ast::Expression;
use crate::value::Value;

type EResult<T> = Result<T, EvalError>;

impl Expression {
    /// Evaluates the expression, operands first, left to right. Every call
    /// produces a fresh result tree; dice are rerolled each time. An error
    /// aborts the evaluation with no partial result.
    ///
    /// Recursion depth equals the expression's nesting depth.
    pub fn evaluate(&self) -> EResult<ExpressionResult> {
        Ok(match self {
            Self::Constant(x) => ConstantResult::new(*x).into(),
            Self::Array(items) => {
                let elements = items
                    .iter()
                    .map(Expression::evaluate)
                    .collect::<EResult<Vec<_>>>()?;
                ArrayResult::new(elements).into()
            }
            // evaluating a bare die does not roll it; the die is the value
            Self::Die(die) => DieResult::new(die.clone()).into(),
            Self::Binary(op, lhs, rhs) => {
                let left = lhs.evaluate()?;
                let right = rhs.evaluate()?;
                let l = left
                    .value()
                    .as_number()
                    .ok_or(EvalError::NonNumericOperands { op: *op })?;
                let r = right
                    .value()
                    .as_number()
                    .ok_or(EvalError::NonNumericOperands { op: *op })?;
                BinaryResult::new(*op, left, right, op.apply(l, r)).into()
            }
            Self::Unary(op, operand) => {
                let inner = operand.evaluate()?;
                let value = match op {
                    UnaryOperator::Pos => inner.value().clone(),
                    UnaryOperator::Neg => {
                        let x = inner
                            .value()
                            .as_number()
                            .ok_or(EvalError::NonNumericNegation)?;
                        Value::Number(-x)
                    }
                };
                UnaryResult::new(*op, inner, value).into()
            }
            Self::Group(inner) => GroupResult::new(inner.evaluate()?).into(),
            Self::FunctionCall(call) => {
                let args = call
                    .args
                    .iter()
                    .map(Expression::evaluate)
                    .collect::<EResult<Vec<_>>>()?;
                let values: Vec<Value> = args.iter().map(|a| a.value().clone()).collect();
                let value = call.function.call(&values)?;
                FunctionCallResult::new(call.name.clone(), args, value).into()
            }
        })
    }
}
