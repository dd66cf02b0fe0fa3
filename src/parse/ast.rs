use crate::common::{BinaryOperator, Float, UnaryOperator};
use crate::dice::Die;
use crate::functions::Function;

/// An unevaluated dice-notation expression. Built once by the parser,
/// never mutated; [`evaluate`](Expression::evaluate) may be called on it
/// any number of times.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(Float),
    Array(Vec<Expression>),
    Die(Die),
    Binary(BinaryOperator, Box<Expression>, Box<Expression>),
    Unary(UnaryOperator, Box<Expression>),
    Group(Box<Expression>),
    FunctionCall(FunctionCall),
}

/// A call whose callee was resolved at parse time; an unknown name is a
/// parse error, so `function` is never dangling.
#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub name: String,
    pub function: Function,
    pub args: Vec<Expression>,
}

impl PartialEq for FunctionCall {
    // bound callables are opaque; calls match when name and arguments do
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.args == other.args
    }
}

impl Expression {
    pub fn binary(op: BinaryOperator, lhs: Self, rhs: Self) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn unary(op: UnaryOperator, operand: Self) -> Self {
        Self::Unary(op, Box::new(operand))
    }

    pub fn group(inner: Self) -> Self {
        Self::Group(Box::new(inner))
    }

    pub fn call(name: impl Into<String>, function: Function, args: Vec<Expression>) -> Self {
        Self::FunctionCall(FunctionCall {
            name: name.into(),
            function,
            args,
        })
    }
}
