use crate::common::{BinaryOperator, Float, UnaryOperator};
use crate::dice::Die;
use crate::value::Value;

/// Access to the value computed for a result node.
#[enum_dispatch::enum_dispatch]
pub trait ResultNode {
    fn value(&self) -> &Value;
}

/// The evaluated mirror of an [`Expression`](crate::Expression): every node
/// keeps its computed [`Value`] plus the result sub-trees of its operands,
/// so each individual die roll stays inspectable after evaluation.
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(ResultNode)]
pub enum ExpressionResult {
    Constant(ConstantResult),
    Array(ArrayResult),
    Die(DieResult),
    Binary(BinaryResult),
    Unary(UnaryResult),
    Group(GroupResult),
    FunctionCall(FunctionCallResult),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantResult {
    value: Value,
}

impl ConstantResult {
    pub(crate) fn new(x: Float) -> Self {
        Self {
            value: Value::Number(x),
        }
    }
}

impl ResultNode for ConstantResult {
    fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayResult {
    pub elements: Vec<ExpressionResult>,
    value: Value,
}

impl ArrayResult {
    pub(crate) fn new(elements: Vec<ExpressionResult>) -> Self {
        let value = Value::List(elements.iter().map(|e| e.value().clone()).collect());
        Self { elements, value }
    }
}

impl ResultNode for ArrayResult {
    fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DieResult {
    value: Value,
}

impl DieResult {
    pub(crate) fn new(die: Die) -> Self {
        Self {
            value: Value::Die(die),
        }
    }

    pub fn die(&self) -> &Die {
        match &self.value {
            Value::Die(die) => die,
            _ => unreachable!("a die result always holds a die"),
        }
    }
}

impl ResultNode for DieResult {
    fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryResult {
    pub op: BinaryOperator,
    pub left: Box<ExpressionResult>,
    pub right: Box<ExpressionResult>,
    value: Value,
}

impl BinaryResult {
    pub(crate) fn new(
        op: BinaryOperator,
        left: ExpressionResult,
        right: ExpressionResult,
        value: Float,
    ) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
            value: Value::Number(value),
        }
    }
}

impl ResultNode for BinaryResult {
    fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryResult {
    pub op: UnaryOperator,
    pub operand: Box<ExpressionResult>,
    value: Value,
}

impl UnaryResult {
    pub(crate) fn new(op: UnaryOperator, operand: ExpressionResult, value: Value) -> Self {
        Self {
            op,
            operand: Box::new(operand),
            value,
        }
    }
}

impl ResultNode for UnaryResult {
    fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupResult {
    pub inner: Box<ExpressionResult>,
    value: Value,
}

impl GroupResult {
    // grouping is transparent to evaluation: the value is the inner value
    pub(crate) fn new(inner: ExpressionResult) -> Self {
        let value = inner.value().clone();
        Self {
            inner: Box::new(inner),
            value,
        }
    }
}

impl ResultNode for GroupResult {
    fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallResult {
    pub name: String,
    pub args: Vec<ExpressionResult>,
    value: Value,
}

impl FunctionCallResult {
    pub(crate) fn new(name: String, args: Vec<ExpressionResult>, value: Value) -> Self {
        Self { name, args, value }
    }
}

impl ResultNode for FunctionCallResult {
    fn value(&self) -> &Value {
        &self.value
    }
}
