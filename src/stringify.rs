//! Canonical text rendering for both trees.
//!
//! Expressions render back to normalized dice notation; results render the
//! same shapes except for function calls, which show their computed value
//! inline as `[name(args) -> value]` so each roll stays visible.

use crate::eval::{ExpressionResult, ResultNode};
use crate::parse::ast::Expression;
use std::fmt;

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    open: &str,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(item, f)?;
    }
    f.write_str(close)
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(x) => fmt::Display::fmt(x, f),
            Self::Array(items) => write_joined(f, items, "[", "]"),
            Self::Die(die) => fmt::Display::fmt(die, f),
            Self::Binary(op, lhs, rhs) => write!(f, "{} {} {}", lhs, op, rhs),
            Self::Unary(op, operand) => write!(f, "{}{}", op, operand),
            Self::Group(inner) => write!(f, "({})", inner),
            Self::FunctionCall(call) => {
                write!(f, "{}", call.name)?;
                write_joined(f, &call.args, "(", ")")
            }
        }
    }
}

impl fmt::Display for ExpressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => fmt::Display::fmt(c.value(), f),
            Self::Array(a) => write_joined(f, &a.elements, "[", "]"),
            Self::Die(d) => fmt::Display::fmt(d.die(), f),
            Self::Binary(b) => write!(f, "{} {} {}", b.left, b.op, b.right),
            Self::Unary(u) => write!(f, "{}{}", u.op, u.operand),
            Self::Group(g) => write!(f, "({})", g.inner),
            Self::FunctionCall(call) => {
                write!(f, "[{}", call.name)?;
                write_joined(f, &call.args, "(", ")")?;
                write!(f, " -> {}]", call.value())
            }
        }
    }
}
