//! Shared scalar aliases and the operator enums used across the crate.

use std::fmt::{self, Write};
use std::num::NonZeroU32;

/// Unsigned integer used for dice counts and side counts.
pub type UInt = u32;

/// Non-zero unsigned integer used for a die's side count.
pub type NonZeroUInt = NonZeroU32;

/// Floating-point scalar used for every runtime numeric value.
pub type Float = f64;

/// The number of sides a percentile (`d%`) die stands for.
pub const PERCENTILE_SIDES: UInt = 100;

/// A prefix (unary) operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UnaryOperator {
    Pos,
    Neg,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Pos => '+',
            Self::Neg => '-',
        };
        f.write_char(c)
    }
}

/// An infix (binary) operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOperator {
    /// Apply this operator to two scalars, following IEEE-754 semantics
    /// (division by zero yields an infinity or NaN rather than erroring).
    pub fn apply(&self, lhs: Float, rhs: Float) -> Float {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Mod => lhs % rhs,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        };
        f.write_str(s)
    }
}
