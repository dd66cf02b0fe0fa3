use crate::common::Float;
use crate::dice::Die;
use std::fmt;

/// A value produced by evaluation: a scalar, an ordered list of values
/// (individual roll outcomes), or a die awaiting a roll.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Float),
    List(Vec<Value>),
    Die(Die),
}

impl Value {
    pub fn as_number(&self) -> Option<Float> {
        match self {
            Self::Number(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_die(&self) -> Option<&Die> {
        match self {
            Self::Die(die) => Some(die),
            _ => None,
        }
    }
}

impl From<Float> for Value {
    fn from(x: Float) -> Self {
        Self::Number(x)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

impl From<Die> for Value {
    fn from(die: Die) -> Self {
        Self::Die(die)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => fmt::Display::fmt(x, f),
            Self::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(value, f)?;
                }
                f.write_str("]")
            }
            Self::Die(die) => fmt::Display::fmt(die, f),
        }
    }
}
