//! A small textual algebra for dice-based randomness ("dice notation",
//! e.g. `3d6+4`, `4d6-L`, `2d%`): parse text into an [`Expression`],
//! evaluate it against a pluggable random source into an
//! [`ExpressionResult`] that retains every individual roll, and render
//! either tree back to canonical text.
//!
//! ```no_run
//! use dice_notation::{Context, ResultNode};
//!
//! let ctx = Context::default();
//! let expr = dice_notation::parse("3d6+4", &ctx)?;
//! let result = expr.evaluate()?;
//! println!("{} = {}", result, result.value());
//! # Ok::<(), dice_notation::Error>(())
//! ```
//!
//! Randomness is always injected through the context's [`DiceBag`]; pass a
//! seeded `rand::rngs::StdRng` to replay an expression's rolls exactly.

mod common;
mod context;
mod dice;
mod error;
mod functions;
mod stringify;
mod value;
mod visit;

pub mod eval;
pub mod parse;

pub use common::{BinaryOperator, Float, UInt, UnaryOperator};
pub use context::Context;
pub use dice::{DiceBag, Die, InvalidSides, RandomSource};
pub use error::Error;
pub use eval::{EvalError, ExpressionResult, ResultNode};
pub use functions::{Function, FunctionTable};
pub use parse::ast::Expression;
pub use parse::{parse, ParseError, ParseErrorKind};
pub use value::Value;
pub use visit::{
    enumerate_dice, enumerate_die_roll_results, walk_expression, walk_result, DieRoll,
};

pub type Result<T> = std::result::Result<T, Error>;
