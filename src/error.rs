use crate::eval::EvalError;
use crate::parse::ParseError;
use thiserror::Error;

/// Either of the engine's two error classes, for callers driving the whole
/// text → tree → value pipeline.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Eval(#[from] EvalError),
}
