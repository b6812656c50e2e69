use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of an
/// expression. Parse errors include malformed tokens, unexpected tokens,
/// unbalanced parentheses and incomplete comparisons.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains all error types that can be raised while evaluating a parsed
/// expression: missing or unsupported symbols, type mismatches between
/// comparison operands, failing symbol resolvers and malformed tree nodes.
pub mod eval_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;

/// Any error produced by [`crate::eval`], which parses and evaluates in one
/// step.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The expression text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parsed expression could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
