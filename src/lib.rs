//! # boolexpr
//!
//! boolexpr is a small boolean filter language written in Rust.
//! It parses expressions such as `age >= 18 and (country = "NL" or vip = true)`
//! into a reusable tree and evaluates that tree against named values supplied
//! by the host application.
//!
//! ```
//! use boolexpr::{SymbolMap, eval};
//!
//! let symbols = SymbolMap::new().with("age", 21).with("country", "NL").with("vip", false);
//! assert!(eval(r#"age >= 18 and (country = "NL" or vip = true)"#, &symbols).unwrap());
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::collections::BTreeSet;

use crate::interpreter::{
    lexer::tokenize,
    parser::{core::parse_source, utils::TokenStream},
};

/// Defines the structure of parsed expressions.
///
/// This module declares `BoolExpr` and the node types below it: groups,
/// comparisons, operands and operators. The tree is built by the parser and
/// traversed by the evaluator and the symbol discovery walk.
///
/// # Responsibilities
/// - Defines one closed type per grammar rule.
/// - Renders every node back to canonical source text.
/// - Offers builders for constructing trees directly from host code.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing
/// or evaluating an expression. Parse errors carry the byte offset of the
/// offending input; evaluation errors carry the symbol or operands involved.
pub mod error;
/// Orchestrates the phases of interpretation.
///
/// This module ties together lexing, parsing, evaluation, runtime values,
/// symbol sources and symbol discovery.
pub mod interpreter;

pub use ast::{BoolExpr, Compare, ComparisonOp, Expr, LiteralValue, LogicalOp, OpExpr, Operand};
pub use error::{Error, EvalError, ParseError};
pub use interpreter::{
    symbols::{
        cached::CachedSymbols,
        core::{Symbol, SymbolMap, Symbols},
    },
    value::core::Value,
};

/// Parses expression text into a reusable tree.
///
/// Parsing is pure: the same text always yields an equal tree, and no
/// partial tree is ever returned.
///
/// # Errors
/// Returns a [`ParseError`] with the byte offset of the first problem.
///
/// # Examples
/// ```
/// use boolexpr::{ParseError, parse};
///
/// let tree = parse("x = 1 or y != \"b\"").unwrap();
/// assert_eq!(tree.rest.len(), 1);
///
/// assert_eq!(parse("x >").unwrap_err(),
///            ParseError::UnexpectedEndOfInput { expected: "a value or symbol",
///                                               position: 3, });
/// ```
pub fn parse(text: &str) -> Result<BoolExpr, ParseError> {
    let tokens = tokenize(text)?;
    let mut stream = TokenStream::new(&tokens, text.len());

    parse_source(&mut stream)
}

/// Evaluates a parsed tree against a symbol source.
///
/// `and`/`or` are folded from left to right and short-circuit: operands that
/// cannot change the result are never resolved.
///
/// # Errors
/// Returns the first [`EvalError`] raised by symbol resolution or by a
/// comparison between incompatible values.
///
/// # Examples
/// ```
/// use boolexpr::{SymbolMap, evaluate, parse};
///
/// let tree = parse("x = 2 and missing = 1").unwrap();
/// let symbols = SymbolMap::new().with("x", 2.4);
///
/// // `x = 2` is false, so `missing` is never looked up.
/// assert_eq!(evaluate(&tree, &symbols).unwrap(), false);
/// ```
pub fn evaluate<S: Symbols + ?Sized>(tree: &BoolExpr, symbols: &S) -> Result<bool, EvalError> {
    tree.evaluate(symbols)
}

/// Parses and evaluates an expression in one step.
///
/// # Errors
/// Returns [`Error::Parse`] if the text is malformed and [`Error::Eval`] if
/// evaluation fails.
///
/// # Examples
/// ```
/// use boolexpr::{Error, SymbolMap, eval};
///
/// let symbols = SymbolMap::new().with("name", "AB");
/// assert!(eval(r#"name > "AA""#, &symbols).unwrap());
///
/// assert!(matches!(eval("true != 1", &symbols), Err(Error::Eval(e)) if e.is_type_error()));
/// assert!(matches!(eval("> y", &symbols), Err(Error::Parse(_))));
/// ```
pub fn eval<S: Symbols + ?Sized>(text: &str, symbols: &S) -> Result<bool, Error> {
    let tree = parse(text)?;
    Ok(evaluate(&tree, symbols)?)
}

/// Names of every symbol referenced anywhere in a tree, in sorted order.
///
/// See [`interpreter::discovery::list_symbols`].
#[must_use]
pub fn list_symbols(tree: &BoolExpr) -> BTreeSet<String> {
    interpreter::discovery::list_symbols(tree)
}
