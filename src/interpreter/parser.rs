/// Core parsing entry points.
///
/// Contains the top-level expression parser, the left-to-right `and`/`or`
/// chain and parenthesized groups.
pub mod core;

/// Comparison parsing.
///
/// Parses `operand operator operand` triples and the operands themselves
/// (literals and symbol names).
pub mod compare;

/// Parsing utilities.
///
/// Provides the token stream wrapper shared by all parsing functions and the
/// helpers that turn stream positions into errors.
pub mod utils;
