/// The discovery module lists the symbols a tree depends on.
///
/// Walks a parsed tree without evaluating it, so callers can prefetch or
/// validate the inputs an expression needs before running it.
pub mod discovery;
/// The evaluator module reduces a parsed tree to a boolean.
///
/// The evaluator folds `and`/`or` chains from left to right, short-circuits
/// as soon as the result is decided and resolves symbols only when a
/// comparison actually needs them.
///
/// # Responsibilities
/// - Evaluates groups and comparisons in source order.
/// - Applies the comparison rules, including integer to float promotion.
/// - Reports type errors and symbol resolution failures.
pub mod evaluator;
/// The lexer module tokenizes source text for further parsing.
///
/// The lexer reads the raw expression and produces a stream of tokens paired
/// with their byte offsets: literals, identifiers, keywords, operators and
/// parentheses. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input into tokens with their source positions.
/// - Handles numeric and string literals, including escape sequences.
/// - Reports lexical errors for malformed input.
pub mod lexer;
/// The parser module builds the expression tree from tokens.
///
/// The parser consumes the token stream produced by the lexer and constructs
/// a `BoolExpr` that mirrors the structure of the source text.
///
/// # Responsibilities
/// - Converts tokens into comparisons, groups and connective chains.
/// - Validates the grammar, reporting errors with byte offsets.
pub mod parser;
/// The symbols module supplies values for the names used in an expression.
///
/// Defines the `Symbols` trait the evaluator resolves names through, a plain
/// map implementation and a memoizing, thread-safe wrapper.
pub mod symbols;
/// The value module defines the runtime data types for evaluation.
///
/// Every operand is turned into a `Value` before it is compared: an integer,
/// a float, a string or a boolean.
pub mod value;
