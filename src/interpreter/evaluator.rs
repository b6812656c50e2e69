/// Core evaluation logic.
///
/// Contains the evaluator itself: the left-to-right fold over `and`/`or`
/// chains with short-circuiting, group recursion and operand resolution.
pub mod core;

/// Comparison semantics.
///
/// Implements the six comparison operators over the runtime value kinds,
/// including integer to float promotion and the type errors raised for
/// incompatible operands.
pub mod comparison;
