/// Runtime value representation.
///
/// Defines the `Value` enum produced by resolving operands: integers, floats,
/// strings and booleans. Provides the integer to float promotion used by
/// numeric comparisons and the conversion from loosely typed JSON data.
pub mod core;
