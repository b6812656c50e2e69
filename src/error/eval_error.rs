use std::sync::Arc;

use thiserror::Error;

use crate::{ast::ComparisonOp, interpreter::value::core::Value};

#[derive(Debug, Clone, Error)]
/// Represents all errors that can occur while evaluating an expression.
///
/// The type is `Clone` so that a single failed symbol resolution can be
/// handed to every caller that was waiting on it.
pub enum EvalError {
    /// The symbol source has no entry with this name.
    #[error("Symbol not found: '{name}'.")]
    SymbolNotFound {
        /// The name that was looked up.
        name: String,
    },
    /// The symbol's entry holds a value that is not an integer, float, string
    /// or boolean.
    #[error("Symbol '{name}' has unsupported type {kind}.")]
    SymbolTypeUnknown {
        /// The symbol's name.
        name: String,
        /// The kind of value that was found.
        kind: String,
    },
    /// An operand was built from input that holds no usable value.
    #[error("Value is not specified: found {found}.")]
    ValueUndefined {
        /// The kind of input that was supplied instead.
        found: String,
    },
    /// A logical operator was built from an unknown keyword.
    #[error("Logical operator not specified: '{keyword}'.")]
    LogicalOperatorUndefined {
        /// The keyword that was supplied.
        keyword: String,
    },
    /// A comparison operator was built from an unknown symbol.
    #[error("Comparison operator not specified: '{symbol}'.")]
    ComparisonOperatorUndefined {
        /// The operator text that was supplied.
        symbol: String,
    },
    /// The right operand's kind cannot be compared with the left operand's
    /// kind using this operator.
    #[error("Wrong data type: can't use {op} on {left} of type {} and {right} of type {}.",
            .left.kind(),
            .right.kind())]
    TypeMismatch {
        /// The comparison being attempted.
        op:    ComparisonOp,
        /// The left operand.
        left:  Value,
        /// The right operand.
        right: Value,
    },
    /// The left operand's kind cannot be used with this operator at all, such
    /// as ordering a boolean.
    #[error("Wrong data type: can't use {op} on {value} of type {}.", .value.kind())]
    WrongDataType {
        /// The comparison being attempted.
        op:    ComparisonOp,
        /// The offending operand.
        value: Value,
    },
    /// A symbol's resolver returned an error.
    #[error("Symbol '{name}': {source}")]
    Source {
        /// The symbol whose resolver failed.
        name:   String,
        /// The resolver's error.
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl EvalError {
    /// Returns `true` for both kinds of comparison type error.
    #[must_use]
    pub const fn is_type_error(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. } | Self::WrongDataType { .. })
    }

    /// Name of the symbol this error concerns, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::SymbolNotFound { name }
            | Self::SymbolTypeUnknown { name, .. }
            | Self::Source { name, .. } => Some(name),
            _ => None,
        }
    }
}
