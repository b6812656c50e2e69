use std::fmt;

use crate::ast::LiteralValue;

/// Represents a runtime value in the interpreter.
///
/// Every operand of a comparison resolves to exactly one of these four kinds,
/// whether it was written as a literal or looked up through a symbol source.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A integer value (64 bit integer).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// A string value.
    Str(String),
    /// A boolean value (`true` or `false`).
    Bool(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Real(r) => Self::Real(*r),
            LiteralValue::Str(s) => Self::Str(s.clone()),
            LiteralValue::Bool(b) => Self::Bool(*b),
        }
    }
}

impl From<Value> for LiteralValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Integer(n) => Self::Integer(n),
            Value::Real(r) => Self::Real(r),
            Value::Str(s) => Self::Str(s),
            Value::Bool(b) => Self::Bool(b),
        }
    }
}

impl Value {
    /// Name of the value's kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Real(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
        }
    }

    /// Returns the value as an `f64` if it is numeric.
    ///
    /// Integers are promoted to floating point. Promotion is exact for
    /// magnitudes up to 2^53; beyond that the nearest float is used.
    ///
    /// # Example
    /// ```
    /// use boolexpr::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real(), Some(10.0));
    /// assert_eq!(Value::Bool(true).as_real(), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(r) => Some(*r),
            Self::Integer(n) => Some(*n as f64),
            Self::Str(_) | Self::Bool(_) => None,
        }
    }

    /// Converts a JSON scalar into a value.
    ///
    /// Numbers that fit in an `i64` become integers, all other numbers become
    /// floats. Returns `None` for `null`, arrays and objects.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::String(s) => Some(Self::Str(s.clone())),
            serde_json::Value::Number(n) => {
                n.as_i64().map(Self::Integer).or_else(|| n.as_f64().map(Self::Real))
            },
            serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                None
            },
        }
    }

    /// Name of a JSON value's kind, used in diagnostics.
    #[must_use]
    pub const fn json_kind(json: &serde_json::Value) -> &'static str {
        match json {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}

/// Formats the value the way it would be written in an expression, so floats
/// keep their decimal point and strings are quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}
