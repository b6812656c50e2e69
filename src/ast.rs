use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{
    error::EvalError,
    interpreter::{
        discovery::list_symbols,
        evaluator::core::{EvalResult, Evaluator},
        symbols::core::Symbols,
        value::core::Value,
    },
};

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constants that can appear directly in an
/// expression: integers, floats, double-quoted strings and booleans.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A string literal, already unquoted.
    Str(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Value::from(self), f)
    }
}

/// One side of a comparison: either a constant or the name of a symbol that
/// is resolved at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A constant written in the expression.
    Literal(LiteralValue),
    /// Reference to a symbol by name.
    Symbol(String),
}

impl Operand {
    /// Creates a symbol reference.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates a constant operand. Strings passed here are string literals,
    /// not symbol references.
    #[must_use]
    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Self::Literal(value.into())
    }
}

impl From<LiteralValue> for Operand {
    fn from(value: LiteralValue) -> Self {
        Self::Literal(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Literal(value.into())
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Literal(value.into())
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Literal(value.into())
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Self::Literal(value.into())
    }
}

/// Builds a literal operand from loosely typed host data.
///
/// Strings become string literals, never symbol references.
///
/// # Errors
/// Returns [`EvalError::ValueUndefined`] for `null`, arrays and objects, which
/// carry no scalar value.
impl TryFrom<serde_json::Value> for Operand {
    type Error = EvalError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::from_json(&value) {
            Some(scalar) => Ok(Self::Literal(scalar.into())),
            None => Err(EvalError::ValueUndefined { found: Value::json_kind(&value).to_string() }),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Symbol(name) => write!(f, "{name}"),
        }
    }
}

/// The comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// `=`
    Eq,
    /// `!=`
    Neq,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
}

impl ComparisonOp {
    /// The operator as written in source text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Returns `true` for `=` and `!=`.
    #[must_use]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::Neq)
    }
}

impl FromStr for ComparisonOp {
    type Err = EvalError;

    /// Parses an operator symbol.
    ///
    /// # Example
    /// ```
    /// use boolexpr::ComparisonOp;
    ///
    /// assert_eq!(">=".parse::<ComparisonOp>().unwrap(), ComparisonOp::Gte);
    /// assert!("=~".parse::<ComparisonOp>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" => Ok(Self::Eq),
            "!=" => Ok(Self::Neq),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Gte),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Lte),
            other => Err(EvalError::ComparisonOperatorUndefined { symbol: other.to_string() }),
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The logical connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// `and`
    And,
    /// `or`
    Or,
}

impl LogicalOp {
    /// The keyword as written in source text.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl FromStr for LogicalOp {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            other => Err(EvalError::LogicalOperatorUndefined { keyword: other.to_string() }),
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single comparison such as `x >= 10`.
#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    /// Left-hand operand, resolved first.
    pub left:  Operand,
    /// The comparison operator.
    pub op:    ComparisonOp,
    /// Right-hand operand.
    pub right: Operand,
}

impl Compare {
    /// Builds a comparison from its three parts.
    #[must_use]
    pub fn new(left: impl Into<Operand>, op: ComparisonOp, right: impl Into<Operand>) -> Self {
        Self { left: left.into(),
               op,
               right: right.into() }
    }
}

impl fmt::Display for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// An abstract syntax tree (AST) node: either a comparison or a
/// parenthesized group.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A leaf comparison.
    Compare(Compare),
    /// A nested expression written between parentheses.
    Group(Box<BoolExpr>),
}

impl Expr {
    /// Wraps an expression in a group.
    #[must_use]
    pub fn group(inner: BoolExpr) -> Self {
        Self::Group(Box::new(inner))
    }
}

impl From<Compare> for Expr {
    fn from(compare: Compare) -> Self {
        Self::Compare(compare)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare(compare) => write!(f, "{compare}"),
            Self::Group(inner) => write!(f, "({inner})"),
        }
    }
}

/// A connective and the expression on its right.
#[derive(Debug, Clone, PartialEq)]
pub struct OpExpr {
    /// How this expression joins the running result.
    pub op:   LogicalOp,
    /// The expression to combine.
    pub expr: Expr,
}

/// The root of a parsed expression, and the contents of every group.
///
/// The connectives in `rest` are folded strictly from left to right: there is
/// no precedence between `and` and `or`, so `a or b and c` means
/// `(a or b) and c`. Grouping is the only way to change the order.
///
/// A tree is never mutated by evaluation and can be shared across threads
/// and evaluated any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolExpr {
    /// The first expression.
    pub expr: Expr,
    /// The remaining expressions with their connectives, in source order.
    pub rest: Vec<OpExpr>,
}

impl BoolExpr {
    /// Starts a tree with a single expression.
    #[must_use]
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self { expr: expr.into(),
               rest: Vec::new() }
    }

    /// Appends `and <expr>`.
    #[must_use]
    pub fn and(mut self, expr: impl Into<Expr>) -> Self {
        self.rest.push(OpExpr { op:   LogicalOp::And,
                                expr: expr.into(), });
        self
    }

    /// Appends `or <expr>`.
    #[must_use]
    pub fn or(mut self, expr: impl Into<Expr>) -> Self {
        self.rest.push(OpExpr { op:   LogicalOp::Or,
                                expr: expr.into(), });
        self
    }

    /// Evaluates the tree against a symbol source.
    ///
    /// # Errors
    /// See [`crate::evaluate`].
    pub fn evaluate<S: Symbols + ?Sized>(&self, symbols: &S) -> EvalResult<bool> {
        Evaluator::new(symbols).eval_bool_expr(self)
    }

    /// Names of every symbol referenced anywhere in the tree.
    #[must_use]
    pub fn symbols(&self) -> BTreeSet<String> {
        list_symbols(self)
    }
}

impl From<Compare> for BoolExpr {
    fn from(compare: Compare) -> Self {
        Self::new(compare)
    }
}

impl fmt::Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        for OpExpr { op, expr } in &self.rest {
            write!(f, " {op} {expr}")?;
        }
        Ok(())
    }
}
