use tracing::trace;

use crate::{
    ast::{BoolExpr, Compare, Expr, LogicalOp, OpExpr, Operand},
    error::EvalError,
    interpreter::{evaluator::comparison::compare, symbols::core::Symbols, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Walks a parsed tree against a symbol source.
///
/// ## Usage
///
/// An `Evaluator` only borrows the symbol source, so it is cheap to create
/// one per evaluation. The tree itself is never modified, which lets several
/// threads evaluate the same tree at once.
pub struct Evaluator<'s, S: ?Sized> {
    symbols: &'s S,
}

impl<'s, S: Symbols + ?Sized> Evaluator<'s, S> {
    /// Creates an evaluator that resolves symbols through `symbols`.
    #[must_use]
    pub const fn new(symbols: &'s S) -> Self {
        Self { symbols }
    }

    /// Evaluates an `and`/`or` chain.
    ///
    /// The chain is folded from left to right with no precedence between the
    /// connectives. Once the running result decides a connective (`false`
    /// before `and`, `true` before `or`) the right-hand expression is skipped
    /// entirely, so none of its symbols are resolved and it cannot fail.
    ///
    /// # Errors
    /// The first error raised by any evaluated expression.
    pub fn eval_bool_expr(&self, tree: &BoolExpr) -> EvalResult<bool> {
        let mut result = self.eval_expr(&tree.expr)?;

        for OpExpr { op, expr } in &tree.rest {
            result = match (op, result) {
                (LogicalOp::And, false) => {
                    trace!(skipped = %expr, "short-circuit on false and");
                    false
                },
                (LogicalOp::Or, true) => {
                    trace!(skipped = %expr, "short-circuit on true or");
                    true
                },
                (LogicalOp::And | LogicalOp::Or, _) => self.eval_expr(expr)?,
            };
        }

        Ok(result)
    }

    /// Evaluates a comparison or a group.
    ///
    /// # Errors
    /// Propagates symbol resolution and comparison errors.
    pub fn eval_expr(&self, expr: &Expr) -> EvalResult<bool> {
        match expr {
            Expr::Compare(cmp) => self.eval_compare(cmp),
            Expr::Group(inner) => self.eval_bool_expr(inner),
        }
    }

    /// Resolves both operands, left first, and compares them.
    ///
    /// # Errors
    /// - Symbol errors from resolving either operand.
    /// - `TypeMismatch` / `WrongDataType` if the operands cannot be compared.
    pub fn eval_compare(&self, cmp: &Compare) -> EvalResult<bool> {
        let left = self.resolve(&cmp.left)?;
        let right = self.resolve(&cmp.right)?;

        compare(cmp.op, &left, &right)
    }

    /// Turns an operand into a runtime value.
    ///
    /// Literals convert directly; symbols are looked up in the symbol source.
    ///
    /// # Errors
    /// Any error returned by the symbol source.
    pub fn resolve(&self, operand: &Operand) -> EvalResult<Value> {
        match operand {
            Operand::Literal(literal) => Ok(Value::from(literal)),
            Operand::Symbol(name) => self.symbols.get(name),
        }
    }
}
