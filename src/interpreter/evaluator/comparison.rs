use std::cmp::Ordering;

use crate::{
    ast::ComparisonOp,
    error::EvalError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Maps an equality-style operator and a boolean equality result
/// to the final boolean value.
#[must_use]
pub const fn equality_op_result(op: ComparisonOp, is_equal: bool) -> bool {
    match op {
        ComparisonOp::Neq => !is_equal,
        _ => is_equal,
    }
}

/// Maps an ordering operator and the operands' ordering to the final boolean
/// value. An unordered pair (a NaN operand) satisfies no ordering operator.
#[must_use]
pub fn ordering_op_result(op: ComparisonOp, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        return false;
    };

    match op {
        ComparisonOp::Gt => ordering.is_gt(),
        ComparisonOp::Gte => ordering.is_ge(),
        ComparisonOp::Lt => ordering.is_lt(),
        ComparisonOp::Lte => ordering.is_le(),
        ComparisonOp::Eq => ordering.is_eq(),
        ComparisonOp::Neq => ordering.is_ne(),
    }
}

/// Evaluates a comparison of the form `Value <Operator> Value`.
///
/// - `=` and `!=` accept integer/float pairs in any mix, string pairs and
///   boolean pairs.
/// - `>`, `>=`, `<` and `<=` accept integer/float pairs and string pairs.
///   Strings are ordered byte-wise; booleans are not ordered.
///
/// Two integers are compared as integers. When an integer meets a float, the
/// integer is promoted to a float first.
///
/// # Errors
/// - `WrongDataType` if the left operand cannot be used with the operator at
///   all (a boolean under an ordering operator).
/// - `TypeMismatch` if the right operand's kind does not pair with the left.
///
/// # Example
/// ```
/// use boolexpr::{ComparisonOp, Value, interpreter::evaluator::comparison::compare};
///
/// assert!(compare(ComparisonOp::Eq, &Value::Integer(1), &Value::Real(1.0)).unwrap());
/// assert!(compare(ComparisonOp::Gt, &"AB".into(), &"AA".into()).unwrap());
/// assert!(compare(ComparisonOp::Neq, &Value::Bool(true), &Value::Integer(1)).is_err());
/// ```
pub fn compare(op: ComparisonOp, left: &Value, right: &Value) -> EvalResult<bool> {
    if op.is_equality() {
        let equality = equals(op, left, right)?;
        Ok(equality_op_result(op, equality))
    } else {
        let ordering = order(op, left, right)?;
        Ok(ordering_op_result(op, ordering))
    }
}

/// Tests two values for equality under the promotion rules.
#[allow(clippy::float_cmp)]
fn equals(op: ComparisonOp, left: &Value, right: &Value) -> EvalResult<bool> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(l == r),
        (Value::Integer(_) | Value::Real(_), Value::Integer(_) | Value::Real(_)) => {
            let (l, r) = promote(op, left, right)?;
            Ok(l == r)
        },
        (Value::Str(l), Value::Str(r)) => Ok(l == r),
        (Value::Bool(l), Value::Bool(r)) => Ok(l == r),
        _ => Err(mismatch(op, left, right)),
    }
}

/// Orders two values under the promotion rules.
///
/// Returns `None` when a float operand is NaN.
fn order(op: ComparisonOp, left: &Value, right: &Value) -> EvalResult<Option<Ordering>> {
    match (left, right) {
        (Value::Bool(_), _) => Err(EvalError::WrongDataType { op,
                                                              value: left.clone() }),
        (Value::Integer(l), Value::Integer(r)) => Ok(Some(l.cmp(r))),
        (Value::Integer(_) | Value::Real(_), Value::Integer(_) | Value::Real(_)) => {
            let (l, r) = promote(op, left, right)?;
            Ok(l.partial_cmp(&r))
        },
        (Value::Str(l), Value::Str(r)) => Ok(Some(l.as_bytes().cmp(r.as_bytes()))),
        _ => Err(mismatch(op, left, right)),
    }
}

/// Converts two numeric operands to floats.
fn promote(op: ComparisonOp, left: &Value, right: &Value) -> EvalResult<(f64, f64)> {
    match (left.as_real(), right.as_real()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(mismatch(op, left, right)),
    }
}

fn mismatch(op: ComparisonOp, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeMismatch { op,
                              left: left.clone(),
                              right: right.clone() }
}
