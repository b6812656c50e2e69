use std::collections::BTreeSet;

use crate::ast::{BoolExpr, Expr, Operand};

/// Collects the name of every symbol referenced in a tree.
///
/// The walk covers both sides of every comparison, including those inside
/// nested groups and those an evaluation would skip. Literals are ignored.
/// Each name appears once regardless of how often it is referenced.
///
/// The traversal uses an explicit stack, so deeply nested groups do not grow
/// the call stack.
///
/// # Example
/// ```
/// use boolexpr::{list_symbols, parse};
///
/// let tree = parse(r#"a = 1 and (b = "x" or 2 < c) or a > d"#).unwrap();
/// let names: Vec<_> = list_symbols(&tree).into_iter().collect();
/// assert_eq!(names, ["a", "b", "c", "d"]);
/// ```
#[must_use]
pub fn list_symbols(tree: &BoolExpr) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut pending = vec![tree];

    while let Some(node) = pending.pop() {
        let exprs = std::iter::once(&node.expr).chain(node.rest.iter().map(|op_expr| &op_expr.expr));

        for expr in exprs {
            match expr {
                Expr::Compare(cmp) => {
                    for operand in [&cmp.left, &cmp.right] {
                        if let Operand::Symbol(name) = operand {
                            names.insert(name.clone());
                        }
                    }
                },
                Expr::Group(inner) => pending.push(inner),
            }
        }
    }

    names
}
