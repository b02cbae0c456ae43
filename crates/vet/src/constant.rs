// Integer constants that can be read straight off the tree

use parser::ast::{Expr, ExprKind, Literal, UnaryOp};

/// Integer value of `expr` if it is a decimal integer literal or a
/// negation of one.
///
/// Only plain decimal text is read: `0x10`, `1_000` and literals that do not
/// fit in an `i64` are not constants. Negation is applied to whatever the
/// operand yields, so `-1` and `-(-(2))` are constants too.
pub fn int_value(expr: &Expr) -> Option<i64> {
    match &expr.kind {
        ExprKind::Literal(Literal::Int(text)) => text.parse::<i64>().ok(),
        ExprKind::Unary {
            op: UnaryOp::Negate,
            expr,
        } => int_value(expr).and_then(i64::checked_neg),
        _ => None,
    }
}
