// cmpbasic: comparisons of unsigned values against constants that can
// never be true, such as `u < 0` or `u <= -1`.

use crate::constant::int_value;
use crate::diagnostic::Diagnostic;
use crate::rule::{NodeKind, Pass, Rule};
use crate::types::{Type, TypeTable};
use log::debug;
use parser::ast::{BinaryOp, Expr, ExprKind};

pub const NAME: &str = "cmpbasic";

pub struct CmpBasic;

impl Rule for CmpBasic {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "check for basic types comparisons"
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[NodeKind::Binary]
    }

    fn check(&self, expr: &Expr, pass: &mut Pass<'_>) {
        if let Some(diagnostic) = check_comparison(expr, pass.types()) {
            pass.emit(diagnostic);
        }
    }
}

/// Diagnostic for `expr` if it is `x <= k` with `k < 0` or `x < 0`, where
/// `x` has an unsigned type.
///
/// Only the `unsigned OP constant` order is recognised.
pub fn check_comparison(expr: &Expr, types: &TypeTable) -> Option<Diagnostic> {
    let ExprKind::Binary { op, lhs, rhs } = &expr.kind else {
        return None;
    };

    let rval = int_value(rhs)?;
    if !is_unsigned(types.type_of(lhs.id)) {
        return None;
    }

    let message = match op {
        BinaryOp::LtEq if rval < 0 => {
            format!("{} (unsigned) <= {} is always false", lhs, rval)
        }
        BinaryOp::Lt if rval == 0 => format!("{} (unsigned) < 0 is always false", lhs),
        _ => return None,
    };

    debug!("{}: {:?} at {:?}", NAME, message, expr.span);
    Some(Diagnostic::new(NAME, expr.span.clone(), message))
}

/// Reports whether `ty` is a basic unsigned integer type.
///
/// Declared types are not basic, even when their underlying type is.
pub fn is_unsigned(ty: &Type) -> bool {
    match ty {
        Type::Basic(kind) => kind.is_unsigned(),
        _ => false,
    }
}
