use crate::diagnostic::Diagnostic;
use crate::types::{Type, TypeTable};
use parser::ast::{Expr, ExprKind, Span};

/// Expression shapes a rule can ask to be called for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Literal,
    Identifier,
    Unary,
    Binary,
    Call,
    Index,
}

impl NodeKind {
    pub fn of(expr: &Expr) -> Self {
        match expr.kind {
            ExprKind::Literal(_) => NodeKind::Literal,
            ExprKind::Identifier(_) => NodeKind::Identifier,
            ExprKind::Unary { .. } => NodeKind::Unary,
            ExprKind::Binary { .. } => NodeKind::Binary,
            ExprKind::Call { .. } => NodeKind::Call,
            ExprKind::Index { .. } => NodeKind::Index,
        }
    }
}

/// A single vet check.
///
/// Rules are stateless: `check` sees one node of a kind listed in
/// `node_kinds` and reports through the `Pass`.
pub trait Rule: Send + Sync {
    /// Stable identifier, used by `--checks` and printed with findings
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn node_kinds(&self) -> &'static [NodeKind];

    fn check(&self, expr: &Expr, pass: &mut Pass<'_>);
}

/// What a rule gets to see while checking one node
pub struct Pass<'a> {
    check: &'static str,
    types: &'a TypeTable,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> Pass<'a> {
    pub fn new(
        check: &'static str,
        types: &'a TypeTable,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Pass {
            check,
            types,
            diagnostics,
        }
    }

    pub fn types(&self) -> &TypeTable {
        self.types
    }

    pub fn type_of(&self, expr: &Expr) -> &Type {
        self.types.type_of(expr.id)
    }

    /// Report a finding under the running rule's name
    pub fn report(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::new(self.check, span, message));
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
