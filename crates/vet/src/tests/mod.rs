// Test module for vet
//
// Unit tests for the type checker, the constant extractor, the unsigned
// classifier, the cmpbasic rule and the registry that drives rules.

mod cmpbasic_tests;

use parser::ast::{Expr, Program, StmtKind};

/// Parse a program, panicking with the parse errors on failure
pub(crate) fn parse(source: &str) -> Program {
    parser::parse(source).unwrap_or_else(|e| panic!("Parse error for {:?}: {:?}", source, e))
}

/// The expression of the last statement, which must be an expression statement
pub(crate) fn last_expr(program: &Program) -> &Expr {
    match program.statements.last().map(|stmt| &stmt.kind) {
        Some(StmtKind::Expr(expr)) => expr,
        other => panic!("Expected trailing expression statement, got {:?}", other),
    }
}
