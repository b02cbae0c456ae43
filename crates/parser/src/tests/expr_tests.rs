// Expression Parsing Tests
//
// AST construction for literals, operators, calls and indexing, plus the
// byte spans and ids attached to every expression node.

use crate::ast::{BinaryOp, Expr, ExprId, ExprKind, Literal, StmtKind, UnaryOp};
use crate::parser::parser;
use chumsky::Parser;
use lexer::token::Token;

// Helper to parse expression from source and extract first statement's expression
fn parse_expr(input: &str) -> Result<Expr, String> {
    let program = crate::parse(input).map_err(|e| format!("Parse error: {:?}", e))?;

    if let Some(stmt) = program.statements.first() {
        if let StmtKind::Expr(expr) = &stmt.kind {
            Ok(expr.clone())
        } else {
            Err("First statement is not an expression".to_string())
        }
    } else {
        Err("No statements in program".to_string())
    }
}

fn int(text: &str) -> ExprKind {
    ExprKind::Literal(Literal::Int(text.to_string()))
}

fn ident(name: &str) -> ExprKind {
    ExprKind::Identifier(name.to_string())
}

// ==================== LITERAL TESTS ====================

#[test]
fn test_literal_int_keeps_text() {
    let expr = parse_expr("42").unwrap();
    assert_eq!(expr.kind, int("42"));

    let expr = parse_expr("0x2a").unwrap();
    assert_eq!(expr.kind, int("0x2a"));
}

#[test]
fn test_literal_float() {
    let expr = parse_expr("3.14").unwrap();
    assert_eq!(expr.kind, ExprKind::Literal(Literal::Float("3.14".to_string())));
}

#[test]
fn test_literal_string() {
    let expr = parse_expr(r#""hello""#).unwrap();
    assert_eq!(expr.kind, ExprKind::Literal(Literal::String("hello".to_string())));
}

#[test]
fn test_literal_bool() {
    assert_eq!(parse_expr("true").unwrap().kind, ExprKind::Literal(Literal::Bool(true)));
    assert_eq!(parse_expr("false").unwrap().kind, ExprKind::Literal(Literal::Bool(false)));
}

#[test]
fn test_identifier() {
    assert_eq!(parse_expr("count").unwrap().kind, ident("count"));
}

// ==================== UNARY TESTS ====================

#[test]
fn test_negated_literal() {
    let expr = parse_expr("-1").unwrap();
    match expr.kind {
        ExprKind::Unary { op, expr } => {
            assert_eq!(op, UnaryOp::Negate);
            assert_eq!(expr.kind, int("1"));
        }
        other => panic!("Expected unary, got {:?}", other),
    }
}

#[test]
fn test_double_negation() {
    let expr = parse_expr("- -7").unwrap();
    match expr.kind {
        ExprKind::Unary { op: UnaryOp::Negate, expr } => match expr.kind {
            ExprKind::Unary { op: UnaryOp::Negate, expr } => assert_eq!(expr.kind, int("7")),
            other => panic!("Expected inner unary, got {:?}", other),
        },
        other => panic!("Expected unary, got {:?}", other),
    }
}

#[test]
fn test_not() {
    let expr = parse_expr("!ok").unwrap();
    assert!(matches!(expr.kind, ExprKind::Unary { op: UnaryOp::Not, .. }));
}

// ==================== BINARY TESTS ====================

#[test]
fn test_lt_eq_with_negative_rhs() {
    let expr = parse_expr("u <= -1").unwrap();
    match expr.kind {
        ExprKind::Binary { op, lhs, rhs } => {
            assert_eq!(op, BinaryOp::LtEq);
            assert_eq!(lhs.kind, ident("u"));
            assert!(matches!(rhs.kind, ExprKind::Unary { op: UnaryOp::Negate, .. }));
        }
        other => panic!("Expected binary, got {:?}", other),
    }
}

#[test]
fn test_all_comparison_operators() {
    let cases = [
        ("a == b", BinaryOp::Eq),
        ("a != b", BinaryOp::NotEq),
        ("a < b", BinaryOp::Lt),
        ("a <= b", BinaryOp::LtEq),
        ("a > b", BinaryOp::Gt),
        ("a >= b", BinaryOp::GtEq),
    ];

    for (source, expected) in cases {
        match parse_expr(source).unwrap().kind {
            ExprKind::Binary { op, .. } => assert_eq!(op, expected, "for {}", source),
            other => panic!("Expected binary for {}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_arithmetic_binds_tighter_than_comparison() {
    // u + 1 < 0  =>  (u + 1) < 0
    let expr = parse_expr("u + 1 < 0").unwrap();
    match expr.kind {
        ExprKind::Binary { op: BinaryOp::Lt, lhs, rhs } => {
            assert!(matches!(lhs.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
            assert_eq!(rhs.kind, int("0"));
        }
        other => panic!("Expected comparison, got {:?}", other),
    }
}

#[test]
fn test_mul_binds_tighter_than_add() {
    let expr = parse_expr("1 + 2 * 3").unwrap();
    match expr.kind {
        ExprKind::Binary { op: BinaryOp::Add, rhs, .. } => {
            assert!(matches!(rhs.kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
        }
        other => panic!("Expected addition, got {:?}", other),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    let expr = parse_expr("a - b - c").unwrap();
    match expr.kind {
        ExprKind::Binary { op: BinaryOp::Sub, lhs, rhs } => {
            assert!(matches!(lhs.kind, ExprKind::Binary { op: BinaryOp::Sub, .. }));
            assert_eq!(rhs.kind, ident("c"));
        }
        other => panic!("Expected subtraction, got {:?}", other),
    }
}

#[test]
fn test_logical_precedence() {
    // a < 0 || b && c  =>  (a < 0) || (b && c)
    let expr = parse_expr("a < 0 || b && c").unwrap();
    match expr.kind {
        ExprKind::Binary { op: BinaryOp::LogicalOr, lhs, rhs } => {
            assert!(matches!(lhs.kind, ExprKind::Binary { op: BinaryOp::Lt, .. }));
            assert!(matches!(rhs.kind, ExprKind::Binary { op: BinaryOp::LogicalAnd, .. }));
        }
        other => panic!("Expected logical or, got {:?}", other),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = parse_expr("(1 + 2) * 3").unwrap();
    assert!(matches!(expr.kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
}

#[test]
fn test_chained_comparison_rejected() {
    assert!(crate::parse("a < b < c").is_err());
}

// ==================== POSTFIX TESTS ====================

#[test]
fn test_call_with_args() {
    let expr = parse_expr("max(a, 1)").unwrap();
    match expr.kind {
        ExprKind::Call { func, args } => {
            assert_eq!(func.kind, ident("max"));
            assert_eq!(args.len(), 2);
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_conversion_call_in_comparison() {
    let expr = parse_expr("uint32(x) < 0").unwrap();
    match expr.kind {
        ExprKind::Binary { lhs, .. } => assert!(matches!(lhs.kind, ExprKind::Call { .. })),
        other => panic!("Expected binary, got {:?}", other),
    }
}

#[test]
fn test_index_then_call() {
    let expr = parse_expr("fs[0](x)").unwrap();
    match expr.kind {
        ExprKind::Call { func, .. } => assert!(matches!(func.kind, ExprKind::Index { .. })),
        other => panic!("Expected call, got {:?}", other),
    }
}

// ==================== SPAN TESTS ====================

#[test]
fn test_binary_span_covers_both_operands() {
    let expr = parse_expr("u <= -1").unwrap();
    assert_eq!(expr.span, 0..7);
    match expr.kind {
        ExprKind::Binary { lhs, rhs, .. } => {
            assert_eq!(lhs.span, 0..1);
            assert_eq!(rhs.span, 5..7);
        }
        other => panic!("Expected binary, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_span_includes_parens() {
    let expr = parse_expr("(u) < 0").unwrap();
    match expr.kind {
        ExprKind::Binary { lhs, .. } => assert_eq!(lhs.span, 0..3),
        other => panic!("Expected binary, got {:?}", other),
    }
}

#[test]
fn test_call_span() {
    let expr = parse_expr("  f(x)").unwrap();
    assert_eq!(expr.span, 2..6);
}

// ==================== ID TESTS ====================

#[test]
fn test_ids_assigned_in_source_order() {
    let expr = parse_expr("u <= -1").unwrap();
    assert_eq!(expr.id, ExprId(0));
    match expr.kind {
        ExprKind::Binary { lhs, rhs, .. } => {
            assert_eq!(lhs.id, ExprId(1));
            assert_eq!(rhs.id, ExprId(2));
            match rhs.kind {
                ExprKind::Unary { expr, .. } => assert_eq!(expr.id, ExprId(3)),
                other => panic!("Expected unary, got {:?}", other),
            }
        }
        other => panic!("Expected binary, got {:?}", other),
    }
}

#[test]
fn test_ids_continue_across_statements() {
    let mut program = crate::parse("a\nb\nc").unwrap();
    let ids: Vec<ExprId> = program
        .statements
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::Expr(expr) => expr.id,
            other => panic!("Expected expression statement, got {:?}", other),
        })
        .collect();
    assert_eq!(ids, vec![ExprId(0), ExprId(1), ExprId(2)]);

    // Renumbering is stable
    assert_eq!(program.assign_ids(), 3);
}

#[test]
fn test_parser_accepts_plain_token_vec() {
    let (spanned, _) = lexer::lex_spanned("u < 0");
    let tokens: Vec<Token> = spanned.into_iter().map(|(token, _)| token).collect();
    let program = parser().parse(tokens).unwrap();
    assert_eq!(program.statements.len(), 1);
}
