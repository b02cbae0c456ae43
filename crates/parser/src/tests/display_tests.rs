// Expression Printing Tests
//
// `Display` for expressions prints source text back, with parentheses
// only where precedence needs them.

use crate::ast::StmtKind;

fn print(input: &str) -> String {
    let program = crate::parse(input).unwrap();
    match &program.statements[0].kind {
        StmtKind::Expr(expr) => expr.to_string(),
        other => panic!("Expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_print_simple() {
    assert_eq!(print("u"), "u");
    assert_eq!(print("u  <=   -1"), "u <= -1");
    assert_eq!(print("0x10"), "0x10");
    assert_eq!(print(r#""s""#), "\"s\"");
}

#[test]
fn test_print_drops_redundant_parens() {
    assert_eq!(print("(a) + (b * c)"), "a + b * c");
}

#[test]
fn test_print_keeps_needed_parens() {
    assert_eq!(print("(a + b) * c"), "(a + b) * c");
    assert_eq!(print("a - (b - c)"), "a - (b - c)");
    assert_eq!(print("-(a + b)"), "-(a + b)");
    assert_eq!(print("(a < b) == c"), "(a < b) == c");
}

#[test]
fn test_print_calls_and_index() {
    assert_eq!(print("uint8(x[i]) < 0"), "uint8(x[i]) < 0");
    assert_eq!(print("max(a,b,)"), "max(a, b)");
}
