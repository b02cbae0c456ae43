// cmpbasic Rule Tests
//
// The decision table: unsigned left operand, `<=` against a negative
// constant or `<` against zero.

use super::{last_expr, parse};
use crate::diagnostic::Diagnostic;
use crate::rules::check_comparison;
use crate::typeck::check_program;
use crate::{Registry, vet_source};

/// Run the comparison check on the last expression statement of `source`
fn check(source: &str) -> Option<Diagnostic> {
    let program = parse(source);
    let info = check_program(&program);
    check_comparison(last_expr(&program), &info.types)
}

fn message(source: &str) -> Option<String> {
    check(source).map(|d| d.message)
}

// ==================== FIRING CASES ====================

#[test]
fn test_unsigned_lt_eq_negative_one() {
    assert_eq!(
        message("var u uint32\nu <= -1").as_deref(),
        Some("u (unsigned) <= -1 is always false")
    );
}

#[test]
fn test_unsigned_lt_zero() {
    assert_eq!(
        message("var u uint64\nu < 0").as_deref(),
        Some("u (unsigned) < 0 is always false")
    );
}

#[test]
fn test_every_unsigned_kind_fires() {
    for ty in ["uint", "uint8", "uint16", "uint32", "uint64", "uintptr", "byte"] {
        let source = format!("var u {}\nu < 0", ty);
        assert!(check(&source).is_some(), "expected a finding for {}", ty);
    }
}

#[test]
fn test_any_negative_bound_fires() {
    for k in ["-1", "-2", "-100", "-9223372036854775807"] {
        let source = format!("var u uint\nu <= {}", k);
        let message = message(&source).unwrap_or_else(|| panic!("no finding for {}", k));
        assert_eq!(message, format!("u (unsigned) <= {} is always false", k));
    }
}

#[test]
fn test_message_prints_left_operand_expression() {
    assert_eq!(
        message("var xs []uint8\nvar i int\nxs[i] < 0").as_deref(),
        Some("xs[i] (unsigned) < 0 is always false")
    );
    assert_eq!(
        message("var a uint16\nvar b uint16\na + b <= -3").as_deref(),
        Some("a + b (unsigned) <= -3 is always false")
    );
}

#[test]
fn test_conversion_to_unsigned_fires() {
    assert!(check("var i int\nuint32(i) < 0").is_some());
}

#[test]
fn test_string_index_is_byte() {
    assert!(check("var s string\ns[0] < 0").is_some());
}

#[test]
fn test_function_result_is_typed() {
    assert!(check("func size() uint { return 1 }\nsize() <= -1").is_some());
}

#[test]
fn test_negated_bound_in_parentheses() {
    assert_eq!(
        message("var u uint8\nu <= (-1)").as_deref(),
        Some("u (unsigned) <= -1 is always false")
    );
}

#[test]
fn test_parenthesized_bounds_are_constants() {
    assert_eq!(
        message("var u uint\nu < (0)").as_deref(),
        Some("u (unsigned) < 0 is always false")
    );
    assert_eq!(
        message("var u uint\nu <= -(1)").as_deref(),
        Some("u (unsigned) <= -1 is always false")
    );
}

#[test]
fn test_diagnostic_span_is_the_binary_expression() {
    let diagnostic = check("var u uint32\nu <= -1").unwrap();
    assert_eq!(diagnostic.span, 13..20);
    assert_eq!(diagnostic.check, "cmpbasic");
}

// ==================== NON-FIRING CASES ====================

#[test]
fn test_lt_one_does_not_fire() {
    assert!(check("var u uint32\nu < 1").is_none());
}

#[test]
fn test_lt_eq_zero_does_not_fire() {
    assert!(check("var u uint32\nu <= 0").is_none());
}

#[test]
fn test_lt_negative_does_not_fire() {
    // Only `<` against exactly zero is in the table
    assert!(check("var u uint32\nu < -1").is_none());
}

#[test]
fn test_other_operators_never_fire() {
    for op in [">", ">=", "==", "!="] {
        let source = format!("var u uint32\nu {} -1", op);
        assert!(check(&source).is_none(), "{} should not fire", op);
        let source = format!("var u uint32\nu {} 0", op);
        assert!(check(&source).is_none(), "{} should not fire", op);
    }
}

#[test]
fn test_signed_never_fires() {
    for ty in ["int", "int8", "int16", "int32", "int64", "rune", "float64"] {
        assert!(check(&format!("var i {}\ni <= -1", ty)).is_none(), "{}", ty);
        assert!(check(&format!("var i {}\ni < 0", ty)).is_none(), "{}", ty);
    }
}

#[test]
fn test_signed_int32_scenario() {
    assert!(check("var i int32\ni <= -1").is_none());
}

#[test]
fn test_identifier_bound_does_not_fire() {
    assert!(check("var u uint32\nzero := 0\nu < zero").is_none());
}

#[test]
fn test_hex_zero_is_not_read() {
    assert!(check("var u uint32\nu < 0x0").is_none());
}

#[test]
fn test_literal_on_left_is_not_handled() {
    assert!(check("var u uint32\n0 > u").is_none());
    assert!(check("var u uint32\n-1 >= u").is_none());
}

#[test]
fn test_named_unsigned_type_does_not_fire() {
    assert!(check("type Celsius uint16\nvar c Celsius\nc < 0").is_none());
}

#[test]
fn test_untyped_constant_left_operand_does_not_fire() {
    assert!(check("1 < 0").is_none());
}

#[test]
fn test_inferred_int_does_not_fire() {
    // `n := 5` gives n the default type int
    assert!(check("n := 5\nn < 0").is_none());
}

#[test]
fn test_undefined_left_operand_does_not_fire() {
    assert!(check("missing < 0").is_none());
}

#[test]
fn test_non_binary_node_is_ignored() {
    assert!(check("var u uint32\n-u").is_none());
}

// ==================== PURITY TESTS ====================

#[test]
fn test_check_is_idempotent() {
    let program = parse("var u uint32\nu <= -1");
    let info = check_program(&program);
    let expr = last_expr(&program);

    let first = check_comparison(expr, &info.types);
    let second = check_comparison(expr, &info.types);
    assert_eq!(first, second);
    assert!(first.is_some());
}

#[test]
fn test_vet_source_twice_gives_same_report() {
    let source = "var u uint\nif u < 0 { u = 1 }\nu <= -2";
    let registry = Registry::with_defaults();
    let first = vet_source(source, &registry).unwrap();
    let second = vet_source(source, &registry).unwrap();
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(first.diagnostics.len(), 2);
}
