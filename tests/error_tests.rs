// tests/error_tests.rs

use pql::{parse, parse_expr, Expectation, Expr};

// ============================================================================
// Farthest failure
// ============================================================================

#[test]
fn test_error_reports_farthest_position() {
    // The dangling `==` fails deepest; the fallback word-search parse stops
    // earlier and must not win the error report.
    let err = parse("filter a == ").unwrap_err();
    assert_eq!(err.found, None);
    assert_eq!(err.location.start.offset, 12);
}

#[test]
fn test_error_is_deterministic() {
    let a = parse("cut ,").unwrap_err();
    let b = parse("cut ,").unwrap_err();
    assert_eq!(a, b);
    assert_eq!(a.message, b.message);
}

#[test]
fn test_trailing_garbage_expects_end_of_input() {
    let err = parse("head 5 @").unwrap_err();
    assert_eq!(err.found.as_deref(), Some("@"));
    assert!(err.expected.contains(&Expectation::End));
}

#[test]
fn test_empty_input_fails_with_expectations() {
    let err = parse("").unwrap_err();
    assert_eq!(err.found, None);
    assert!(!err.expected.is_empty());
}

#[test]
fn test_message_lists_expectations_sorted() {
    let err = parse("cut ,").unwrap_err();
    assert!(err.message.starts_with("expected "));
    assert!(err.message.ends_with("but \",\" found"));
    // Deduplicated: no description appears twice.
    let mut descs: Vec<String> = err
        .expected
        .iter()
        .map(|e| format!("{:?}", e))
        .collect();
    let before = descs.len();
    descs.dedup();
    assert_eq!(before, descs.len());
}

#[test]
fn test_multiline_location() {
    let err = parse("head 1\n| cut ,").unwrap_err();
    assert_eq!(err.location.start.line, 2);
    assert_eq!(err.location.start.column, 7);
}

// ============================================================================
// Backtracking
// ============================================================================

#[test]
fn test_failing_alternative_restores_position() {
    // The slice alternative consumes `[1` before failing on the missing `:`;
    // indexing must still parse from the original bracket.
    assert!(matches!(
        parse_expr("xs[1]").unwrap(),
        Expr::Binary { .. }
    ));
    assert!(matches!(parse_expr("xs[1:2]").unwrap(), Expr::Slice { .. }));
}

#[test]
fn test_ordered_choice_prefers_earlier_alternative() {
    // `1.2.3.4` would lex as float `1.2` plus garbage; the address
    // alternative is tried first and consumes it whole.
    assert!(matches!(
        parse_expr("1.2.3.4").unwrap(),
        Expr::Primitive(p) if p.typ == "ip"
    ));
    assert!(matches!(
        parse_expr("1.25").unwrap(),
        Expr::Primitive(p) if p.typ == "float64"
    ));
}

#[test]
fn test_consumed_flag_does_not_poison_the_stage() {
    // `-nulls` without first/last fails inside sort's flag loop; the stage
    // then has no way to use the rest and the parse fails cleanly.
    assert!(parse("sort -nulls x").is_err());
    // With the argument present the same prefix parses.
    assert!(parse("sort -nulls first x").is_ok());
}
