// tests/literal_tests.rs

use pql::{parse_expr, Expr};

fn parse_primitive(input: &str) -> pql::Primitive {
    match parse_expr(input) {
        Ok(Expr::Primitive(p)) => p,
        other => panic!("expected a primitive for {:?}, got {:?}", input, other),
    }
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_integer() {
    let p = parse_primitive("42");
    assert_eq!(p.typ, "int64");
    assert_eq!(p.text, "42");
}

#[test]
fn test_negative_integer() {
    let p = parse_primitive("-7");
    assert_eq!(p.typ, "int64");
    assert_eq!(p.text, "-7");
}

#[test]
fn test_float() {
    let p = parse_primitive("3.25");
    assert_eq!(p.typ, "float64");
    assert_eq!(p.text, "3.25");
}

#[test]
fn test_float_with_exponent() {
    let p = parse_primitive("1.5e3");
    assert_eq!(p.typ, "float64");
    assert_eq!(p.text, "1.5e3");
}

#[test]
fn test_leading_dot_float() {
    // No integer part, still a float literal.
    let p = parse_primitive(".5");
    assert_eq!(p.typ, "float64");
    assert_eq!(p.text, ".5");
}

#[test]
fn test_number_must_end_at_word_boundary() {
    assert!(parse_expr("123abc").is_err());
}

// ============================================================================
// Strings and escapes
// ============================================================================

#[test]
fn test_double_quoted_string() {
    let p = parse_primitive(r#""hello world""#);
    assert_eq!(p.typ, "string");
    assert_eq!(p.text, "hello world");
}

#[test]
fn test_single_quoted_string() {
    let p = parse_primitive("'hi'");
    assert_eq!(p.typ, "string");
    assert_eq!(p.text, "hi");
}

#[test]
fn test_simple_escapes() {
    let p = parse_primitive(r#""a\tb\nc""#);
    assert_eq!(p.text, "a\tb\nc");
}

#[test]
fn test_hex_escape() {
    let p = parse_primitive(r#""a\x41b""#);
    assert_eq!(p.text, "aAb");
}

#[test]
fn test_unicode_escape_four_digits() {
    let p = parse_primitive(r#""\u0041""#);
    assert_eq!(p.text, "A");
}

#[test]
fn test_unicode_escape_braced() {
    let p = parse_primitive(r#""\u{1F600}""#);
    assert_eq!(p.text, "\u{1F600}");
}

#[test]
fn test_surrogate_pair_combines() {
    let p = parse_primitive(r#""\uD83D\uDE00""#);
    assert_eq!(p.text, "\u{1F600}");
}

#[test]
fn test_lone_surrogate_becomes_replacement_char() {
    let p = parse_primitive(r#""\uD83Dx""#);
    assert_eq!(p.text, "\u{FFFD}x");
}

#[test]
fn test_unterminated_string_fails() {
    assert!(parse_expr("\"abc").is_err());
}

// ============================================================================
// Durations and timestamps
// ============================================================================

#[test]
fn test_duration() {
    let p = parse_primitive("90m30s");
    assert_eq!(p.typ, "duration");
    assert_eq!(p.text, "90m30s");
}

#[test]
fn test_duration_two_letter_unit() {
    let p = parse_primitive("150ms");
    assert_eq!(p.typ, "duration");
    assert_eq!(p.text, "150ms");
}

#[test]
fn test_negative_duration() {
    let p = parse_primitive("-5m");
    assert_eq!(p.typ, "duration");
    assert_eq!(p.text, "-5m");
}

#[test]
fn test_timestamp() {
    let p = parse_primitive("2024-01-15T10:30:00Z");
    assert_eq!(p.typ, "time");
    assert_eq!(p.text, "2024-01-15T10:30:00Z");
}

#[test]
fn test_timestamp_with_offset() {
    let p = parse_primitive("2024-01-15T10:30:00.123+02:00");
    assert_eq!(p.typ, "time");
}

// ============================================================================
// IPs, networks, bytes
// ============================================================================

#[test]
fn test_ipv4() {
    let p = parse_primitive("192.168.1.1");
    assert_eq!(p.typ, "ip");
    assert_eq!(p.text, "192.168.1.1");
}

#[test]
fn test_ipv4_net() {
    let p = parse_primitive("10.0.0.0/8");
    assert_eq!(p.typ, "net");
    assert_eq!(p.text, "10.0.0.0/8");
}

#[test]
fn test_ipv6_compressed() {
    let p = parse_primitive("fe80::1");
    assert_eq!(p.typ, "ip");
    assert_eq!(p.text, "fe80::1");
}

#[test]
fn test_ipv6_wins_over_duration() {
    // `2d` alone is a duration, but `2d::1` is an address.
    let p = parse_primitive("2d::1");
    assert_eq!(p.typ, "ip");
    let d = parse_primitive("2d");
    assert_eq!(d.typ, "duration");
}

#[test]
fn test_bytes_literal() {
    let p = parse_primitive("0x0102ff");
    assert_eq!(p.typ, "bytes");
    assert_eq!(p.text, "0x0102ff");
}

// ============================================================================
// Booleans, null, identifiers
// ============================================================================

#[test]
fn test_true_false_null() {
    assert_eq!(parse_primitive("true").typ, "bool");
    assert_eq!(parse_primitive("false").text, "false");
    assert_eq!(parse_primitive("null").typ, "null");
}

#[test]
fn test_identifier() {
    assert!(matches!(parse_expr("foo"), Ok(Expr::Id { name }) if name == "foo"));
}

#[test]
fn test_reserved_word_is_not_an_identifier() {
    // `this` parses, but as the root value rather than an ID.
    assert!(matches!(parse_expr("this"), Ok(Expr::Root)));
}

#[test]
fn test_reserved_prefix_is_still_an_identifier() {
    // `in` is reserved; `int8_count` merely starts with it.
    assert!(matches!(parse_expr("int8_count"), Ok(Expr::Id { name }) if name == "int8_count"));
}
