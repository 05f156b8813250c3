// tests/expr_tests.rs

use pql::{parse_expr, BinOp, Expr, Type, UnaryOp};

// ============================================================================
// Precedence and operators
// ============================================================================

#[test]
fn test_comparison() {
    let expr = parse_expr("price > 100").unwrap();
    assert!(matches!(expr, Expr::Binary { op: BinOp::Gt, .. }));
}

#[test]
fn test_arithmetic_precedence() {
    // Should be: Add(1, Multiply(2, 3))
    match parse_expr("1 + 2 * 3").unwrap() {
        Expr::Binary {
            op: BinOp::Add,
            rhs,
            ..
        } => {
            assert!(matches!(*rhs, Expr::Binary { op: BinOp::Mul, .. }));
        }
        other => panic!("expected addition, got {:?}", other),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    // Should be: Multiply(Add(1, 2), 3)
    match parse_expr("(1 + 2) * 3").unwrap() {
        Expr::Binary {
            op: BinOp::Mul,
            lhs,
            ..
        } => {
            assert!(matches!(*lhs, Expr::Binary { op: BinOp::Add, .. }));
        }
        other => panic!("expected multiplication, got {:?}", other),
    }
}

#[test]
fn test_and_binds_tighter_than_or() {
    match parse_expr("a == 1 or b == 2 and c == 3").unwrap() {
        Expr::Binary {
            op: BinOp::Or,
            rhs,
            ..
        } => {
            assert!(matches!(*rhs, Expr::Binary { op: BinOp::And, .. }));
        }
        other => panic!("expected or at the top, got {:?}", other),
    }
}

#[test]
fn test_not_prefix() {
    let expr = parse_expr("not active").unwrap();
    assert!(matches!(expr, Expr::Unary { op: UnaryOp::Not, .. }));
}

#[test]
fn test_not_binds_tighter_than_comparison() {
    // not is a unary prefix: `not a == 1` compares (not a) with 1.
    let expr = parse_expr("not a == 1").unwrap();
    match expr {
        Expr::Binary {
            op: BinOp::Eq,
            lhs,
            ..
        } => assert!(matches!(*lhs, Expr::Unary { op: UnaryOp::Not, .. })),
        other => panic!("expected comparison at the top, got {:?}", other),
    }
}

#[test]
fn test_bang_prefix() {
    let expr = parse_expr("!(a and b)").unwrap();
    assert!(matches!(expr, Expr::Unary { op: UnaryOp::Not, .. }));
}

#[test]
fn test_in_operator() {
    let expr = parse_expr("x in [1, 2, 3]").unwrap();
    match expr {
        Expr::Binary {
            op: BinOp::In,
            rhs,
            ..
        } => assert!(matches!(*rhs, Expr::ArrayExpr { exprs } if exprs.len() == 3)),
        other => panic!("expected in, got {:?}", other),
    }
}

#[test]
fn test_conditional() {
    let expr = parse_expr("a > 1 ? b : c").unwrap();
    assert!(matches!(expr, Expr::Conditional { .. }));
}

// ============================================================================
// Deref chains, slices, calls
// ============================================================================

#[test]
fn test_field_deref() {
    match parse_expr("a.b").unwrap() {
        Expr::Binary {
            op: BinOp::Dot,
            lhs,
            rhs,
        } => {
            assert!(matches!(*lhs, Expr::Id { name } if name == "a"));
            assert!(matches!(*rhs, Expr::Id { name } if name == "b"));
        }
        other => panic!("expected deref, got {:?}", other),
    }
}

#[test]
fn test_leading_dot_is_root_deref() {
    match parse_expr(".id.orig_h").unwrap() {
        Expr::Binary {
            op: BinOp::Dot,
            lhs,
            ..
        } => {
            assert!(matches!(*lhs, Expr::Binary { op: BinOp::Dot, .. }));
        }
        other => panic!("expected nested deref, got {:?}", other),
    }
}

#[test]
fn test_bare_dot_is_root() {
    assert!(matches!(parse_expr("."), Ok(Expr::Root)));
}

#[test]
fn test_index() {
    let expr = parse_expr("xs[0]").unwrap();
    assert!(matches!(expr, Expr::Binary { op: BinOp::Index, .. }));
}

#[test]
fn test_slice_both_bounds() {
    match parse_expr("xs[1:3]").unwrap() {
        Expr::Slice { from, to, .. } => {
            assert!(from.is_some());
            assert!(to.is_some());
        }
        other => panic!("expected slice, got {:?}", other),
    }
}

#[test]
fn test_slice_open_ends() {
    assert!(matches!(
        parse_expr("xs[:3]").unwrap(),
        Expr::Slice { from: None, to: Some(_), .. }
    ));
    assert!(matches!(
        parse_expr("xs[1:]").unwrap(),
        Expr::Slice { from: Some(_), to: None, .. }
    ));
}

#[test]
fn test_call() {
    match parse_expr("len(xs)").unwrap() {
        Expr::Call { name, args } => {
            assert_eq!(name, "len");
            assert_eq!(args.len(), 1);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_method_call_desugars_to_call_with_receiver() {
    // a.trim() == trim(a)
    match parse_expr("a.trim()").unwrap() {
        Expr::Call { name, args } => {
            assert_eq!(name, "trim");
            assert!(matches!(&args[0], Expr::Id { name } if name == "a"));
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_cast_uses_type_call_syntax() {
    match parse_expr("int64(x)").unwrap() {
        Expr::Cast { typ, .. } => {
            assert!(matches!(typ, Type::TypePrimitive { name } if name == "int64"));
        }
        other => panic!("expected cast, got {:?}", other),
    }
}

// ============================================================================
// Constructors
// ============================================================================

#[test]
fn test_record_constructor() {
    match parse_expr("{a: 1, b: x}").unwrap() {
        Expr::RecordExpr { fields } => {
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0].name, "a");
        }
        other => panic!("expected record, got {:?}", other),
    }
}

#[test]
fn test_set_constructor() {
    assert!(matches!(
        parse_expr("|[1, 2]|").unwrap(),
        Expr::SetExpr { exprs } if exprs.len() == 2
    ));
}

#[test]
fn test_map_constructor() {
    assert!(matches!(
        parse_expr("|{\"a\": 1}|").unwrap(),
        Expr::MapExpr { entries } if entries.len() == 1
    ));
}

#[test]
fn test_empty_array() {
    assert!(matches!(
        parse_expr("[]").unwrap(),
        Expr::ArrayExpr { exprs } if exprs.is_empty()
    ));
}

// ============================================================================
// select / match / matches / type values
// ============================================================================

#[test]
fn test_select_form() {
    assert!(matches!(
        parse_expr("select(a, b)").unwrap(),
        Expr::SelectExpr { selectors } if selectors.len() == 2
    ));
}

#[test]
fn test_match_form() {
    match parse_expr("match(/ab+/, x)").unwrap() {
        Expr::RegexpMatch { pattern, expr } => {
            assert_eq!(pattern, "ab+");
            assert!(matches!(*expr, Expr::Id { name } if name == "x"));
        }
        other => panic!("expected match, got {:?}", other),
    }
}

#[test]
fn test_matches_with_regex() {
    match parse_expr("uri matches /^\\/api/").unwrap() {
        Expr::RegexpMatch { pattern, .. } => assert_eq!(pattern, "^/api"),
        other => panic!("expected matches, got {:?}", other),
    }
}

#[test]
fn test_matches_with_glob_translates() {
    match parse_expr("host matches *.example.com").unwrap() {
        Expr::RegexpMatch { pattern, .. } => {
            assert_eq!(pattern, "^.*\\.example\\.com$");
        }
        other => panic!("expected matches, got {:?}", other),
    }
}

#[test]
fn test_type_value() {
    match parse_expr("type({a: int64})").unwrap() {
        Expr::TypeValue { value } => {
            assert!(matches!(value, Type::TypeRecord { fields } if fields.len() == 1));
        }
        other => panic!("expected type value, got {:?}", other),
    }
}

#[test]
fn test_trailing_garbage_fails() {
    assert!(parse_expr("1 + 2 @").is_err());
}
