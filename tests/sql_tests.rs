// tests/sql_tests.rs

use pql::ast::{JoinStyle, SortOrder};
use pql::{parse, BinOp, Expr, Proc};

fn parse_sql(input: &str) -> pql::ast::SqlExpr {
    match parse(input) {
        Ok(Proc::Sequential { mut procs }) if procs.len() == 1 => match procs.remove(0) {
            Proc::Sql(sql) => sql,
            other => panic!("expected a SQL stage for {:?}, got {:?}", input, other),
        },
        other => panic!("expected a one-stage pipeline, got {:?}", other),
    }
}

#[test]
fn test_select_star() {
    let sql = parse_sql("select * from logs");
    assert!(sql.select.is_none());
    let from = sql.from.expect("from clause");
    assert!(matches!(from.table, Expr::Id { name } if name == "logs"));
    assert!(from.alias.is_none());
}

#[test]
fn test_select_columns_and_where() {
    let sql = parse_sql("select a, b from t where a > 1");
    let select = sql.select.expect("select list");
    assert_eq!(select.len(), 2);
    assert!(matches!(&select[0], Expr::Assignment { lhs: None, .. }));
    let from = sql.from.expect("from clause");
    assert!(matches!(from.table, Expr::Id { name } if name == "t"));
    assert!(matches!(
        sql.where_clause,
        Some(Expr::Binary { op: BinOp::Gt, .. })
    ));
}

#[test]
fn test_select_with_aliased_assignment() {
    let sql = parse_sql("select total := sum(x) from t");
    let select = sql.select.expect("select list");
    assert!(matches!(&select[0], Expr::Assignment { lhs: Some(_), .. }));
}

#[test]
fn test_keywords_are_case_insensitive() {
    let sql = parse_sql("SELECT * FROM t WHERE a > 1");
    assert!(sql.select.is_none());
    assert!(sql.where_clause.is_some());
}

#[test]
fn test_table_alias() {
    let sql = parse_sql("select * from logs as l where l.x == 1");
    let from = sql.from.expect("from clause");
    assert!(matches!(from.alias, Some(Expr::Id { name }) if name == "l"));
}

#[test]
fn test_alias_does_not_swallow_keywords() {
    let sql = parse_sql("select * from logs where x == 1");
    let from = sql.from.expect("from clause");
    assert!(from.alias.is_none());
    assert!(sql.where_clause.is_some());
}

#[test]
fn test_join_clause() {
    let sql = parse_sql("select * from a left join b as bb on a.id = bb.id");
    assert_eq!(sql.joins.len(), 1);
    let join = &sql.joins[0];
    assert_eq!(join.style, JoinStyle::Left);
    assert!(matches!(&join.table, Expr::Id { name } if name == "b"));
    assert!(matches!(&join.alias, Some(Expr::Id { name }) if name == "bb"));
}

#[test]
fn test_group_by_having_order_by_limit() {
    let sql = parse_sql(
        "select n := count() from t group by host having n > 10 order by n desc limit 3",
    );
    assert_eq!(sql.group_by.expect("group by").len(), 1);
    assert!(sql.having.is_some());
    let order_by = sql.order_by.expect("order by");
    assert_eq!(order_by.order, SortOrder::Desc);
    assert_eq!(sql.limit, Some(3));
}

#[test]
fn test_order_by_defaults_ascending() {
    let sql = parse_sql("select * from t order by ts");
    assert_eq!(sql.order_by.expect("order by").order, SortOrder::Asc);
}

#[test]
fn test_sql_stage_in_pipeline() {
    let procs = match parse("select * from t | head 3").unwrap() {
        Proc::Sequential { procs } => procs,
        other => panic!("expected pipeline, got {:?}", other),
    };
    assert!(matches!(procs[0], Proc::Sql(_)));
    assert!(matches!(procs[1], Proc::Head { count: 3 }));
}
