//! The embedded SQL stage: `select ... from ... join ... where ... group by
//! ... having ... order by ... limit ...`, keywords case-insensitive.

use crate::ast::{Expr, JoinStyle, Primitive, Proc, SortOrder, SqlExpr, SqlFrom, SqlJoin, SqlOrderBy};
use crate::cursor::PResult;
use crate::parser::Parser;

/// Words that cannot be a table alias; otherwise `select * from a where ...`
/// would read `where` as the alias of `a`.
const SQL_KEYWORDS: &[&str] = &[
    "select", "from", "join", "where", "group", "having", "order", "limit", "on", "as", "anti",
    "inner", "left", "right", "asc", "desc", "by",
];

impl<'a> Parser<'a> {
    pub(crate) fn sql_proc(&mut self) -> PResult<Proc> {
        self.kw_ci("select")?;
        let select = if self.tok("*").is_ok() {
            None
        } else {
            Some(self.assignment_list()?)
        };
        let from = self.opt(|p| {
            p.kw_ci("from")?;
            let table = p.sql_table()?;
            let alias = p.opt(Self::sql_alias);
            Ok(SqlFrom { table, alias })
        });
        let joins = self.many0(Self::sql_join);
        let where_clause = self.opt(|p| {
            p.kw_ci("where")?;
            p.expr()
        });
        let group_by = self.opt(|p| {
            p.kw_ci("group")?;
            p.kw_ci("by")?;
            p.comma_exprs()
        });
        let having = self.opt(|p| {
            p.kw_ci("having")?;
            p.expr()
        });
        let order_by = self.opt(|p| {
            p.kw_ci("order")?;
            p.kw_ci("by")?;
            let keys = p.comma_exprs()?;
            let order = if p.kw_ci("desc").is_ok() {
                SortOrder::Desc
            } else {
                let _ = p.kw_ci("asc");
                SortOrder::Asc
            };
            Ok(SqlOrderBy { keys, order })
        });
        let limit = self.opt(|p| {
            p.kw_ci("limit")?;
            p.uint_value()
        });
        Ok(Proc::Sql(SqlExpr {
            select,
            from,
            joins,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
        }))
    }

    fn sql_join(&mut self) -> PResult<SqlJoin> {
        self.attempt(|p| {
            let style = if p.kw_ci("anti").is_ok() {
                JoinStyle::Anti
            } else if p.kw_ci("inner").is_ok() {
                JoinStyle::Inner
            } else if p.kw_ci("left").is_ok() {
                JoinStyle::Left
            } else if p.kw_ci("right").is_ok() {
                JoinStyle::Right
            } else {
                JoinStyle::Inner
            };
            p.kw_ci("join")?;
            let table = p.sql_table()?;
            let alias = p.opt(Self::sql_alias);
            p.kw_ci("on")?;
            let left_key = p.lvalue()?;
            p.attempt(|p| {
                p.tok("=")?;
                p.not_ahead(|p| p.cur.literal("="))
            })?;
            let right_key = p.lvalue()?;
            Ok(SqlJoin {
                style,
                table,
                alias,
                left_key,
                right_key,
            })
        })
    }

    /// A table reference: a quoted name or a bare identifier.
    fn sql_table(&mut self) -> PResult<Expr> {
        self.ws();
        if let Ok(text) = self.string_literal() {
            return Ok(Expr::Primitive(Primitive::new("string", text)));
        }
        let name = self.identifier()?;
        Ok(Expr::id(name))
    }

    /// `[as] <name>`, refusing the clause keywords.
    fn sql_alias(&mut self) -> PResult<Expr> {
        self.attempt(|p| {
            let _ = p.kw_ci("as");
            p.not_ahead(|p| {
                for word in SQL_KEYWORDS {
                    if p.attempt(|p| p.kw_ci(word)).is_ok() {
                        return Ok(());
                    }
                }
                Err(crate::cursor::Fail)
            })?;
            p.ws();
            let name = p.identifier()?;
            Ok(Expr::id(name))
        })
    }
}
