use serde::Serialize;

use crate::ast::expressions::{Expr, Primitive};
use crate::ast::types::Type;

/// Sort direction. Serializes lowercase, so `sort -r x` prints as
/// `{"kind":"Sort","order":"desc",...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Placement of null values in sorted output (`sort -nulls first|last`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NullsOrder {
    First,
    Last,
}

/// Join flavor; `inner` when unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStyle {
    Anti,
    Inner,
    Left,
    Right,
}

/// One branch of a `switch`: `case <expr> => seq` or `default => seq`
/// (`expr` is `None` for the default branch).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    pub expr: Option<Expr>,
    pub proc: Proc,
}

/// One data source inside `from (...)`, optionally with its own attached
/// sub-pipeline: `pool logs => filter x > 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trunk {
    pub source: Proc,
    pub seq: Option<Box<Proc>>,
}

/// `from <table> [as <alias>]` of a SQL stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlFrom {
    pub table: Expr,
    pub alias: Option<Expr>,
}

/// One SQL join clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlJoin {
    pub style: JoinStyle,
    pub table: Expr,
    pub alias: Option<Expr>,
    pub left_key: Expr,
    pub right_key: Expr,
}

/// `order by <exprs> [asc|desc]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlOrderBy {
    pub keys: Vec<Expr>,
    pub order: SortOrder,
}

/// The SQL stage: `select ... from ... where ...` etc. `select` is `None`
/// for `select *`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlExpr {
    pub select: Option<Vec<Expr>>,
    pub from: Option<SqlFrom>,
    pub joins: Vec<SqlJoin>,
    #[serde(rename = "where")]
    pub where_clause: Option<Expr>,
    pub group_by: Option<Vec<Expr>>,
    pub having: Option<Expr>,
    pub order_by: Option<SqlOrderBy>,
    pub limit: Option<u64>,
}

/// Pipeline stage ("proc") node.
///
/// Serialized with a `kind` tag, e.g. `{"kind":"Head","count":5}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Proc {
    /// `|`-separated chain. The top-level program is always a Sequential,
    /// even for a single stage.
    Sequential { procs: Vec<Proc> },

    /// Parallel branches of a `split(...)` group.
    Parallel { procs: Vec<Proc> },

    /// `switch [expr] ( case ... => seq; ... )`
    Switch {
        expr: Option<Expr>,
        cases: Vec<SwitchCase>,
    },

    /// `from ( trunk; ... )` or single-source `from name`.
    From { trunks: Vec<Trunk> },

    /// `file <path> [format <f>]` source.
    File {
        path: String,
        format: Option<String>,
    },

    /// `http://...` / `https://...` source.
    #[serde(rename = "HTTP")]
    Http { url: String, format: Option<String> },

    /// `pool <name>` source.
    Pool { name: String },

    /// Explicit `filter <search>` or an implicit bare search stage.
    Filter { expr: Expr },

    /// `sort [-r] [-nulls first|last] [by] [exprs]`
    Sort {
        order: SortOrder,
        nulls: Option<NullsOrder>,
        args: Vec<Expr>,
    },

    /// `top [n] [-flush] [fields]`
    Top {
        limit: Option<u64>,
        flush: bool,
        args: Vec<Expr>,
    },

    /// `cut <field-assignments>`
    Cut { args: Vec<Expr> },

    /// `pick <field-assignments>`
    Pick { args: Vec<Expr> },

    /// `drop <fields>`
    Drop { args: Vec<Expr> },

    /// `head [n]`, n defaulting to 1
    Head { count: u64 },

    /// `tail [n]`, n defaulting to 1
    Tail { count: u64 },

    /// `uniq [-c]`
    Uniq { cflag: bool },

    /// `put <assignments>`
    Put { args: Vec<Expr> },

    /// `rename new:=old, ...`
    Rename { args: Vec<Expr> },

    /// `fuse`
    Fuse,

    /// `shape`
    Shape,

    /// `join [anti|inner|left|right] on l=r [with assignments]`
    Join {
        style: JoinStyle,
        left_key: Expr,
        right_key: Expr,
        args: Vec<Expr>,
    },

    /// `explode <exprs> by <type> [as <field>]`
    Explode {
        args: Vec<Expr>,
        #[serde(rename = "type")]
        typ: Type,
        as_field: Option<Expr>,
    },

    /// `pass`
    Pass,

    /// `summarize [every dur] [agg-assignments] [by keys] [limit n]`, with
    /// the `summarize` keyword itself optional.
    Summarize {
        duration: Option<Primitive>,
        aggs: Vec<Expr>,
        keys: Vec<Expr>,
        limit: Option<u64>,
    },

    /// Bare assignment stage `a := e, ...` (put without the keyword).
    OpAssignment { assignments: Vec<Expr> },

    /// SQL stage.
    #[serde(rename = "SQLExpr")]
    Sql(SqlExpr),

    /// `const NAME = expr` declaration, kept as a leading proc of the
    /// top-level Sequential.
    Const { name: String, expr: Expr },

    /// `type NAME = <type>` declaration.
    TypeDef {
        name: String,
        #[serde(rename = "type")]
        typ: Type,
    },
}
