use serde::Serialize;

use crate::ast::operators::{BinOp, UnaryOp};
use crate::ast::types::Type;

/// A decoded scalar literal: the primitive type name plus the literal's
/// lexeme. String escapes are already resolved in `text`; numeric, duration
/// and time lexemes are kept verbatim for downstream conversion.
///
/// # Examples
/// ```text
/// 42            -> { type: "int64",    text: "42" }
/// 1.5e3         -> { type: "float64",  text: "1.5e3" }
/// "a\x41b"      -> { type: "string",   text: "aAb" }
/// 90m30s        -> { type: "duration", text: "90m30s" }
/// 10.0.0.0/8    -> { type: "net",      text: "10.0.0.0/8" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Primitive {
    #[serde(rename = "type")]
    pub typ: String,
    pub text: String,
}

impl Primitive {
    pub fn new(typ: &str, text: impl Into<String>) -> Self {
        Primitive {
            typ: typ.to_string(),
            text: text.into(),
        }
    }
}

/// One `name: value` field of a record constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordField {
    pub name: String,
    pub value: Expr,
}

/// One `key: value` entry of a map constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapEntry {
    pub key: Expr,
    pub value: Expr,
}

/// Expression node.
///
/// Serialized with a `kind` tag matching the variant name, e.g.
/// `{"kind":"BinaryExpr","op":">","lhs":...,"rhs":...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expr {
    /// Binary operation, including field deref (op `.`) and index deref
    /// (op `[`).
    #[serde(rename = "BinaryExpr")]
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Prefix operation (`not e`, `!e`).
    #[serde(rename = "UnaryExpr")]
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// `cond ? then : else`
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        #[serde(rename = "else")]
        otherwise: Box<Expr>,
    },

    /// Cast via type-name call syntax, e.g. `uint32(x)`.
    Cast {
        expr: Box<Expr>,
        #[serde(rename = "type")]
        typ: Type,
    },

    /// Function call. Method calls `recv.f(a)` desugar to `f(recv, a)`.
    Call { name: String, args: Vec<Expr> },

    /// `select(e, ...)` selection form.
    SelectExpr { selectors: Vec<Expr> },

    /// `{field: expr, ...}` record constructor.
    RecordExpr { fields: Vec<RecordField> },

    /// `[expr, ...]` array constructor.
    ArrayExpr { exprs: Vec<Expr> },

    /// `|[expr, ...]|` set constructor.
    SetExpr { exprs: Vec<Expr> },

    /// `|{key: value, ...}|` map constructor.
    MapExpr { entries: Vec<MapEntry> },

    /// Bare identifier (field reference or name; resolution is downstream
    /// work).
    #[serde(rename = "ID")]
    Id { name: String },

    /// The root value: `this` or a bare/leading `.`.
    Root,

    /// Scalar literal.
    Primitive(Primitive),

    /// `type(<type>)` first-class type value.
    TypeValue { value: Type },

    /// Keyword search on a literal value. `text` preserves the original
    /// lexeme as written.
    Search { text: String, value: Primitive },

    /// Search against a regular expression (written as `/re/` or as a glob
    /// already translated to regex source).
    RegexpSearch { pattern: String },

    /// `expr matches <pattern>` (and the `match(pattern, expr)` form).
    RegexpMatch { pattern: String, expr: Box<Expr> },

    /// `lhs := rhs`; `lhs` is absent when the target is implied by `rhs`,
    /// as in `cut a, b`.
    Assignment {
        lhs: Option<Box<Expr>>,
        rhs: Box<Expr>,
    },

    /// `expr[lo:hi]` with either bound optional.
    Slice {
        expr: Box<Expr>,
        from: Option<Box<Expr>>,
        to: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn id(name: impl Into<String>) -> Expr {
        Expr::Id { name: name.into() }
    }

    pub fn assign(lhs: Option<Expr>, rhs: Expr) -> Expr {
        Expr::Assignment {
            lhs: lhs.map(Box::new),
            rhs: Box::new(rhs),
        }
    }
}
