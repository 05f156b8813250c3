use serde::Serialize;

/// Binary operators. Serialized as the operator's source spelling, so a
/// `BinaryExpr` prints as `{"kind":"BinaryExpr","op":"==",...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    /// Logical OR (`or`)
    #[serde(rename = "or")]
    Or,
    /// Logical AND (`and`)
    #[serde(rename = "and")]
    And,
    /// Membership (`in`)
    #[serde(rename = "in")]
    In,
    /// Equal (`==`)
    #[serde(rename = "==")]
    Eq,
    /// Not equal (`!=`)
    #[serde(rename = "!=")]
    Ne,
    /// Less than (`<`)
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    Le,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    Ge,
    /// Addition (`+`)
    #[serde(rename = "+")]
    Add,
    /// Subtraction (`-`)
    #[serde(rename = "-")]
    Sub,
    /// Multiplication (`*`)
    #[serde(rename = "*")]
    Mul,
    /// Division (`/`)
    #[serde(rename = "/")]
    Div,
    /// Field dereference (`expr.field`)
    #[serde(rename = ".")]
    Dot,
    /// Index dereference (`expr[index]`)
    #[serde(rename = "[")]
    Index,
}

/// Prefix operators. `not` and `!` are spellings of the same operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    #[serde(rename = "!")]
    Not,
}
