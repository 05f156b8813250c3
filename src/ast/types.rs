use serde::Serialize;

/// One `name: type` column of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeField {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: Type,
}

/// Type expression node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Type {
    /// Built-in primitive type, e.g. `int64`, `duration`, `ip`.
    TypePrimitive { name: String },

    /// Reference to a declared type name.
    TypeName { name: String },

    /// `(T1, T2, ...)` union.
    TypeUnion { types: Vec<Type> },

    /// `{field: T, ...}` record type.
    TypeRecord { fields: Vec<TypeField> },

    /// `[T]` array type.
    TypeArray {
        #[serde(rename = "type")]
        inner: Box<Type>,
    },

    /// `|[T]|` set type.
    TypeSet {
        #[serde(rename = "type")]
        inner: Box<Type>,
    },

    /// `|{K, V}|` map type.
    TypeMap {
        key_type: Box<Type>,
        val_type: Box<Type>,
    },

    /// `name = (<type>)` named-and-defined type shorthand.
    TypeDef {
        name: String,
        #[serde(rename = "type")]
        typ: Box<Type>,
    },
}
