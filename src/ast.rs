//! # pql - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for pql, a
//! pipeline-oriented query language with a SQL-flavored sub-grammar and a
//! rich literal vocabulary (IP addresses, durations, timestamps, byte
//! strings, globs, regular expressions).
//!
//! ## Architecture Overview
//!
//! The AST is organized into focused submodules:
//!
//! - **[expressions]** - Expression nodes (literals, derefs, operations,
//!   constructors, searches)
//! - **[operators]** - Binary and unary operators
//! - **[procs]** - Pipeline stages ("procs"): sources, filters, shapers,
//!   aggregations, the SQL stage, and the sequential/parallel combinators
//! - **[types]** - Type expressions: primitive, named, union, composite
//!
//! Each family is a closed enum whose JSON form carries a `kind`
//! discriminator. Every node owns its children exclusively; the tree has no
//! sharing and no cycles.
//!
//! ## Pipeline Structure
//!
//! A query is a `|`-separated chain of procs, optionally preceded by
//! `const`/`type` declarations:
//!
//! ```text
//! filter status == "active" | sort -r ts | head 10
//! ```
//!
//! Parallel branches live inside `split(...)`, alternatives inside
//! `switch (...)`, and multi-source inputs inside `from (...)`.
//!
//! ## Literals
//!
//! Scalar literals parse to [`expressions::Primitive`], a `(type, text)`
//! pair. The lexeme is already decoded (string escapes resolved, globs
//! translated to regex source) but numeric/duration/time conversion into
//! machine values is left to downstream consumers.

pub mod expressions;
pub mod operators;
pub mod procs;
pub mod types;

pub use expressions::{Expr, MapEntry, Primitive, RecordField};
pub use operators::{BinOp, UnaryOp};
pub use procs::{
    JoinStyle, NullsOrder, Proc, SortOrder, SqlExpr, SqlFrom, SqlJoin, SqlOrderBy, SwitchCase,
    Trunk,
};
pub use types::{Type, TypeField};
