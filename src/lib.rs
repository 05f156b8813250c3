pub mod ast;
pub mod cursor;
pub mod error;
pub mod parser;
pub mod reglob;

pub use ast::{BinOp, Expr, MapEntry, Primitive, Proc, RecordField, Type, UnaryOp};
pub use error::{Expectation, Location, ParseError, Position};
pub use parser::Parser;
pub use reglob::{is_globby, reglob, GlobOptions};

/// Parses a complete query program into its pipeline AST.
pub fn parse(input: &str) -> Result<Proc, ParseError> {
    Parser::new(input).parse_program()
}

/// Parses a single expression, consuming the whole input.
pub fn parse_expr(input: &str) -> Result<Expr, ParseError> {
    Parser::new(input).parse_expression()
}
