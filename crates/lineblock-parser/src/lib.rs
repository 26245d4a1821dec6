//! LineBlock parser: converts a token stream into an AST.

mod error;
mod parse_expr;
mod parse_stmt;
mod parser;

pub use error::ParseError;
pub use parser::{Parser, MAX_NESTING};

use lineblock_types::ast::Program;
use lineblock_types::{GridView, Token};

/// Parse a token stream. `grid` is read to resolve `PLACEBLOCK` templates.
pub fn parse(tokens: Vec<Token>, grid: &dyn GridView) -> Result<Program, ParseError> {
    Parser::new(tokens, grid).parse()
}
