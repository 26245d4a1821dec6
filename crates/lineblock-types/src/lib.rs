//! Shared types for the LineBlock language.
//!
//! This crate defines the grid coordinate model and the grid oracle traits,
//! the token vocabulary, AST node types, and the structured diagnostic used
//! across all pipeline stages.

mod error;
mod grid;
mod token;
pub mod ast;

pub use error::{Diagnostic, Stage};
pub use grid::{Direction, Grid, GridPos, GridView, MemoryGrid, Symbol};
pub use token::{Token, TokenKind};
