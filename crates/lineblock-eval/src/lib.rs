//! LineBlock tree-walking evaluator.
//!
//! Executes a parsed [`Program`](lineblock_types::ast::Program) against a
//! mutable grid and a [`Host`] that supplies command hooks and the text sink.

mod control;
mod env;
mod error;
mod evaluator;
mod host;
pub mod literal;
mod ops;
mod value;

pub use control::ControlSignal;
pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use evaluator::{Evaluator, DEFAULT_GAS_LIMIT};
pub use host::{HookError, Host, MemoryHost};
pub use ops::{binary, unary, DEFAULT_MAX_STRING_LEN};
pub use value::{Value, FLOAT_EPSILON};
