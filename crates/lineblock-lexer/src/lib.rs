//! LineBlock grid scanner: turns a directional walk over grid cells into a
//! token stream.

mod error;
pub mod scanner;
pub mod symbols;
pub mod walk;

pub use error::ScanError;
pub use scanner::{triggers_side_scan, Scanner, DEFAULT_MAX_DEPTH};
pub use symbols::{classify, symbol_of, token_kind, SymbolClass, REDIRECTOR};
pub use walk::{Step, Walk};
