//! Control signals returned from statement execution.

use lineblock_types::Token;

/// What a statement asks its enclosing blocks to do next.
///
/// Blocks propagate anything other than `Normal` upward. Loops absorb
/// `Break` and `Continue`; the root absorbs `Stop` and `Goto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Normal,
    Break(Token),
    Continue(Token),
    Stop,
    /// Resume at top-level statement `target`.
    Goto { target: i32, token: Token },
}

impl ControlSignal {
    pub fn is_normal(&self) -> bool {
        matches!(self, ControlSignal::Normal)
    }
}
