//! Scanner error types.

use lineblock_types::{Diagnostic, Direction, GridPos, Stage};
use thiserror::Error;

/// Errors raised while walking the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// A redirector cell carries no facing attribute.
    #[error("error at {pos}: redirector has no facing")]
    MalformedRedirector { pos: GridPos },

    /// The walk came back to a cell it already left in the same direction.
    #[error("error at {pos}: redirectors form a cycle (heading {direction})")]
    RedirectCycle { pos: GridPos, direction: Direction },

    /// Side-scans nested deeper than the configured limit.
    #[error("error at {pos}: side-scans nested deeper than {limit}")]
    DepthExceeded { pos: GridPos, limit: usize },
}

impl ScanError {
    /// The cell the error refers to.
    pub fn pos(&self) -> GridPos {
        match self {
            Self::MalformedRedirector { pos }
            | Self::RedirectCycle { pos, .. }
            | Self::DepthExceeded { pos, .. } => *pos,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        let message = match self {
            Self::MalformedRedirector { .. } => "redirector has no facing".to_string(),
            Self::RedirectCycle { direction, .. } => {
                format!("redirectors form a cycle (heading {direction})")
            }
            Self::DepthExceeded { limit, .. } => {
                format!("side-scans nested deeper than {limit}")
            }
        };
        Diagnostic::new(Stage::Scan, message).with_pos(self.pos())
    }
}
