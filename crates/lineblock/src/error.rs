//! Errors from a whole run.

use lineblock_eval::EvalError;
use lineblock_lexer::ScanError;
use lineblock_parser::ParseError;
use lineblock_types::{Diagnostic, GridPos};
use thiserror::Error;

/// The first error from any stage. A run never recovers from one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl RunError {
    /// The offending cell, if the error has one.
    pub fn pos(&self) -> Option<GridPos> {
        self.diagnostic().pos
    }

    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            Self::Scan(e) => e.diagnostic(),
            Self::Parse(e) => e.diagnostic(),
            Self::Eval(e) => e.diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineblock_types::Stage;

    #[test]
    fn test_display_is_transparent() {
        let err = RunError::from(ScanError::MalformedRedirector {
            pos: GridPos::new(1, 2, 3),
        });
        assert_eq!(err.to_string(), "error at (1, 2, 3): redirector has no facing");
        assert_eq!(err.pos(), Some(GridPos::new(1, 2, 3)));
        assert_eq!(err.diagnostic().stage, Stage::Scan);
    }

    #[test]
    fn test_gas_error_has_no_position() {
        let err = RunError::from(EvalError::GasExhausted { limit: 3 });
        assert_eq!(err.pos(), None);
    }
}
