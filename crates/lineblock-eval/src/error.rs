//! Runtime error types for the LineBlock evaluator.

use lineblock_types::ast::ValueType;
use lineblock_types::{Diagnostic, Stage, Token};
use thiserror::Error;

/// Evaluation error. The first one aborts the run; side effects already
/// performed stay in place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// An operator or statement got operands of the wrong type.
    #[error("error at {token}: {message}")]
    TypeMismatch { token: Token, message: String },

    #[error("error at {token}: variable {index} is not defined")]
    UndefinedVariable { token: Token, index: usize },

    /// `/` or `%` with a zero divisor.
    #[error("error at {token}: division by zero")]
    DivisionByZero { token: Token },

    /// Typed assignment could not convert the value.
    #[error("error at {token}: cannot convert {from} \"{text}\" to {to}")]
    Conversion {
        token: Token,
        from: ValueType,
        to: ValueType,
        text: String,
    },

    /// A `+` or `*` would build a string past the configured cap.
    #[error("error at {token}: string of {len} bytes exceeds the limit of {limit}")]
    StringTooLong {
        token: Token,
        len: usize,
        limit: usize,
    },

    #[error("error at {token}: {reason}")]
    InvalidLiteral { token: Token, reason: String },

    #[error("error at {token}: no command hook at this cell")]
    MissingCommandHook { token: Token },

    #[error("error at {token}: command failed: {message}")]
    CommandFailed { token: Token, message: String },

    /// `GOTO` named a statement outside the root block.
    #[error("error at {token}: GOTO target {target} is outside 0..{len}")]
    GotoOutOfBounds { token: Token, target: i32, len: usize },

    #[error("error at {token}: GOTO is disabled")]
    GotoDisabled { token: Token },

    /// `BREAK` or `CONTINUE` outside any loop.
    #[error("error at {token}: {} outside a loop", token.kind)]
    StrayControl { token: Token },

    #[error("gas exhausted after {limit} steps")]
    GasExhausted { limit: u64 },
}

impl EvalError {
    pub fn token(&self) -> Option<Token> {
        match self {
            Self::TypeMismatch { token, .. }
            | Self::UndefinedVariable { token, .. }
            | Self::DivisionByZero { token }
            | Self::Conversion { token, .. }
            | Self::StringTooLong { token, .. }
            | Self::InvalidLiteral { token, .. }
            | Self::MissingCommandHook { token }
            | Self::CommandFailed { token, .. }
            | Self::GotoOutOfBounds { token, .. }
            | Self::GotoDisabled { token }
            | Self::StrayControl { token } => Some(*token),
            Self::GasExhausted { .. } => None,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        let full = self.to_string();
        // Drop the "error at …: " prefix; the diagnostic carries the token.
        let message = match self.token() {
            Some(token) => full
                .strip_prefix(&format!("error at {token}: "))
                .unwrap_or(&full)
                .to_string(),
            None => full,
        };
        Diagnostic::new(Stage::Eval, message).with_token(self.token())
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use lineblock_types::{GridPos, TokenKind};

    #[test]
    fn test_diagnostic_strips_location() {
        let err = EvalError::DivisionByZero {
            token: Token::new(TokenKind::Div, GridPos::new(0, 0, 5)),
        };
        assert_eq!(err.to_string(), "error at DIV at (0, 0, 5): division by zero");
        let diag = err.diagnostic();
        assert_eq!(diag.message, "division by zero");
        assert_eq!(diag.pos, Some(GridPos::new(0, 0, 5)));
    }

    #[test]
    fn test_gas_has_no_location() {
        let diag = EvalError::GasExhausted { limit: 10 }.diagnostic();
        assert_eq!(diag.token, None);
        assert_eq!(diag.message, "gas exhausted after 10 steps");
    }
}
