//! Parse errors. The parser stops at the first one.

use lineblock_types::{Diagnostic, Stage, Token, TokenKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A specific token (or class of tokens) was required here.
    #[error("error at {found}: expected {expected}, found {}", found.kind)]
    Expected { expected: String, found: Token },

    /// The token cannot start a statement.
    #[error("error at {token}: {} cannot start a statement", token.kind)]
    UnexpectedToken { token: Token },

    /// Input ran out while something was still required.
    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEnd { expected: String },

    /// A construct is missing one of its required argument slots.
    #[error("error at {token}: {} requires {slot}", token.kind)]
    MissingArgument { token: Token, slot: TokenKind },

    /// An argument slot appeared twice for the same construct.
    #[error("error at {token}: {} given twice", token.kind)]
    DuplicateArgument { token: Token },

    /// A literal's bit count does not fit its type.
    #[error("error at {token}: {reason}")]
    MalformedLiteral { token: Token, reason: String },

    /// Expressions or blocks nested past the parser's limit.
    #[error("error at {token}: nesting deeper than {limit}")]
    NestingTooDeep { token: Token, limit: usize },
}

impl ParseError {
    /// The offending token, or `None` for end of input.
    pub fn token(&self) -> Option<Token> {
        match self {
            Self::Expected { found: token, .. }
            | Self::UnexpectedToken { token }
            | Self::MissingArgument { token, .. }
            | Self::DuplicateArgument { token }
            | Self::MalformedLiteral { token, .. }
            | Self::NestingTooDeep { token, .. } => Some(*token),
            Self::UnexpectedEnd { .. } => None,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        let message = match self {
            Self::Expected { expected, found } => {
                format!("expected {expected}, found {}", found.kind)
            }
            Self::UnexpectedToken { token } => {
                format!("{} cannot start a statement", token.kind)
            }
            Self::UnexpectedEnd { expected } => {
                format!("unexpected end of input: expected {expected}")
            }
            Self::MissingArgument { token, slot } => format!("{} requires {slot}", token.kind),
            Self::DuplicateArgument { token } => format!("{} given twice", token.kind),
            Self::MalformedLiteral { reason, .. } => reason.clone(),
            Self::NestingTooDeep { limit, .. } => format!("nesting deeper than {limit}"),
        };
        Diagnostic::new(Stage::Parse, message).with_token(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineblock_types::GridPos;

    #[test]
    fn test_display_names_location() {
        let err = ParseError::Expected {
            expected: "RPAR".into(),
            found: Token::new(TokenKind::Stop, GridPos::new(3, 0, 0)),
        };
        assert_eq!(err.to_string(), "error at STOP at (3, 0, 0): expected RPAR, found STOP");
    }

    #[test]
    fn test_end_of_input_has_no_token() {
        let err = ParseError::UnexpectedEnd {
            expected: "BRANCH_END".into(),
        };
        assert_eq!(err.token(), None);
        assert_eq!(err.diagnostic().pos, None);
        assert_eq!(err.diagnostic().stage, Stage::Parse);
    }
}
