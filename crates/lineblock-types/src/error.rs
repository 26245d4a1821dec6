//! Structured diagnostics shared by every pipeline stage.

use crate::{GridPos, Token};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The pipeline stage an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Scan,
    Parse,
    Eval,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan => write!(f, "scan"),
            Self::Parse => write!(f, "parse"),
            Self::Eval => write!(f, "eval"),
        }
    }
}

/// A structured, serialisable report of a failed run.
///
/// Hosts that render errors themselves consume this instead of parsing the
/// `Display` text of the stage errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub stage: Stage,
    /// Human-readable message, without location.
    pub message: String,
    /// The offending token, when the error has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,
    /// The offending cell. Equal to `token.pos` when a token is present;
    /// scan errors may carry a position without a token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<GridPos>,
}

impl Diagnostic {
    /// Create a diagnostic with no location.
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            token: None,
            pos: None,
        }
    }

    /// Attach the offending token (and its position).
    pub fn with_token(mut self, token: Option<Token>) -> Self {
        if let Some(t) = token {
            self.pos = Some(t.pos);
        }
        self.token = token;
        self
    }

    /// Attach a position without a token.
    pub fn with_pos(mut self, pos: GridPos) -> Self {
        self.pos = Some(pos);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.token, &self.pos) {
            (Some(token), _) => write!(f, "[{}] error at {}: {}", self.stage, token, self.message),
            (None, Some(pos)) => write!(f, "[{}] error at {}: {}", self.stage, pos, self.message),
            (None, None) => write!(f, "[{}] {}", self.stage, self.message),
        }
    }
}
