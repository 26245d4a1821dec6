//! Core parser infrastructure: token cursor, nesting guard, helpers.

use lineblock_types::ast::{Block, Program};
use lineblock_types::{GridView, Token, TokenKind};

use crate::error::ParseError;

/// Maximum combined nesting of expressions, operator chains and blocks.
pub const MAX_NESTING: usize = 256;

/// The LineBlock parser.
///
/// Consumes the scanner's token stream with one token of lookahead and
/// builds the AST, stopping at the first error. `PLACEBLOCK` resolves its
/// template cell while parsing, so the parser also holds a read-only view of
/// the grid.
pub struct Parser<'g> {
    /// The token stream.
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    pub(crate) grid: &'g dyn GridView,
    /// Current expression + block nesting.
    depth: usize,
}

impl<'g> Parser<'g> {
    pub fn new(tokens: Vec<Token>, grid: &'g dyn GridView) -> Self {
        Self {
            tokens,
            pos: 0,
            grid,
            depth: 0,
        }
    }

    /// Parse the whole stream as the root block.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        while !self.at_end() {
            stmts.push(self.parse_statement()?);
        }
        tracing::debug!(statements = stmts.len(), "parse complete");
        Ok(Program {
            body: Block::new(stmts),
        })
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// If the current token matches, advance and return it.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Consume and return the current token, failing at end of input.
    pub(crate) fn next_token(&mut self, expected: &str) -> Result<Token, ParseError> {
        self.advance().ok_or_else(|| ParseError::UnexpectedEnd {
            expected: expected.to_string(),
        })
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    /// Expect a specific token kind.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == expected => {
                self.pos += 1;
                Ok(token)
            }
            Some(found) => Err(ParseError::Expected {
                expected: expected.to_string(),
                found,
            }),
            None => Err(ParseError::UnexpectedEnd {
                expected: expected.to_string(),
            }),
        }
    }

    /// Collect consecutive tokens matching `pred`.
    pub(crate) fn collect_while(&mut self, pred: impl Fn(TokenKind) -> bool) -> Vec<Token> {
        let mut collected = Vec::new();
        while let Some(token) = self.peek() {
            if !pred(token.kind) {
                break;
            }
            self.pos += 1;
            collected.push(token);
        }
        collected
    }

    // ── Nesting ───────────────────────────────────────────────────────────────

    /// Run `f` one nesting level deeper. `at` is blamed when the limit is hit.
    pub(crate) fn nested<T>(
        &mut self,
        at: Token,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.chained(|p| {
            p.deepen(at)?;
            f(p)
        })
    }

    /// Run `f`, then give back every level it took with [`deepen`].
    ///
    /// [`deepen`]: Parser::deepen
    pub(crate) fn chained<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let entry = self.depth;
        let result = f(self);
        self.depth = entry;
        result
    }

    /// Take one nesting level until the enclosing [`chained`] call returns.
    /// Each operator of a chain takes one, since the chain builds a tree as
    /// deep as it is long.
    ///
    /// [`chained`]: Parser::chained
    pub(crate) fn deepen(&mut self, at: Token) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                token: at,
                limit: MAX_NESTING,
            });
        }
        self.depth += 1;
        Ok(())
    }
}
