//! The scanner: drives a [`Walk`] and splices in side-scans.
//!
//! Some token kinds open constructs that spread sideways across the grid
//! (literal bits, variable index chains, argument slots). After emitting
//! one of them the scanner probes the orthogonal neighbours of that token's
//! cell and inserts each nested scan directly after the trigger.

use lineblock_types::{Direction, GridPos, GridView, Token, TokenKind};

use crate::error::ScanError;
use crate::symbols::{classify, SymbolClass};
use crate::walk::Walk;

/// Default limit on side-scan nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Token kinds whose emission triggers side-scans.
pub fn triggers_side_scan(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Int
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::Bool
            | TokenKind::UseVar
            | TokenKind::If
            | TokenKind::While
            | TokenKind::For
            | TokenKind::Print
            | TokenKind::Goto
            | TokenKind::PlaceBlock
    )
}

/// Turns a grid region into a token stream.
pub struct Scanner<'g> {
    grid: &'g dyn GridView,
    max_depth: usize,
}

impl<'g> Scanner<'g> {
    pub fn new(grid: &'g dyn GridView) -> Self {
        Self {
            grid,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the side-scan nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Scan from `start` heading `direction` until the first unknown cell.
    pub fn scan(&self, start: GridPos, direction: Direction) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        self.scan_into(start, direction, 0, &mut tokens)?;
        tracing::debug!(count = tokens.len(), %start, %direction, "scan complete");
        Ok(tokens)
    }

    fn scan_into(
        &self,
        start: GridPos,
        direction: Direction,
        depth: usize,
        out: &mut Vec<Token>,
    ) -> Result<(), ScanError> {
        for step in Walk::new(self.grid, start, direction) {
            let step = step?;
            tracing::trace!(token = %step.token, depth, "token");
            out.push(step.token);

            if !triggers_side_scan(step.token.kind) {
                continue;
            }
            for side in step.direction.orthogonal() {
                let neighbour = step.token.pos.offset(side);
                if classify(&self.grid.symbol_at(neighbour)) == SymbolClass::Unknown {
                    continue;
                }
                if depth + 1 > self.max_depth {
                    return Err(ScanError::DepthExceeded {
                        pos: neighbour,
                        limit: self.max_depth,
                    });
                }
                self.scan_into(neighbour, side, depth + 1, out)?;
            }
        }
        Ok(())
    }
}
