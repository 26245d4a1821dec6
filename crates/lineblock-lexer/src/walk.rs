//! The directional walk: a forward iterator over the token cells of one
//! straight-or-redirected line.
//!
//! A walk starts at a cell heading in a direction, yields a [`Step`] for
//! every cell whose symbol maps to a token, turns transparently at
//! redirectors, and ends at the first unknown cell.

use std::collections::HashSet;
use std::iter::FusedIterator;

use lineblock_types::{Direction, GridPos, GridView, Token};

use crate::error::ScanError;
use crate::symbols::{classify, SymbolClass};

/// One emitted token together with the direction the walk was heading
/// when it was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub token: Token,
    pub direction: Direction,
}

/// Iterator over the tokens of a single line.
///
/// The walk state is just `(position, direction)`, so arriving at a pair it
/// has already seen means it would loop forever; that is reported as
/// [`ScanError::RedirectCycle`] and ends the walk.
pub struct Walk<'g> {
    grid: &'g dyn GridView,
    pos: GridPos,
    direction: Direction,
    visited: HashSet<(GridPos, Direction)>,
    finished: bool,
}

impl<'g> Walk<'g> {
    pub fn new(grid: &'g dyn GridView, start: GridPos, direction: Direction) -> Self {
        Self {
            grid,
            pos: start,
            direction,
            visited: HashSet::new(),
            finished: false,
        }
    }

    /// The cell the next read will look at.
    pub fn position(&self) -> GridPos {
        self.pos
    }

    /// The current heading.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn fail(&mut self, err: ScanError) -> Option<Result<Step, ScanError>> {
        self.finished = true;
        Some(Err(err))
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<Step, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            if !self.visited.insert((self.pos, self.direction)) {
                let (pos, direction) = (self.pos, self.direction);
                return self.fail(ScanError::RedirectCycle { pos, direction });
            }

            let symbol = self.grid.symbol_at(self.pos);
            match classify(&symbol) {
                SymbolClass::Token(kind) => {
                    let step = Step {
                        token: Token::new(kind, self.pos),
                        direction: self.direction,
                    };
                    self.pos = self.pos.offset(self.direction);
                    return Some(Ok(step));
                }
                SymbolClass::Redirector => {
                    let Some(facing) = self.grid.redirector_facing(self.pos) else {
                        let pos = self.pos;
                        return self.fail(ScanError::MalformedRedirector { pos });
                    };
                    tracing::trace!(pos = %self.pos, %facing, "redirect");
                    self.direction = facing;
                    self.pos = self.pos.offset(facing);
                }
                SymbolClass::Unknown => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

impl FusedIterator for Walk<'_> {}
