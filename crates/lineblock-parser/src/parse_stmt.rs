//! Statement parsing.
//!
//! Compound statements take their parts from argument-slot markers
//! (`FIRST_ARGUMENT` … `FOURTH_ARGUMENT`). Slots may come in any order, but
//! each at most once.

use lineblock_types::ast::*;
use lineblock_types::{GridPos, Token, TokenKind};

use crate::error::ParseError;
use crate::parser::Parser;

impl Parser<'_> {
    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let token = self.next_token("statement")?;
        match token.kind {
            TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::Bool => {
                self.parse_assignment(token).map(Stmt::Assign)
            }
            TokenKind::Command => Ok(Stmt::Command(token)),
            TokenKind::Stop => Ok(Stmt::Stop(token)),
            TokenKind::Break => Ok(Stmt::Break(token)),
            TokenKind::Continue => Ok(Stmt::Continue(token)),
            TokenKind::Print => Ok(Stmt::Print {
                token,
                value: self.parse_expression()?,
            }),
            TokenKind::Goto => Ok(Stmt::Goto {
                token,
                target: self.parse_expression()?,
            }),
            TokenKind::PlaceBlock => self.parse_place_block(token).map(Stmt::PlaceBlock),
            TokenKind::If => self.parse_if(token).map(Stmt::If),
            TokenKind::While => self.parse_while(token).map(Stmt::While),
            TokenKind::For => self.parse_for(token).map(Stmt::For),
            _ => Err(ParseError::UnexpectedToken { token }),
        }
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Assignment
    // ══════════════════════════════════════════════════════════════════════════

    /// `typeMarker VAR_INDEX* expression` or `typeMarker expression VAR_INDEX*`
    fn parse_assignment(&mut self, marker: Token) -> Result<Assign, ParseError> {
        let ty = ValueType::from_token_kind(marker.kind).ok_or(ParseError::Expected {
            expected: "type marker".into(),
            found: marker,
        })?;

        let (chain, value) = if self.check(TokenKind::VarIndex) {
            let chain = self.collect_while(|k| k == TokenKind::VarIndex);
            (chain, self.parse_expression()?)
        } else {
            let value = self.parse_expression()?;
            (self.collect_while(|k| k == TokenKind::VarIndex), value)
        };

        Ok(Assign {
            token: marker,
            ty,
            target: VarRef::new(marker, chain),
            value,
        })
    }

    // ══════════════════════════════════════════════════════════════════════════
    // PLACEBLOCK
    // ══════════════════════════════════════════════════════════════════════════

    /// `PLACEBLOCK` with x, y, z in the first three slots and the template
    /// locator in the fourth. The template cell sits one displacement past
    /// the fourth marker, on the line from the instruction through it.
    fn parse_place_block(&mut self, token: Token) -> Result<PlaceBlock, ParseError> {
        let mut x = None;
        let mut y = None;
        let mut z = None;
        let mut fourth: Option<Token> = None;

        while x.is_none() || y.is_none() || z.is_none() || fourth.is_none() {
            let Some(next) = self.advance() else { break };
            match next.kind {
                TokenKind::FirstArgument => {
                    ensure_unset(&x, next)?;
                    x = Some(self.parse_expression()?);
                }
                TokenKind::SecondArgument => {
                    ensure_unset(&y, next)?;
                    y = Some(self.parse_expression()?);
                }
                TokenKind::ThirdArgument => {
                    ensure_unset(&z, next)?;
                    z = Some(self.parse_expression()?);
                }
                TokenKind::FourthArgument => {
                    ensure_unset(&fourth, next)?;
                    fourth = Some(next);
                    self.skip_template_line(token.pos, next.pos);
                }
                _ => tracing::trace!(token = %next, "skipping token inside PLACEBLOCK"),
            }
        }

        let missing = |slot| ParseError::MissingArgument { token, slot };
        let x = x.ok_or_else(|| missing(TokenKind::FirstArgument))?;
        let y = y.ok_or_else(|| missing(TokenKind::SecondArgument))?;
        let z = z.ok_or_else(|| missing(TokenKind::ThirdArgument))?;
        let fourth = fourth.ok_or_else(|| missing(TokenKind::FourthArgument))?;

        let template_pos = fourth.pos + (fourth.pos - token.pos);
        let template = self.grid.symbol_at(template_pos);
        tracing::trace!(%template_pos, %template, "PLACEBLOCK template");

        Ok(PlaceBlock {
            token,
            x,
            y,
            z,
            template_pos,
            template,
        })
    }

    /// The side-scan that found the fourth marker keeps walking through the
    /// template cell, so whatever it tokenised there follows the marker
    /// directly. Drop those tokens.
    fn skip_template_line(&mut self, origin: GridPos, marker: GridPos) {
        let step = marker - origin;
        let mut expected = marker + step;
        while let Some(next) = self.peek() {
            if next.pos != expected {
                break;
            }
            self.advance();
            expected = expected + step;
        }
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Control flow
    // ══════════════════════════════════════════════════════════════════════════

    /// `IF`: condition (first), then-branch (second), optional else-branch
    /// (third). Slot parsing stops at the first token that is not one of them.
    fn parse_if(&mut self, token: Token) -> Result<IfStmt, ParseError> {
        let mut condition = None;
        let mut then_branch = None;
        let mut else_branch = None;

        while let Some(slot) = self.peek() {
            match slot.kind {
                TokenKind::FirstArgument => {
                    ensure_unset(&condition, slot)?;
                    self.advance();
                    condition = Some(self.parse_expression()?);
                }
                TokenKind::SecondArgument => {
                    ensure_unset(&then_branch, slot)?;
                    self.advance();
                    then_branch = Some(self.parse_branch(slot)?);
                }
                TokenKind::ThirdArgument => {
                    ensure_unset(&else_branch, slot)?;
                    self.advance();
                    else_branch = Some(self.parse_branch(slot)?);
                }
                _ => break,
            }
        }

        Ok(IfStmt {
            token,
            condition: condition.ok_or(ParseError::MissingArgument {
                token,
                slot: TokenKind::FirstArgument,
            })?,
            then_branch: then_branch.ok_or(ParseError::MissingArgument {
                token,
                slot: TokenKind::SecondArgument,
            })?,
            else_branch,
        })
    }

    /// `WHILE`: condition (first) and body (second).
    fn parse_while(&mut self, token: Token) -> Result<WhileStmt, ParseError> {
        let mut condition = None;
        let mut body = None;

        while let Some(slot) = self.peek() {
            match slot.kind {
                TokenKind::FirstArgument => {
                    ensure_unset(&condition, slot)?;
                    self.advance();
                    condition = Some(self.parse_expression()?);
                }
                TokenKind::SecondArgument => {
                    ensure_unset(&body, slot)?;
                    self.advance();
                    body = Some(self.parse_branch(slot)?);
                }
                _ => break,
            }
        }

        Ok(WhileStmt {
            token,
            condition: condition.ok_or(ParseError::MissingArgument {
                token,
                slot: TokenKind::FirstArgument,
            })?,
            body: body.ok_or(ParseError::MissingArgument {
                token,
                slot: TokenKind::SecondArgument,
            })?,
        })
    }

    /// `FOR`: init statement (first), condition (second), increment
    /// statement (third), body (fourth).
    fn parse_for(&mut self, token: Token) -> Result<ForStmt, ParseError> {
        let mut init = None;
        let mut condition = None;
        let mut increment = None;
        let mut body = None;

        while let Some(slot) = self.peek() {
            match slot.kind {
                TokenKind::FirstArgument => {
                    ensure_unset(&init, slot)?;
                    self.advance();
                    init = Some(self.nested(slot, |p| p.parse_statement())?);
                }
                TokenKind::SecondArgument => {
                    ensure_unset(&condition, slot)?;
                    self.advance();
                    condition = Some(self.parse_expression()?);
                }
                TokenKind::ThirdArgument => {
                    ensure_unset(&increment, slot)?;
                    self.advance();
                    increment = Some(self.nested(slot, |p| p.parse_statement())?);
                }
                TokenKind::FourthArgument => {
                    ensure_unset(&body, slot)?;
                    self.advance();
                    body = Some(self.parse_branch(slot)?);
                }
                _ => break,
            }
        }

        let missing = |slot| ParseError::MissingArgument { token, slot };
        Ok(ForStmt {
            token,
            init: Box::new(init.ok_or_else(|| missing(TokenKind::FirstArgument))?),
            condition: condition.ok_or_else(|| missing(TokenKind::SecondArgument))?,
            increment: Box::new(increment.ok_or_else(|| missing(TokenKind::ThirdArgument))?),
            body: body.ok_or_else(|| missing(TokenKind::FourthArgument))?,
        })
    }

    /// Statements up to and including the closing `BRANCH_END`.
    fn parse_branch(&mut self, opener: Token) -> Result<Block, ParseError> {
        self.nested(opener, |p| {
            let mut stmts = Vec::new();
            while p.eat(TokenKind::BranchEnd).is_none() {
                if p.at_end() {
                    return Err(ParseError::UnexpectedEnd {
                        expected: TokenKind::BranchEnd.to_string(),
                    });
                }
                stmts.push(p.parse_statement()?);
            }
            Ok(Block::new(stmts))
        })
    }
}

fn ensure_unset<T>(slot: &Option<T>, marker: Token) -> Result<(), ParseError> {
    match slot {
        Some(_) => Err(ParseError::DuplicateArgument { token: marker }),
        None => Ok(()),
    }
}
