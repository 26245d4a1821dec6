//! Expression parsing.
//!
//! Two binary precedence levels (lowest → highest):
//! 2. `PLUS MINUS AND OR XOR EQ NE GT LT GE LE`
//! 1. `MUL DIV MOD POW BIT_AND BIT_OR BIT_XOR SHL SHR`
//!
//! Both are left-associative. Factors are prefix unary operators,
//! parenthesised expressions, literals, variable uses, and constants.

use lineblock_types::ast::*;
use lineblock_types::{Token, TokenKind};

use crate::error::ParseError;
use crate::parser::Parser;

impl Parser<'_> {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let Some(start) = self.peek() else {
            return Err(ParseError::UnexpectedEnd {
                expected: "value".into(),
            });
        };
        self.nested(start, |p| p.parse_additive())
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `expression = term { additiveOp term }`
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.chained(|p| {
            let mut left = p.parse_term()?;
            while let Some(op) = p.peek_kind().and_then(BinOp::additive) {
                let token = p.next_token("operator")?;
                p.deepen(token)?;
                let right = p.parse_term()?;
                left = binary(op, token, left, right);
            }
            Ok(left)
        })
    }

    /// `term = factor { multiplicativeOp factor }`
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.chained(|p| {
            let mut left = p.parse_factor()?;
            while let Some(op) = p.peek_kind().and_then(BinOp::multiplicative) {
                let token = p.next_token("operator")?;
                p.deepen(token)?;
                let right = p.parse_factor()?;
                left = binary(op, token, left, right);
            }
            Ok(left)
        })
    }

    /// `factor = unaryOp factor | LPAR expression RPAR | literal | USE_VAR VAR_INDEX* | PI | E`
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        let token = self.next_token("value")?;

        if let Some(op) = UnaryOp::from_token_kind(token.kind) {
            let operand = self.nested(token, |p| p.parse_factor())?;
            return Ok(Expr::Unary {
                op,
                token,
                operand: Box::new(operand),
            });
        }

        match token.kind {
            TokenKind::LPar => {
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RPar)?;
                Ok(inner)
            }
            TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::Bool => {
                self.parse_literal(token).map(Expr::Literal)
            }
            TokenKind::UseVar => {
                let chain = self.collect_while(|k| k == TokenKind::VarIndex);
                Ok(Expr::Variable(VarRef::new(token, chain)))
            }
            TokenKind::Pi => Ok(Expr::Constant {
                constant: Constant::Pi,
                token,
            }),
            TokenKind::E => Ok(Expr::Constant {
                constant: Constant::E,
                token,
            }),
            _ => Err(ParseError::Expected {
                expected: "value".into(),
                found: token,
            }),
        }
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Literals
    // ══════════════════════════════════════════════════════════════════════════

    /// `typeMarker bit*`; the type marker is already consumed. The bit count
    /// is checked against the type here so width errors surface before any
    /// statement runs.
    fn parse_literal(&mut self, marker: Token) -> Result<Literal, ParseError> {
        let ty = ValueType::from_token_kind(marker.kind).ok_or(ParseError::Expected {
            expected: "type marker".into(),
            found: marker,
        })?;
        let bits = self.collect_while(TokenKind::is_bit);
        ty.check_literal_width(bits.len())
            .map_err(|reason| ParseError::MalformedLiteral {
                token: marker,
                reason,
            })?;
        Ok(Literal {
            token: marker,
            ty,
            bits,
        })
    }
}

fn binary(op: BinOp, token: Token, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        token,
        left: Box::new(left),
        right: Box::new(right),
    }
}
