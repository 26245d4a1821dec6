//! AST node types for the LineBlock language.
//!
//! Every node keeps the [`Token`] it was built from so runtime errors can
//! point back at a grid cell. Ownership is strictly tree-shaped; recursive
//! children are boxed.

use crate::{GridPos, Symbol, Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete program: the root block.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Block,
}

/// An ordered statement sequence. Executing a block opens a variable scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `INT|FLOAT|STRING|BOOL [VAR_INDEX*] expr` or `... expr [VAR_INDEX*]`
    Assign(Assign),
    /// `COMMAND`: trigger the hook bound to the token's cell.
    Command(Token),
    /// `STOP`: end the whole run.
    Stop(Token),
    /// `BREAK`: leave the nearest loop.
    Break(Token),
    /// `CONTINUE`: skip to the nearest loop's next condition check.
    Continue(Token),
    /// `PRINT expr`
    Print { token: Token, value: Expr },
    /// `GOTO expr` (legacy statement-index jump)
    Goto { token: Token, target: Expr },
    PlaceBlock(PlaceBlock),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
}

impl Stmt {
    /// The token that introduced this statement.
    pub fn token(&self) -> Token {
        match self {
            Stmt::Assign(a) => a.token,
            Stmt::Command(t) | Stmt::Stop(t) | Stmt::Break(t) | Stmt::Continue(t) => *t,
            Stmt::Print { token, .. } | Stmt::Goto { token, .. } => *token,
            Stmt::PlaceBlock(p) => p.token,
            Stmt::If(s) => s.token,
            Stmt::While(s) => s.token,
            Stmt::For(s) => s.token,
        }
    }
}

/// Typed assignment. The target must be a variable; the value is coerced
/// to `ty` before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    /// The type-marker token acting as the assignment operator.
    pub token: Token,
    pub ty: ValueType,
    pub target: VarRef,
    pub value: Expr,
}

/// `PLACEBLOCK` with its three coordinate expressions and the template
/// symbol resolved from the grid at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceBlock {
    pub token: Token,
    pub x: Expr,
    pub y: Expr,
    pub z: Expr,
    /// Cell the template was read from.
    pub template_pos: GridPos,
    pub template: Symbol,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub token: Token,
    pub condition: Expr,
    pub then_branch: Block,
    pub else_branch: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub token: Token,
    pub condition: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub token: Token,
    pub init: Box<Stmt>,
    pub condition: Expr,
    pub increment: Box<Stmt>,
    pub body: Block,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: BinOp,
        token: Token,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        token: Token,
        operand: Box<Expr>,
    },
    Literal(Literal),
    Variable(VarRef),
    Constant {
        constant: Constant,
        token: Token,
    },
}

impl Expr {
    /// The token most closely associated with this expression.
    pub fn token(&self) -> Token {
        match self {
            Expr::Binary { token, .. } | Expr::Unary { token, .. } | Expr::Constant { token, .. } => {
                *token
            }
            Expr::Literal(lit) => lit.token,
            Expr::Variable(var) => var.token,
        }
    }
}

/// `typeMarker bit*`. Bits are kept in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub token: Token,
    pub ty: ValueType,
    pub bits: Vec<Token>,
}

/// A variable reference. The variable's identity is the length of its
/// `VAR_INDEX` chain, not the identity of the individual cells.
#[derive(Debug, Clone, PartialEq)]
pub struct VarRef {
    /// `USE_VAR`, or the assignment's type marker for assignment targets.
    pub token: Token,
    pub chain: Vec<Token>,
}

impl VarRef {
    pub fn new(token: Token, chain: Vec<Token>) -> Self {
        Self { token, chain }
    }

    pub fn index(&self) -> usize {
        self.chain.len()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    And,
    Or,
    Xor,
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl BinOp {
    /// Operators accepted at expression level (lowest precedence).
    pub fn additive(kind: TokenKind) -> Option<BinOp> {
        Some(match kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::And => BinOp::And,
            TokenKind::Or => BinOp::Or,
            TokenKind::Xor => BinOp::Xor,
            TokenKind::Eq => BinOp::Eq,
            TokenKind::Ne => BinOp::Ne,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Ge => BinOp::Ge,
            TokenKind::Le => BinOp::Le,
            _ => return None,
        })
    }

    /// Operators accepted at term level.
    pub fn multiplicative(kind: TokenKind) -> Option<BinOp> {
        Some(match kind {
            TokenKind::Mul => BinOp::Mul,
            TokenKind::Div => BinOp::Div,
            TokenKind::Mod => BinOp::Mod,
            TokenKind::Pow => BinOp::Pow,
            TokenKind::BitAnd => BinOp::BitAnd,
            TokenKind::BitOr => BinOp::BitOr,
            TokenKind::BitXor => BinOp::BitXor,
            TokenKind::Shl => BinOp::Shl,
            TokenKind::Shr => BinOp::Shr,
            _ => return None,
        })
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "PLUS",
            BinOp::Sub => "MINUS",
            BinOp::Mul => "MUL",
            BinOp::Div => "DIV",
            BinOp::Mod => "MOD",
            BinOp::Pow => "POW",
            BinOp::BitAnd => "BIT_AND",
            BinOp::BitOr => "BIT_OR",
            BinOp::BitXor => "BIT_XOR",
            BinOp::Shl => "SHL",
            BinOp::Shr => "SHR",
            BinOp::And => "AND",
            BinOp::Or => "OR",
            BinOp::Xor => "XOR",
            BinOp::Eq => "EQ",
            BinOp::Ne => "NE",
            BinOp::Gt => "GT",
            BinOp::Lt => "LT",
            BinOp::Ge => "GE",
            BinOp::Le => "LE",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Neg,
    BitNot,
    Not,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Abs,
    Ceil,
    Floor,
}

impl UnaryOp {
    pub fn from_token_kind(kind: TokenKind) -> Option<UnaryOp> {
        Some(match kind {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::BitNot => UnaryOp::BitNot,
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Sin => UnaryOp::Sin,
            TokenKind::Cos => UnaryOp::Cos,
            TokenKind::Tan => UnaryOp::Tan,
            TokenKind::Asin => UnaryOp::Asin,
            TokenKind::Acos => UnaryOp::Acos,
            TokenKind::Atan => UnaryOp::Atan,
            TokenKind::Abs => UnaryOp::Abs,
            TokenKind::Ceil => UnaryOp::Ceil,
            TokenKind::Floor => UnaryOp::Floor,
            _ => return None,
        })
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::Plus => "PLUS",
            UnaryOp::Neg => "MINUS",
            UnaryOp::BitNot => "BIT_NOT",
            UnaryOp::Not => "NOT",
            UnaryOp::Sin => "SIN",
            UnaryOp::Cos => "COS",
            UnaryOp::Tan => "TAN",
            UnaryOp::Asin => "ASIN",
            UnaryOp::Acos => "ACOS",
            UnaryOp::Atan => "ATAN",
            UnaryOp::Abs => "ABS",
            UnaryOp::Ceil => "CEIL",
            UnaryOp::Floor => "FLOOR",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

// ══════════════════════════════════════════════════════════════════════════════
// Value types
// ══════════════════════════════════════════════════════════════════════════════

/// The four runtime value types. Doubles as the literal tag and the
/// assignment target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueType {
    Int,
    Float,
    String,
    Bool,
}

impl ValueType {
    pub fn from_token_kind(kind: TokenKind) -> Option<ValueType> {
        Some(match kind {
            TokenKind::Int => ValueType::Int,
            TokenKind::Float => ValueType::Float,
            TokenKind::String => ValueType::String,
            TokenKind::Bool => ValueType::Bool,
            _ => return None,
        })
    }

    /// Check that a literal of this type may carry `bits` bits.
    ///
    /// `FLOAT` is an IEEE-754 single: exactly 32 bits. `STRING` is one
    /// character per 8 bits. `INT` and `BOOL` are decoded through a 64-bit
    /// accumulator.
    pub fn check_literal_width(self, bits: usize) -> Result<(), String> {
        if bits == 0 {
            return Err(format!("{self} literal has no bits"));
        }
        match self {
            ValueType::Float if bits != 32 => Err(format!(
                "FLOAT literal must have exactly 32 bits, got {bits}"
            )),
            ValueType::String if bits % 8 != 0 => Err(format!(
                "STRING literal bit length must be a multiple of 8, got {bits}"
            )),
            ValueType::Int | ValueType::Bool if bits > 64 => Err(format!(
                "{self} literal must have at most 64 bits, got {bits}"
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Int => "INT",
            ValueType::Float => "FLOAT",
            ValueType::String => "STRING",
            ValueType::Bool => "BOOL",
        })
    }
}
