//! Token vocabulary shared by the scanner, parser, and evaluator.
//!
//! A [`Token`] pairs a [`TokenKind`] with the grid cell it was read from.
//! Tokens are `Copy`; the AST keeps them for error locations.

use crate::GridPos;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the grid scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The cell the token was read from.
    pub pos: GridPos,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, pos: GridPos) -> Self {
        Self { kind, pos }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.pos)
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the LineBlock language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // ── Arithmetic ───────────────────────────────────────────
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Pow,
    #[serde(rename = "LPAR")]
    LPar,
    #[serde(rename = "RPAR")]
    RPar,

    // ── Bitwise ──────────────────────────────────────────────
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    Shl,
    Shr,

    // ── Literal bits ─────────────────────────────────────────
    Zero,
    One,

    // ── Logic ────────────────────────────────────────────────
    And,
    Or,
    Not,
    Xor,

    // ── Comparison ───────────────────────────────────────────
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,

    // ── Math functions ───────────────────────────────────────
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Abs,
    Ceil,
    Floor,

    // ── Constants ────────────────────────────────────────────
    Pi,
    E,

    // ── Statements ───────────────────────────────────────────
    Command,
    Stop,
    Print,
    Goto,
    #[serde(rename = "PLACEBLOCK")]
    PlaceBlock,

    // ── Control flow ─────────────────────────────────────────
    If,
    BranchEnd,
    While,
    For,
    Break,
    Continue,

    // ── Argument slots ───────────────────────────────────────
    FirstArgument,
    SecondArgument,
    ThirdArgument,
    FourthArgument,

    // ── Type markers & variables ─────────────────────────────
    /// `INT`: literal type tag and assignment operator.
    Int,
    Float,
    String,
    Bool,
    VarIndex,
    UseVar,
}

impl TokenKind {
    /// Every token kind, in declaration order.
    pub const ALL: [TokenKind; 58] = [
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Mul,
        TokenKind::Div,
        TokenKind::Mod,
        TokenKind::Pow,
        TokenKind::LPar,
        TokenKind::RPar,
        TokenKind::BitAnd,
        TokenKind::BitOr,
        TokenKind::BitXor,
        TokenKind::BitNot,
        TokenKind::Shl,
        TokenKind::Shr,
        TokenKind::Zero,
        TokenKind::One,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Not,
        TokenKind::Xor,
        TokenKind::Eq,
        TokenKind::Ne,
        TokenKind::Gt,
        TokenKind::Lt,
        TokenKind::Ge,
        TokenKind::Le,
        TokenKind::Sin,
        TokenKind::Cos,
        TokenKind::Tan,
        TokenKind::Asin,
        TokenKind::Acos,
        TokenKind::Atan,
        TokenKind::Abs,
        TokenKind::Ceil,
        TokenKind::Floor,
        TokenKind::Pi,
        TokenKind::E,
        TokenKind::Command,
        TokenKind::Stop,
        TokenKind::Print,
        TokenKind::Goto,
        TokenKind::PlaceBlock,
        TokenKind::If,
        TokenKind::BranchEnd,
        TokenKind::While,
        TokenKind::For,
        TokenKind::Break,
        TokenKind::Continue,
        TokenKind::FirstArgument,
        TokenKind::SecondArgument,
        TokenKind::ThirdArgument,
        TokenKind::FourthArgument,
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::String,
        TokenKind::Bool,
        TokenKind::VarIndex,
        TokenKind::UseVar,
    ];

    /// `INT`, `FLOAT`, `STRING`, or `BOOL`.
    pub fn is_type_marker(self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::Bool
        )
    }

    /// `ZERO` or `ONE`.
    pub fn is_bit(self) -> bool {
        matches!(self, TokenKind::Zero | TokenKind::One)
    }

    /// One of the four argument-slot markers.
    pub fn is_argument(self) -> bool {
        matches!(
            self,
            TokenKind::FirstArgument
                | TokenKind::SecondArgument
                | TokenKind::ThirdArgument
                | TokenKind::FourthArgument
        )
    }

    /// The upper-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::Mod => "MOD",
            TokenKind::Pow => "POW",
            TokenKind::LPar => "LPAR",
            TokenKind::RPar => "RPAR",
            TokenKind::BitAnd => "BIT_AND",
            TokenKind::BitOr => "BIT_OR",
            TokenKind::BitXor => "BIT_XOR",
            TokenKind::BitNot => "BIT_NOT",
            TokenKind::Shl => "SHL",
            TokenKind::Shr => "SHR",
            TokenKind::Zero => "ZERO",
            TokenKind::One => "ONE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Xor => "XOR",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Gt => "GT",
            TokenKind::Lt => "LT",
            TokenKind::Ge => "GE",
            TokenKind::Le => "LE",
            TokenKind::Sin => "SIN",
            TokenKind::Cos => "COS",
            TokenKind::Tan => "TAN",
            TokenKind::Asin => "ASIN",
            TokenKind::Acos => "ACOS",
            TokenKind::Atan => "ATAN",
            TokenKind::Abs => "ABS",
            TokenKind::Ceil => "CEIL",
            TokenKind::Floor => "FLOOR",
            TokenKind::Pi => "PI",
            TokenKind::E => "E",
            TokenKind::Command => "COMMAND",
            TokenKind::Stop => "STOP",
            TokenKind::Print => "PRINT",
            TokenKind::Goto => "GOTO",
            TokenKind::PlaceBlock => "PLACEBLOCK",
            TokenKind::If => "IF",
            TokenKind::BranchEnd => "BRANCH_END",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::FirstArgument => "FIRST_ARGUMENT",
            TokenKind::SecondArgument => "SECOND_ARGUMENT",
            TokenKind::ThirdArgument => "THIRD_ARGUMENT",
            TokenKind::FourthArgument => "FOURTH_ARGUMENT",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Bool => "BOOL",
            TokenKind::VarIndex => "VAR_INDEX",
            TokenKind::UseVar => "USE_VAR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
