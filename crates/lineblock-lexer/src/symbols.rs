//! The symbol table: a fixed mapping from cell contents to token kinds.
//!
//! The table is one-to-one. Every symbol not listed here is unknown, except
//! [`REDIRECTOR`], which changes the scan direction instead of producing a
//! token.

use lineblock_types::{Symbol, TokenKind};

/// The symbol whose only role is to carry a facing and redirect the scan.
pub const REDIRECTOR: &str = "observer";

/// How the scanner treats a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Token(TokenKind),
    Redirector,
    Unknown,
}

/// Classify a cell's symbol.
pub fn classify(symbol: &Symbol) -> SymbolClass {
    if symbol.as_str() == REDIRECTOR {
        return SymbolClass::Redirector;
    }
    match token_kind(symbol) {
        Some(kind) => SymbolClass::Token(kind),
        None => SymbolClass::Unknown,
    }
}

/// Look up the token kind for a symbol. Returns `None` for unknown symbols
/// and for the redirector.
pub fn token_kind(symbol: &Symbol) -> Option<TokenKind> {
    Some(match symbol.as_str() {
        // Math
        "iron_ore" => TokenKind::Plus,
        "copper_ore" => TokenKind::Minus,
        "gold_ore" => TokenKind::Mul,
        "redstone_ore" => TokenKind::Div,
        "emerald_ore" => TokenKind::Mod,
        "lapis_ore" => TokenKind::Pow,
        "stripped_crimson_hyphae" => TokenKind::LPar,
        "crimson_hyphae" => TokenKind::RPar,
        // Bitwise
        "deepslate_iron_ore" => TokenKind::BitAnd,
        "deepslate_copper_ore" => TokenKind::BitOr,
        "deepslate_gold_ore" => TokenKind::BitXor,
        "deepslate_lapis_ore" => TokenKind::BitNot,
        "deepslate_redstone_ore" => TokenKind::Shl,
        "deepslate_emerald_ore" => TokenKind::Shr,
        // Bits
        "white_wool" => TokenKind::Zero,
        "black_wool" => TokenKind::One,
        // Logic
        "nether_gold_ore" => TokenKind::And,
        "nether_quartz_ore" => TokenKind::Or,
        "ancient_debris" => TokenKind::Not,
        "netherrack" => TokenKind::Xor,
        // Comparison
        "stone" => TokenKind::Eq,
        "deepslate" => TokenKind::Ne,
        "granite" => TokenKind::Gt,
        "diorite" => TokenKind::Lt,
        "andesite" => TokenKind::Ge,
        "polished_andesite" => TokenKind::Le,
        // Math functions
        "white_glazed_terracotta" => TokenKind::Sin,
        "light_gray_glazed_terracotta" => TokenKind::Cos,
        "gray_glazed_terracotta" => TokenKind::Tan,
        "black_glazed_terracotta" => TokenKind::Asin,
        "brown_glazed_terracotta" => TokenKind::Acos,
        "red_glazed_terracotta" => TokenKind::Atan,
        "orange_glazed_terracotta" => TokenKind::Abs,
        "yellow_glazed_terracotta" => TokenKind::Ceil,
        "lime_glazed_terracotta" => TokenKind::Floor,
        // Constants
        "green_glazed_terracotta" => TokenKind::Pi,
        "cyan_glazed_terracotta" => TokenKind::E,
        // Statements
        "command_block" => TokenKind::Command,
        "dark_prismarine" => TokenKind::Print,
        "obsidian" => TokenKind::Goto,
        "tnt" => TokenKind::Stop,
        "piston" => TokenKind::PlaceBlock,
        // Control flow
        "oak_wood" => TokenKind::If,
        "stripped_oak_wood" => TokenKind::BranchEnd,
        "birch_wood" => TokenKind::While,
        "jungle_wood" => TokenKind::For,
        "red_nether_bricks" => TokenKind::Break,
        "nether_bricks" => TokenKind::Continue,
        // Arguments
        "glass" => TokenKind::FirstArgument,
        "tinted_glass" => TokenKind::SecondArgument,
        "red_stained_glass" => TokenKind::ThirdArgument,
        "lime_stained_glass" => TokenKind::FourthArgument,
        // Variables
        "diamond_block" => TokenKind::Int,
        "gold_block" => TokenKind::Float,
        "iron_block" => TokenKind::String,
        "emerald_block" => TokenKind::Bool,
        "chiseled_stone_bricks" => TokenKind::UseVar,
        "smooth_stone" => TokenKind::VarIndex,
        _ => return None,
    })
}

/// The symbol that scans as `kind`. Inverse of [`token_kind`].
pub fn symbol_of(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Plus => "iron_ore",
        TokenKind::Minus => "copper_ore",
        TokenKind::Mul => "gold_ore",
        TokenKind::Div => "redstone_ore",
        TokenKind::Mod => "emerald_ore",
        TokenKind::Pow => "lapis_ore",
        TokenKind::LPar => "stripped_crimson_hyphae",
        TokenKind::RPar => "crimson_hyphae",
        TokenKind::BitAnd => "deepslate_iron_ore",
        TokenKind::BitOr => "deepslate_copper_ore",
        TokenKind::BitXor => "deepslate_gold_ore",
        TokenKind::BitNot => "deepslate_lapis_ore",
        TokenKind::Shl => "deepslate_redstone_ore",
        TokenKind::Shr => "deepslate_emerald_ore",
        TokenKind::Zero => "white_wool",
        TokenKind::One => "black_wool",
        TokenKind::And => "nether_gold_ore",
        TokenKind::Or => "nether_quartz_ore",
        TokenKind::Not => "ancient_debris",
        TokenKind::Xor => "netherrack",
        TokenKind::Eq => "stone",
        TokenKind::Ne => "deepslate",
        TokenKind::Gt => "granite",
        TokenKind::Lt => "diorite",
        TokenKind::Ge => "andesite",
        TokenKind::Le => "polished_andesite",
        TokenKind::Sin => "white_glazed_terracotta",
        TokenKind::Cos => "light_gray_glazed_terracotta",
        TokenKind::Tan => "gray_glazed_terracotta",
        TokenKind::Asin => "black_glazed_terracotta",
        TokenKind::Acos => "brown_glazed_terracotta",
        TokenKind::Atan => "red_glazed_terracotta",
        TokenKind::Abs => "orange_glazed_terracotta",
        TokenKind::Ceil => "yellow_glazed_terracotta",
        TokenKind::Floor => "lime_glazed_terracotta",
        TokenKind::Pi => "green_glazed_terracotta",
        TokenKind::E => "cyan_glazed_terracotta",
        TokenKind::Command => "command_block",
        TokenKind::Print => "dark_prismarine",
        TokenKind::Goto => "obsidian",
        TokenKind::Stop => "tnt",
        TokenKind::PlaceBlock => "piston",
        TokenKind::If => "oak_wood",
        TokenKind::BranchEnd => "stripped_oak_wood",
        TokenKind::While => "birch_wood",
        TokenKind::For => "jungle_wood",
        TokenKind::Break => "red_nether_bricks",
        TokenKind::Continue => "nether_bricks",
        TokenKind::FirstArgument => "glass",
        TokenKind::SecondArgument => "tinted_glass",
        TokenKind::ThirdArgument => "red_stained_glass",
        TokenKind::FourthArgument => "lime_stained_glass",
        TokenKind::Int => "diamond_block",
        TokenKind::Float => "gold_block",
        TokenKind::String => "iron_block",
        TokenKind::Bool => "emerald_block",
        TokenKind::UseVar => "chiseled_stone_bricks",
        TokenKind::VarIndex => "smooth_stone",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_round_trips_every_kind() {
        for kind in TokenKind::ALL {
            let symbol = Symbol::new(symbol_of(kind));
            assert_eq!(token_kind(&symbol), Some(kind), "symbol for {kind}");
        }
    }

    #[test]
    fn test_table_is_one_to_one() {
        let symbols: HashSet<_> = TokenKind::ALL.iter().map(|k| symbol_of(*k)).collect();
        assert_eq!(symbols.len(), TokenKind::ALL.len());
        assert!(!symbols.contains(REDIRECTOR));
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            classify(&Symbol::new("tnt")),
            SymbolClass::Token(TokenKind::Stop)
        );
        assert_eq!(classify(&Symbol::new(REDIRECTOR)), SymbolClass::Redirector);
        assert_eq!(classify(&Symbol::air()), SymbolClass::Unknown);
        assert_eq!(classify(&Symbol::new("dirt")), SymbolClass::Unknown);
    }

    #[test]
    fn test_redirector_has_no_token_kind() {
        assert_eq!(token_kind(&Symbol::new(REDIRECTOR)), None);
    }
}
