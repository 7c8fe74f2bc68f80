// Language limits and fixed tables for the Core front end

use super::token::TokenKind;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Identifiers longer than this are rejected by the lexer
pub const MAX_IDENTIFIER_LEN: usize = 31;

/// Digits required after every numeric grouping separator
pub const DIGITS_PER_GROUP: usize = 3;

/// Deepest nesting of expressions, statements and blocks the parser accepts
pub const MAX_NESTING_DEPTH: usize = 128;

/// Source file extension accepted by the command-line driver
pub const SOURCE_EXTENSION: &str = "core";

/// Token kinds the parser resumes at after a syntax error
pub const SYNC_TOKENS: [TokenKind; 9] = [
    TokenKind::Semicolon,
    TokenKind::IntKw,
    TokenKind::FloatKw,
    TokenKind::CharKw,
    TokenKind::BoolKw,
    TokenKind::ReturnKw,
    TokenKind::WhileKw,
    TokenKind::ForKw,
    TokenKind::LeftBrace,
];

/// Look up a keyword, case-insensitively.
pub fn keyword(ident: &str) -> Option<TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    let table = KEYWORDS.get_or_init(|| {
        [
            ("char", TokenKind::CharKw),
            ("int", TokenKind::IntKw),
            ("float", TokenKind::FloatKw),
            ("bool", TokenKind::BoolKw),
            ("if", TokenKind::IfKw),
            ("else", TokenKind::ElseKw),
            ("for", TokenKind::ForKw),
            ("while", TokenKind::WhileKw),
            ("return", TokenKind::ReturnKw),
            ("printf", TokenKind::PrintfKw),
            ("scanf", TokenKind::ScanfKw),
            ("true", TokenKind::TrueKw),
            ("false", TokenKind::FalseKw),
            ("void", TokenKind::VoidKw),
        ]
        .into_iter()
        .collect()
    });

    // Longest keyword is six letters; skip the allocation for anything longer
    if ident.len() > 6 {
        return None;
    }
    table.get(ident.to_ascii_lowercase().as_str()).copied()
}
