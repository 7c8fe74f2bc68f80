//! Token definitions shared by the lexer, the parser and the renderers
//!
//! A [`Token`] is an immutable `{kind, lexeme, line, column}` record. The
//! [`TokenKind`] discriminants double as the numeric codes printed in the
//! symbol table, so the variant order is part of the output format.

use std::fmt;

/// Source location information for error reporting (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Every token kind the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Single-character punctuation
    LeftParenthesis,
    RightParenthesis,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Multiply,
    Exponent,
    Ampersand,

    // Operators
    Plus,
    Minus,
    Divide,
    Equal,    // ==
    NotEqual, // !=
    Assign,   // =
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    Or,  // ||
    And, // &&
    Modulo,

    // Identifiers and literals
    Identifier,
    String,
    IntegerLiteral,
    FloatLiteral,
    CharacterLiteral,

    // Keywords
    CharKw,
    IntKw,
    FloatKw,
    BoolKw,
    IfKw,
    ElseKw,
    ForKw,
    WhileKw,
    ReturnKw,
    PrintfKw,
    ScanfKw,
    TrueKw,
    FalseKw,
    VoidKw,

    // Lexical errors
    ErrorInvalidCharacter,
    ErrorInvalidIdentifier,

    Eof,
}

impl TokenKind {
    /// Numeric kind code, stable across releases.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Symbolic name as it appears in reports and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParenthesis => "LEFT_PARENTHESIS",
            TokenKind::RightParenthesis => "RIGHT_PARENTHESIS",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Exponent => "EXPONENT",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Not => "NOT",
            TokenKind::Or => "OR",
            TokenKind::And => "AND",
            TokenKind::Modulo => "MODULO",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
            TokenKind::FloatLiteral => "FLOAT_LITERAL",
            TokenKind::CharacterLiteral => "CHARACTER_LITERAL",
            TokenKind::CharKw => "CHAR_KW",
            TokenKind::IntKw => "INT_KW",
            TokenKind::FloatKw => "FLOAT_KW",
            TokenKind::BoolKw => "BOOL_KW",
            TokenKind::IfKw => "IF_KW",
            TokenKind::ElseKw => "ELSE_KW",
            TokenKind::ForKw => "FOR_KW",
            TokenKind::WhileKw => "WHILE_KW",
            TokenKind::ReturnKw => "RETURN_KW",
            TokenKind::PrintfKw => "PRINTF_KW",
            TokenKind::ScanfKw => "SCANF_KW",
            TokenKind::TrueKw => "TRUE_KW",
            TokenKind::FalseKw => "FALSE_KW",
            TokenKind::VoidKw => "VOID_KW",
            TokenKind::ErrorInvalidCharacter => "ERROR_INVALID_CHARACTER",
            TokenKind::ErrorInvalidIdentifier => "ERROR_INVALID_IDENTIFIER",
            TokenKind::Eof => "TOKEN_EOF",
        }
    }

    pub fn is_keyword(self) -> bool {
        (TokenKind::CharKw.code()..=TokenKind::VoidKw.code()).contains(&self.code())
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            TokenKind::ErrorInvalidCharacter | TokenKind::ErrorInvalidIdentifier
        )
    }

    /// `int`, `float`, `char` or `bool`
    pub fn is_data_type(self) -> bool {
        matches!(
            self,
            TokenKind::IntKw | TokenKind::FloatKw | TokenKind::CharKw | TokenKind::BoolKw
        )
    }

    /// Kinds accepted by the `Const` production.
    pub fn is_constant(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharacterLiteral
                | TokenKind::TrueKw
                | TokenKind::FalseKw
        )
    }

    /// Kinds whose lexeme is a resolved literal value. Strings are
    /// literals but not constants; `true` and `false` are the reverse.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharacterLiteral
                | TokenKind::String
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Resolved text: escapes applied, numeric separators stripped.
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }

    /// Render the token back as source text.
    ///
    /// String and character literals are re-quoted with their escapes restored,
    /// so lexing the result yields an equivalent token.
    pub fn to_source(&self) -> String {
        match self.kind {
            TokenKind::String => {
                let mut out = String::with_capacity(self.lexeme.len() + 2);
                out.push('"');
                for ch in self.lexeme.chars() {
                    match ch {
                        '"' => out.push_str("\\\""),
                        other => push_escaped(&mut out, other),
                    }
                }
                out.push('"');
                out
            }
            TokenKind::CharacterLiteral => {
                let mut out = String::from("'");
                for ch in self.lexeme.chars() {
                    match ch {
                        '\'' => out.push_str("\\'"),
                        other => push_escaped(&mut out, other),
                    }
                }
                out.push('\'');
                out
            }
            _ => self.lexeme.clone(),
        }
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        '\r' => out.push_str("\\r"),
        '\\' => out.push_str("\\\\"),
        other => out.push(other),
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::String => write!(f, "string literal \"{}\"", self.lexeme.escape_debug()),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            kind => write!(f, "{} '{}'", kind, self.lexeme.escape_debug()),
        }
    }
}
