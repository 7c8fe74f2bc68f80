//! Lexer (tokenizer) for Core source code
//!
//! A single-pass character automaton that converts source text into a flat
//! [`Token`] stream consumed by the parser. The automaton only needs the
//! current character, one character of lookahead and the line/column
//! counters, so it runs over any [`CharSource`].
//!
//! Lexing never fails: every fault becomes one error-kind token inline in the
//! stream, the details are kept in [`Lexer::diagnostics`], and scanning resumes
//! right after the offending text. The returned stream always ends with exactly
//! one [`TokenKind::Eof`].

use super::constants::{keyword, DIGITS_PER_GROUP, MAX_IDENTIFIER_LEN};
use super::token::{SourceLocation, Token, TokenKind};
use std::fmt;

/// Pull-based character input for the lexer.
pub trait CharSource {
    /// Pull the next character, or `None` at end of input.
    fn next_char(&mut self) -> Option<char>;
}

impl<I: Iterator<Item = char>> CharSource for I {
    fn next_char(&mut self) -> Option<char> {
        self.next()
    }
}

/// Classification of lexical faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    InvalidCharacter,
    InvalidEscape,
    UnterminatedString,
    UnterminatedCharacter,
    /// Empty or multi-character character literal
    MalformedCharacter,
    InvalidNumericGrouping,
    IdentifierTooLong,
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for Core source code
pub struct Lexer<S> {
    source: S,
    current: Option<char>,
    /// Character pulled ahead of `current` by [`Lexer::peek`]
    lookahead: Option<Option<char>>,
    line: usize,
    column: usize,
    diagnostics: Vec<LexError>,
}

impl<'a> Lexer<std::str::Chars<'a>> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &'a str) -> Self {
        Self::from_source(input.chars())
    }
}

impl<S: CharSource> Lexer<S> {
    /// Create a lexer over an arbitrary character source.
    pub fn from_source(source: S) -> Self {
        let mut lexer = Self {
            source,
            current: None,
            lookahead: None,
            line: 1,
            column: 0,
            diagnostics: Vec::new(),
        };
        lexer.advance();
        lexer
    }

    /// Faults found so far, in source order.
    pub fn diagnostics(&self) -> &[LexError] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<LexError> {
        self.diagnostics
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            let Some(ch) = self.current else {
                break;
            };
            tokens.push(self.next_token(ch));
        }

        tokens.push(Token::new(
            TokenKind::Eof,
            "EOF",
            SourceLocation::new(self.line, self.column + 1),
        ));
        tokens
    }

    /// Scan one token starting at `ch`
    fn next_token(&mut self, ch: char) -> Token {
        let loc = self.current_location();

        if ch.is_ascii_digit() || (ch == '.' && self.peek().is_some_and(|c| c.is_ascii_digit())) {
            self.number_literal(loc)
        } else if ch.is_alphabetic() || ch == '_' {
            self.identifier_or_keyword(loc)
        } else if ch == '"' {
            self.string_literal(loc)
        } else if ch == '\'' {
            self.char_literal(loc)
        } else {
            self.symbol(ch, loc)
        }
    }

    /// Parse numeric literal, with optional grouping separators
    fn number_literal(&mut self, loc: SourceLocation) -> Token {
        let mut digits = String::new();
        let mut raw = String::new();
        let mut has_point = false;

        while let Some(ch) = self.current {
            match ch {
                '0'..='9' => {
                    digits.push(ch);
                    raw.push(ch);
                    self.advance();
                }
                // A second point ends the numeral
                '.' if !has_point => {
                    has_point = true;
                    digits.push(ch);
                    raw.push(ch);
                    self.advance();
                }
                '\'' | '`' => {
                    let fault = self.current_location();
                    raw.push(ch);
                    self.advance();

                    let mut group = 0;
                    while group < DIGITS_PER_GROUP {
                        match self.current {
                            Some(d) if d.is_ascii_digit() => {
                                digits.push(d);
                                raw.push(d);
                                self.advance();
                                group += 1;
                            }
                            _ => break,
                        }
                    }

                    let overlong = self.current.is_some_and(|c| c.is_ascii_digit());
                    if group != DIGITS_PER_GROUP || overlong {
                        return self.malformed_number(raw, fault);
                    }
                }
                _ => break,
            }
        }

        if digits.starts_with('.') {
            digits.insert(0, '0');
        }
        if digits.ends_with('.') {
            digits.push('0');
        }

        let kind = if has_point {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntegerLiteral
        };
        Token::new(kind, digits, loc)
    }

    /// Swallow the rest of a numeral whose grouping separator is malformed
    fn malformed_number(&mut self, mut raw: String, fault: SourceLocation) -> Token {
        while let Some(ch) = self.current {
            if ch.is_ascii_digit() || matches!(ch, '.' | '\'' | '`') {
                raw.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        self.error_token(
            LexErrorKind::InvalidNumericGrouping,
            format!(
                "Invalid noise separator in '{}': each separator must be followed by exactly {} digits",
                raw, DIGITS_PER_GROUP
            ),
            raw,
            fault,
        )
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let mut ident = String::new();

        while let Some(ch) = self.current {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if ident.chars().count() > MAX_IDENTIFIER_LEN {
            return self.error_token(
                LexErrorKind::IdentifierTooLong,
                format!(
                    "Invalid identifier: exceeds maximum length of {} characters",
                    MAX_IDENTIFIER_LEN
                ),
                ident,
                loc,
            );
        }

        let kind = keyword(&ident).unwrap_or(TokenKind::Identifier);
        Token::new(kind, ident, loc)
    }

    /// Parse string literal
    fn string_literal(&mut self, loc: SourceLocation) -> Token {
        let mut raw = String::from('"');
        let mut value = String::new();
        let mut bad_escape: Option<(char, SourceLocation)> = None;
        self.advance(); // opening quote

        loop {
            match self.current {
                None | Some('\n') => {
                    return self.error_token(
                        LexErrorKind::UnterminatedString,
                        "Unterminated string".to_string(),
                        raw,
                        loc,
                    );
                }
                Some('"') => {
                    raw.push('"');
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_loc = self.current_location();
                    raw.push('\\');
                    self.advance();

                    match self.current {
                        // Leave the line break for the unterminated check
                        None | Some('\n') => {}
                        Some(escaped) => {
                            raw.push(escaped);
                            self.advance();
                            match unescape(escaped, '"') {
                                Some(resolved) => value.push(resolved),
                                None => {
                                    bad_escape.get_or_insert((escaped, escape_loc));
                                }
                            }
                        }
                    }
                }
                Some(ch) => {
                    raw.push(ch);
                    value.push(ch);
                    self.advance();
                }
            }
        }

        if let Some((escaped, escape_loc)) = bad_escape {
            self.diagnostics.push(LexError {
                kind: LexErrorKind::InvalidEscape,
                message: format!("Invalid escape sequence: \\{}", escaped),
                location: escape_loc,
            });
            return Token::new(TokenKind::ErrorInvalidCharacter, raw, loc);
        }

        Token::new(TokenKind::String, value, loc)
    }

    /// Parse character literal
    fn char_literal(&mut self, loc: SourceLocation) -> Token {
        let mut raw = String::from('\'');
        let mut value = String::new();
        let mut bad_escape: Option<(char, SourceLocation)> = None;
        self.advance(); // opening quote

        loop {
            match self.current {
                None | Some('\n') => {
                    return self.error_token(
                        LexErrorKind::UnterminatedCharacter,
                        "Unterminated character literal".to_string(),
                        raw,
                        loc,
                    );
                }
                Some('\'') => {
                    raw.push('\'');
                    self.advance();
                    break;
                }
                Some('\\') => {
                    let escape_loc = self.current_location();
                    raw.push('\\');
                    self.advance();

                    match self.current {
                        None | Some('\n') => {}
                        Some(escaped) => {
                            raw.push(escaped);
                            self.advance();
                            match unescape(escaped, '\'') {
                                Some(resolved) => value.push(resolved),
                                None => {
                                    bad_escape.get_or_insert((escaped, escape_loc));
                                    value.push(escaped);
                                }
                            }
                        }
                    }
                }
                Some(ch) => {
                    raw.push(ch);
                    value.push(ch);
                    self.advance();
                }
            }
        }

        if let Some((escaped, escape_loc)) = bad_escape {
            self.diagnostics.push(LexError {
                kind: LexErrorKind::InvalidEscape,
                message: format!("Invalid escape sequence in character literal: \\{}", escaped),
                location: escape_loc,
            });
            return Token::new(TokenKind::ErrorInvalidCharacter, raw, loc);
        }

        match value.chars().count() {
            1 => Token::new(TokenKind::CharacterLiteral, value, loc),
            0 => self.error_token(
                LexErrorKind::MalformedCharacter,
                "Invalid character literal: empty".to_string(),
                raw,
                loc,
            ),
            _ => self.error_token(
                LexErrorKind::MalformedCharacter,
                "Invalid character literal: more than one character".to_string(),
                raw,
                loc,
            ),
        }
    }

    /// Parse punctuation and operators, longest match first
    fn symbol(&mut self, ch: char, loc: SourceLocation) -> Token {
        let (kind, len) = match (ch, self.peek()) {
            ('=', Some('=')) => (TokenKind::Equal, 2),
            ('=', _) => (TokenKind::Assign, 1),
            ('!', Some('=')) => (TokenKind::NotEqual, 2),
            ('!', _) => (TokenKind::Not, 1),
            ('<', Some('=')) => (TokenKind::LessEqual, 2),
            ('<', _) => (TokenKind::Less, 1),
            ('>', Some('=')) => (TokenKind::GreaterEqual, 2),
            ('>', _) => (TokenKind::Greater, 1),
            ('&', Some('&')) => (TokenKind::And, 2),
            ('&', _) => (TokenKind::Ampersand, 1),
            ('|', Some('|')) => (TokenKind::Or, 2),
            ('(', _) => (TokenKind::LeftParenthesis, 1),
            (')', _) => (TokenKind::RightParenthesis, 1),
            ('[', _) => (TokenKind::LeftBracket, 1),
            (']', _) => (TokenKind::RightBracket, 1),
            ('{', _) => (TokenKind::LeftBrace, 1),
            ('}', _) => (TokenKind::RightBrace, 1),
            (',', _) => (TokenKind::Comma, 1),
            (';', _) => (TokenKind::Semicolon, 1),
            ('+', _) => (TokenKind::Plus, 1),
            ('-', _) => (TokenKind::Minus, 1),
            ('*', _) => (TokenKind::Multiply, 1),
            ('/', _) => (TokenKind::Divide, 1),
            ('^', _) => (TokenKind::Exponent, 1),
            ('%', _) => (TokenKind::Modulo, 1),
            _ => {
                self.advance();
                return self.error_token(
                    LexErrorKind::InvalidCharacter,
                    format!("Invalid character: '{}'", ch.escape_debug()),
                    ch.to_string(),
                    loc,
                );
            }
        };

        let mut lexeme = String::with_capacity(len);
        for _ in 0..len {
            if let Some(c) = self.current {
                lexeme.push(c);
            }
            self.advance();
        }
        Token::new(kind, lexeme, loc)
    }

    /// Record a fault and build the error token that stands in for it
    fn error_token(
        &mut self,
        kind: LexErrorKind,
        message: String,
        raw: String,
        location: SourceLocation,
    ) -> Token {
        let token_kind = match kind {
            LexErrorKind::IdentifierTooLong => TokenKind::ErrorInvalidIdentifier,
            _ => TokenKind::ErrorInvalidCharacter,
        };
        self.diagnostics.push(LexError {
            kind,
            message,
            location,
        });
        Token::new(token_kind, raw, location)
    }

    /// Skip whitespace and `//` comments
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(ch) = self.current {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '/' && self.peek() == Some('/') {
                while !matches!(self.current, None | Some('\n')) {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Peek at the character after `current` without consuming it
    fn peek(&mut self) -> Option<char> {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.source.next_char());
        }
        self.lookahead.flatten()
    }

    /// Advance to next character
    fn advance(&mut self) {
        let next = match self.lookahead.take() {
            Some(pulled) => pulled,
            None => self.source.next_char(),
        };

        match next {
            Some('\n') => {
                self.line += 1;
                self.column = 0;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        self.current = next;
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Resolve the character after a backslash; `quote` is the enclosing delimiter.
fn unescape(escaped: char, quote: char) -> Option<char> {
    match escaped {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\\' => Some('\\'),
        c if c == quote => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("int main() { return 0; }").tokenize();

        assert_eq!(tokens[0].kind, TokenKind::IntKw);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "main");
        assert_eq!(tokens[2].kind, TokenKind::LeftParenthesis);
        assert_eq!(tokens[3].kind, TokenKind::RightParenthesis);
        assert_eq!(tokens[4].kind, TokenKind::LeftBrace);
        assert_eq!(tokens[5].kind, TokenKind::ReturnKw);
        assert_eq!(tokens[6].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[7].kind, TokenKind::Semicolon);
        assert_eq!(tokens[8].kind, TokenKind::RightBrace);
        assert_eq!(tokens[9].kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("== != <= >= && || = ! < > & / ^ %"),
            vec![
                TokenKind::Equal,
                TokenKind::NotEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Assign,
                TokenKind::Not,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Ampersand,
                TokenKind::Divide,
                TokenKind::Exponent,
                TokenKind::Modulo,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = Lexer::new("int x; // comment\nint y;").tokenize();

        assert_eq!(tokens[0].kind, TokenKind::IntKw);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
        assert_eq!(tokens[3].kind, TokenKind::IntKw);
        assert_eq!(tokens[3].location, SourceLocation::new(2, 1));
        assert_eq!(tokens[4].lexeme, "y");
    }

    #[test]
    fn test_single_slash_is_divide() {
        assert_eq!(
            kinds("a / b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Divide,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = Lexer::new("int x;\n  x = 1;").tokenize();

        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[5].location, SourceLocation::new(2, 7));
    }

    #[test]
    fn test_string_literal() {
        let tokens = Lexer::new(r#""hello\nworld""#).tokenize();

        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "hello\nworld");
    }

    #[test]
    fn test_string_with_bad_escape_is_one_error_token() {
        let mut lexer = Lexer::new(r#""a\qb" x"#);
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].kind, TokenKind::ErrorInvalidCharacter);
        assert_eq!(tokens[0].lexeme, r#""a\qb""#);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(lexer.diagnostics()[0].kind, LexErrorKind::InvalidEscape);
        assert_eq!(lexer.diagnostics()[0].location, SourceLocation::new(1, 3));
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let mut lexer = Lexer::new("\"abc\nint");
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].kind, TokenKind::ErrorInvalidCharacter);
        assert_eq!(tokens[1].kind, TokenKind::IntKw);
        assert_eq!(lexer.diagnostics()[0].kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn test_char_literals() {
        let tokens = Lexer::new(r"'a' '\n' '\''").tokenize();

        assert_eq!(tokens[0].kind, TokenKind::CharacterLiteral);
        assert_eq!(tokens[0].lexeme, "a");
        assert_eq!(tokens[1].lexeme, "\n");
        assert_eq!(tokens[2].lexeme, "'");
    }

    #[test]
    fn test_malformed_char_literals() {
        let mut lexer = Lexer::new("'' 'ab' 'c");
        let tokens = lexer.tokenize();

        assert_eq!(tokens.len(), 4);
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::ErrorInvalidCharacter));
        let errs: Vec<_> = lexer.diagnostics().iter().map(|e| e.kind).collect();
        assert_eq!(
            errs,
            vec![
                LexErrorKind::MalformedCharacter,
                LexErrorKind::MalformedCharacter,
                LexErrorKind::UnterminatedCharacter,
            ]
        );
    }

    #[test]
    fn test_grouping_separators() {
        let tokens = Lexer::new("1'000'000 2`500.25").tokenize();

        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[0].lexeme, "1000000");
        assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[1].lexeme, "2500.25");
    }

    #[test]
    fn test_malformed_grouping_recovers() {
        let mut lexer = Lexer::new("x = 1'00'0 + 2;");
        let tokens = lexer.tokenize();

        assert_eq!(tokens[2].kind, TokenKind::ErrorInvalidCharacter);
        assert_eq!(tokens[2].lexeme, "1'00'0");
        // Error token sits on the offending separator
        assert_eq!(tokens[2].location, SourceLocation::new(1, 6));
        assert_eq!(tokens[3].kind, TokenKind::Plus);
        assert_eq!(tokens[4].lexeme, "2");
        assert_eq!(lexer.diagnostics().len(), 1);
        assert_eq!(
            lexer.diagnostics()[0].kind,
            LexErrorKind::InvalidNumericGrouping
        );
    }

    #[test]
    fn test_second_point_ends_numeral() {
        let tokens = Lexer::new("1.2.3").tokenize();

        assert_eq!(tokens[0].lexeme, "1.2");
        assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[1].lexeme, "0.3");
    }

    #[test]
    fn test_identifier_length_limit() {
        let ok = "a".repeat(MAX_IDENTIFIER_LEN);
        let long = "b".repeat(MAX_IDENTIFIER_LEN + 1);
        let source = format!("{} {};", ok, long);
        let mut lexer = Lexer::new(&source);
        let tokens = lexer.tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].kind, TokenKind::ErrorInvalidIdentifier);
        assert_eq!(tokens[1].lexeme, long);
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
        assert_eq!(lexer.diagnostics()[0].kind, LexErrorKind::IdentifierTooLong);
    }

    #[test]
    fn test_non_ascii_letters_form_identifiers() {
        let tokens = Lexer::new("é naïve_1 Ωmega").tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "é");
        assert_eq!(tokens[1].lexeme, "naïve_1");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].location, SourceLocation::new(1, 11));
    }

    #[test]
    fn test_identifier_limit_counts_characters() {
        let ok = "é".repeat(MAX_IDENTIFIER_LEN);
        let long = "é".repeat(MAX_IDENTIFIER_LEN + 1);

        assert_eq!(Lexer::new(&ok).tokenize()[0].kind, TokenKind::Identifier);
        assert_eq!(
            Lexer::new(&long).tokenize()[0].kind,
            TokenKind::ErrorInvalidIdentifier
        );
    }

    #[test]
    fn test_invalid_characters() {
        let mut lexer = Lexer::new("a | b @ . c");
        let tokens = lexer.tokenize();

        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Identifier,
                TokenKind::ErrorInvalidCharacter,
                TokenKind::Identifier,
                TokenKind::ErrorInvalidCharacter,
                TokenKind::ErrorInvalidCharacter,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(lexer.diagnostics().len(), 3);
    }

    #[test]
    fn test_lexes_from_any_char_source() {
        let source = "while (x) {}".chars().collect::<Vec<_>>().into_iter();
        let tokens = Lexer::from_source(source).tokenize();

        assert_eq!(tokens[0].kind, TokenKind::WhileKw);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_empty_input_yields_only_eof() {
        let tokens = Lexer::new("  // nothing here\n").tokenize();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].lexeme, "EOF");
    }
}
