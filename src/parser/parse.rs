//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, the panic-mode recovery protocol, helper methods, and
//! the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, resynchronization
//! - `declarations`: Program, declarations, parameter lists, data types
//! - `statements`: blocks and statements (if, while, for, scanf, printf, ...)
//! - `expressions`: assignment and the operator-precedence chain
//!
//! # Error recovery
//!
//! A production that meets an unexpected token returns [`Abort::Recoverable`]
//! and sets the panic flag. The error travels up through `?` until the
//! nearest declaration-list or block-item-list loop, which records the
//! diagnostic and calls [`Parser::synchronize`]: skip at least one token, then
//! stop at the next token in [`SYNC_TOKENS`]. Reaching one clears the panic
//! flag. [`Abort::Fatal`] is only caught by the Program loop and ends the
//! parse. An unclosed subscript is fatal, and so is nesting deeper than
//! [`MAX_NESTING_DEPTH`].
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::constants::{MAX_NESTING_DEPTH, SYNC_TOKENS};
use crate::parser::lexer::Lexer;
use crate::parser::token::{SourceLocation, Token, TokenKind};
use crate::parser::tree::ParseTreeNode;
use std::fmt;

/// Classification of syntax errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    TokenMismatch,
    MissingDataType,
    MissingConstant,
    /// Token that cannot start a factor
    UnexpectedFactor,
    MalformedSubscript,
    /// Nesting beyond [`MAX_NESTING_DEPTH`]
    NestingTooDeep,
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    pub expected: Option<TokenKind>,
    pub found: TokenKind,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Why a descent call stopped early
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abort {
    /// Caught at the nearest declaration or block-item loop
    Recoverable(ParseError),
    /// Unwinds the whole parse
    Fatal(ParseError),
}

pub(crate) type ParseResult<T> = Result<T, Abort>;

/// Overall parse failure: at least one syntax error was reported
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub diagnostics: Vec<ParseError>,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parsing failed with {} error(s)", self.diagnostics.len())?;
        if let Some(first) = self.diagnostics.first() {
            write!(f, "; first: {}", first)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseFailure {}

/// Result of one parse: the (possibly partial) tree, every diagnostic, and the
/// panic flag as it stood at end of input.
#[derive(Debug, Clone)]
pub struct SyntaxAnalysis {
    tree: ParseTreeNode,
    diagnostics: Vec<ParseError>,
    panic: bool,
}

impl SyntaxAnalysis {
    /// The tree, unless parsing ended while still in panic mode.
    ///
    /// A tree recovered after resynchronization is returned even when
    /// diagnostics were reported; use [`SyntaxAnalysis::is_success`] to decide
    /// whether it may be rendered.
    pub fn tree(&self) -> Option<&ParseTreeNode> {
        (!self.panic).then_some(&self.tree)
    }

    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    pub fn panicked(&self) -> bool {
        self.panic
    }

    pub fn is_success(&self) -> bool {
        !self.panic && self.diagnostics.is_empty()
    }

    pub fn into_result(self) -> Result<ParseTreeNode, ParseFailure> {
        if self.is_success() {
            Ok(self.tree)
        } else {
            Err(ParseFailure {
                diagnostics: self.diagnostics,
            })
        }
    }
}

/// Recursive descent parser for Core
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) panic: bool,
    pub(crate) diagnostics: Vec<ParseError>,
    /// Productions currently open through [`Parser::nested`]
    depth: usize,
}

impl Parser {
    /// Lex `source` and prepare to parse it. Lexical faults reach the parser
    /// as error tokens.
    pub fn new(source: &str) -> Self {
        Self::from_tokens(Lexer::new(source).tokenize())
    }

    /// Parse an existing token sequence. An end marker is appended if the
    /// sequence does not already end with one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens
                .last()
                .map(|t| SourceLocation::new(t.location.line, t.location.column + 1))
                .unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "EOF", location));
        }

        Self {
            tokens,
            position: 0,
            panic: false,
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    /// Parse the whole token sequence.
    pub fn parse(&mut self) -> SyntaxAnalysis {
        let tree = self.parse_program_node();
        SyntaxAnalysis {
            tree,
            diagnostics: std::mem::take(&mut self.diagnostics),
            panic: self.panic,
        }
    }

    /// Parse the entire program, yielding the tree only if no syntax error
    /// was reported.
    pub fn parse_program(&mut self) -> Result<ParseTreeNode, ParseFailure> {
        self.parse().into_result()
    }

    /// Whether the parser is currently in panic mode
    pub fn in_panic(&self) -> bool {
        self.panic
    }

    // ===== Recovery =====

    /// Record the diagnostic carried by a caught abort.
    pub(crate) fn record(&mut self, err: ParseError) {
        self.diagnostics.push(err);
    }

    /// Skip at least one token, then stop at the next synchronizing token.
    /// Clears the panic flag only if one is reached before end of input.
    pub(crate) fn synchronize(&mut self) {
        self.panic = true;
        self.advance();

        while !self.is_at_end() {
            if SYNC_TOKENS.contains(&self.peek_kind()) {
                self.panic = false;
                return;
            }
            self.advance();
        }
    }

    // ===== Helper methods =====

    /// Run a recursive production one level deeper. Past
    /// [`MAX_NESTING_DEPTH`] the whole parse is abandoned.
    pub(crate) fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            let message = format!(
                "Nesting exceeds the maximum depth of {}",
                MAX_NESTING_DEPTH
            );
            return Err(self.fatal(SyntaxErrorKind::NestingTooDeep, message));
        }

        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.position.min(last)]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the token `n` places ahead of the cursor
    pub(crate) fn peek_ahead(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.position + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token. The end marker is never consumed.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Consume a token of `kind` as a leaf named after the kind.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<ParseTreeNode> {
        self.expect_labeled(kind, kind.name())
    }

    /// Consume a token of `kind` as a leaf with the given label.
    pub(crate) fn expect_labeled(
        &mut self,
        kind: TokenKind,
        label: &'static str,
    ) -> ParseResult<ParseTreeNode> {
        if self.check(kind) {
            Ok(ParseTreeNode::leaf(label, self.advance()))
        } else {
            Err(self.error(
                SyntaxErrorKind::TokenMismatch,
                format!(
                    "Expected token {} but found {}",
                    kind,
                    self.peek_kind()
                ),
                Some(kind),
            ))
        }
    }

    /// Consume the current token, whatever it is, as a kind-named leaf.
    pub(crate) fn take(&mut self) -> ParseTreeNode {
        ParseTreeNode::terminal(self.advance())
    }

    /// Enter panic mode and build the abort for an error at the current token.
    pub(crate) fn error(
        &mut self,
        kind: SyntaxErrorKind,
        message: String,
        expected: Option<TokenKind>,
    ) -> Abort {
        self.panic = true;
        Abort::Recoverable(ParseError {
            kind,
            message,
            expected,
            found: self.peek_kind(),
            location: self.current_location(),
        })
    }

    /// Like [`Parser::error`], but the abort unwinds the whole parse.
    pub(crate) fn fatal(&mut self, kind: SyntaxErrorKind, message: String) -> Abort {
        match self.error(kind, message, None) {
            Abort::Recoverable(err) | Abort::Fatal(err) => Abort::Fatal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tree::Production;

    #[test]
    fn test_parse_simple_function() {
        let mut parser = Parser::new("int main(void) { return 0; }");
        let program = parser.parse_program().unwrap();

        assert_eq!(program.production(), Some(Production::Program));
        let functions = program.find_all(Production::FunctionDeclaration);
        assert_eq!(functions.len(), 1);
        let block = functions[0].child(Production::Block).unwrap();
        assert_eq!(block.find_all(Production::ReturnStatement).len(), 1);
    }

    #[test]
    fn test_parse_expression() {
        let mut parser = Parser::new("int x = 1 + 2 * 3;");
        let program = parser.parse_program().unwrap();

        assert_eq!(program.find_all(Production::Additive).len(), 1);
        assert_eq!(program.find_all(Production::Multiplicative).len(), 1);
    }

    #[test]
    fn test_synchronize_clears_panic_at_sync_token() {
        let mut parser = Parser::new("x y z ; int");
        parser.panic = true;
        parser.synchronize();

        assert!(!parser.in_panic());
        assert_eq!(parser.peek_kind(), TokenKind::Semicolon);
    }

    #[test]
    fn test_synchronize_always_skips_one_token() {
        let mut parser = Parser::new("; ; x");
        parser.synchronize();

        assert_eq!(parser.position, 1);
        assert!(!parser.in_panic());
    }

    #[test]
    fn test_synchronize_keeps_panic_at_end_of_input() {
        let mut parser = Parser::new("a b c");
        parser.synchronize();

        assert!(parser.is_at_end());
        assert!(parser.in_panic());
    }

    #[test]
    fn test_nesting_limit_is_fatal() {
        let depth = MAX_NESTING_DEPTH + 1;
        let source = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));
        let analysis = Parser::new(&source).parse();

        assert_eq!(analysis.diagnostics().len(), 1);
        assert_eq!(
            analysis.diagnostics()[0].kind,
            SyntaxErrorKind::NestingTooDeep
        );
        assert!(analysis.tree().is_none());
    }

    #[test]
    fn test_nesting_below_limit_parses() {
        let depth = MAX_NESTING_DEPTH / 2;
        let source = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));

        assert!(Parser::new(&source).parse_program().is_ok());
    }

    #[test]
    fn test_from_tokens_appends_end_marker() {
        let tokens = vec![Token::new(
            TokenKind::Semicolon,
            ";",
            SourceLocation::new(1, 1),
        )];
        let parser = Parser::from_tokens(tokens);

        assert_eq!(parser.tokens.len(), 2);
        assert_eq!(parser.tokens[1].kind, TokenKind::Eof);
    }
}
