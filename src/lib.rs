//! # Introduction
//!
//! corefront is the front end for Core, a small C-like teaching language. It
//! scans source text into a token stream and parses that stream into a
//! concrete parse tree, recovering from errors so that a single run reports
//! every damaged declaration or statement it can find.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Parse tree → Reports
//! ```
//!
//! 1. [`parser::lexer`] turns characters into [`parser::token::Token`]s.
//!    Lexical faults do not stop scanning; they become error tokens.
//! 2. [`parser::parse`] builds a [`parser::tree::ParseTreeNode`] by recursive
//!    descent, with panic-mode recovery at declaration and block-item
//!    boundaries.
//! 3. [`report`] renders the symbol table, the parse tree and diagnostics.
//!
//! [`analyze`] runs the first two stages in one call.

pub mod parser;
pub mod report;

use parser::lexer::{LexError, Lexer};
use parser::parse::{Parser, SyntaxAnalysis};
use parser::token::Token;

/// Everything one front-end run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Full token stream, error tokens included, ending with the end marker
    pub tokens: Vec<Token>,
    pub lex_errors: Vec<LexError>,
    pub syntax: SyntaxAnalysis,
}

impl Analysis {
    /// No lexical fault and a successful parse
    pub fn is_clean(&self) -> bool {
        self.lex_errors.is_empty() && self.syntax.is_success()
    }
}

/// Scan and parse `source`.
pub fn analyze(source: &str) -> Analysis {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize();
    let lex_errors = lexer.into_diagnostics();
    let syntax = Parser::from_tokens(tokens.clone()).parse();

    Analysis {
        tokens,
        lex_errors,
        syntax,
    }
}
