// Token stream rendered as a fixed-width table

use crate::parser::token::Token;
use std::fmt;
use std::io::{self, Write};

/// Width of the rule line framing the table
pub const RULE_WIDTH: usize = 128;

const HEADER: &str =
    "TOKEN CODE      | TOKEN                    | LINE #          | COLUMN #        | LEXEME";

/// One row per token, framed above and below by a rule line.
pub struct SymbolTable<'a> {
    tokens: &'a [Token],
}

impl<'a> SymbolTable<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for SymbolTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "_".repeat(RULE_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "{}", HEADER)?;
        writeln!(f, "{}", rule)?;
        for token in self.tokens {
            writeln!(
                f,
                "{:<15} | {:<24} | {:<15} | {:<15} | {}",
                token.kind.code(),
                token.kind.name(),
                token.line(),
                token.column(),
                printable(&token.lexeme)
            )?;
        }
        writeln!(f, "{}", rule)
    }
}

/// Show control characters as escapes so each token stays on one row.
fn printable(lexeme: &str) -> String {
    let mut out = String::with_capacity(lexeme.len());
    for ch in lexeme.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
    out
}
