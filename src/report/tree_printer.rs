//! Parse tree rendering
//!
//! Internal nodes print as `Label(`, then their children one per line, one
//! indentation level deeper and separated by commas, then `)` back at the
//! node's own level. A node without children prints as `Label()`.
//!
//! Leaves print as:
//! - `STRING: text` for string literals (no quotes)
//! - the bare lexeme for keywords and the `int`, `float`, `char` and `bool`
//!   type-name leaves
//! - `KIND: "lexeme"` for everything else
//!
//! Call arguments and the operand of an expression statement sit directly
//! under `Argument_List` and `Expression_Statement`. They are not wrapped in
//! an `Exp` node, so `f(a + 1)` renders `Argument_List(` followed by
//! `Additive(` one level deeper.

use crate::parser::token::{Token, TokenKind};
use crate::parser::tree::ParseTreeNode;
use std::fmt::{self, Write as _};
use std::io::{self, Write};

const INDENT: &str = "  ";

const TYPE_NAME_LABELS: [&str; 4] = ["int", "float", "char", "bool"];

pub struct TreePrinter<'a> {
    root: &'a ParseTreeNode,
}

impl<'a> TreePrinter<'a> {
    pub fn new(root: &'a ParseTreeNode) -> Self {
        Self { root }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self)
    }

    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        node: &ParseTreeNode,
        depth: usize,
    ) -> fmt::Result {
        write_indent(f, depth)?;

        match node {
            ParseTreeNode::Leaf { label, token } => write_leaf(f, label, token),
            ParseTreeNode::Branch { children, .. } => {
                write!(f, "{}(", node.label())?;
                if !children.is_empty() {
                    f.write_char('\n')?;
                    for (i, child) in children.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",\n")?;
                        }
                        self.write_node(f, child, depth + 1)?;
                    }
                    f.write_char('\n')?;
                    write_indent(f, depth)?;
                }
                f.write_char(')')
            }
        }
    }
}

impl fmt::Display for TreePrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root, 0)
    }
}

fn write_leaf(f: &mut fmt::Formatter<'_>, label: &str, token: &Token) -> fmt::Result {
    if token.kind == TokenKind::String {
        write!(f, "{}: {}", token.kind.name(), token.lexeme)
    } else if token.kind.is_keyword() || TYPE_NAME_LABELS.contains(&label) {
        f.write_str(&token.lexeme)
    } else {
        write!(f, "{}: \"{}\"", token.kind.name(), token.lexeme)
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}
