//! Declaration parsing implementation
//!
//! This module handles the top level of a Core program and every declaration
//! form:
//!
//! - Scalar variables: `int a = 1, b;`
//! - Arrays: `float xs[3] = { 1.0, 2.0, 3.0 };`
//! - Functions: `int add(int a, int b) { ... }` or a bare prototype ending in `;`
//!
//! # Grammar
//!
//! ```text
//! program      ::= declaration*
//! declaration  ::= data_type identifier (function_decl | array_decl | var_decl)
//! var_decl     ::= data_type id ("=" exp)? ("," id ("=" exp)?)* ";"
//! array_decl   ::= data_type id "[" const? "]" ("=" "{" arg_list? "}")? ";"
//! function_decl ::= data_type id "(" param_list ")" (block | ";")
//! param_list   ::= "void" | (data_type id ("," data_type id)*)?
//! ```
//!
//! The three declaration forms share a prefix, so the choice is made by looking
//! two tokens ahead: `(` selects a function, `[` an array, anything else a
//! scalar.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::{Abort, ParseResult, Parser, SyntaxErrorKind};
use crate::parser::token::TokenKind;
use crate::parser::tree::{ParseTreeNode, Production};

impl Parser {
    /// Parse the declaration list, resynchronizing after each damaged
    /// declaration.
    pub(crate) fn parse_program_node(&mut self) -> ParseTreeNode {
        let mut declarations = Vec::new();

        while !self.is_at_end() {
            match self.parse_declaration() {
                Ok(decl) => declarations.push(decl),
                Err(Abort::Recoverable(err)) => {
                    self.record(err);
                    self.synchronize();
                }
                Err(Abort::Fatal(err)) => {
                    self.record(err);
                    self.panic = true;
                    self.position = self.tokens.len() - 1;
                    break;
                }
            }
        }

        ParseTreeNode::branch(Production::Program, declarations)
    }

    /// Parse a top-level declaration
    fn parse_declaration(&mut self) -> ParseResult<ParseTreeNode> {
        if !self.peek_kind().is_data_type() {
            return Err(self.missing_data_type());
        }

        let decl = match self.peek_ahead(2) {
            TokenKind::LeftParenthesis => self.parse_function_declaration()?,
            TokenKind::LeftBracket => self.parse_array_declaration()?,
            _ => self.parse_variable_declaration()?,
        };

        Ok(ParseTreeNode::branch(Production::Declaration, vec![decl]))
    }

    /// Parse scalar variable declaration, including the trailing `;`
    pub(crate) fn parse_variable_declaration(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![
            self.parse_data_type()?,
            self.expect_labeled(TokenKind::Identifier, "Identifier")?,
        ];
        self.parse_initializer(&mut children)?;

        while self.check(TokenKind::Comma) {
            children.push(self.take());
            children.push(self.expect_labeled(TokenKind::Identifier, "Identifier")?);
            self.parse_initializer(&mut children)?;
        }

        children.push(self.expect(TokenKind::Semicolon)?);
        Ok(ParseTreeNode::branch(
            Production::VariableDeclaration,
            children,
        ))
    }

    /// Optional `= exp` after a declared name
    fn parse_initializer(&mut self, children: &mut Vec<ParseTreeNode>) -> ParseResult<()> {
        if self.check(TokenKind::Assign) {
            children.push(self.take());
            children.push(self.parse_expression()?);
        }
        Ok(())
    }

    /// Parse array declaration: type name[size] = { values };
    pub(crate) fn parse_array_declaration(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![
            self.parse_data_type()?,
            self.expect_labeled(TokenKind::Identifier, "Identifier")?,
            self.expect(TokenKind::LeftBracket)?,
        ];

        if self.peek_kind().is_constant() {
            children.push(self.parse_const()?);
        }
        children.push(self.expect(TokenKind::RightBracket)?);

        if self.check(TokenKind::Assign) {
            children.push(self.take());
            children.push(self.expect(TokenKind::LeftBrace)?);
            if !self.check(TokenKind::RightBrace) {
                children.push(self.parse_argument_list()?);
            }
            children.push(self.expect(TokenKind::RightBrace)?);
        }

        children.push(self.expect(TokenKind::Semicolon)?);
        Ok(ParseTreeNode::branch(Production::ArrayDeclaration, children))
    }

    /// Parse function definition or prototype
    fn parse_function_declaration(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![
            self.parse_data_type()?,
            self.expect_labeled(TokenKind::Identifier, "Identifier")?,
            self.expect(TokenKind::LeftParenthesis)?,
            self.parse_parameter_list()?,
            self.expect(TokenKind::RightParenthesis)?,
        ];

        if self.check(TokenKind::LeftBrace) {
            children.push(self.parse_block()?);
        } else {
            children.push(self.expect(TokenKind::Semicolon)?);
        }

        Ok(ParseTreeNode::branch(
            Production::FunctionDeclaration,
            children,
        ))
    }

    /// Parse parameter list. `(void)` and `()` both declare no parameters.
    fn parse_parameter_list(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = Vec::new();

        if self.check(TokenKind::VoidKw) {
            children.push(self.take());
        } else if self.peek_kind().is_data_type() {
            children.push(self.parse_data_type()?);
            children.push(self.expect_labeled(TokenKind::Identifier, "Identifier")?);

            while self.check(TokenKind::Comma) {
                children.push(self.take());
                children.push(self.parse_data_type()?);
                children.push(self.expect_labeled(TokenKind::Identifier, "Identifier")?);
            }
        }

        Ok(ParseTreeNode::branch(Production::ParameterList, children))
    }

    /// Parse data type: int | float | char | bool
    pub(crate) fn parse_data_type(&mut self) -> ParseResult<ParseTreeNode> {
        let label = match self.peek_kind() {
            TokenKind::IntKw => "int",
            TokenKind::FloatKw => "float",
            TokenKind::CharKw => "char",
            TokenKind::BoolKw => "bool",
            _ => return Err(self.missing_data_type()),
        };

        let leaf = ParseTreeNode::leaf(label, self.advance());
        Ok(ParseTreeNode::branch(Production::DataType, vec![leaf]))
    }

    fn missing_data_type(&mut self) -> Abort {
        let message = format!("Expected a data type, found {}", self.peek());
        self.error(SyntaxErrorKind::MissingDataType, message, None)
    }
}
