//! Statement parsing implementation
//!
//! This module handles blocks and every statement form:
//!
//! - Blocks: `{ ... }` holding declarations and statements in any order
//! - Control flow: `if/else`, `while`, `for`, `return`
//! - I/O: `scanf("...", &a, &b);` and `printf("...", exp);` / `printf(name);`
//! - Empty statements (`;`) and expression statements
//!
//! The block-item loop is one of the two places where panic-mode recovery
//! happens; see the `parse` module for the protocol.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::{Abort, ParseResult, Parser, SyntaxErrorKind};
use crate::parser::token::TokenKind;
use crate::parser::tree::{ParseTreeNode, Production};

impl Parser {
    /// Parse block: `{` block_item* `}`
    pub(crate) fn parse_block(&mut self) -> ParseResult<ParseTreeNode> {
        self.nested(|parser| {
            let open = parser.expect(TokenKind::LeftBrace)?;
            let items = parser.parse_block_item_list()?;
            let close = parser.expect(TokenKind::RightBrace)?;

            Ok(ParseTreeNode::branch(
                Production::Block,
                vec![open, items, close],
            ))
        })
    }

    /// Parse block items up to the closing brace, resynchronizing after each
    /// damaged item.
    fn parse_block_item_list(&mut self) -> ParseResult<ParseTreeNode> {
        let mut items = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            match self.parse_block_item() {
                Ok(item) => items.push(item),
                Err(Abort::Recoverable(err)) => {
                    self.record(err);
                    self.synchronize();
                }
                Err(fatal) => return Err(fatal),
            }
        }

        Ok(ParseTreeNode::branch(Production::BlockItemList, items))
    }

    fn parse_block_item(&mut self) -> ParseResult<ParseTreeNode> {
        let item = if self.peek_kind().is_data_type() {
            self.parse_local_declaration()?
        } else {
            self.parse_statement()?
        };

        Ok(ParseTreeNode::branch(Production::BlockItem, vec![item]))
    }

    /// Variable or array declaration inside a block or `for` header
    fn parse_local_declaration(&mut self) -> ParseResult<ParseTreeNode> {
        if self.peek_ahead(2) == TokenKind::LeftBracket {
            self.parse_array_declaration()
        } else {
            self.parse_variable_declaration()
        }
    }

    /// Parse a statement
    fn parse_statement(&mut self) -> ParseResult<ParseTreeNode> {
        let statement = match self.peek_kind() {
            TokenKind::ReturnKw => self.parse_return_statement()?,
            TokenKind::IfKw => self.parse_if_statement()?,
            TokenKind::WhileKw => self.parse_while_statement()?,
            TokenKind::ForKw => self.parse_for_statement()?,
            TokenKind::ScanfKw => self.parse_input_statement()?,
            TokenKind::PrintfKw => self.parse_output_statement()?,
            TokenKind::Semicolon => self.take(),
            TokenKind::LeftBrace => self.parse_block()?,
            _ => self.parse_expression_statement()?,
        };

        Ok(ParseTreeNode::branch(Production::Statement, vec![statement]))
    }

    /// Parse return statement; the value is optional
    fn parse_return_statement(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![self.expect(TokenKind::ReturnKw)?];

        if !self.check(TokenKind::Semicolon) {
            children.push(self.parse_expression()?);
        }
        children.push(self.expect(TokenKind::Semicolon)?);

        Ok(ParseTreeNode::branch(Production::ReturnStatement, children))
    }

    /// Parse if statement with any number of else clauses
    fn parse_if_statement(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![
            self.expect(TokenKind::IfKw)?,
            self.expect(TokenKind::LeftParenthesis)?,
            self.parse_expression()?,
            self.expect(TokenKind::RightParenthesis)?,
            self.parse_block()?,
        ];

        while self.check(TokenKind::ElseKw) {
            children.push(self.parse_else_clause()?);
        }

        Ok(ParseTreeNode::branch(Production::IfStatement, children))
    }

    fn parse_else_clause(&mut self) -> ParseResult<ParseTreeNode> {
        let else_kw = self.expect(TokenKind::ElseKw)?;
        let body = if self.check(TokenKind::IfKw) {
            self.nested(Self::parse_if_statement)?
        } else {
            self.parse_block()?
        };

        Ok(ParseTreeNode::branch(
            Production::ElseClause,
            vec![else_kw, body],
        ))
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> ParseResult<ParseTreeNode> {
        let children = vec![
            self.expect(TokenKind::WhileKw)?,
            self.expect(TokenKind::LeftParenthesis)?,
            self.parse_expression()?,
            self.expect(TokenKind::RightParenthesis)?,
            self.parse_block()?,
        ];

        Ok(ParseTreeNode::branch(Production::WhileStatement, children))
    }

    /// Parse for statement: every clause is required
    fn parse_for_statement(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![
            self.expect(TokenKind::ForKw)?,
            self.expect(TokenKind::LeftParenthesis)?,
        ];

        // Init: a declaration carries its own ';'
        if self.peek_kind().is_data_type() {
            children.push(self.parse_local_declaration()?);
        } else {
            children.push(self.parse_expression()?);
            children.push(self.expect(TokenKind::Semicolon)?);
        }

        children.push(self.parse_expression()?);
        children.push(self.expect(TokenKind::Semicolon)?);
        children.push(self.parse_expression()?);
        children.push(self.expect(TokenKind::RightParenthesis)?);
        children.push(self.parse_block()?);

        Ok(ParseTreeNode::branch(Production::ForStatement, children))
    }

    /// Parse `scanf("format", &a, &b);`
    fn parse_input_statement(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![
            self.expect(TokenKind::ScanfKw)?,
            self.expect(TokenKind::LeftParenthesis)?,
            self.expect_labeled(TokenKind::String, "String")?,
        ];

        while self.check(TokenKind::Comma) {
            children.push(self.take());
            children.push(self.expect(TokenKind::Ampersand)?);
            children.push(self.expect_labeled(TokenKind::Identifier, "Identifier")?);
        }

        children.push(self.expect(TokenKind::RightParenthesis)?);
        children.push(self.expect(TokenKind::Semicolon)?);

        Ok(ParseTreeNode::branch(Production::InputStatement, children))
    }

    /// Parse `printf("format", exp, ...);` or `printf(name);`
    fn parse_output_statement(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![
            self.expect(TokenKind::PrintfKw)?,
            self.expect(TokenKind::LeftParenthesis)?,
        ];

        match self.peek_kind() {
            TokenKind::String => {
                children.push(self.expect_labeled(TokenKind::String, "String")?);
                while self.check(TokenKind::Comma) {
                    children.push(self.take());
                    children.push(self.parse_expression()?);
                }
            }
            TokenKind::Identifier => {
                children.push(self.expect_labeled(TokenKind::Identifier, "Identifier")?);
            }
            found => {
                return Err(self.error(
                    SyntaxErrorKind::TokenMismatch,
                    format!("Expected String or Identifier but found {}", found),
                    Some(TokenKind::String),
                ));
            }
        }

        children.push(self.expect(TokenKind::RightParenthesis)?);
        children.push(self.expect(TokenKind::Semicolon)?);

        Ok(ParseTreeNode::branch(Production::OutputStatement, children))
    }

    /// Parse expression statement: exp `;`
    fn parse_expression_statement(&mut self) -> ParseResult<ParseTreeNode> {
        let children = vec![
            self.parse_expression()?,
            self.expect(TokenKind::Semicolon)?,
        ];

        Ok(ParseTreeNode::branch(
            Production::ExpressionStatement,
            children,
        ))
    }
}
