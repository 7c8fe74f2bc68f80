//! Expression parsing implementation
//!
//! This module handles assignment and the operator-precedence chain using one
//! recursive-descent method per level.
//!
//! # Precedence
//!
//! From loosest to tightest binding:
//!
//! ```text
//! exp            ::= id ("[" const "]")? "=" exp | logical_or
//! logical_or     ::= logical_and ("||" logical_and)*
//! logical_and    ::= equality ("&&" equality)*
//! equality       ::= relational (("==" | "!=") relational)*
//! relational     ::= additive (("<" | "<=" | ">" | ">=") additive)*
//! additive       ::= multiplicative (("+" | "-") multiplicative)*
//! multiplicative ::= power (("*" | "/" | "%") power)*
//! power          ::= unary ("^" power)?
//! unary          ::= ("!" | "+" | "-") unary | factor
//! factor         ::= const | id ("(" arg_list? ")" | "[" const "]")? | "(" exp ")"
//! ```
//!
//! Left-associative levels build a single flat node holding every operand and
//! operator of the run, so `a - b - c` is one `Additive` node with five
//! children. A level that sees no operator adds no node at all. Assignment and
//! `^` associate to the right.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::{ParseResult, Parser, SyntaxErrorKind};
use crate::parser::token::TokenKind;
use crate::parser::tree::{ParseTreeNode, Production};

const OR_OPS: &[TokenKind] = &[TokenKind::Or];
const AND_OPS: &[TokenKind] = &[TokenKind::And];
const EQUALITY_OPS: &[TokenKind] = &[TokenKind::Equal, TokenKind::NotEqual];
const RELATIONAL_OPS: &[TokenKind] = &[
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
];
const ADDITIVE_OPS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE_OPS: &[TokenKind] =
    &[TokenKind::Multiply, TokenKind::Divide, TokenKind::Modulo];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> ParseResult<ParseTreeNode> {
        self.nested(|parser| {
            if parser.check(TokenKind::Identifier) && parser.assignment_ahead()? {
                return parser.parse_assignment();
            }
            parser.parse_logical_or()
        })
    }

    /// Look past the identifier, and a subscript if there is one, for `=`.
    /// Nothing is consumed.
    fn assignment_ahead(&mut self) -> ParseResult<bool> {
        let mut offset = 1;

        if self.peek_ahead(offset) == TokenKind::LeftBracket {
            offset += 1;
            loop {
                match self.peek_ahead(offset) {
                    TokenKind::RightBracket => break,
                    TokenKind::Eof => {
                        let message = format!(
                            "Expected {} but got {}",
                            TokenKind::RightBracket,
                            TokenKind::Eof
                        );
                        return Err(self.fatal(SyntaxErrorKind::MalformedSubscript, message));
                    }
                    _ => offset += 1,
                }
            }
            offset += 1;
        }

        Ok(self.peek_ahead(offset) == TokenKind::Assign)
    }

    /// Parse assignment (right-associative)
    fn parse_assignment(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![self.expect_labeled(TokenKind::Identifier, "Identifier")?];

        if self.check(TokenKind::LeftBracket) {
            self.parse_subscript(&mut children)?;
        }
        children.push(self.expect(TokenKind::Assign)?);
        children.push(self.parse_expression()?);

        Ok(ParseTreeNode::branch(Production::Assignment, children))
    }

    /// `[` const `]` appended to `children`
    fn parse_subscript(&mut self, children: &mut Vec<ParseTreeNode>) -> ParseResult<()> {
        children.push(self.expect(TokenKind::LeftBracket)?);

        if !self.peek_kind().is_constant() {
            let message = format!(
                "Array subscript must be a constant, found {}",
                self.peek()
            );
            return Err(self.error(SyntaxErrorKind::MalformedSubscript, message, None));
        }
        children.push(self.parse_const()?);
        children.push(self.expect(TokenKind::RightBracket)?);
        Ok(())
    }

    fn parse_logical_or(&mut self) -> ParseResult<ParseTreeNode> {
        self.parse_left_assoc(Production::LogicalOr, OR_OPS, Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> ParseResult<ParseTreeNode> {
        self.parse_left_assoc(Production::LogicalAnd, AND_OPS, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult<ParseTreeNode> {
        self.parse_left_assoc(Production::Equality, EQUALITY_OPS, Self::parse_relational)
    }

    fn parse_relational(&mut self) -> ParseResult<ParseTreeNode> {
        self.parse_left_assoc(Production::Relational, RELATIONAL_OPS, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> ParseResult<ParseTreeNode> {
        self.parse_left_assoc(
            Production::Additive,
            ADDITIVE_OPS,
            Self::parse_multiplicative,
        )
    }

    fn parse_multiplicative(&mut self) -> ParseResult<ParseTreeNode> {
        self.parse_left_assoc(
            Production::Multiplicative,
            MULTIPLICATIVE_OPS,
            Self::parse_power,
        )
    }

    /// One left-associative level: `operand (op operand)*` as a single flat node.
    fn parse_left_assoc(
        &mut self,
        production: Production,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<ParseTreeNode>,
    ) -> ParseResult<ParseTreeNode> {
        let first = operand(self)?;
        if !operators.contains(&self.peek_kind()) {
            return Ok(first);
        }

        let mut children = vec![first];
        while operators.contains(&self.peek_kind()) {
            children.push(self.take());
            children.push(operand(self)?);
        }

        Ok(ParseTreeNode::branch(production, children))
    }

    /// Parse `^` (right-associative)
    fn parse_power(&mut self) -> ParseResult<ParseTreeNode> {
        let base = self.parse_unary()?;
        if !self.check(TokenKind::Exponent) {
            return Ok(base);
        }

        let op = self.take();
        let exponent = self.nested(Self::parse_power)?;
        Ok(ParseTreeNode::branch(
            Production::Exponent,
            vec![base, op, exponent],
        ))
    }

    /// Parse prefix `!`, `+` and `-`
    fn parse_unary(&mut self) -> ParseResult<ParseTreeNode> {
        match self.peek_kind() {
            TokenKind::Not | TokenKind::Plus | TokenKind::Minus => {
                let op = self.take();
                let operand = self.nested(Self::parse_unary)?;
                Ok(ParseTreeNode::branch(
                    Production::UnaryExp,
                    vec![op, operand],
                ))
            }
            _ => self.parse_factor(),
        }
    }

    /// Parse constants, names, calls, subscripts and parenthesized expressions
    fn parse_factor(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = Vec::new();

        match self.peek_kind() {
            kind if kind.is_constant() => children.push(self.parse_const()?),
            TokenKind::Identifier => {
                children.push(self.expect_labeled(TokenKind::Identifier, "Identifier")?);

                if self.check(TokenKind::LeftParenthesis) {
                    children.push(self.take());
                    if !self.check(TokenKind::RightParenthesis) {
                        children.push(self.parse_argument_list()?);
                    }
                    children.push(self.expect(TokenKind::RightParenthesis)?);
                } else if self.check(TokenKind::LeftBracket) {
                    self.parse_subscript(&mut children)?;
                }
            }
            TokenKind::LeftParenthesis => {
                children.push(self.take());
                children.push(self.parse_expression()?);
                children.push(self.expect(TokenKind::RightParenthesis)?);
            }
            _ => {
                let message = format!("Unexpected token in factor: {}", self.peek());
                return Err(self.error(SyntaxErrorKind::UnexpectedFactor, message, None));
            }
        }

        Ok(ParseTreeNode::branch(Production::Factor, children))
    }

    /// Parse literal constant: integer, float, character, `true` or `false`
    pub(crate) fn parse_const(&mut self) -> ParseResult<ParseTreeNode> {
        let label = match self.peek_kind() {
            TokenKind::IntegerLiteral => "Int",
            TokenKind::FloatLiteral => "Float",
            TokenKind::CharacterLiteral => "Char",
            TokenKind::TrueKw | TokenKind::FalseKw => "Bool",
            _ => {
                let message = format!("Expected constant, found {}", self.peek());
                return Err(self.error(SyntaxErrorKind::MissingConstant, message, None));
            }
        };

        let leaf = ParseTreeNode::leaf(label, self.advance());
        Ok(ParseTreeNode::branch(Production::Const, vec![leaf]))
    }

    /// Parse comma-separated expressions
    pub(crate) fn parse_argument_list(&mut self) -> ParseResult<ParseTreeNode> {
        let mut children = vec![self.parse_expression()?];

        while self.check(TokenKind::Comma) {
            children.push(self.take());
            children.push(self.parse_expression()?);
        }

        Ok(ParseTreeNode::branch(Production::ArgumentList, children))
    }
}
