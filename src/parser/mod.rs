//! Core source code front end
//!
//! This module turns Core source text into a concrete parse tree:
//! - [`lexer`]: Tokenization (characters → tokens, faults become error tokens)
//! - [`parse`]: Parsing (tokens → parse tree, with panic-mode recovery)
//! - [`tree`]: Parse tree node definitions
//! - [`token`]: Token kinds and source positions
//! - [`constants`]: Keyword table and language limits
//!
//! # The Core language
//!
//! - Types: `int`, `float`, `char`, `bool`, one-dimensional arrays
//! - Declarations: variables, arrays with brace initializers, functions and prototypes
//! - Statements: `if/else`, `while`, `for`, `return`, `scanf`, `printf`, blocks
//! - Expressions: arithmetic including `^` and `%`, comparisons, `&&`, `||`, `!`,
//!   calls, array subscripts and assignment
//! - Line comments (`//` to end of line)
//!
//! # Parser Implementation
//!
//! Hand-written character automaton for the lexer and a recursive descent
//! parser with one method per grammar level. No parser generator dependencies.

pub mod constants;
pub mod lexer;
pub mod parse;
pub mod token;
pub mod tree;

mod declarations;
mod expressions;
mod statements;
