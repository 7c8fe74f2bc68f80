//! Renderers for front-end results
//!
//! - [`symbol_table`]: the token stream as a fixed-width table
//! - [`tree_printer`]: the parse tree as indented, parenthesized text
//! - [`diagnostics`]: lexical and syntax errors as terminal lines
//!
//! Renderers only read the tokens and tree; they write to any
//! [`std::io::Write`] or produce a `String` via `Display`.

pub mod diagnostics;
pub mod symbol_table;
pub mod tree_printer;

pub use diagnostics::{render_lex_error, render_parse_error, DiagnosticStyle};
pub use symbol_table::SymbolTable;
pub use tree_printer::TreePrinter;
