// Terminal rendering of lexical and syntax diagnostics

use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use crossterm::style::{Color, Stylize};

const ERROR_COLOR: Color = Color::Rgb {
    r: 243,
    g: 139,
    b: 168,
};
const LOCATION_COLOR: Color = Color::Rgb {
    r: 108,
    g: 112,
    b: 134,
};

/// Whether rendered diagnostics carry terminal colour codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticStyle {
    Plain,
    Colored,
}

/// `error[lexical]: <message> (line L, column C)`
pub fn render_lex_error(err: &LexError, style: DiagnosticStyle) -> String {
    render("error[lexical]", &err.message, &err.location.to_string(), style)
}

/// `error[syntax]: <message>, expected KIND, found KIND (line L, column C)`
pub fn render_parse_error(err: &ParseError, style: DiagnosticStyle) -> String {
    let mut message = err.message.clone();
    if let Some(expected) = err.expected {
        message.push_str(&format!(", expected {}", expected));
    }
    message.push_str(&format!(", found {}", err.found));

    render("error[syntax]", &message, &err.location.to_string(), style)
}

fn render(tag: &str, message: &str, location: &str, style: DiagnosticStyle) -> String {
    match style {
        DiagnosticStyle::Plain => format!("{}: {} ({})", tag, message, location),
        DiagnosticStyle::Colored => format!(
            "{}: {} {}",
            tag.with(ERROR_COLOR).bold(),
            message,
            format!("({})", location).with(LOCATION_COLOR)
        ),
    }
}
