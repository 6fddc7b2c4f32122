#![allow(clippy::module_inception)]

use crate::{
    ast::expressions::Expr,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::{parse_with_options, ParserOptions},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into the source expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes and parses a TeX expression with the default options.
pub fn parse_tex(source: &str) -> Result<Expr, Error> {
    parse_tex_with_options(source, &ParserOptions::default())
}

pub fn parse_tex_with_options(source: &str, options: &ParserOptions) -> Result<Expr, Error> {
    let tokens = tokenize(source)?;
    Ok(parse_with_options(tokens, options)?)
}

/// Renders an error against the expression it came from.
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `)`)
///   |
///   | 2 + )
///   | ----^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position().0 as usize;

    // expressions are single line, but be forgiving about what we were handed
    let mut line_start = 0;
    let mut line_text = source;
    let mut start = 0;
    for line in source.split_inclusive('\n') {
        let end = start + line.len();
        // the end-of-input token sits one past the last line
        if (start..end).contains(&position) || end == source.len() {
            line_start = start;
            line_text = line;
            break;
        }
        start = end;
    }
    let line_pos = position.saturating_sub(line_start);

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("{:>3}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{:>3} {}\n", "|", line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>3} {:->arrows$}", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
