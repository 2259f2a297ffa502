#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::Lexer,
    parser::parser::Parser,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Lexes and parses `source`, returning the program only if no diagnostic was recorded.
pub fn parse(source: String, file: Option<String>) -> Result<Program, Vec<Error>> {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();

    if parser.diagnostics().is_empty() {
        Ok(program)
    } else {
        Err(parser.diagnostics().to_vec())
    }
}

/// Finds the line containing byte offset `position`.
///
/// Returns the 1-based line number, the line text, and the offset within that line.
/// Offsets at or past the end of the source resolve to the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        last = (line_number, line.to_string(), line.len());
        start = end;
        line_number += 1;
    }

    if source.ends_with('\n') {
        return (line_number, String::new(), 0);
    }

    last
}

/// Renders a diagnostic against its source text.
///
/// ```text
/// Error: expected next token to be ASSIGN, got INT instead
/// -> main.mk
///   |
/// 1 | let x 5;
///   | ------^
/// ```
pub fn render_error(source: &str, error: &Error) -> String {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut output = String::new();
    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error));
    } else {
        output.push_str(&format!("Error: {} ({})\n", error, error.get_tip()));
    }
    output.push_str(&format!("-> {}\n", position.1));
    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
