#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }

    /// Position of byte `offset` in `file`, saturating at `u32::MAX`.
    pub fn at(offset: usize, file: &Rc<String>) -> Self {
        Position(u32::try_from(offset).unwrap_or(u32::MAX), Rc::clone(file))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Returns the 1-based line number, the line text and the offset within that
/// line of byte `position` in `source`.
///
/// Positions at or past the end of the source resolve to the end of the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    match source.split_inclusive('\n').last() {
        Some(line) if !line.ends_with('\n') => (line_number - 1, line.to_string(), line.len()),
        _ => (line_number, String::new(), 0),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        lexer::tokens::TokenKind,
        Position,
    };

    #[test]
    fn test_position_offsets_saturate() {
        let file = Rc::new("big.monkey".to_string());

        assert_eq!(Position::at(42, &file).0, 42);
        assert_eq!(Position::at(u32::MAX as usize, &file).0, u32::MAX);
        assert_eq!(Position::at(usize::MAX, &file).0, u32::MAX);
        assert_eq!(*Position::at(0, &file).1, "big.monkey");
    }

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\nbar\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 30);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, line_pos) = super::get_line_at_position("let x = 5", 9);
        assert_eq!(line_number, 1);
        assert_eq!(line, "let x = 5");
        assert_eq!(line_pos, 9);

        let (line_number, line, line_pos) = super::get_line_at_position("", 0);
        assert_eq!(line_number, 1);
        assert_eq!(line, "");
        assert_eq!(line_pos, 0);
    }

    #[test]
    fn test_render_error() {
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: TokenKind::Identifier,
                found: TokenKind::Assignment,
            },
            Position(4, Rc::new("shell".to_string())),
        );

        let rendered = super::render_error(&error, "let = 5;");
        let lines = rendered.lines().collect::<Vec<&str>>();

        assert_eq!(
            lines[0],
            "Error: expected next token to be Identifier, got Assignment instead"
        );
        assert_eq!(lines[1], "-> shell");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "1 | let = 5;");
        assert_eq!(lines[4], "  | ----^");
    }
}

/// Renders a diagnostic with the offending source line and a caret under it.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: message (tip)
        -> shell
          |
        1 | let = 5;
          | ----^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error));
    } else {
        rendered.push_str(&format!("Error: {} ({})\n", error, error.get_tip()));
    }
    rendered.push_str(&format!("-> {}\n", position.1));
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();

    (String::from(&string[start..]), start)
}
