#![allow(clippy::module_inception)]

use std::rc::Rc;

pub mod ast;
pub mod builder;
pub mod diagnostics;
pub mod errors;
pub mod framer;
pub mod lexer;
pub mod macros;
pub mod operators;
pub mod parser;
pub mod repl;
pub mod session;

extern crate regex;

/// Byte offset into a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Span used for compiler generated nodes that have no source text.
    pub fn null() -> Self {
        let position = Position::null();
        Span {
            start: position.clone(),
            end: position,
        }
    }

    /// Returns a span covering `self` through the end of `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.start.1.as_str() == "<null>"
    }
}

/// Finds the line containing `position`.
///
/// Returns the 1 based line number, the text of the line and the offset of
/// `position` within that line, or `None` if the position is past the end
/// of `content`.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // A position right at the end of the text points just past the last line
    content
        .split_inclusive('\n')
        .last()
        .map(|line| (line_number - 1, line.to_string(), line.len()))
}

#[cfg(test)]
mod tests {
    use super::{get_line_at_position, Span};

    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nsecond\nthird\nTesting { }\n";

        let (line_number, line, line_pos) = get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(content, 34).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 7);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(get_line_at_position("abc", 10).is_none());

        let (line_number, _, line_pos) = get_line_at_position("abc", 3).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line_pos, 3);
    }

    #[test]
    fn test_null_span() {
        assert!(Span::null().is_null());
    }
}
