#![allow(clippy::module_inception)]

use std::{path::Path, rc::Rc};

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
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Finds the line containing a byte offset.
///
/// Returns the 1-based line number, the line text and the offset of `position`
/// inside that line, or `None` when the offset lies past the end of `source`.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}

/// Renders a diagnostic together with the offending source line.
///
/// ```text
/// Error: expected next token to be IDENT, got==
/// -> main.mk
///    |
///  1 | let = 5;
///    | ----^
/// ```
pub fn format_error(error: &Error, source: &str, file: &Path) -> String {
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error, error.get_tip()));
    }
    out.push_str(&format!("-> {}\n", file.as_os_str().to_string_lossy()));

    // End-of-input diagnostics point past the last line; there is nothing to underline.
    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

/// Returns `string` without its leading whitespace and how many bytes were removed.
fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start();

    (trimmed, string.len() - trimmed.len())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::parser::parser::parse;

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nsecond\nthird\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 34).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);

        assert!(super::get_line_at_position(source, 400).is_none());
    }

    #[test]
    fn test_format_error_underlines_token() {
        let source = "let x = 1;\n  let = 5;\n";
        let (parser, _) = parse(source.to_string(), Some("main.mk".to_string()));

        let rendered = super::format_error(
            &parser.errors()[0],
            source,
            &PathBuf::from("main.mk"),
        );

        assert!(rendered.starts_with("Error: expected next token to be IDENT, got==\n"));
        assert!(rendered.contains("-> main.mk\n"));
        assert!(rendered.contains("2 | let = 5;\n"));
        assert!(rendered.ends_with("  | ----^\n"));
    }

    #[test]
    fn test_format_error_tab_indented_line() {
        let source = "\tlet = 5;\n";
        let (parser, _) = parse(source.to_string(), Some("main.mk".to_string()));

        let rendered = super::format_error(
            &parser.errors()[0],
            source,
            &PathBuf::from("main.mk"),
        );

        assert!(rendered.contains("1 | let = 5;\n"));
        assert!(rendered.ends_with("  | ----^\n"));
    }
}
