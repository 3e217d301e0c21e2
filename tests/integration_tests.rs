//! Integration tests for end-to-end parsing.
//!
//! These tests drive the public API the way an embedding interpreter would:
//! source text through the lexer and parser, then inspection of the tree and
//! the diagnostics.

use monkey_parser::{
    ast::ast::{Expr, Node, Stmt},
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::{TokenKind, TokenStream},
    },
    parser::parser::{parse, Parser},
};

#[test]
fn test_parse_complete_program() {
    let source = "
let five = 5;
let ten = 10;

let add = fn(x, y) {
  x + y;
};

let result = add(five, ten);
if (result > 10) {
  return true;
} else {
  return false;
}
"
    .to_string();
    let (parser, program) = parse(source, Some("program.mk".to_string()));

    assert!(parser.errors().is_empty(), "{:?}", parser.error_messages());
    assert_eq!(program.statements.len(), 5);
    assert_eq!(program.token_literal(), "let");

    let rendered: Vec<String> = program.statements.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "let five = 5;",
            "let ten = 10;",
            "let add = fn(x, y) (x + y);",
            "let result = add(five, ten);",
            "if(result > 10) return true;else return false;",
        ]
    );
}

#[test]
fn test_parser_over_lexer_source() {
    let mut parser = Parser::new(Lexer::new("let x = -a * b;".to_string(), None));
    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "let x = ((-a) * b);");
}

#[test]
fn test_parser_over_pre_lexed_tokens() {
    let tokens = tokenize("1 + 2 * 3".to_string(), None);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));

    let mut parser = Parser::new(TokenStream::new(tokens));
    let program = parser.parse_program();

    assert_eq!(program.to_string(), "(1 + (2 * 3))");
}

#[test]
fn test_diagnostics_do_not_stop_parsing() {
    let source = "let x 5;\nlet y = 10;\n*;\nreturn y;".to_string();
    let (parser, program) = parse(source, None);

    assert_eq!(
        parser.error_messages(),
        vec![
            "expected next token to be =, got=INT".to_string(),
            "no prefix parse function for * found".to_string(),
        ]
    );

    let lets: Vec<&str> = program
        .statements
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Let(let_stmt) => Some(let_stmt.name.value.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(lets, vec!["y"]);
    assert!(matches!(program.statements.last(), Some(Stmt::Return(_))));
}

#[test]
fn test_error_positions_point_at_offending_token() {
    let source = "let a = 1;\nlet b = 99999999999999999999;".to_string();
    let (parser, _) = parse(source.clone(), None);

    let error = &parser.errors()[0];
    let offset = error.get_position().0 as usize;
    assert_eq!(error.get_error_name(), "IntegerParseError");
    assert!(source[offset..].starts_with("99999999999999999999"));
}

#[test]
fn test_nested_calls_and_functions() {
    let (parser, program) = parse("map(fn(x) { x * 2 }, list)".to_string(), None);

    assert!(parser.errors().is_empty());
    let Some(Stmt::Expression(stmt)) = program.statements.first() else {
        panic!("expected an expression statement");
    };
    let Some(Expr::Call(call)) = &stmt.expression else {
        panic!("expected a call");
    };
    assert!(matches!(call.arguments[0], Expr::Function(_)));
    assert_eq!(program.to_string(), "map(fn(x) (x * 2), list)");
}
