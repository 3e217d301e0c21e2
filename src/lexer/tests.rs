//! Unit tests for the lexer module.

use super::{
    lexer::{tokenize, Lexer},
    tokens::{Token, TokenKind, TokenSource, TokenStream},
};

#[test]
fn test_tokenize_keywords() {
    let source = "fn let true false if else return".to_string();
    let tokens = tokenize(source, Some("test.mk".to_string()));

    assert_eq!(tokens[0].kind, TokenKind::Function);
    assert_eq!(tokens[1].kind, TokenKind::Let);
    assert_eq!(tokens[2].kind, TokenKind::True);
    assert_eq!(tokens[3].kind, TokenKind::False);
    assert_eq!(tokens[4].kind, TokenKind::If);
    assert_eq!(tokens[5].kind, TokenKind::Else);
    assert_eq!(tokens[6].kind, TokenKind::Return);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
    assert_eq!(tokens.len(), 8);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore letter".to_string();
    let tokens = tokenize(source, Some("test.mk".to_string()));

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["foo", "bar", "baz_123", "_underscore", "letter", ""]);

    for token in &tokens[..5] {
        assert_eq!(token.kind, TokenKind::Ident);
    }
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_integers() {
    let source = "5 10 838383 007".to_string();
    let tokens = tokenize(source, None);

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value, "5");
    assert_eq!(tokens[2].value, "838383");
    assert_eq!(tokens[3].value, "007");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let source = "= + - ! * / < > == != , ; ( ) { }".to_string();
    let tokens = tokenize(source, None);

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Assign,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Bang,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_without_whitespace() {
    let tokens = tokenize("let five=5;five!=10".to_string(), None);

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["let", "five", "=", "5", ";", "five", "!=", "10", ""]);
}

#[test]
fn test_tokenize_illegal_character() {
    let tokens = tokenize("a @ b".to_string(), None);

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "@");
    assert_eq!(tokens[2].kind, TokenKind::Ident);
}

#[test]
fn test_tokenize_multibyte_illegal_character() {
    let tokens = tokenize("x é y".to_string(), None);

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "é");
    assert_eq!(tokens[2].value, "y");
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("let  ab = 1;".to_string(), Some("span.mk".to_string()));

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 3);
    assert_eq!(tokens[1].span.start.0, 5);
    assert_eq!(tokens[1].span.end.0, 7);
    assert_eq!(tokens[1].span.start.1.as_str(), "span.mk");
    assert_eq!(tokens[5].span.start.0, 12);
}

#[test]
fn test_lexer_returns_eof_forever() {
    let mut lexer = Lexer::new("x".to_string(), None);

    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    for _ in 0..3 {
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::EOF);
        assert_eq!(token.value, "");
    }
}

#[test]
fn test_empty_source() {
    let tokens = tokenize("   \n\t ".to_string(), None);

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}

#[test]
fn test_token_stream_returns_eof_forever() {
    let mut stream = TokenStream::new(vec![
        Token::synthetic(TokenKind::Int, "5"),
        Token::synthetic(TokenKind::Semicolon, ";"),
    ]);

    assert_eq!(stream.next_token().value, "5");
    assert_eq!(stream.next_token().kind, TokenKind::Semicolon);
    assert_eq!(stream.next_token().kind, TokenKind::EOF);
    assert_eq!(stream.next_token().kind, TokenKind::EOF);
}

#[test]
fn test_token_kind_display() {
    assert_eq!(TokenKind::Ident.to_string(), "IDENT");
    assert_eq!(TokenKind::Int.to_string(), "INT");
    assert_eq!(TokenKind::NotEq.to_string(), "!=");
    assert_eq!(TokenKind::Function.to_string(), "FUNCTION");
    assert_eq!(TokenKind::EOF.to_string(), "EOF");
}
