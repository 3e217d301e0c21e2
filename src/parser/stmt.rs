use tracing::trace;

use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

/// Parses one statement starting at the current token.
///
/// On return the current token is the last token of the statement (its `;`
/// when present), or where parsing gave up.
pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    let kind = parser.current_token_kind();
    trace!(%kind, "parsing statement");

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_let_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    let name_token = parser.expect_peek(TokenKind::Ident)?;
    let name = Identifier {
        value: name_token.value.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assign)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest);

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    // `return;`, `return }` and a trailing `return` carry no value
    if matches!(
        parser.peek_token_kind(),
        TokenKind::Semicolon | TokenKind::RBrace | TokenKind::EOF
    ) {
        if parser.peek_token_is(TokenKind::Semicolon) {
            parser.advance();
        }
        return Some(Stmt::Return(ReturnStmt { token, value: None }));
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Lowest);

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Stmt::Return(ReturnStmt { token, value }))
}

/// Parses a bare expression used as a statement. Yields nothing when the
/// expression itself failed to parse.
pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest);

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    expression.map(|expression| {
        Stmt::Expression(ExpressionStmt {
            token,
            expression: Some(expression),
        })
    })
}

/// Parses `{ ... }` with the current token on the opening brace. Stops at
/// the closing brace or at the end of input.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    let token = parser.current_token().clone();
    let mut statements = Vec::new();

    parser.advance();

    while !parser.current_token_is(TokenKind::RBrace) && !parser.current_token_is(TokenKind::EOF) {
        if let Some(stmt) = parse_stmt(parser) {
            statements.push(stmt);
        }
        parser.advance();
    }

    BlockStmt { token, statements }
}
