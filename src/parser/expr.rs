use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr,
            IntegerLiteral, PrefixExpr,
        },
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression whose operators bind tighter than `bp`.
///
/// Starts on the expression's first token and leaves the parser on its last.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expr> {
    if !parser.enter_expr() {
        return None;
    }
    let expr = parse_expr_with(parser, bp);
    parser.leave_expr();

    expr
}

fn parse_expr_with(parser: &mut Parser, bp: BindingPower) -> Option<Expr> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let position = parser.current_token().span.start.clone();
        parser.push_error(ErrorImpl::NoPrefixParseFn { kind: token_kind }, position);
        return None;
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than bp, keep extending lhs
    while !parser.peek_token_is(TokenKind::Semicolon) && bp < parser.peek_binding_power() {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Some(left);
        };
        let led_bp = parser.peek_binding_power();

        parser.advance();
        left = led(parser, left, led_bp)?;
    }

    Some(left)
}

pub fn parse_identifier(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    Some(Expr::Identifier(Identifier {
        value: token.value.clone(),
        token,
    }))
}

pub fn parse_integer_literal(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    match parse_integer(&token.value) {
        Some(value) => Some(Expr::Integer(IntegerLiteral { token, value })),
        None => {
            parser.push_error(
                ErrorImpl::IntegerParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            );
            None
        }
    }
}

pub fn parse_boolean(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    Some(Expr::Boolean(BooleanLiteral {
        value: token.kind == TokenKind::True,
        token,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Prefix)?;

    Some(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_infix_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Some(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<Expr> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::RParen)?;

    Some(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Option<Expr> {
    // if (<condition>) { <consequence> } else { <alternative> }
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::LParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::RParen)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let consequence = parse_block_stmt(parser);

    let alternative = if parser.peek_token_is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::LBrace)?;
        Some(parse_block_stmt(parser))
    } else {
        None
    };

    Some(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

pub fn parse_function_literal(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::LParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenKind::LBrace)?;
    let body = parse_block_stmt(parser);

    Some(Expr::Function(FunctionLiteral {
        token,
        parameters,
        body,
    }))
}

fn parse_function_parameters(parser: &mut Parser) -> Option<Vec<Identifier>> {
    let mut parameters = Vec::new();

    if parser.peek_token_is(TokenKind::RParen) {
        parser.advance();
        return Some(parameters);
    }

    loop {
        let token = parser.expect_peek(TokenKind::Ident)?;
        parameters.push(Identifier {
            value: token.value.clone(),
            token,
        });

        if !parser.peek_token_is(TokenKind::Comma) {
            break;
        }
        parser.advance();
    }

    parser.expect_peek(TokenKind::RParen)?;

    Some(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Option<Expr> {
    let token = parser.current_token().clone();
    let arguments = parse_call_arguments(parser)?;

    Some(Expr::Call(CallExpr {
        token,
        function: Box::new(left),
        arguments,
    }))
}

fn parse_call_arguments(parser: &mut Parser) -> Option<Vec<Expr>> {
    let mut args = Vec::new();

    if parser.peek_token_is(TokenKind::RParen) {
        parser.advance();
        return Some(args);
    }

    parser.advance();
    args.push(parse_expr(parser, BindingPower::Lowest)?);

    while parser.peek_token_is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        args.push(parse_expr(parser, BindingPower::Lowest)?);
    }

    parser.expect_peek(TokenKind::RParen)?;

    Some(args)
}

/// Converts integer literal text to an `i64`, detecting the radix from its
/// prefix: `0x` hexadecimal, `0o` octal, `0b` binary, a leading `0` octal,
/// anything else decimal. Underscores may separate digits.
pub fn parse_integer(text: &str) -> Option<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (radix, digits, has_prefix) = if let Some(rest) = strip_radix_prefix(body, 'x') {
        (16, rest, true)
    } else if let Some(rest) = strip_radix_prefix(body, 'o') {
        (8, rest, true)
    } else if let Some(rest) = strip_radix_prefix(body, 'b') {
        (2, rest, true)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..], true)
    } else {
        (10, body, false)
    };

    let digits = strip_separators(digits, has_prefix)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits
    };

    i64::from_str_radix(&signed, radix).ok()
}

/// Strips `0<marker>` (either case) from the start of `body`.
fn strip_radix_prefix(body: &str, marker: char) -> Option<&str> {
    let rest = body.strip_prefix('0')?;
    let mut chars = rest.chars();
    let found = chars.next()?;

    (found.to_ascii_lowercase() == marker).then(|| chars.as_str())
}

// `_` is allowed between digits, and right after a radix prefix.
fn strip_separators(digits: &str, has_prefix: bool) -> Option<String> {
    if !digits.contains('_') {
        return Some(digits.to_string());
    }

    let mut parts = digits.split('_').enumerate();
    let valid = parts.all(|(index, part)| !part.is_empty() || (index == 0 && has_prefix));

    valid.then(|| digits.replace('_', ""))
}
