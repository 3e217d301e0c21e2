use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A recoverable parse diagnostic.
///
/// Diagnostics are collected by the parser instead of being returned; the
/// `Display` output is the plain message, e.g.
/// `expected next token to be IDENT, got==`.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixParseFn { .. } => "NoPrefixParseFn",
            ErrorImpl::IntegerParseError { .. } => "IntegerParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => ErrorTip::None,
            ErrorImpl::NoPrefixParseFn { kind } => {
                ErrorTip::Suggestion(format!("`{}` cannot start an expression", kind))
            }
            ErrorImpl::IntegerParseError { token } => {
                ErrorTip::Suggestion(integer_suggestion(token))
            }
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "split the expression up with `let` bindings",
            )),
        }
    }
}

/// Explains how an integer literal was read, following the same radix rules
/// as the parser.
fn integer_suggestion(token: &str) -> String {
    let body = token.trim_start_matches(['-', '+']);
    let marker = body
        .strip_prefix('0')
        .and_then(|rest| rest.chars().next())
        .map(|c| c.to_ascii_lowercase());

    let (radix, digits) = match marker {
        Some('x') => ("hexadecimal", "0-9 and a-f"),
        Some('o') => ("octal", "0-7"),
        Some('b') => ("binary", "0 and 1"),
        Some(_) => {
            return format!(
                "`{}` starts with `0`, so it is read as octal: use only digits 0-7 and stay within 64 bits",
                token
            )
        }
        None => {
            return format!(
                "`{}` must be decimal digits within the 64-bit signed integer range",
                token
            )
        }
    };

    format!(
        "`{}` is read as {}: use only digits {} and stay within 64 bits",
        token, radix, digits
    )
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected next token to be {expected}, got={received}")]
    UnexpectedToken {
        expected: TokenKind,
        received: TokenKind,
    },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn { kind: TokenKind },
    #[error("could not parse {token:?} as integer")]
    IntegerParseError { token: String },
    #[error("expression nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize },
}
