//! Lexical analysis module.
//!
//! The parser only needs something implementing [`tokens::TokenSource`].
//! This module provides the token model and two such sources:
//!
//! - [`lexer::Lexer`], a regex-driven scanner producing tokens on demand
//! - [`tokens::TokenStream`], a source over an already built token list

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
