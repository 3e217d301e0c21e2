//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. The parser reads tokens one
//! at a time from a [`TokenSource`], keeping the current token and one token
//! of lookahead, and dispatches through lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Failures never abort the parse. They are collected as [`Error`]s and the
//! affected statement or expression is left out of the tree.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind, TokenSource},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// How deeply expressions may nest before the parser gives up on them.
pub const MAX_EXPR_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// Each parser owns its token source, diagnostics and lookup tables, so
/// independent parsers never share state.
pub struct Parser {
    /// Where tokens come from
    source: Box<dyn TokenSource>,
    /// The token being parsed
    current_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// Diagnostics in the order they were found
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Number of expressions currently being parsed inside one another
    expr_depth: usize,
}

impl Parser {
    /// Creates a new Parser reading from `source`.
    ///
    /// The lookup tables are installed and the first two tokens are read, so
    /// `current_token` and `peek_token` are both valid afterwards.
    pub fn new<S: TokenSource + 'static>(source: S) -> Self {
        let mut source: Box<dyn TokenSource> = Box::new(source);
        let current_token = source.next_token();
        let peek_token = source.next_token();

        let mut parser = Parser {
            source,
            current_token,
            peek_token,
            errors: Vec::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            expr_depth: 0,
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Parses statements until the end of the token stream.
    ///
    /// Always returns a program; check [`Parser::errors`] before trusting it.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_token_is(TokenKind::EOF) {
            if let Some(stmt) = parse_stmt(self) {
                program.statements.push(stmt);
            }
            self.advance();
        }

        debug!(
            statements = program.statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );

        program
    }

    /// Returns the diagnostics collected so far, oldest first.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns the diagnostics as plain messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Shifts the lookahead into the current token and pulls a fresh one.
    pub fn advance(&mut self) {
        let next = self.source.next_token();
        self.current_token = std::mem::replace(&mut self.peek_token, next);
    }

    /// Advances if the lookahead token is of the expected kind.
    ///
    /// # Returns
    ///
    /// The new current token, or `None` after recording an
    /// `UnexpectedToken` diagnostic (the cursor is left untouched).
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Option<Token> {
        if self.peek_token_is(expected_kind) {
            self.advance();
            Some(self.current_token.clone())
        } else {
            self.push_error(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    received: self.peek_token.kind,
                },
                self.peek_token.span.start.clone(),
            );
            None
        }
    }

    /// Binding power of the lookahead token, `Lowest` if it is not an infix operator.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.peek_token.kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    /// Steps one expression level deeper.
    ///
    /// Past [`MAX_EXPR_DEPTH`] this records a `NestingTooDeep` diagnostic,
    /// skips to the end of the statement and returns `false`. Every `true`
    /// must be paired with [`Parser::leave_expr`].
    pub fn enter_expr(&mut self) -> bool {
        if self.expr_depth >= MAX_EXPR_DEPTH {
            self.push_error(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_EXPR_DEPTH,
                },
                self.current_token.span.start.clone(),
            );
            while !self.peek_token_is(TokenKind::Semicolon) && !self.peek_token_is(TokenKind::EOF) {
                self.advance();
            }
            return false;
        }

        self.expr_depth += 1;
        true
    }

    pub fn leave_expr(&mut self) {
        self.expr_depth = self.expr_depth.saturating_sub(1);
    }

    /// Records a diagnostic.
    pub fn push_error(&mut self, error: ErrorImpl, position: Position) {
        debug!(%error, offset = position.0, "parse error");
        self.errors.push(Error::new(error, position));
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses source text into a [`Program`].
///
/// This is the main entry point. It lexes `source` on demand and parses
/// every statement until EOF.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - Optional file name recorded in token positions
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, holding the diagnostics
/// - The parsed Program
pub fn parse(source: String, file: Option<String>) -> (Parser, Program) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();

    (parser, program)
}
