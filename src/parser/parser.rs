//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse_program` loop.
//! The parser pulls tokens from a [`Lexer`] on demand and keeps a two-token
//! window (current and peek). Expression parsing uses a Pratt parser with
//! NUD/LED handlers registered per token kind.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! Malformed input never aborts the parse. Each failure is recorded as an
//! [`Error`] and parsing resumes at the next statement.

use std::collections::HashMap;

use log::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// The current and peek tokens are private; handlers reach them through the
/// crate-visible accessors below. A parser is single-use and not reentrant.
pub struct Parser {
    /// Token source
    lexer: Lexer,
    /// Token under examination
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Diagnostics in the order they were recorded
    errors: Vec<Error>,
    /// Set when a required token was missing; the current statement is dropped
    abandoned: bool,
    /// Open `{` before the current token
    brace_depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`.
    ///
    /// Registers every parse rule and advances twice so that both the
    /// current and peek tokens are populated.
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
            abandoned: false,
            brace_depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Parses statements until end of input.
    ///
    /// Statements that fail structurally are left out of the program; check
    /// [`Parser::errors`] before trusting the result.
    pub fn parse_program(&mut self) -> Program {
        debug!("parsing program from {}", self.lexer.file());

        let mut program = Program::default();

        while !self.current_token_is(TokenKind::EOF) {
            let depth = self.brace_depth();
            match parse_stmt(self) {
                Some(stmt) => program.statements.push(stmt),
                None => self.synchronize(depth),
            }
            self.advance();
        }

        debug!(
            "parsed {} statements with {} errors",
            program.len(),
            self.errors.len()
        );

        program
    }

    /// Diagnostic messages in the order they were recorded.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Diagnostics with their source positions.
    pub fn diagnostics(&self) -> &[Error] {
        &self.errors
    }

    /// Returns the current token without advancing.
    pub(crate) fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub(crate) fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub(crate) fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub(crate) fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Shifts peek into current and pulls a fresh peek from the lexer.
    pub(crate) fn advance(&mut self) {
        self.brace_depth = self.peek_brace_depth();
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Advances if the peek token is `expected_kind`, otherwise records an error.
    ///
    /// # Returns
    ///
    /// Returns true if the parser advanced onto a token of the expected kind.
    pub(crate) fn expect_peek(&mut self, expected_kind: TokenKind) -> bool {
        if self.peek_token_is(expected_kind) {
            self.advance();
            true
        } else {
            self.peek_error(expected_kind);
            false
        }
    }

    fn peek_error(&mut self, expected_kind: TokenKind) {
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected_kind,
                received: self.peek.kind,
            },
            self.peek.span.start.clone(),
        );
        self.push_error(error);
        self.abandoned = true;
    }

    /// Records that `expected_kind` was required where the current token stands.
    pub(crate) fn current_error(&mut self, expected_kind: TokenKind) {
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected_kind,
                received: self.current.kind,
            },
            self.get_position(),
        );
        self.push_error(error);
        self.abandoned = true;
    }

    pub(crate) fn push_error(&mut self, error: Error) {
        debug!("{}: {}", error.get_error_name(), error);
        self.errors.push(error);
    }

    /// True once a required token was found missing in the current statement.
    pub(crate) fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Clears and returns the abandoned flag.
    pub(crate) fn take_abandoned(&mut self) -> bool {
        std::mem::take(&mut self.abandoned)
    }

    pub(crate) fn brace_depth(&self) -> usize {
        self.brace_depth
    }

    fn peek_brace_depth(&self) -> usize {
        match self.current.kind {
            TokenKind::OpenCurly => self.brace_depth + 1,
            TokenKind::CloseCurly => self.brace_depth.saturating_sub(1),
            _ => self.brace_depth,
        }
    }

    /// Skips the remainder of an abandoned statement that began at brace depth `depth`.
    ///
    /// Stops on the statement's terminating `;`, or just before the `}` closing
    /// the enclosing block or end of input, so the caller's next advance lands
    /// on it. Braces opened inside the statement are skipped whole; parentheses
    /// are ignored since they never contain a `;` outside a nested block.
    pub(crate) fn synchronize(&mut self, depth: usize) {
        loop {
            if self.current_token_is(TokenKind::EOF) || self.peek_token_is(TokenKind::EOF) {
                break;
            }
            if self.current_token_is(TokenKind::Semicolon) && self.brace_depth <= depth {
                break;
            }
            if self.peek_token_is(TokenKind::CloseCurly) && self.peek_brace_depth() <= depth {
                break;
            }
            self.advance();
        }
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

    /// Binding power of the peek token, `Default` if it is not an operator.
    pub(crate) fn peek_binding_power(&self) -> BindingPower {
        self.binding_power(self.peek.kind)
    }

    /// Binding power of the current token, `Default` if it is not an operator.
    pub(crate) fn current_binding_power(&self) -> BindingPower {
        self.binding_power(self.current.kind)
    }

    fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
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
    ///
    /// Does not touch the binding power table, so a token may be both
    /// prefix and infix (`-`, `(`).
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the start of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }
}
