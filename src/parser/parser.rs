//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level entry
//! points. The parser reads tokens from a [`Lexer`] on demand, keeping the
//! current token plus exactly one token of lookahead ("peek").
//!
//! It maintains lookup tables for:
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

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
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
    },
    stmt::parse_stmt,
};

/// Deepest nesting of expressions and blocks accepted before parsing gives up.
pub const MAX_NESTING_DEPTH: usize = 100;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    /// Diagnostics recorded so far, in the order they were found
    errors: Vec<Error>,
    /// Unmatched `{` up to and including the current token
    brace_depth: usize,
    /// Active `parse_expr` and block frames
    nesting_depth: usize,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser over `lexer`, priming the current and peek tokens.
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let brace_depth = usize::from(cur_token.kind == TokenKind::OpenCurly);

        let mut parser = Parser {
            lexer,
            cur_token,
            peek_token,
            errors: vec![],
            brace_depth,
            nesting_depth: 0,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.cur_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.cur_token.kind
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    /// Shifts the peek token into the current slot and draws a new peek token.
    pub fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.cur_token = std::mem::replace(&mut self.peek_token, next);

        match self.cur_token.kind {
            TokenKind::OpenCurly => self.brace_depth += 1,
            TokenKind::CloseCurly => self.brace_depth = self.brace_depth.saturating_sub(1),
            _ => {}
        }
    }

    /// Advances onto the peek token if it has the expected kind.
    ///
    /// On mismatch nothing is consumed and the returned error names both kinds;
    /// callers abandon the construct they were building.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peek_token.kind == expected_kind {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek_token.kind,
                },
                self.peek_token.span.start.clone(),
            ))
        }
    }

    /// Whether the peek token ends the input or the enclosing block.
    pub fn peek_ends_statement(&self) -> bool {
        match self.peek_token.kind {
            TokenKind::EOF => true,
            TokenKind::CloseCurly => self.brace_depth > 0,
            _ => false,
        }
    }

    /// Consumes the `;` ending a `let` or `return` statement.
    ///
    /// The semicolon may only be left out on the last statement of the input
    /// or of the enclosing block.
    pub fn expect_terminator(&mut self) -> Result<(), Error> {
        if self.peek_ends_statement() {
            return Ok(());
        }

        self.expect_peek(TokenKind::Semicolon)
    }

    /// Returns the diagnostics recorded so far.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns the diagnostics as human-readable messages.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn get_nud(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    pub fn get_led(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup.get(&kind).copied()
    }

    /// Binding power of `kind` as an infix operator, `Default` when it is not one.
    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power(self.cur_token.kind)
    }

    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power(self.peek_token.kind)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Enters one level of expression or block nesting, failing past [`MAX_NESTING_DEPTH`].
    ///
    /// Every successful call must be paired with [`Parser::leave_nesting`].
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.nesting_depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.nesting_depth = self.nesting_depth.saturating_sub(1);
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.cur_token.span.start.clone()
    }

    /// Skips the rest of a statement that failed to parse.
    ///
    /// Stops on a `;` outside any block, on the `}` closing the outermost
    /// block the failure happened in (taking a following `;` with it), or on EOF.
    fn synchronize(&mut self) {
        let inside_block = self.brace_depth > 0;

        loop {
            match self.cur_token.kind {
                TokenKind::EOF => return,
                TokenKind::Semicolon if self.brace_depth == 0 => return,
                TokenKind::CloseCurly if inside_block && self.brace_depth == 0 => {
                    if self.peek_token.kind == TokenKind::Semicolon {
                        self.advance();
                    }
                    return;
                }
                _ => self.advance(),
            }
        }
    }

    /// Parses statements until EOF.
    ///
    /// A statement that fails is left out of the program, its diagnostic is
    /// recorded and parsing resumes after it.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while self.cur_token.kind != TokenKind::EOF {
            match parse_stmt(self) {
                Ok(stmt) => {
                    debug!("parsed statement `{}`", stmt);
                    program.statements.push(stmt);
                }
                Err(error) => {
                    debug!("recorded diagnostic: {}", error);
                    self.errors.push(error);
                    self.synchronize();
                }
            }
            self.advance();
        }

        program
    }
}

/// Parses a source string into a Program and the diagnostics found on the way.
///
/// This is the main entry point for parsing: it builds the lexer and parser
/// and runs [`Parser::parse_program`].
pub fn parse(source: String, file: Option<String>) -> (Program, Vec<Error>) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();

    (program, parser.errors)
}
