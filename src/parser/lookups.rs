use std::collections::HashMap;

use crate::{ast::ast::Expr, errors::errors::Error, lexer::tokens::TokenKind};

use super::{expr::*, parser::Parser};

/// Binding powers, weakest first. Infix parsing continues while the next
/// operator binds tighter than the current minimum.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
}

pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_infix_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_infix_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_infix_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_infix_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_infix_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_infix_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_infix_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_infix_expr);

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_identifier);
    parser.nud(TokenKind::Integer, parse_integer_literal);
    parser.nud(TokenKind::True, parse_boolean_literal);
    parser.nud(TokenKind::False, parse_boolean_literal);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::Fn, parse_function_literal);
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
