//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.monkey".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.to_string(), "unrecognised token: \"@\"");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.monkey".to_string()));
    let error = Error::new(
        ErrorImpl::NoPrefixParser {
            kind: TokenKind::Semicolon,
        },
        pos,
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(*error.get_position().1, "test.monkey");
}

#[test]
fn test_unexpected_token_message() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Identifier,
            found: TokenKind::Integer,
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(
        error.to_string(),
        "expected next token to be Identifier, got Integer instead"
    );
}

#[test]
fn test_missing_semicolon_tip() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Semicolon,
            found: TokenKind::Let,
        },
        Position::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("semicolon")),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_number_parse_error() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert_eq!(
        error.to_string(),
        "could not parse \"99999999999999999999\" as integer"
    );
    assert!(error.get_tip().to_string().contains("integer limit"));
}

#[test]
fn test_no_prefix_parser_message() {
    let error = Error::new(
        ErrorImpl::NoPrefixParser {
            kind: TokenKind::Star,
        },
        Position::null(),
    );

    assert_eq!(error.to_string(), "no prefix parse function for Star found");
}

#[test]
fn test_unterminated_block() {
    let error = Error::new(ErrorImpl::UnterminatedBlock, Position::null());

    assert_eq!(error.get_error_name(), "UnterminatedBlock");
    assert_eq!(error.get_tip().to_string(), "add a closing `}`");
}

#[test]
fn test_error_tip_none_display() {
    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_nesting_too_deep_message() {
    let error = Error::new(
        ErrorImpl::NestingTooDeep { limit: 100 },
        Position(3, Rc::new("shell".to_string())),
    );

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.to_string(), "expression nested deeper than 100 levels");
    assert!(matches!(error.get_tip(), ErrorTip::Suggestion(_)));
}
