//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Single and two-character operators (`=` / `==`, `!` / `!=`)
//! - Recognition of keywords, identifiers and integer literals
//! - Token position tracking for error reporting
//! - Unknown bytes, which become `Illegal` tokens instead of errors

pub mod lexer;
pub mod tokens;
