//! Error types for the lexer and parser.
//!
//! This module defines the diagnostics produced while parsing. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each grammar violation
//! - Helpful tips attached to some diagnostics

pub mod errors;

#[cfg(test)]
mod tests;
