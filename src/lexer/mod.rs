//! Lexical analysis module.
//!
//! This module contains the lexer (scanner) that converts source text
//! into tokens, one token per request. It handles:
//!
//! - Recognition of keywords, identifiers, integers, operators and delimiters
//! - Whitespace skipping
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
