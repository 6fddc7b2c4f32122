//! Lexical analysis for TeX expressions.
//!
//! This module turns a raw expression into a stream of tokens for parsing.
//! It handles:
//!
//! - Command sequences (`\frac`, `\alpha`, ...) checked against the lexeme table
//! - Numbers with at most one decimal point
//! - Single-letter variables and the few multi-letter keywords (`bmatrix`, `True`)
//! - Rejection of control characters left behind by unescaped backslashes
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
