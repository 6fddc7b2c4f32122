//! Error types for tokenizing and parsing.
//!
//! Both phases fail fast: the first problem found is returned with the
//! position of the offending input, and nothing is recovered.
//!
//! - `LexError` for characters and commands the lexer cannot classify
//! - `ParseError` for grammar violations, carrying the offending token
//! - `Error` wrapping either, returned by `parse_tex`

pub mod errors;
