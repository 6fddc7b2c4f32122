use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::Token, Position};

/// Either phase's failure, as returned by [`crate::parse_tex`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn get_position(&self) -> Position {
        match self {
            Error::Lex(error) => error.get_position(),
            Error::Parse(error) => error.get_position(),
        }
    }

    pub fn get_error_name(&self) -> &str {
        match self {
            Error::Lex(error) => error.get_error_name(),
            Error::Parse(error) => error.get_error_name(),
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match self {
            Error::Lex(error) => error.get_tip(),
            Error::Parse(error) => error.get_tip(),
        }
    }
}

/// Malformed or unknown input found while tokenizing.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at position {}", .position.0)]
pub struct LexError {
    internal_error: LexErrorImpl,
    position: Position,
}

impl LexError {
    pub fn new(error_impl: LexErrorImpl, position: Position) -> Self {
        LexError {
            internal_error: error_impl,
            position,
        }
    }

    pub fn kind(&self) -> &LexErrorImpl {
        &self.internal_error
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            LexErrorImpl::ControlCharacter { .. } => "ControlCharacter",
            LexErrorImpl::UnknownCommand { .. } => "UnknownCommand",
            LexErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            LexErrorImpl::ControlCharacter { .. } => ErrorTip::Suggestion(String::from(
                "Backslashes must be escaped, `\\frac` in a string literal is a form feed followed by `rac`",
            )),
            LexErrorImpl::UnknownCommand { command } => {
                ErrorTip::Suggestion(format!("Command `{}` is not supported", command))
            }
            LexErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
        }
    }
}

/// A grammar violation, carrying the token the parser stopped at.
///
/// The payload is boxed so the `Result`s threaded through every grammar
/// production stay small.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} (`{}` at position {})", .token.value, .token.position().0)]
pub struct ParseError {
    internal_error: Box<ParseErrorImpl>,
    token: Box<Token>,
}

impl ParseError {
    pub fn new(error_impl: ParseErrorImpl, token: Token) -> Self {
        ParseError {
            internal_error: Box::new(error_impl),
            token: Box::new(token),
        }
    }

    pub fn kind(&self) -> &ParseErrorImpl {
        &self.internal_error
    }

    pub fn get_token(&self) -> &Token {
        &self.token
    }

    pub fn get_position(&self) -> Position {
        self.token.position()
    }

    pub fn get_error_name(&self) -> &str {
        match self.kind() {
            ParseErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ParseErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ParseErrorImpl::UnmatchedDelimiter { .. } => "UnmatchedDelimiter",
            ParseErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ParseErrorImpl::AmbiguousNumbers { .. } => "AmbiguousNumbers",
            ParseErrorImpl::UnexpectedEndOfInput => "UnexpectedEndOfInput",
            ParseErrorImpl::UnsupportedEnvironment { .. } => "UnsupportedEnvironment",
            ParseErrorImpl::UnexpectedList { .. } => "UnexpectedList",
            ParseErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match self.kind() {
            ParseErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ParseErrorImpl::ExpectedToken { expected, token } => {
                ErrorTip::Suggestion(format!("Expected `{}`, found `{}`", expected, token))
            }
            ParseErrorImpl::UnmatchedDelimiter { open, expected, .. } => ErrorTip::Suggestion(
                format!("`{}` must be closed with `{}`", open, expected),
            ),
            ParseErrorImpl::InvalidAssignmentTarget { .. } => ErrorTip::Suggestion(String::from(
                "Only a single symbol can be assigned to with `:=`",
            )),
            ParseErrorImpl::AmbiguousNumbers { left, right } => ErrorTip::Suggestion(format!(
                "Write `{} \\cdot {}` or `{} * {}` to multiply numbers",
                left, right, left, right
            )),
            ParseErrorImpl::UnexpectedEndOfInput => ErrorTip::Suggestion(String::from(
                "The expression ended before it was complete",
            )),
            ParseErrorImpl::UnsupportedEnvironment { name } => ErrorTip::Suggestion(format!(
                "Environment `{}` is not supported, use `bmatrix`",
                name
            )),
            ParseErrorImpl::UnexpectedList { .. } => ErrorTip::Suggestion(String::from(
                "Comma separated values are only allowed as function arguments or subscripts",
            )),
            ParseErrorImpl::NestingTooDeep { limit } => {
                ErrorTip::Suggestion(format!("Expressions may nest at most {} levels", limit))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexErrorImpl {
    #[error("invalid control character {character:?}, backslashes must be escaped")]
    ControlCharacter { character: char },
    #[error("unknown command {command:?}")]
    UnknownCommand { command: String },
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorImpl {
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected {expected:?}, found {token:?}")]
    ExpectedToken { expected: String, token: String },
    #[error("unmatched {open:?}: expected {expected:?}, found {token:?}")]
    UnmatchedDelimiter {
        open: String,
        expected: String,
        token: String,
    },
    #[error("cannot assign to {token:?}, the target must be a symbol")]
    InvalidAssignmentTarget { token: String },
    #[error("ambiguous adjacent numbers {left:?} and {right:?}")]
    AmbiguousNumbers { left: String, right: String },
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unsupported environment {name:?}")]
    UnsupportedEnvironment { name: String },
    #[error("unexpected comma separated list at {token:?}")]
    UnexpectedList { token: String },
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}
