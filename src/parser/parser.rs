//! Parser context for building the expression tree.
//!
//! This module contains the main Parser struct and the parse entry points.
//! Grammar productions live in `expr`; the parser here owns the cursor,
//! the lookup tables that drive them, and the nesting budget.

use std::collections::HashMap;

use crate::{
    ast::expressions::Expr,
    errors::errors::{ParseError, ParseErrorImpl},
    lexer::tokens::{Token, TokenKind, LEXEME_LOOKUP},
    Position, Span,
};

use super::{
    expr::parse_comparison,
    lookups::{create_token_lookups, BPLookup, BindingPower, NUDHandler, NUDLookup},
};

/// Knobs for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest nesting of groupings, function arguments and assignments
    /// accepted before parsing stops with `NestingTooDeep`.
    ///
    /// Every level costs around ten stack frames of recursive descent. The
    /// default fits a 2 MiB thread stack in an unoptimized build; raise it
    /// only together with the stack size of the parsing thread.
    pub max_depth: usize,
}

/// Nesting accepted by default, see [`ParserOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Current nesting depth
    depth: usize,
    max_depth: usize,
    /// Bare `|` groups currently open, where a `|` closes instead of
    /// starting an implicit product
    open_bars: usize,
    /// Lookup table for primary expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for operator binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// A stream that does not end in `EOF` gets one appended, so the cursor
    /// always has a token to look at.
    pub fn new(mut tokens: Vec<Token>, options: &ParserOptions) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end)
                .unwrap_or(Position::null());
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span { start: end, end },
            });
        }

        Parser {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
            open_bars: 0,
            nud_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// The token consumed last, if any.
    pub fn previous_token(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|index| self.tokens.get(index))
    }

    /// Looks `offset` tokens past the current one, stopping at `EOF`.
    pub fn peek(&self, offset: usize) -> &Token {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Advances to the next token and returns the previous token. The
    /// cursor never moves past `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<ParseErrorImpl>,
    ) -> Result<Token, ParseError> {
        if self.current_token_kind() != expected_kind {
            let error = error.unwrap_or_else(|| ParseErrorImpl::ExpectedToken {
                expected: lexeme_for(expected_kind),
                token: self.current_token().value.clone(),
            });
            Err(ParseError::new(error, self.current_token().clone()))
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, ParseError> {
        self.expect_error(expected_kind, None)
    }

    /// An error for the current token, which nothing could accept.
    pub fn unexpected(&self) -> ParseError {
        let token = self.current_token().clone();
        let error = if token.kind == TokenKind::EOF {
            ParseErrorImpl::UnexpectedEndOfInput
        } else {
            ParseErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            }
        };
        ParseError::new(error, token)
    }

    pub fn error_here(&self, error: ParseErrorImpl) -> ParseError {
        ParseError::new(error, self.current_token().clone())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the primary (NUD) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Binding power of the current token, `Default` if it is not an operator.
    pub fn current_binding_power(&self) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&self.current_token_kind())
            .unwrap_or(&BindingPower::Default)
    }

    /// Registers an operator token at a precedence level.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower) {
        self.binding_power_lookup.insert(kind, binding_power);
    }

    /// Registers a handler for a token that starts a primary expression.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.binding_power_lookup.insert(kind, BindingPower::Primary);
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Whether the current token can start an implicitly multiplied operand.
    pub fn at_implicit_operand(&self) -> bool {
        let kind = self.current_token_kind();
        if kind == TokenKind::Bar && self.open_bars > 0 {
            return false;
        }
        self.nud_lookup.contains_key(&kind)
    }

    /// Enters one nesting level, failing once `max_depth` is exceeded.
    pub fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(self.error_here(ParseErrorImpl::NestingTooDeep {
                limit: self.max_depth,
            }));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn open_bars(&self) -> usize {
        self.open_bars
    }

    pub fn set_open_bars(&mut self, open_bars: usize) {
        self.open_bars = open_bars;
    }
}

/// The first lexeme spelling `kind`, for error messages.
fn lexeme_for(kind: TokenKind) -> String {
    match kind {
        TokenKind::EOF => String::from("EOF"),
        TokenKind::Number => String::from("number"),
        TokenKind::Identifier => String::from("identifier"),
        _ => {
            let mut lexemes = LEXEME_LOOKUP
                .iter()
                .filter(|(_, candidate)| **candidate == kind)
                .map(|(lexeme, _)| *lexeme)
                .collect::<Vec<&str>>();
            lexemes.sort_unstable();
            lexemes
                .first()
                .map(|lexeme| String::from(*lexeme))
                .unwrap_or_else(|| kind.to_string())
        }
    }
}

/// Parses a token stream into an expression tree with the default options.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    parse_with_options(tokens, &ParserOptions::default())
}

/// Parses a whole token stream; anything left before `EOF` is an error.
pub fn parse_with_options(tokens: Vec<Token>, options: &ParserOptions) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(tokens, options);
    create_token_lookups(&mut parser);

    let expr = parse_comparison(&mut parser)?;

    if parser.has_tokens() {
        return Err(parser.unexpected());
    }

    Ok(expr)
}
