use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{LexError, LexErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, LEXEME_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), LexError>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order, every regex is anchored at the cursor.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[\\x00-\\x1f\\x7f]").unwrap(), handler: control_handler },
        RegexPattern { regex: Regex::new("^ +").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\\\ ").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\\\\\\\").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RowBreak, "\\\\") },
        RegexPattern { regex: Regex::new("^\\\\[a-zA-Z]+").unwrap(), handler: command_handler },
        RegexPattern { regex: Regex::new("^\\\\[^a-zA-Z]").unwrap(), handler: unknown_command_handler },
        RegexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^:=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, ":=") },
        RegexPattern { regex: Regex::new("^[a-zA-Z]+").unwrap(), handler: letter_handler },
        RegexPattern { regex: Regex::new("^[-+*/^_=<>(){}|&,?]").unwrap(), handler: punctuation_handler },
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            source: String::from(source),
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32)
    }

    /// Span of the next `len` bytes from the cursor.
    pub fn span_for(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32),
        }
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|m| String::from(m.as_str()))
            .unwrap_or_default()
    }
}

fn control_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), LexError> {
    let character = lexer.remainder().chars().next().unwrap_or('\0');
    Err(LexError::new(
        LexErrorImpl::ControlCharacter { character },
        lexer.position(),
    ))
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), LexError> {
    let matched = lexer.matched(regex);
    lexer.advance_n(matched.len());
    Ok(())
}

fn command_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), LexError> {
    let command = lexer.matched(regex);

    match LEXEME_LOOKUP.get(command.as_str()) {
        Some(kind) => {
            let span = lexer.span_for(command.len());
            lexer.advance_n(command.len());
            lexer.push(MK_TOKEN!(*kind, command, span));
            Ok(())
        }
        None => Err(LexError::new(
            LexErrorImpl::UnknownCommand { command },
            lexer.position(),
        )),
    }
}

fn unknown_command_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), LexError> {
    Err(LexError::new(
        LexErrorImpl::UnknownCommand {
            command: lexer.matched(regex),
        },
        lexer.position(),
    ))
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), LexError> {
    let matched = lexer.matched(regex);
    let span = lexer.span_for(matched.len());

    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
    Ok(())
}

/// Letters only form a multi-letter token when the whole run is a keyword
/// (`bmatrix`, `True`); otherwise a single letter is consumed, so `xy` is
/// two variables.
fn letter_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), LexError> {
    let run = lexer.matched(regex);

    let (value, kind) = match LEXEME_LOOKUP.get(run.as_str()) {
        Some(kind) => (run, *kind),
        None => {
            let first = String::from(&run[..1]);
            let kind = LEXEME_LOOKUP
                .get(first.as_str())
                .copied()
                .unwrap_or(TokenKind::Identifier);
            (first, kind)
        }
    };

    let span = lexer.span_for(value.len());
    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(kind, value, span));
    Ok(())
}

fn punctuation_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), LexError> {
    let matched = lexer.matched(regex);

    match LEXEME_LOOKUP.get(matched.as_str()) {
        Some(kind) => {
            let span = lexer.span_for(matched.len());
            lexer.advance_n(matched.len());
            lexer.push(MK_TOKEN!(*kind, matched, span));
            Ok(())
        }
        None => Err(LexError::new(
            LexErrorImpl::UnrecognisedToken { token: matched },
            lexer.position(),
        )),
    }
}

/// Splits a TeX expression into tokens, ending with an `EOF` token whose
/// position is the input length. Whitespace is never emitted.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => {
                let token = lex
                    .remainder()
                    .chars()
                    .next()
                    .map(String::from)
                    .unwrap_or_default();
                return Err(LexError::new(
                    LexErrorImpl::UnrecognisedToken { token },
                    lex.position(),
                ));
            }
        }
    }

    let span = lex.span_for(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
