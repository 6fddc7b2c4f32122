use std::collections::HashMap;

use crate::{
    ast::expressions::Expr,
    errors::errors::ParseError,
    lexer::tokens::{TokenKind, LEXEME_LOOKUP},
};

use super::{expr::*, parser::Parser};

/// Precedence levels of the operator tokens, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Relational,
    Additive,
    Multiplicative,
    Power,
    Subscript,
    Primary,
}

pub type NUDHandler = fn(&mut Parser) -> Result<Expr, ParseError>;

pub fn create_token_lookups(parser: &mut Parser) {
    for kind in LEXEME_LOOKUP.values() {
        if kind.is_comparison() {
            parser.led(*kind, BindingPower::Relational);
        }
    }

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive);
    parser.led(TokenKind::Dash, BindingPower::Additive);
    parser.led(TokenKind::Star, BindingPower::Multiplicative);
    parser.led(TokenKind::Cdot, BindingPower::Multiplicative);
    parser.led(TokenKind::Times, BindingPower::Multiplicative);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative);

    parser.led(TokenKind::Caret, BindingPower::Power);
    parser.led(TokenKind::Underscore, BindingPower::Subscript);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_number_expr);
    parser.nud(TokenKind::Identifier, parse_symbol_expr);
    parser.nud(TokenKind::Symbol, parse_symbol_expr);
    parser.nud(TokenKind::Transpose, parse_symbol_expr);
    parser.nud(TokenKind::Mathrm, parse_mathrm_expr);
    parser.nud(TokenKind::Mathbf, parse_mathbf_expr);

    // Groupings and environments
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenCurly, parse_grouping_expr);
    parser.nud(TokenKind::Bar, parse_grouping_expr);
    parser.nud(TokenKind::Left, parse_grouping_expr);
    parser.nud(TokenKind::Begin, parse_matrix_expr);

    // Functions
    parser.nud(TokenKind::Frac, parse_frac_expr);
    parser.nud(TokenKind::Operatorname, parse_custom_function_expr);
    for kind in LEXEME_LOOKUP.values() {
        if kind.is_function() {
            parser.nud(*kind, parse_function_expr);
        }
    }
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
