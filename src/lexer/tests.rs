//! Unit tests for the lexer module.
//!
//! - Commands, Greek letters and keywords
//! - Numbers and single-letter variables
//! - Operators and punctuation
//! - Whitespace handling and positions
//! - Error cases

use super::{
    lexer::tokenize,
    tokens::{TokenKind, LEXEME_LOOKUP, OPERATION_LOOKUP, SYMBOL_LOOKUP},
};
use crate::errors::errors::LexErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / ^ _ = < > := \\cdot \\times"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Caret,
            TokenKind::Underscore,
            TokenKind::Equals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Assign,
            TokenKind::Cdot,
            TokenKind::Times,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comparison_spellings() {
    assert_eq!(
        kinds("\\ne \\neq \\le \\leq \\ge \\geq"),
        vec![
            TokenKind::NotEquals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::GreaterEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_number_takes_one_decimal_point() {
    let error = tokenize("1.2.3").unwrap_err();

    assert_eq!(
        error.kind(),
        &LexErrorImpl::UnrecognisedToken {
            token: ".".to_string()
        }
    );
    assert_eq!(error.get_position().0, 3);
}

#[test]
fn test_adjacent_letters_are_separate_variables() {
    let tokens = tokenize("xy").unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "y");
}

#[test]
fn test_keyword_runs_stay_whole() {
    let tokens = tokenize("bmatrix True False").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::BMatrix);
    assert_eq!(tokens[0].value, "bmatrix");
    assert_eq!(tokens[1].kind, TokenKind::True);
    assert_eq!(tokens[2].kind, TokenKind::False);
}

#[test]
fn test_single_letter_keywords_inside_runs() {
    // `e` is Euler's number and `T` the transpose marker even mid-run
    let tokens = tokenize("xeT").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].value, "e");
    assert_eq!(tokens[2].kind, TokenKind::Transpose);
}

#[test]
fn test_tokenize_functions() {
    assert_eq!(
        kinds("\\sqrt\\frac\\sin\\cos\\tan\\csc\\sec\\cot\\arcsin\\arccos\\arctan\\sinh\\cosh\\tanh\\log\\ln\\det\\operatorname"),
        vec![
            TokenKind::Sqrt,
            TokenKind::Frac,
            TokenKind::Sin,
            TokenKind::Cos,
            TokenKind::Tan,
            TokenKind::Csc,
            TokenKind::Sec,
            TokenKind::Cot,
            TokenKind::Arcsin,
            TokenKind::Arccos,
            TokenKind::Arctan,
            TokenKind::Sinh,
            TokenKind::Cosh,
            TokenKind::Tanh,
            TokenKind::Log,
            TokenKind::Ln,
            TokenKind::Det,
            TokenKind::Operatorname,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_groupings_and_environment() {
    assert_eq!(
        kinds("\\left( \\right) { } | , \\begin{bmatrix} 1 & 2 \\\\ 3 \\end{bmatrix}"),
        vec![
            TokenKind::Left,
            TokenKind::OpenParen,
            TokenKind::Right,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Bar,
            TokenKind::Comma,
            TokenKind::Begin,
            TokenKind::OpenCurly,
            TokenKind::BMatrix,
            TokenKind::CloseCurly,
            TokenKind::Number,
            TokenKind::Ampersand,
            TokenKind::Number,
            TokenKind::RowBreak,
            TokenKind::Number,
            TokenKind::End,
            TokenKind::OpenCurly,
            TokenKind::BMatrix,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_literals() {
    assert_eq!(
        kinds("\\mathrm{True}\\mathbf{?}"),
        vec![
            TokenKind::Mathrm,
            TokenKind::OpenCurly,
            TokenKind::True,
            TokenKind::CloseCurly,
            TokenKind::Mathbf,
            TokenKind::OpenCurly,
            TokenKind::Question,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_named_symbols() {
    let tokens = tokenize("\\alpha \\pi \\infty \\Omega").unwrap();

    for token in &tokens[..4] {
        assert_eq!(token.kind, TokenKind::Symbol);
    }
    assert_eq!(tokens[0].value, "\\alpha");
    assert_eq!(tokens[0].identifier_fragment(), Some("alpha"));
    assert_eq!(tokens[2].identifier_fragment(), Some("infinity"));
}

#[test]
fn test_whitespace_is_not_emitted() {
    assert_eq!(
        kinds("  x \\ + \\  y  "),
        vec![
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_positions() {
    let tokens = tokenize("12 + \\alpha").unwrap();

    assert_eq!(tokens[0].position().0, 0);
    assert_eq!(tokens[0].span.end.0, 2);
    assert_eq!(tokens[1].position().0, 3);
    assert_eq!(tokens[2].position().0, 5);
    assert_eq!(tokens[2].span.end.0, 11);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
    assert_eq!(tokens[3].position().0, 11);
}

#[test]
fn test_positions_never_decrease() {
    let tokens = tokenize("\\frac{a}{b} + \\begin{bmatrix}1&2\\\\3&4\\end{bmatrix}^T").unwrap();

    for pair in tokens.windows(2) {
        assert!(pair[0].position() <= pair[1].position());
    }
}

#[test]
fn test_empty_input_is_just_eof() {
    let tokens = tokenize("").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].position().0, 0);
}

#[test]
fn test_control_character_is_rejected() {
    // "\frac" written without escaping the backslash
    let error = tokenize("\x0crac{1}{2}").unwrap_err();

    assert_eq!(
        error.kind(),
        &LexErrorImpl::ControlCharacter { character: '\x0c' }
    );
    assert_eq!(error.get_position().0, 0);
    assert!(error.to_string().contains("backslashes must be escaped"));
}

#[test]
fn test_tab_and_newline_are_control_characters() {
    assert!(tokenize("x\t+ y").is_err());
    assert!(tokenize("x\n+ y").is_err());
}

#[test]
fn test_unknown_command() {
    let error = tokenize("2 + \\foo").unwrap_err();

    assert_eq!(
        error.kind(),
        &LexErrorImpl::UnknownCommand {
            command: "\\foo".to_string()
        }
    );
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_backslash_punctuation_is_unknown_command() {
    let error = tokenize("a\\,b").unwrap_err();

    assert_eq!(error.get_error_name(), "UnknownCommand");
    assert_eq!(error.get_position().0, 1);
}

#[test]
fn test_unrecognised_characters() {
    assert_eq!(tokenize("x % 2").unwrap_err().get_position().0, 2);
    assert_eq!(tokenize("a : b").unwrap_err().get_error_name(), "UnrecognisedToken");
    assert_eq!(tokenize("[1]").unwrap_err().get_position().0, 0);
    assert_eq!(tokenize("2π").unwrap_err().get_position().0, 1);
}

#[test]
fn test_tokenize_is_repeatable() {
    let source = "\\operatorname{max}(a_{de}, |x|) \\le \\sqrt{2}";

    assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
}

#[test]
fn test_every_function_has_an_operation_name() {
    for (lexeme, kind) in LEXEME_LOOKUP.iter() {
        if kind.is_function() {
            assert!(
                OPERATION_LOOKUP.contains_key(kind),
                "{} has no operation name",
                lexeme
            );
        }
    }
}

#[test]
fn test_comparison_kinds() {
    for kind in kinds("= \\ne < \\le > \\ge") {
        assert!(kind == TokenKind::EOF || kind.is_comparison());
    }
    assert!(!TokenKind::Assign.is_comparison());
    assert!(!TokenKind::Plus.is_comparison());
}

#[test]
fn test_every_symbol_is_a_lexeme() {
    for lexeme in SYMBOL_LOOKUP.keys() {
        assert_eq!(LEXEME_LOOKUP.get(lexeme), Some(&TokenKind::Symbol));
    }
}
