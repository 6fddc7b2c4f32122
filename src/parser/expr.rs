//! One function per grammar production, loosest binding first:
//!
//! ```text
//! comparison := expression ( cmp expression )? | Symbol ":=" comparison
//! expression := term ( (+|-) term )*
//! term       := factor ( (*|\cdot|\times|/) factor | power )*
//! factor     := (-)? power
//! power      := subscript ( ^ primary )*
//! subscript  := primary ( _ index )*
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::expressions::{AssignmentExpr, Expr, Row},
    errors::errors::{ParseError, ParseErrorImpl},
    lexer::tokens::{Token, TokenKind, SYMBOL_LOOKUP},
};

use super::{lookups::BindingPower, parser::Parser};

lazy_static! {
    static ref DECIMAL: Regex = Regex::new("^[0-9]+(\\.[0-9]+)?$").unwrap();
}

fn operation_of(token: &Token) -> Result<&'static str, ParseError> {
    token.kind.operation().ok_or_else(|| {
        ParseError::new(
            ParseErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token.clone(),
        )
    })
}

/// Tokens that spell a symbol directly, without any grouping around it.
fn is_bare_symbol(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Identifier | TokenKind::Symbol | TokenKind::Transpose | TokenKind::Mathrm
    )
}

pub fn parse_comparison(parser: &mut Parser) -> Result<Expr, ParseError> {
    let start = parser.current_token().clone();
    let left = parse_expression(parser)?;

    if parser.current_token_kind() == TokenKind::Assign {
        let target = match left {
            Expr::Symbol(symbol) if is_bare_symbol(start.kind) => symbol,
            _ => {
                return Err(ParseError::new(
                    ParseErrorImpl::InvalidAssignmentTarget {
                        token: start.value.clone(),
                    },
                    start,
                ))
            }
        };
        parser.advance();

        parser.enter()?;
        let value = parse_comparison(parser)?;
        parser.exit();

        return Ok(Expr::Assignment(AssignmentExpr {
            target,
            value: Box::new(value),
        }));
    }

    if parser.current_binding_power() == BindingPower::Relational {
        let operator = parser.advance();
        let right = parse_expression(parser)?;
        return Ok(Expr::comparison(operation_of(&operator)?, left, right));
    }

    Ok(left)
}

pub fn parse_expression(parser: &mut Parser) -> Result<Expr, ParseError> {
    let mut left = parse_term(parser)?;

    while parser.current_binding_power() == BindingPower::Additive {
        let operator = parser.advance();
        let right = parse_term(parser)?;
        left = Expr::binary(operation_of(&operator)?, left, right);
    }

    Ok(left)
}

/// Explicit products take a `factor` (`2 * -x`), implicit ones a `power`.
/// Two number literals side by side (`5 5`, `2^3 4`) are rejected rather
/// than guessed at; a grouping between them (`(2)(3)`, `5(5)`) is fine.
pub fn parse_term(parser: &mut Parser) -> Result<Expr, ParseError> {
    let mut left = parse_factor(parser)?;

    loop {
        if parser.current_binding_power() == BindingPower::Multiplicative {
            let operator = parser.advance();
            let right = parse_factor(parser)?;
            left = Expr::binary(operation_of(&operator)?, left, right);
        } else if parser.at_implicit_operand() {
            if parser.current_token_kind() == TokenKind::Number {
                if let Some(previous) = parser
                    .previous_token()
                    .filter(|token| token.kind == TokenKind::Number)
                {
                    let token = parser.current_token().clone();
                    return Err(ParseError::new(
                        ParseErrorImpl::AmbiguousNumbers {
                            left: previous.value.clone(),
                            right: token.value.clone(),
                        },
                        token,
                    ));
                }
            }

            let right = parse_power(parser)?;
            left = Expr::implicit_multiply(left, right);
        } else {
            break;
        }
    }

    Ok(left)
}

pub fn parse_factor(parser: &mut Parser) -> Result<Expr, ParseError> {
    if parser.current_token_kind() == TokenKind::Dash {
        parser.advance();
        let operand = parse_power(parser)?;
        return Ok(Expr::negate(operand));
    }

    parse_power(parser)
}

/// `X^T` is a transpose rather than a power when the exponent is exactly
/// the symbol `T`.
pub fn parse_power(parser: &mut Parser) -> Result<Expr, ParseError> {
    let mut left = parse_subscript(parser)?;

    while parser.current_binding_power() == BindingPower::Power {
        let operator = parser.advance();
        let exponent = parse_primary(parser)?;

        left = if exponent.as_symbol() == Some("T") {
            Expr::transpose(left)
        } else {
            Expr::binary(operation_of(&operator)?, left, exponent)
        };
    }

    Ok(left)
}

pub fn parse_subscript(parser: &mut Parser) -> Result<Expr, ParseError> {
    let mut left = parse_primary(parser)?;

    while parser.current_binding_power() == BindingPower::Subscript {
        parser.advance();
        let dimensions = parse_index(parser)?;
        left = Expr::accessor(left, dimensions);
    }

    Ok(left)
}

/// The index after `_`: `{de}` is the single symbol `de`, `(i, j)` is a
/// two-dimensional index, anything else is one primary. A run starting
/// with a digit (`{1 2}`, `{2x}`) is an ordinary expression.
fn parse_index(parser: &mut Parser) -> Result<Vec<Expr>, ParseError> {
    match parser.current_token_kind() {
        TokenKind::OpenCurly => {
            let run = identifier_run_length(parser, 1);
            if run >= 2
                && parser.peek(1).kind != TokenKind::Number
                && parser.peek(run + 1).kind == TokenKind::CloseCurly
            {
                let name = parse_braced_identifier(parser)?;
                return Ok(vec![Expr::symbol(&name)]);
            }
            Ok(vec![parse_primary(parser)?])
        }
        TokenKind::OpenParen => {
            parser.enter()?;
            let dimensions = parse_grouping(parser, true)?;
            parser.exit();
            Ok(dimensions)
        }
        TokenKind::Left if parser.peek(1).kind == TokenKind::OpenParen => {
            parser.enter()?;
            let dimensions = parse_grouping(parser, true)?;
            parser.exit();
            Ok(dimensions)
        }
        _ => Ok(vec![parse_primary(parser)?]),
    }
}

pub fn parse_primary(parser: &mut Parser) -> Result<Expr, ParseError> {
    let handler = match parser.get_nud_lookup().get(&parser.current_token_kind()) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected()),
    };

    parser.enter()?;
    let expr = handler(parser)?;
    parser.exit();

    Ok(expr)
}

pub fn parse_number_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let token = parser.advance();

    if !DECIMAL.is_match(&token.value) {
        return Err(ParseError::new(
            ParseErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token,
        ));
    }

    Ok(Expr::number(&token.value))
}

pub fn parse_symbol_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let token = parser.advance();

    match token.kind {
        TokenKind::Symbol => match SYMBOL_LOOKUP.get(token.value.as_str()) {
            Some(name) => Ok(Expr::symbol(name)),
            None => Err(ParseError::new(
                ParseErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token,
            )),
        },
        _ => Ok(Expr::symbol(&token.value)),
    }
}

/// `\mathrm{True}` and `\mathrm{False}` are booleans, any other upright
/// name is a multi-letter symbol.
pub fn parse_mathrm_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    parser.advance();
    let name = parse_braced_identifier(parser)?;

    Ok(match name.as_str() {
        "True" => Expr::boolean(true),
        "False" => Expr::boolean(false),
        _ => Expr::symbol(&name),
    })
}

/// `\mathbf{?}` is the undefined literal.
pub fn parse_mathbf_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    parser.advance();
    parser.expect(TokenKind::OpenCurly)?;
    parser.expect(TokenKind::Question)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::Undefined)
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let mut values = parse_grouping(parser, false)?;
    // a single value is guaranteed when lists are refused
    values.pop().ok_or_else(|| parser.unexpected())
}

/// Parses `( … )`, `{ … }` or `| … |`, optionally wrapped in
/// `\left … \right`. Commas are only accepted inside parentheses, and only
/// when `allow_list` is set. Bars wrap their content in `abs`.
pub fn parse_grouping(parser: &mut Parser, allow_list: bool) -> Result<Vec<Expr>, ParseError> {
    let left = if parser.current_token_kind() == TokenKind::Left {
        Some(parser.advance())
    } else {
        None
    };

    let open = parser.current_token().clone();
    let (close_kind, close_lexeme) = match open.kind {
        TokenKind::OpenParen => (TokenKind::CloseParen, ")"),
        TokenKind::OpenCurly => (TokenKind::CloseCurly, "}"),
        TokenKind::Bar => (TokenKind::Bar, "|"),
        _ => {
            return Err(parser.error_here(ParseErrorImpl::ExpectedToken {
                expected: String::from("("),
                token: open.value.clone(),
            }))
        }
    };
    parser.advance();

    // only a bare `|` is closed by another bare `|`; `\left|` waits for `\right`
    let outer_bars = parser.open_bars();
    let bare_bar = open.kind == TokenKind::Bar && left.is_none();
    parser.set_open_bars(if bare_bar { outer_bars + 1 } else { 0 });

    let mut values = vec![parse_comparison(parser)?];
    while parser.current_token_kind() == TokenKind::Comma {
        if open.kind != TokenKind::OpenParen || !allow_list {
            return Err(parser.error_here(ParseErrorImpl::UnexpectedList {
                token: parser.current_token().value.clone(),
            }));
        }
        parser.advance();
        values.push(parse_comparison(parser)?);
    }

    parser.set_open_bars(outer_bars);

    if let Some(left) = &left {
        if parser.current_token_kind() != TokenKind::Right {
            return Err(parser.error_here(ParseErrorImpl::UnmatchedDelimiter {
                open: left.value.clone(),
                expected: String::from("\\right"),
                token: parser.current_token().value.clone(),
            }));
        }
        parser.advance();
    }

    if parser.current_token_kind() != close_kind {
        return Err(parser.error_here(ParseErrorImpl::UnmatchedDelimiter {
            open: open.value.clone(),
            expected: String::from(close_lexeme),
            token: parser.current_token().value.clone(),
        }));
    }
    parser.advance();

    if open.kind == TokenKind::Bar {
        return Ok(vec![Expr::call(operation_of(&open)?, values)]);
    }

    Ok(values)
}

/// `\begin{bmatrix} a & b \\ c & d \end{bmatrix}`. Rows may differ in
/// length; a trailing `\\` before `\end` is allowed.
pub fn parse_matrix_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let begin = parser.advance();
    parse_environment_name(parser)?;

    let outer_bars = parser.open_bars();
    parser.set_open_bars(0);

    let mut rows = vec![];
    loop {
        let mut elements = vec![parse_expression(parser)?];
        while parser.current_token_kind() == TokenKind::Ampersand {
            parser.advance();
            elements.push(parse_expression(parser)?);
        }

        rows.push(match elements.len() {
            1 => Row::Element(elements.remove(0)),
            _ => Row::Elements(elements),
        });

        match parser.current_token_kind() {
            TokenKind::RowBreak => {
                parser.advance();
                if parser.current_token_kind() == TokenKind::End {
                    break;
                }
            }
            TokenKind::End => break,
            _ => {
                return Err(parser.error_here(ParseErrorImpl::UnmatchedDelimiter {
                    open: begin.value.clone(),
                    expected: String::from("\\end"),
                    token: parser.current_token().value.clone(),
                }))
            }
        }
    }

    parser.set_open_bars(outer_bars);
    parser.expect(TokenKind::End)?;
    parse_environment_name(parser)?;

    Ok(Expr::matrix(rows))
}

/// `{bmatrix}`; any other environment name is refused.
fn parse_environment_name(parser: &mut Parser) -> Result<(), ParseError> {
    parser.expect(TokenKind::OpenCurly)?;

    if parser.current_token_kind() != TokenKind::BMatrix {
        let token = parser.current_token().clone();
        let run = identifier_run_length(parser, 0);
        let name = if run > 0 {
            (0..run)
                .filter_map(|offset| parser.peek(offset).identifier_fragment())
                .collect::<String>()
        } else {
            token.value.clone()
        };
        return Err(ParseError::new(
            ParseErrorImpl::UnsupportedEnvironment { name },
            token,
        ));
    }
    parser.advance();

    parser.expect(TokenKind::CloseCurly)?;
    Ok(())
}

/// `\frac{a}{b}`, or `\frac{a}b` where the denominator is a single primary.
pub fn parse_frac_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let frac = parser.advance();

    if parser.current_token_kind() != TokenKind::OpenCurly {
        return Err(parser.error_here(ParseErrorImpl::ExpectedToken {
            expected: String::from("{"),
            token: parser.current_token().value.clone(),
        }));
    }
    let numerator = parse_grouping_expr(parser)?;

    let denominator = if parser.current_token_kind() == TokenKind::OpenCurly {
        parse_grouping_expr(parser)?
    } else {
        parse_primary(parser)?
    };

    Ok(Expr::binary(operation_of(&frac)?, numerator, denominator))
}

/// `\sin x`, `\sqrt{x}`, `\log_2 x`. A logarithm's base becomes its
/// second argument.
pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    let function = parser.advance();
    let name = operation_of(&function)?;

    let base = if function.kind == TokenKind::Log
        && parser.current_token_kind() == TokenKind::Underscore
    {
        parser.advance();
        Some(parse_primary(parser)?)
    } else {
        None
    };

    let mut arguments = parse_argument(parser)?;
    arguments.extend(base);

    Ok(Expr::call(name, arguments))
}

/// `\operatorname{name}` followed by its argument.
pub fn parse_custom_function_expr(parser: &mut Parser) -> Result<Expr, ParseError> {
    parser.advance();
    let name = parse_braced_identifier(parser)?;
    let arguments = parse_argument(parser)?;

    Ok(Expr::call(&name, arguments))
}

/// A function argument: a parenthesized list, or one primary.
fn parse_argument(parser: &mut Parser) -> Result<Vec<Expr>, ParseError> {
    let parenthesized = match parser.current_token_kind() {
        TokenKind::OpenParen => true,
        TokenKind::Left => parser.peek(1).kind == TokenKind::OpenParen,
        _ => false,
    };

    if parenthesized {
        parser.enter()?;
        let arguments = parse_grouping(parser, true)?;
        parser.exit();
        Ok(arguments)
    } else {
        Ok(vec![parse_primary(parser)?])
    }
}

/// Number of consecutive letter, digit and symbol tokens starting `offset`
/// tokens ahead.
fn identifier_run_length(parser: &Parser, offset: usize) -> usize {
    let mut length = 0;
    while parser.peek(offset + length).identifier_fragment().is_some() {
        length += 1;
    }
    length
}

/// Reassembles `{` name `}` into one identifier, so `\operatorname{max}`
/// is `max` rather than `m`, `a`, `x`. Names may contain digits but not
/// start with one.
fn parse_braced_identifier(parser: &mut Parser) -> Result<String, ParseError> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut name = String::new();
    if parser.current_token_kind() == TokenKind::Number {
        return Err(parser.error_here(ParseErrorImpl::ExpectedToken {
            expected: String::from("identifier"),
            token: parser.current_token().value.clone(),
        }));
    }

    while let Some(fragment) = parser.current_token().identifier_fragment().map(String::from) {
        name.push_str(&fragment);
        parser.advance();
    }

    if name.is_empty() {
        return Err(parser.error_here(ParseErrorImpl::ExpectedToken {
            expected: String::from("identifier"),
            token: parser.current_token().value.clone(),
        }));
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(name)
}
