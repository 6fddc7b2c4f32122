use std::fmt::{self, Display};

use super::expressions::{Expr, Row};

/// Expression Types
///
/// The kind of a node, for callers that only need to special-case a few
/// variants without matching on their contents.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Number,
    Symbol,
    Unary,
    Binary,
    Call,
    Matrix,
    Accessor,
    Transpose,
    Assignment,
    Comparison,
    Boolean,
    Undefined,
}

fn operator_symbol(operator: &str) -> &str {
    match operator {
        "add" => "+",
        "subtract" => "-",
        "multiply" => "*",
        "divide" => "/",
        "pow" => "^",
        "equal" => "==",
        "unequal" => "!=",
        "smaller" => "<",
        "smaller_eq" => "<=",
        "larger" => ">",
        "larger_eq" => ">=",
        other => other,
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Plain, fully parenthesized rendering for diagnostics. This is not TeX.
impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(number) => write!(f, "{}", number.value),
            Expr::Symbol(symbol) => write!(f, "{}", symbol.name),
            Expr::Unary(unary) => write!(f, "(-{})", unary.operand),
            Expr::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.left,
                operator_symbol(binary.operator),
                binary.right
            ),
            Expr::Comparison(comparison) => write!(
                f,
                "({} {} {})",
                comparison.left,
                operator_symbol(comparison.operator),
                comparison.right
            ),
            Expr::Call(call) => {
                write!(f, "{}(", call.name)?;
                write_list(f, &call.arguments)?;
                write!(f, ")")
            }
            Expr::Matrix(matrix) => {
                write!(f, "[")?;
                for (i, row) in matrix.rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match row {
                        Row::Element(element) => write!(f, "{}", element)?,
                        Row::Elements(elements) => {
                            write!(f, "[")?;
                            write_list(f, elements)?;
                            write!(f, "]")?;
                        }
                    }
                }
                write!(f, "]")
            }
            Expr::Accessor(accessor) => {
                write!(f, "{}[", accessor.object)?;
                write_list(f, &accessor.index.dimensions)?;
                write!(f, "]")
            }
            Expr::Transpose(transpose) => write!(f, "{}^T", transpose.operand),
            Expr::Assignment(assignment) => {
                write!(f, "{} := {}", assignment.target.name, assignment.value)
            }
            Expr::Boolean(boolean) => write!(f, "{}", boolean.value),
            Expr::Undefined => write!(f, "undefined"),
        }
    }
}
