use crate::lexer::tokens::{TokenKind, UNARY_MINUS};

use super::ast::ExprType;

// LITERALS

/// Number Expression
/// Keeps the lexeme as written; conversion belongs to the evaluation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: String,
}

/// Symbol Expression
/// An identifier, already resolved to its canonical spelling (`\alpha` is `alpha`).
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
}

// COMPLEX

/// Prefix Expression
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: &'static str,
    pub operand: Box<Expr>,
}

/// Binary Expression
///
/// `implicit` marks a multiplication synthesized from adjacency (`2x`)
/// rather than written with `*`, `\cdot` or `\times`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator: &'static str,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpr {
    pub operator: &'static str,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// Call Expression
/// Named functions, `\operatorname{...}` functions and `|x|` all become calls.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    pub arguments: Vec<Expr>,
}

/// One row of a `bmatrix`.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// A row holding exactly one element is stored bare, which is how a
    /// column vector is told apart from a matrix.
    Element(Expr),
    Elements(Vec<Expr>),
}

/// Matrix Expression
/// Rows are not required to be the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixExpr {
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexPath {
    pub dimensions: Vec<Expr>,
}

/// Accessor Expression
/// `a_b` is `Accessor(a, [b])`; chained subscripts nest.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorExpr {
    pub object: Box<Expr>,
    pub index: IndexPath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransposeExpr {
    pub operand: Box<Expr>,
}

/// Assignment Expression
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: SymbolExpr,
    pub value: Box<Expr>,
}

/// A parsed expression. Every node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    Symbol(SymbolExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
    Matrix(MatrixExpr),
    Accessor(AccessorExpr),
    Transpose(TransposeExpr),
    Assignment(AssignmentExpr),
    Comparison(ComparisonExpr),
    Boolean(BooleanExpr),
    Undefined,
}

impl Expr {
    pub fn number(value: &str) -> Self {
        Expr::Number(NumberExpr {
            value: String::from(value),
        })
    }

    pub fn symbol(name: &str) -> Self {
        Expr::Symbol(SymbolExpr {
            name: String::from(name),
        })
    }

    pub fn boolean(value: bool) -> Self {
        Expr::Boolean(BooleanExpr { value })
    }

    pub fn negate(operand: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            operator: UNARY_MINUS,
            operand: Box::new(operand),
        })
    }

    pub fn binary(operator: &'static str, left: Expr, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            implicit: false,
        })
    }

    pub fn implicit_multiply(left: Expr, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            operator: TokenKind::Star.operation().unwrap_or("multiply"),
            left: Box::new(left),
            right: Box::new(right),
            implicit: true,
        })
    }

    pub fn comparison(operator: &'static str, left: Expr, right: Expr) -> Self {
        Expr::Comparison(ComparisonExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn call(name: &str, arguments: Vec<Expr>) -> Self {
        Expr::Call(CallExpr {
            name: String::from(name),
            arguments,
        })
    }

    pub fn matrix(rows: Vec<Row>) -> Self {
        Expr::Matrix(MatrixExpr { rows })
    }

    pub fn accessor(object: Expr, dimensions: Vec<Expr>) -> Self {
        Expr::Accessor(AccessorExpr {
            object: Box::new(object),
            index: IndexPath { dimensions },
        })
    }

    pub fn transpose(operand: Expr) -> Self {
        Expr::Transpose(TransposeExpr {
            operand: Box::new(operand),
        })
    }

    pub fn assignment(target: &str, value: Expr) -> Self {
        Expr::Assignment(AssignmentExpr {
            target: SymbolExpr {
                name: String::from(target),
            },
            value: Box::new(value),
        })
    }

    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Number(_) => ExprType::Number,
            Expr::Symbol(_) => ExprType::Symbol,
            Expr::Unary(_) => ExprType::Unary,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Call(_) => ExprType::Call,
            Expr::Matrix(_) => ExprType::Matrix,
            Expr::Accessor(_) => ExprType::Accessor,
            Expr::Transpose(_) => ExprType::Transpose,
            Expr::Assignment(_) => ExprType::Assignment,
            Expr::Comparison(_) => ExprType::Comparison,
            Expr::Boolean(_) => ExprType::Boolean,
            Expr::Undefined => ExprType::Undefined,
        }
    }

    /// The symbol's name if this is exactly a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(symbol) => Some(&symbol.name),
            _ => None,
        }
    }
}
