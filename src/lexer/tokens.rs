use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span};

/// Leading `-` shares its lexeme with subtraction, so it has no table entry.
pub const UNARY_MINUS: &str = "unary_minus";

lazy_static! {
    /// Every lexeme the lexer accepts, mapped to the kind it produces.
    ///
    /// Command sequences are stored with their leading backslash. Bare
    /// letters only appear here when they mean something other than a
    /// variable.
    pub static ref LEXEME_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        // Arithmetic
        map.insert("+", TokenKind::Plus);
        map.insert("-", TokenKind::Dash);
        map.insert("*", TokenKind::Star);
        map.insert("\\cdot", TokenKind::Cdot);
        map.insert("\\times", TokenKind::Times);
        map.insert("/", TokenKind::Slash);
        map.insert("^", TokenKind::Caret);
        map.insert("_", TokenKind::Underscore);

        // Comparison and assignment
        map.insert("=", TokenKind::Equals);
        map.insert("\\ne", TokenKind::NotEquals);
        map.insert("\\neq", TokenKind::NotEquals);
        map.insert("<", TokenKind::Less);
        map.insert("\\le", TokenKind::LessEquals);
        map.insert("\\leq", TokenKind::LessEquals);
        map.insert(">", TokenKind::Greater);
        map.insert("\\ge", TokenKind::GreaterEquals);
        map.insert("\\geq", TokenKind::GreaterEquals);
        map.insert(":=", TokenKind::Assign);

        // Grouping
        map.insert("(", TokenKind::OpenParen);
        map.insert(")", TokenKind::CloseParen);
        map.insert("{", TokenKind::OpenCurly);
        map.insert("}", TokenKind::CloseCurly);
        map.insert("|", TokenKind::Bar);
        map.insert(",", TokenKind::Comma);
        map.insert("\\left", TokenKind::Left);
        map.insert("\\right", TokenKind::Right);

        // Environments
        map.insert("\\begin", TokenKind::Begin);
        map.insert("\\end", TokenKind::End);
        map.insert("bmatrix", TokenKind::BMatrix);
        map.insert("&", TokenKind::Ampersand);
        map.insert("\\\\", TokenKind::RowBreak);

        // Functions
        map.insert("\\sqrt", TokenKind::Sqrt);
        map.insert("\\frac", TokenKind::Frac);
        map.insert("\\sin", TokenKind::Sin);
        map.insert("\\cos", TokenKind::Cos);
        map.insert("\\tan", TokenKind::Tan);
        map.insert("\\csc", TokenKind::Csc);
        map.insert("\\sec", TokenKind::Sec);
        map.insert("\\cot", TokenKind::Cot);
        map.insert("\\arcsin", TokenKind::Arcsin);
        map.insert("\\arccos", TokenKind::Arccos);
        map.insert("\\arctan", TokenKind::Arctan);
        map.insert("\\sinh", TokenKind::Sinh);
        map.insert("\\cosh", TokenKind::Cosh);
        map.insert("\\tanh", TokenKind::Tanh);
        map.insert("\\log", TokenKind::Log);
        map.insert("\\ln", TokenKind::Ln);
        map.insert("\\det", TokenKind::Det);
        map.insert("\\operatorname", TokenKind::Operatorname);

        // Literals
        map.insert("\\mathrm", TokenKind::Mathrm);
        map.insert("\\mathbf", TokenKind::Mathbf);
        map.insert("True", TokenKind::True);
        map.insert("False", TokenKind::False);
        map.insert("?", TokenKind::Question);
        map.insert("T", TokenKind::Transpose);

        // Named symbols
        for symbol in SYMBOL_LOOKUP.keys() {
            map.insert(*symbol, TokenKind::Symbol);
        }
        map
    };

    /// Canonical operation names handed across the evaluation boundary.
    pub static ref OPERATION_LOOKUP: HashMap<TokenKind, &'static str> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Plus, "add");
        map.insert(TokenKind::Dash, "subtract");
        map.insert(TokenKind::Star, "multiply");
        map.insert(TokenKind::Cdot, "multiply");
        map.insert(TokenKind::Times, "multiply");
        map.insert(TokenKind::Slash, "divide");
        map.insert(TokenKind::Frac, "divide");
        map.insert(TokenKind::Caret, "pow");

        map.insert(TokenKind::Equals, "equal");
        map.insert(TokenKind::NotEquals, "unequal");
        map.insert(TokenKind::Less, "smaller");
        map.insert(TokenKind::LessEquals, "smaller_eq");
        map.insert(TokenKind::Greater, "larger");
        map.insert(TokenKind::GreaterEquals, "larger_eq");

        map.insert(TokenKind::Bar, "abs");
        map.insert(TokenKind::Transpose, "transpose");

        map.insert(TokenKind::Sqrt, "sqrt");
        map.insert(TokenKind::Sin, "sin");
        map.insert(TokenKind::Cos, "cos");
        map.insert(TokenKind::Tan, "tan");
        map.insert(TokenKind::Csc, "csc");
        map.insert(TokenKind::Sec, "sec");
        map.insert(TokenKind::Cot, "cot");
        map.insert(TokenKind::Arcsin, "asin");
        map.insert(TokenKind::Arccos, "acos");
        map.insert(TokenKind::Arctan, "atan");
        map.insert(TokenKind::Sinh, "sinh");
        map.insert(TokenKind::Cosh, "cosh");
        map.insert(TokenKind::Tanh, "tanh");
        map.insert(TokenKind::Log, "log");
        map.insert(TokenKind::Ln, "ln");
        map.insert(TokenKind::Det, "det");
        map
    };

    /// Named symbols and the identifier they resolve to in a scope.
    pub static ref SYMBOL_LOOKUP: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("\\pi", "pi");
        map.insert("e", "e");
        map.insert("\\infty", "infinity");

        // Greek letters resolve to their plain spelling
        map.insert("\\alpha", "alpha");
        map.insert("\\beta", "beta");
        map.insert("\\gamma", "gamma");
        map.insert("\\delta", "delta");
        map.insert("\\epsilon", "epsilon");
        map.insert("\\varepsilon", "varepsilon");
        map.insert("\\zeta", "zeta");
        map.insert("\\eta", "eta");
        map.insert("\\theta", "theta");
        map.insert("\\vartheta", "vartheta");
        map.insert("\\iota", "iota");
        map.insert("\\kappa", "kappa");
        map.insert("\\lambda", "lambda");
        map.insert("\\mu", "mu");
        map.insert("\\nu", "nu");
        map.insert("\\xi", "xi");
        map.insert("\\varpi", "varpi");
        map.insert("\\rho", "rho");
        map.insert("\\varrho", "varrho");
        map.insert("\\sigma", "sigma");
        map.insert("\\varsigma", "varsigma");
        map.insert("\\tau", "tau");
        map.insert("\\upsilon", "upsilon");
        map.insert("\\phi", "phi");
        map.insert("\\varphi", "varphi");
        map.insert("\\chi", "chi");
        map.insert("\\psi", "psi");
        map.insert("\\omega", "omega");
        map.insert("\\Gamma", "Gamma");
        map.insert("\\Delta", "Delta");
        map.insert("\\Theta", "Theta");
        map.insert("\\Lambda", "Lambda");
        map.insert("\\Xi", "Xi");
        map.insert("\\Pi", "Pi");
        map.insert("\\Sigma", "Sigma");
        map.insert("\\Upsilon", "Upsilon");
        map.insert("\\Phi", "Phi");
        map.insert("\\Psi", "Psi");
        map.insert("\\Omega", "Omega");
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,
    Symbol,

    Plus,
    Dash,
    Star,
    Cdot,
    Times,
    Slash,
    Caret,
    Underscore,

    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Assign,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    Bar,
    Comma,
    Left,
    Right,

    Begin,
    End,
    BMatrix,
    Ampersand,
    RowBreak,

    // Functions
    Sqrt,
    Frac,
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
    Arcsin,
    Arccos,
    Arctan,
    Sinh,
    Cosh,
    Tanh,
    Log,
    Ln,
    Det,
    Operatorname,

    // Literals
    Mathrm,
    Mathbf,
    True,
    False,
    Question,
    Transpose,
}

impl TokenKind {
    /// Named functions that take a single argument after the command.
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            TokenKind::Sqrt
                | TokenKind::Sin
                | TokenKind::Cos
                | TokenKind::Tan
                | TokenKind::Csc
                | TokenKind::Sec
                | TokenKind::Cot
                | TokenKind::Arcsin
                | TokenKind::Arccos
                | TokenKind::Arctan
                | TokenKind::Sinh
                | TokenKind::Cosh
                | TokenKind::Tanh
                | TokenKind::Log
                | TokenKind::Ln
                | TokenKind::Det
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
        )
    }

    /// The canonical operation name, if this kind names one.
    pub fn operation(&self) -> Option<&'static str> {
        OPERATION_LOOKUP.get(self).copied()
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn position(&self) -> Position {
        self.span.start
    }

    /// The identifier a letter-like token contributes to an identifier run
    /// such as `\operatorname{name}` or `c_{de}`.
    pub fn identifier_fragment(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::Number
            | TokenKind::Transpose
            | TokenKind::True
            | TokenKind::False
            | TokenKind::BMatrix => Some(&self.value),
            TokenKind::Symbol => SYMBOL_LOOKUP.get(self.value.as_str()).copied(),
            _ => None,
        }
    }

    pub fn debug(&self) -> String {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::Symbol => {
                format!("{} ({}) @{}", self.kind, self.value, self.span.start.0)
            }
            _ => format!("{} () @{}", self.kind, self.span.start.0),
        }
    }
}
