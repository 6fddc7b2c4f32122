//! Parser module for building the expression tree.
//!
//! This module contains a recursive descent parser that turns a token
//! stream into an `Expr`. It handles:
//!
//! - Operator precedence from comparisons down to subscripts
//! - Implicit multiplication, refusing two adjacent numbers
//! - Groupings, `\left`/`\right` pairs and `|x|` absolute values
//! - The `bmatrix` environment, fractions and named or custom functions
//!
//! Primary expressions are dispatched through a NUD (null denotation)
//! lookup keyed by token kind; operator tokens carry a binding power.
//! Parsing stops at the first error, there is no recovery.

pub mod expr;
pub mod lookups;
pub mod parser;
