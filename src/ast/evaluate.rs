//! The boundary between parsed expressions and an evaluation engine.
//!
//! The tree walk lives here; every arithmetic, function and collection
//! operation is delegated to an [`Engine`] under its canonical operation
//! name, so the engine decides what numbers, matrices and errors are.

use std::{collections::HashMap, fmt::Debug, fmt::Display};

use thiserror::Error;

use crate::lexer::tokens::TokenKind;

use super::expressions::{Expr, Row};

/// Identifier bindings, keyed by canonical name (`alpha`, not `\alpha`).
pub type Scope<V> = HashMap<String, V>;

pub trait Engine {
    type Value: Clone;
    type Error: Display + Debug;

    /// Converts a number lexeme such as `1.5`.
    fn number(&self, lexeme: &str) -> Result<Self::Value, Self::Error>;
    fn boolean(&self, value: bool) -> Self::Value;
    fn undefined(&self) -> Self::Value;
    /// Values for names the scope does not bind, such as `pi` and `e`.
    fn constant(&self, name: &str) -> Option<Self::Value>;
    /// Applies an operation (`add`, `pow`, `sin`, `abs`, a custom function...).
    fn call(&self, name: &str, arguments: Vec<Self::Value>) -> Result<Self::Value, Self::Error>;
    fn collection(&self, items: Vec<Self::Value>) -> Result<Self::Value, Self::Error>;
    fn index(
        &self,
        object: Self::Value,
        indices: Vec<Self::Value>,
    ) -> Result<Self::Value, Self::Error>;
}

#[derive(Error, Debug)]
pub enum EvalError<E: Display + Debug> {
    #[error("undefined symbol {name:?}")]
    UndefinedSymbol { name: String },
    #[error("{0}")]
    Engine(E),
}

impl Expr {
    /// Evaluates the tree against `scope`. Assignments bind their target in
    /// `scope` and evaluate to the assigned value.
    pub fn evaluate<E: Engine>(
        &self,
        scope: &mut Scope<E::Value>,
        engine: &E,
    ) -> Result<E::Value, EvalError<E::Error>> {
        match self {
            Expr::Number(number) => engine.number(&number.value).map_err(EvalError::Engine),
            Expr::Symbol(symbol) => scope
                .get(&symbol.name)
                .cloned()
                .or_else(|| engine.constant(&symbol.name))
                .ok_or_else(|| EvalError::UndefinedSymbol {
                    name: symbol.name.clone(),
                }),
            Expr::Unary(unary) => {
                let operand = unary.operand.evaluate(scope, engine)?;
                engine
                    .call(unary.operator, vec![operand])
                    .map_err(EvalError::Engine)
            }
            Expr::Binary(binary) => {
                let left = binary.left.evaluate(scope, engine)?;
                let right = binary.right.evaluate(scope, engine)?;
                engine
                    .call(binary.operator, vec![left, right])
                    .map_err(EvalError::Engine)
            }
            Expr::Comparison(comparison) => {
                let left = comparison.left.evaluate(scope, engine)?;
                let right = comparison.right.evaluate(scope, engine)?;
                engine
                    .call(comparison.operator, vec![left, right])
                    .map_err(EvalError::Engine)
            }
            Expr::Call(call) => {
                let arguments = evaluate_all(&call.arguments, scope, engine)?;
                engine.call(&call.name, arguments).map_err(EvalError::Engine)
            }
            Expr::Matrix(matrix) => {
                let mut rows = Vec::with_capacity(matrix.rows.len());
                for row in &matrix.rows {
                    rows.push(match row {
                        Row::Element(element) => element.evaluate(scope, engine)?,
                        Row::Elements(elements) => {
                            let items = evaluate_all(elements, scope, engine)?;
                            engine.collection(items).map_err(EvalError::Engine)?
                        }
                    });
                }
                engine.collection(rows).map_err(EvalError::Engine)
            }
            Expr::Accessor(accessor) => {
                let object = accessor.object.evaluate(scope, engine)?;
                let indices = evaluate_all(&accessor.index.dimensions, scope, engine)?;
                engine.index(object, indices).map_err(EvalError::Engine)
            }
            Expr::Transpose(transpose) => {
                let operand = transpose.operand.evaluate(scope, engine)?;
                let name = TokenKind::Transpose.operation().unwrap_or("transpose");
                engine.call(name, vec![operand]).map_err(EvalError::Engine)
            }
            Expr::Assignment(assignment) => {
                let value = assignment.value.evaluate(scope, engine)?;
                scope.insert(assignment.target.name.clone(), value.clone());
                Ok(value)
            }
            Expr::Boolean(boolean) => Ok(engine.boolean(boolean.value)),
            Expr::Undefined => Ok(engine.undefined()),
        }
    }
}

fn evaluate_all<E: Engine>(
    exprs: &[Expr],
    scope: &mut Scope<E::Value>,
    engine: &E,
) -> Result<Vec<E::Value>, EvalError<E::Error>> {
    exprs.iter().map(|expr| expr.evaluate(scope, engine)).collect()
}
