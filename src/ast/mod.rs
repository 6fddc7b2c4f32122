/// AST (Abstract Syntax Tree) module
/// Contains the expression tree handed to an evaluation engine
///
/// Submodules:
/// - ast: Node kinds and display
/// - expressions: The closed `Expr` type and its node structs
/// - evaluate: The `Engine` boundary and tree walk
pub mod ast;
pub mod evaluate;
pub mod expressions;
