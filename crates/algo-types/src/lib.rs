//! Shared types for the algorithm builder.
//!
//! This crate defines the runtime values, the declared variable types,
//! the expression AST, source spans and syntax errors used across the
//! lexer, parser, evaluator and execution engine.

mod error;
mod span;
mod value;
pub mod ast;

pub use error::SyntaxError;
pub use span::Span;
pub use value::{DeclaredType, UnknownTypeError, Value};

/// Maximum nesting depth accepted by the expression parser.
pub const MAX_EXPR_DEPTH: u32 = 32;

/// Maximum number of binary operators in one expression.
///
/// Operator chains such as `1 + 1 + 1` nest one level per operator in the
/// tree, so this bounds the depth the evaluator walks.
pub const MAX_EXPR_OPERATORS: u32 = 256;
