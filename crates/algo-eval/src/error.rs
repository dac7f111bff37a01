//! Errors raised while evaluating expressions or touching the variable store.

use algo_types::{DeclaredType, SyntaxError};
use thiserror::Error;

/// Evaluation error: bad expression text, unknown variable or unreadable input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The expression text does not parse.
    #[error("invalid expression \"{expression}\": {error}")]
    Expression {
        expression: String,
        error: SyntaxError,
    },

    /// An expression or block refers to a variable no `declare` created.
    #[error("variable '{name}' is not declared")]
    UndeclaredVariable { name: String },

    /// A `read` received text that is not a number of the expected type.
    #[error("cannot read \"{input}\" into '{variable}': expected a number ({expected})")]
    InputParse {
        variable: String,
        input: String,
        expected: DeclaredType,
    },

    /// A `read` found the input source empty.
    #[error("no input was provided for '{variable}'")]
    MissingInput { variable: String },
}

impl EvalError {
    pub fn undeclared(name: impl Into<String>) -> Self {
        EvalError::UndeclaredVariable { name: name.into() }
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
