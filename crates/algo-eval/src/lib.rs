//! Expression evaluation for the algorithm builder.
//!
//! Block properties such as conditions, assigned values and display
//! messages are expression text. [`evaluate`] lexes, parses and walks that
//! text against a [`VariableStore`] every time it is called; nothing is
//! cached between calls.

mod error;
mod evaluator;
mod store;

pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use store::{Variable, VariableStore};

use algo_types::Value;
use log::debug;

/// Evaluate `expression` against `store`.
pub fn evaluate(expression: &str, store: &VariableStore) -> EvalResult<Value> {
    let expr = algo_parser::parse_expression(expression).map_err(|error| {
        EvalError::Expression {
            expression: expression.to_string(),
            error,
        }
    })?;
    let value = Evaluator::new(store).eval_expr(&expr)?;
    debug!("evaluated {expression:?} -> {value}");
    Ok(value)
}

/// Evaluate `expression` and reduce it to a boolean by truthiness.
pub fn evaluate_condition(expression: &str, store: &VariableStore) -> EvalResult<bool> {
    evaluate(expression, store).map(|v| v.is_truthy())
}
