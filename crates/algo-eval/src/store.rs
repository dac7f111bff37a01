//! Variable store for one run.
//!
//! Names map to a declared type and a current value. Entries are created by
//! `declare`, updated by `assign` and `read`, and never removed while a run
//! is in progress.

use std::collections::BTreeMap;

use algo_types::{DeclaredType, Value};
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(rename = "type")]
    pub declared_type: DeclaredType,
    pub value: Value,
}

/// The variables of one run, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableStore {
    variables: BTreeMap<String, Variable>,
}

impl VariableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable. Re-declaring a name silently replaces the entry.
    pub fn declare(&mut self, name: &str, declared_type: DeclaredType, value: Value) {
        self.variables.insert(
            name.to_string(),
            Variable {
                declared_type,
                value,
            },
        );
    }

    /// Overwrite the value of a declared variable, keeping its type.
    pub fn assign(&mut self, name: &str, value: Value) -> EvalResult<()> {
        let variable = self
            .variables
            .get_mut(name)
            .ok_or_else(|| EvalError::undeclared(name))?;
        variable.value = value;
        Ok(())
    }

    /// Store raw user input into a declared variable.
    ///
    /// `declared_type` selects the conversion; `None` uses the variable's
    /// own declared type. Returns the stored value.
    pub fn read(
        &mut self,
        name: &str,
        raw_input: &str,
        declared_type: Option<DeclaredType>,
    ) -> EvalResult<Value> {
        let variable = self
            .variables
            .get_mut(name)
            .ok_or_else(|| EvalError::undeclared(name))?;
        let ty = declared_type.unwrap_or(variable.declared_type);
        let value = ty
            .parse_input(raw_input)
            .ok_or_else(|| EvalError::InputParse {
                variable: name.to_string(),
                input: raw_input.to_string(),
                expected: ty,
            })?;
        variable.value = value.clone();
        Ok(value)
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Look up a variable's current value.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.variables.get(name).map(|v| &v.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate over variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Deep copy of the store for post-run inspection.
    pub fn snapshot(&self) -> VariableStore {
        self.clone()
    }
}
