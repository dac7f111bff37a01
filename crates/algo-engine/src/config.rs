//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Options for a run. Every field has a default, so a partial JSON object
/// (or `{}`) is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Upper bound on executed steps (blocks plus loop iterations).
    /// `None` lets an endless loop run until stopped.
    pub max_steps: Option<u64>,
    /// Emit informational lines: run start and end, condition results,
    /// values read, and function markers.
    pub trace: bool,
}

impl EngineConfig {
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
