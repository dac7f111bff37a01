//! Outcome of a run.

use algo_eval::VariableStore;
use algo_graph::BlockId;
use serde::{Deserialize, Serialize};

use crate::console::{ConsoleLevel, ConsoleLine};
use crate::error::{ErrorKind, RunError};

/// Lifecycle of a run: `Idle -> Running -> {Completed, Failed, Stopped}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
    Stopped,
}

impl RunState {
    /// Whether the run has ended.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Completed | RunState::Failed | RunState::Stopped
        )
    }
}

/// Serializable description of a failed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    pub kind: ErrorKind,
    pub message: String,
    /// The block to highlight, when the failure belongs to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockId>,
}

/// Terminal state, console and final variables of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub state: RunState,
    pub console: Vec<ConsoleLine>,
    /// Snapshot of the store when the run ended.
    pub variables: VariableStore,
    pub steps: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<RunFailure>,
    #[serde(skip)]
    pub error: Option<RunError>,
}

impl RunReport {
    pub(crate) fn new(
        state: RunState,
        console: Vec<ConsoleLine>,
        variables: VariableStore,
        steps: u64,
        error: Option<RunError>,
    ) -> Self {
        let failure = error.as_ref().map(|err| RunFailure {
            kind: err.kind(),
            message: err.to_string(),
            block: err.block(),
        });
        Self {
            state,
            console,
            variables,
            steps,
            failure,
            error,
        }
    }

    /// Text of every console line, in order.
    pub fn lines(&self) -> Vec<&str> {
        self.console.iter().map(|l| l.text.as_str()).collect()
    }

    /// Text of the info lines only (program output and trace).
    pub fn output(&self) -> Vec<&str> {
        self.console
            .iter()
            .filter(|l| l.level == ConsoleLevel::Info)
            .map(|l| l.text.as_str())
            .collect()
    }
}
