//! Run errors.

use algo_eval::EvalError;
use algo_graph::{BlockId, StructuralError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a run failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    /// The graph cannot be walked: no or several entry blocks, a dangling
    /// edge, or a zero loop step.
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// A block failed while executing.
    #[error("{block}: {error}")]
    Eval {
        block: BlockId,
        #[source]
        error: EvalError,
    },

    /// The configured step bound was reached.
    #[error("step limit of {limit} exceeded")]
    StepLimit { limit: u64 },
}

/// Failure category, as reported to callers and the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Structural,
    UndeclaredVariable,
    Expression,
    InputParse,
    StepLimitExceeded,
}

impl RunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::Structural(_) => ErrorKind::Structural,
            RunError::Eval { error, .. } => match error {
                EvalError::Expression { .. } => ErrorKind::Expression,
                EvalError::UndeclaredVariable { .. } => ErrorKind::UndeclaredVariable,
                EvalError::InputParse { .. } | EvalError::MissingInput { .. } => {
                    ErrorKind::InputParse
                }
            },
            RunError::StepLimit { .. } => ErrorKind::StepLimitExceeded,
        }
    }

    /// The block that failed, when the failure belongs to one.
    pub fn block(&self) -> Option<BlockId> {
        match self {
            RunError::Eval { block, .. } => Some(*block),
            RunError::Structural(StructuralError::ZeroLoopStep { block }) => Some(*block),
            _ => None,
        }
    }
}

/// Result alias for engine operations.
pub type RunResult<T> = Result<T, RunError>;
