//! Where `read` blocks get their input from.

use std::collections::VecDeque;

use algo_graph::BlockId;
use algo_types::DeclaredType;
use serde::Serialize;

/// What a `read` block asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRequest {
    pub block: BlockId,
    pub variable: String,
    /// The conversion that will be applied to the answer.
    pub declared_type: DeclaredType,
}

/// Supplies raw text for `read` blocks, one request at a time.
///
/// Returning `None` means no input is available; the run then fails.
pub trait InputSource {
    fn request(&mut self, request: &InputRequest) -> Option<String>;
}

impl<F> InputSource for F
where
    F: FnMut(&InputRequest) -> Option<String>,
{
    fn request(&mut self, request: &InputRequest) -> Option<String> {
        self(request)
    }
}

/// A fixed sequence of answers, consumed front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueuedInput {
    queue: VecDeque<String>,
}

impl QueuedInput {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: inputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for QueuedInput {
    fn request(&mut self, _request: &InputRequest) -> Option<String> {
        self.queue.pop_front()
    }
}

/// An input source with nothing to give.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn request(&mut self, _request: &InputRequest) -> Option<String> {
        None
    }
}
