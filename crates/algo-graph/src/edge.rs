//! Directed connections between blocks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::BlockId;

/// The `true`/`false` tag on an edge leaving a conditional or a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Branch {
    True,
    False,
}

impl From<bool> for Branch {
    fn from(b: bool) -> Self {
        if b {
            Branch::True
        } else {
            Branch::False
        }
    }
}

impl From<Branch> for bool {
    fn from(branch: Branch) -> Self {
        branch == Branch::True
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Branch::True => "true",
            Branch::False => "false",
        })
    }
}

/// A directed edge `from -> to`, optionally tagged with a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: BlockId,
    pub to: BlockId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
}

impl Edge {
    pub fn new(from: BlockId, to: BlockId) -> Self {
        Self {
            from,
            to,
            branch: None,
        }
    }

    pub fn branched(from: BlockId, to: BlockId, branch: Branch) -> Self {
        Self {
            from,
            to,
            branch: Some(branch),
        }
    }

    /// Whether the edge touches `id` at either end.
    pub fn touches(&self, id: BlockId) -> bool {
        self.from == id || self.to == id
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.branch {
            Some(branch) => write!(f, "{} -[{branch}]-> {}", self.from, self.to),
            None => write!(f, "{} -> {}", self.from, self.to),
        }
    }
}
