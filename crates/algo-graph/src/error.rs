//! Errors for graph edits and for graphs that cannot be run.

use thiserror::Error;

use crate::block::{BlockId, BlockTag};
use crate::edge::Branch;

/// A rejected graph edit. The graph is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("unknown block {id}")]
    UnknownBlock { id: BlockId },

    #[error("'{text}' is not a block id")]
    InvalidBlockId { text: String },

    #[error("unknown block type '{tag}'")]
    UnknownBlockType { tag: String },

    #[error("{tag} block, property '{key}': {reason}")]
    InvalidProperty {
        tag: BlockTag,
        key: String,
        reason: String,
    },

    #[error("{id} cannot be connected to itself")]
    SelfLoop { id: BlockId },

    #[error("{to} already has an incoming connection (from {from})")]
    AlreadyConnected { to: BlockId, from: BlockId },

    #[error("{from} is a {tag} block; only if, if-else, while and for blocks have true/false exits")]
    BranchNotAllowed { from: BlockId, tag: BlockTag },

    #[error("{from} already has a '{branch}' exit")]
    DuplicateBranch { from: BlockId, branch: Branch },

    #[error("{id} is a {tag} marker and has no connection points")]
    NotConnectable { id: BlockId, tag: BlockTag },

    #[error("there is no connection from {from} to {to}")]
    NoSuchEdge { from: BlockId, to: BlockId },
}

/// A graph that cannot be walked.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructuralError {
    #[error("the program has no starting block")]
    NoEntry,

    #[error("the program has several starting blocks: {}", join_ids(.candidates))]
    AmbiguousEntry { candidates: Vec<BlockId> },

    #[error("connection {from} -> {to} refers to missing block {missing}")]
    DanglingEdge {
        from: BlockId,
        to: BlockId,
        missing: BlockId,
    },

    #[error("{block}: the loop step must not be zero")]
    ZeroLoopStep { block: BlockId },
}

fn join_ids(ids: &[BlockId]) -> String {
    ids.iter()
        .map(BlockId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result alias for graph edits.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_entry_lists_candidates() {
        let err = StructuralError::AmbiguousEntry {
            candidates: vec![BlockId(0), BlockId(4)],
        };
        assert_eq!(
            err.to_string(),
            "the program has several starting blocks: block-0, block-4"
        );
    }

    #[test]
    fn test_already_connected_message() {
        let err = GraphError::AlreadyConnected {
            to: BlockId(2),
            from: BlockId(1),
        };
        assert_eq!(
            err.to_string(),
            "block-2 already has an incoming connection (from block-1)"
        );
    }
}
