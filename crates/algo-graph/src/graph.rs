//! The program graph: placed blocks plus the edges between them.
//!
//! Every edit either succeeds completely or is rejected with a
//! [`GraphError`] and leaves the graph untouched.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId, BlockKind, BlockTag, Properties, PropertyValue};
use crate::edge::{Branch, Edge};
use crate::error::{GraphError, GraphResult, StructuralError};

/// Blocks keyed by id, and edges in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramGraph {
    blocks: BTreeMap<BlockId, Block>,
    edges: Vec<Edge>,
    #[serde(default)]
    next_id: u32,
}

fn rejected<T>(err: GraphError) -> GraphResult<T> {
    warn!("rejected graph edit: {err}");
    Err(err)
}

impl ProgramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Blocks ────────────────────────────────────────────────────────────────

    /// Allocate the next unused id. Ids are never handed out twice.
    fn allocate_id(&mut self) -> BlockId {
        loop {
            let id = BlockId(self.next_id);
            self.next_id += 1;
            if !self.blocks.contains_key(&id) {
                return id;
            }
        }
    }

    /// Place a block of `tag` with its palette defaults.
    pub fn add_block(&mut self, tag: BlockTag) -> BlockId {
        self.insert(BlockKind::default_for(tag))
    }

    /// Place a block of `tag` built from `properties` over the defaults.
    pub fn add_block_with(
        &mut self,
        tag: BlockTag,
        properties: &Properties,
    ) -> GraphResult<BlockId> {
        match BlockKind::from_properties(tag, properties) {
            Ok(kind) => Ok(self.insert(kind)),
            Err(err) => rejected(err),
        }
    }

    /// Place an already validated block.
    pub fn insert(&mut self, kind: BlockKind) -> BlockId {
        let id = self.allocate_id();
        debug!("placed {id} ({})", kind.tag());
        self.blocks.insert(id, Block { id, kind });
        id
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// Like [`block`](Self::block), with an error for unknown ids.
    pub fn get(&self, id: BlockId) -> GraphResult<&Block> {
        self.blocks.get(&id).ok_or(GraphError::UnknownBlock { id })
    }

    /// Blocks in creation order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.blocks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Change one property of a block; the block is revalidated first.
    pub fn set_property(
        &mut self,
        id: BlockId,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let Some(block) = self.blocks.get_mut(&id) else {
            return rejected(GraphError::UnknownBlock { id });
        };
        match block.kind.with_property(key, value.into()) {
            Ok(kind) => {
                debug!("{id}: set '{key}'");
                block.kind = kind;
                Ok(())
            }
            Err(err) => rejected(err),
        }
    }

    /// Delete a block together with every edge touching it.
    pub fn remove_block(&mut self, id: BlockId) -> GraphResult<Block> {
        let Some(block) = self.blocks.remove(&id) else {
            return rejected(GraphError::UnknownBlock { id });
        };
        self.edges.retain(|e| !e.touches(id));
        debug!("removed {id}");
        Ok(block)
    }

    // ── Edges ─────────────────────────────────────────────────────────────────

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Connect `from -> to`, optionally tagged with a branch.
    pub fn connect(
        &mut self,
        from: BlockId,
        to: BlockId,
        branch: Option<Branch>,
    ) -> GraphResult<()> {
        if let Err(err) = self.check_connect(from, to, branch) {
            return rejected(err);
        }
        let edge = match branch {
            Some(branch) => Edge::branched(from, to, branch),
            None => Edge::new(from, to),
        };
        debug!("connected {edge}");
        self.edges.push(edge);
        Ok(())
    }

    fn check_connect(
        &self,
        from: BlockId,
        to: BlockId,
        branch: Option<Branch>,
    ) -> GraphResult<()> {
        let source = self.get(from)?;
        let target = self.get(to)?;
        if from == to {
            return Err(GraphError::SelfLoop { id: from });
        }
        for block in [source, target] {
            if block.tag().is_marker() {
                return Err(GraphError::NotConnectable {
                    id: block.id,
                    tag: block.tag(),
                });
            }
        }
        if let Some(existing) = self.incoming(to) {
            return Err(GraphError::AlreadyConnected {
                to,
                from: existing.from,
            });
        }
        if let Some(branch) = branch {
            if !source.tag().allows_branch() {
                return Err(GraphError::BranchNotAllowed {
                    from,
                    tag: source.tag(),
                });
            }
            if self.branch_target(from, branch).is_some() {
                return Err(GraphError::DuplicateBranch { from, branch });
            }
        }
        Ok(())
    }

    /// Remove the edge `from -> to`.
    pub fn disconnect(&mut self, from: BlockId, to: BlockId) -> GraphResult<Edge> {
        let Some(index) = self.edges.iter().position(|e| e.from == from && e.to == to) else {
            return rejected(GraphError::NoSuchEdge { from, to });
        };
        let edge = self.edges.remove(index);
        debug!("disconnected {edge}");
        Ok(edge)
    }

    /// The single incoming edge of `id`, if any.
    pub fn incoming(&self, id: BlockId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.to == id)
    }

    /// Outgoing edges of `id` in insertion order.
    pub fn outgoing(&self, id: BlockId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    /// Target of the first outgoing edge.
    pub fn next_block(&self, id: BlockId) -> Option<BlockId> {
        self.outgoing(id).next().map(|e| e.to)
    }

    /// Target of the outgoing edge tagged `branch`.
    pub fn branch_target(&self, id: BlockId, branch: Branch) -> Option<BlockId> {
        self.outgoing(id)
            .find(|e| e.branch == Some(branch))
            .map(|e| e.to)
    }

    /// First block of a loop's body: the `true` edge.
    pub fn loop_body(&self, id: BlockId) -> Option<BlockId> {
        self.branch_target(id, Branch::True)
    }

    /// Where a loop continues once done: the `false` edge, or the first
    /// untagged edge when there is none.
    pub fn loop_exit(&self, id: BlockId) -> Option<BlockId> {
        self.branch_target(id, Branch::False).or_else(|| {
            self.outgoing(id)
                .find(|e| e.branch.is_none())
                .map(|e| e.to)
        })
    }

    // ── Structure ─────────────────────────────────────────────────────────────

    /// Flow blocks without an incoming edge. Markers and function
    /// definitions never start a program.
    pub fn entry_candidates(&self) -> Vec<BlockId> {
        self.blocks
            .values()
            .filter(|b| !b.tag().is_marker() && b.tag() != BlockTag::Function)
            .filter(|b| self.incoming(b.id).is_none())
            .map(|b| b.id)
            .collect()
    }

    /// The unique block the walk starts from.
    pub fn entry(&self) -> Result<BlockId, StructuralError> {
        match self.entry_candidates().as_slice() {
            [] => Err(StructuralError::NoEntry),
            [only] => Ok(*only),
            many => Err(StructuralError::AmbiguousEntry {
                candidates: many.to_vec(),
            }),
        }
    }

    /// Check that every edge points at existing blocks, then find the entry.
    ///
    /// Graphs built through the edit methods never dangle; deserialized
    /// ones might.
    pub fn validate(&self) -> Result<BlockId, StructuralError> {
        for edge in &self.edges {
            for end in [edge.from, edge.to] {
                if !self.contains(end) {
                    return Err(StructuralError::DanglingEdge {
                        from: edge.from,
                        to: edge.to,
                        missing: end,
                    });
                }
            }
        }
        self.entry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_and_never_reused() {
        let mut graph = ProgramGraph::new();
        let a = graph.add_block(BlockTag::Declare);
        let b = graph.add_block(BlockTag::Display);
        assert_eq!((a, b), (BlockId(0), BlockId(1)));
        graph.remove_block(b).unwrap();
        assert_eq!(graph.add_block(BlockTag::Display), BlockId(2));
    }

    #[test]
    fn test_loop_exit_falls_back_to_untagged_edge() {
        let mut graph = ProgramGraph::new();
        let lp = graph.add_block(BlockTag::While);
        let body = graph.add_block(BlockTag::Display);
        let after = graph.add_block(BlockTag::Display);
        graph.connect(lp, body, Some(Branch::True)).unwrap();
        graph.connect(lp, after, None).unwrap();
        assert_eq!(graph.loop_body(lp), Some(body));
        assert_eq!(graph.loop_exit(lp), Some(after));
    }

    #[test]
    fn test_deserialized_ids_do_not_collide() {
        let mut graph = ProgramGraph::new();
        graph.add_block(BlockTag::Declare);
        graph.add_block(BlockTag::Declare);
        let mut json = serde_json::to_value(&graph).unwrap();
        json.as_object_mut().unwrap().remove("nextId");
        let mut restored: ProgramGraph = serde_json::from_value(json).unwrap();
        assert_eq!(restored.add_block(BlockTag::Display), BlockId(2));
    }
}
