//! Level metadata.

use algo_graph::{BlockId, BlockTag, ProgramGraph};
use serde::Serialize;

use crate::validate::{self, Attempt, ValidationOutcome};

/// One teaching level.
///
/// `allowed` restricts the palette and `required` lists the blocks the
/// objectives mention. Neither is enforced by [`Level::validate`]; the
/// palette and objective list are the front end's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub objectives: &'static [&'static str],
    pub hint: &'static str,
    pub allowed: &'static [BlockTag],
    pub required: &'static [BlockTag],
    pub max_blocks: usize,
}

impl Level {
    /// Whether the palette offers `tag` on this level.
    pub fn allows(&self, tag: BlockTag) -> bool {
        self.allowed.contains(&tag)
    }

    /// Blocks of `graph` whose type the palette does not offer here.
    pub fn disallowed_blocks(&self, graph: &ProgramGraph) -> Vec<BlockId> {
        graph
            .blocks()
            .filter(|b| !self.allows(b.tag()))
            .map(|b| b.id)
            .collect()
    }

    /// Required tags with no block in `graph`, in declaration order.
    pub fn missing_required(&self, graph: &ProgramGraph) -> Vec<BlockTag> {
        self.required
            .iter()
            .copied()
            .filter(|tag| !graph.blocks().any(|b| b.tag() == *tag))
            .collect()
    }

    pub fn exceeds_max_blocks(&self, graph: &ProgramGraph) -> bool {
        graph.len() > self.max_blocks
    }

    /// Decide whether `attempt` meets this level's objectives.
    pub fn validate(&self, attempt: &Attempt<'_>) -> ValidationOutcome {
        validate::check(self.number, attempt)
    }
}
