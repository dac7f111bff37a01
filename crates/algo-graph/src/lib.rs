//! Block graph model for the algorithm builder.
//!
//! A program is a set of typed blocks joined by directed edges. Each block
//! has at most one incoming edge; edges leaving conditionals and loops may
//! carry a `true`/`false` branch tag. The program starts at the unique flow
//! block with no incoming edge.

mod block;
mod edge;
mod error;
mod graph;

pub use block::{
    is_valid_name, Block, BlockId, BlockKind, BlockTag, OperatorKind, Properties, PropertyValue,
};
pub use edge::{Branch, Edge};
pub use error::{GraphError, GraphResult, StructuralError};
pub use graph::ProgramGraph;
