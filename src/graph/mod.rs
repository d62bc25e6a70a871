//! The dialogue graph and the branching-block builder.

mod build;
mod graph;
mod node;

pub(crate) use build::{build_option_block, chain_text_nodes};
pub use graph::DialogueGraph;
pub use node::{BranchTag, DialogueNode, NodeId, NodeKind};
pub(crate) use node::IdGenerator;

pub use petgraph::graph::NodeIndex;
