//! The assembled dialogue graph.

use std::ops::Index;

use petgraph::{
    graph::{DiGraph, NodeIndex},
    Direction,
};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::graph::node::{BranchTag, DialogueNode};

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Directed graph over dialogue nodes.
///
/// The graph is append-only while it is built: edges always point from an
/// existing frontier to a newly created node, which keeps it acyclic by
/// construction. Section entry nodes are the entry points per document
/// section.
pub struct DialogueGraph {
    graph: DiGraph<DialogueNode, ()>,
}

impl DialogueGraph {
    pub fn new() -> Self {
        DialogueGraph {
            graph: DiGraph::new(),
        }
    }

    pub(crate) fn add_node(&mut self, node: DialogueNode) -> NodeIndex {
        self.graph.add_node(node)
    }

    /// Add edges from every frontier node to the target.
    pub(crate) fn connect(&mut self, frontier: &[NodeIndex], target: NodeIndex) {
        for &source in frontier {
            self.graph.add_edge(source, target, ());
        }
    }

    /// Get the node data at an index.
    pub fn node(&self, index: NodeIndex) -> &DialogueNode {
        &self.graph[index]
    }

    /// Iterate over all nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &DialogueNode)> {
        self.graph
            .node_indices()
            .map(move |index| (index, &self.graph[index]))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether an edge from `source` to `target` exists.
    pub fn has_edge(&self, source: NodeIndex, target: NodeIndex) -> bool {
        self.graph.find_edge(source, target).is_some()
    }

    /// Number of outgoing edges of a node.
    pub fn out_degree(&self, index: NodeIndex) -> usize {
        self.graph.edges_directed(index, Direction::Outgoing).count()
    }

    /// Number of incoming edges of a node.
    pub fn in_degree(&self, index: NodeIndex) -> usize {
        self.graph.edges_directed(index, Direction::Incoming).count()
    }

    /// All dialogue nodes with no outgoing edges, in creation order.
    pub fn leaves(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&index| {
                self.graph[index].kind.is_dialogue() && self.out_degree(index) == 0
            })
            .collect()
    }

    /// Leaf detection scoped to one branch: the dialogue nodes of the given
    /// branch with no outgoing edges.
    ///
    /// Computed freshly by a full scan rather than tracked incrementally,
    /// since continuations of differing length finish at unpredictable
    /// times. Filtering by branch keeps sibling and parent scopes out of
    /// the result.
    pub(crate) fn branch_leaves(&self, branch: BranchTag) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&index| {
                let node = &self.graph[index];

                node.kind.is_dialogue() && node.branch == branch && self.out_degree(index) == 0
            })
            .collect()
    }

    /// First node whose content matches, in creation order.
    pub fn find_by_content(&self, content: &str) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&index| self.graph[index].content == content)
    }

    /// The underlying petgraph structure, for traversal or serialization by
    /// downstream consumers.
    pub fn inner(&self) -> &DiGraph<DialogueNode, ()> {
        &self.graph
    }
}

impl Index<NodeIndex> for DialogueGraph {
    type Output = DialogueNode;

    fn index(&self, index: NodeIndex) -> &DialogueNode {
        &self.graph[index]
    }
}
