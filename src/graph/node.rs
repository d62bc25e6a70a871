//! Dialogue nodes and their deterministic identities.

use std::fmt;

use sha2::{Digest, Sha256};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A vertex of the dialogue graph.
///
/// Nodes are created once when their source line is first visited, never
/// mutated afterwards and never removed: the graph is append-only during a
/// single build.
pub struct DialogueNode {
    /// Unique identifier, stable across rebuilds of the same document.
    pub id: NodeId,
    /// Who speaks the line. Empty for sentinel nodes.
    pub speaker: String,
    /// The spoken line, or the section name for section entry nodes.
    pub content: String,
    /// What role the node plays in the graph.
    pub kind: NodeKind,
    /// Branch scope the node was created in.
    pub branch: BranchTag,
}

impl DialogueNode {
    pub(crate) fn new(
        id: NodeId,
        speaker: String,
        content: String,
        kind: NodeKind,
        branch: BranchTag,
    ) -> Self {
        DialogueNode {
            id,
            speaker,
            content,
            kind,
            branch,
        }
    }

    /// Entry node of a document section.
    pub(crate) fn section(id: NodeId, name: &str) -> Self {
        DialogueNode::new(
            id,
            String::new(),
            name.to_string(),
            NodeKind::Section,
            BranchTag::ROOT,
        )
    }

    /// Join node closing a branching block before the next block.
    pub(crate) fn end(id: NodeId) -> Self {
        DialogueNode::new(
            id,
            String::new(),
            String::new(),
            NodeKind::End,
            BranchTag::ROOT,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Role of a node in the dialogue graph.
pub enum NodeKind {
    /// Entry node carrying a section name.
    Section,
    /// Synthetic join node between blocks of a section.
    End,
    /// A line from a plain text run.
    Line,
    /// A line from a collapsible box.
    Collapse,
    /// A player choice, with its 1-based choice index.
    Option(u32),
    /// A scripted reply line following a choice, with the choice index.
    Plot(u32),
}

impl NodeKind {
    /// Whether the node represents actual dialogue, as opposed to a
    /// sentinel. Only dialogue nodes take part in leaf detection.
    pub(crate) fn is_dialogue(&self) -> bool {
        match self {
            NodeKind::Line | NodeKind::Collapse | NodeKind::Option(_) | NodeKind::Plot(_) => true,
            NodeKind::Section | NodeKind::End => false,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NodeKind::Section => write!(f, "section"),
            NodeKind::End => write!(f, "end"),
            NodeKind::Line => write!(f, "line"),
            NodeKind::Collapse => write!(f, "collapse"),
            NodeKind::Option(index) => write!(f, "option{}", index),
            NodeKind::Plot(index) => write!(f, "plot{}", index),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Opaque identifier of a dialogue node.
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Scope tag grouping the nodes created while processing one branching
/// block, used to isolate leaf detection per recursion level.
pub struct BranchTag(u32);

impl BranchTag {
    /// The root scope, outside any branching block.
    pub const ROOT: BranchTag = BranchTag(0);
}

impl fmt::Display for BranchTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if *self == BranchTag::ROOT {
            write!(f, "none")
        } else {
            write!(f, "branch_{}", self.0)
        }
    }
}

/// Source of node ids and branch tags for one graph build.
///
/// Ids combine a content hash with a running sequence counter, so identical
/// lines at different document positions get distinct ids while a rebuild
/// of the same document reproduces every id exactly.
pub(crate) struct IdGenerator {
    next_node: u64,
    next_branch: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator {
            next_node: 0,
            next_branch: 0,
        }
    }

    pub fn node_id(&mut self, speaker: &str, content: &str) -> NodeId {
        let sequence = self.next_node;
        self.next_node += 1;

        let mut hasher = Sha256::new();
        hasher.update(speaker.as_bytes());
        hasher.update(&[0x1f]);
        hasher.update(content.as_bytes());
        hasher.update(&[0x1f]);
        hasher.update(&sequence.to_le_bytes());
        let digest = hasher.finalize();

        NodeId(digest[..5].iter().map(|byte| format!("{:02x}", byte)).collect())
    }

    pub fn branch_tag(&mut self) -> BranchTag {
        self.next_branch += 1;

        BranchTag(self.next_branch)
    }
}
