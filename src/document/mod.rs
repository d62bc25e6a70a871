//! Assembling a full document, section by section, into one graph.

mod assemble;
mod section;

pub use assemble::build_document_graph;
pub use section::{Block, Section};
