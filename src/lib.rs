//! Build branching dialogue graphs from wiki-style plot option templates.
//!
//! `plotline` takes the markup used by wiki pages to describe branching
//! dialogue and turns it into a directed graph of every conversation path.
//! The markup is a `剧情选项` template whose parameters pair player choices
//! (`选项1`, `选项2`, …) with optional continuation scripts (`剧情1`, …),
//! possibly nesting further option templates inside those scripts.
//!
//! The pipeline is a pure, single-pass transform: tokenize a template
//! invocation, expand nested templates into placeholder-keyed sub-trees,
//! split lines into speaker and content, then assemble the graph section by
//! section. Node identities are derived from content hashes and a per-build
//! sequence counter, so building the same document twice yields the same
//! graph, id for id.
//!
//! Splitting a raw wiki page into sections and top-level template
//! boundaries is the job of an external wikitext parser; this crate begins
//! at [`parse_option_template`] and [`Section`] and ends at the assembled
//! [`DialogueGraph`]. That layer is also expected to rewrite tag-style tab
//! syntax (`<tabber>...</tabber>` with `|-|` separators) into `{{tabber}}`
//! invocations before handing markup over: this crate dispatches tab
//! groups by template name only, and strips any html-style tag it meets as
//! a markup leftover. Serialization of the graph is likewise left to the
//! caller ([`DialogueGraph::inner`] exposes the underlying petgraph
//! structure).
//!
//! # Example
//!
//! ```
//! use plotline::{build_document_graph, parse_option_template, DefaultHandler, Section};
//!
//! let mut handler = DefaultHandler::default();
//! let block = parse_option_template(
//!     "{{剧情选项|选项1=派蒙: 你好|剧情1=旅行者: 再见}}",
//!     &mut handler,
//! ).unwrap();
//!
//! let sections = [Section::new("邂逅", vec![block])];
//! let graph = build_document_graph(&sections).unwrap();
//!
//! // Section entry, one choice, one reply.
//! assert_eq!(graph.node_count(), 3);
//! ```

mod consts;
mod document;
pub mod error;
mod expand;
mod graph;
mod line;
pub mod log;
mod token;

pub use consts::{DEFAULT_SPEAKER, OPTION_TEMPLATE_NAME};
pub use document::{build_document_graph, Block, Section};
pub use error::{BuildError, ExpandError, ParseError, ReadError, TokenizeError};
pub use expand::{
    parse_option_template, DefaultHandler, ExpandedComponent, ExpandedParameter, HandledTemplate,
    LenientHandler, NestedTemplate, TemplateArgument, TemplateHandler, TextValue,
};
pub use graph::{BranchTag, DialogueGraph, DialogueNode, NodeId, NodeIndex, NodeKind};
pub use token::{scan_template, Parameter, Token};
