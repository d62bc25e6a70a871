#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::expand::ExpandedComponent;

/// One top-level component run of a section: a plain text run, a branching
/// block (starting with the option template name marker) or an inline
/// block such as a collapsible box.
pub type Block = Vec<ExpandedComponent>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A top-level document section, as pre-split by the external wikitext
/// parser.
pub struct Section {
    /// Section title.
    pub name: String,
    /// Blocks in document order.
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new<S: Into<String>>(name: S, blocks: Vec<Block>) -> Self {
        Section {
            name: name.into(),
            blocks,
        }
    }
}
