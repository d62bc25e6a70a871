//! Errors from building a dialogue graph out of expanded components.

use std::{error::Error, fmt};

#[derive(Clone, Debug, PartialEq)]
/// Error from building a dialogue graph.
///
/// All variants indicate that the source document violates the option
/// template contract. The build is aborted, the input is never patched.
pub enum BuildError {
    /// A branching block did not start with the option template name marker.
    MissingTemplateHeader,
    /// The same choice parameter was defined twice.
    RedundantChoice { name: String },
    /// The same continuation parameter was defined twice.
    RedundantContinuation { name: String },
    /// A continuation references a choice that does not exist.
    UnpairedContinuation { name: String },
    /// A choice or continuation parameter name carries no trailing index.
    MissingChoiceIndex { name: String },
    /// An option template parameter is neither a choice nor a continuation.
    UnknownParameter { name: String },
    /// A placeholder in a continuation has no matching nested template.
    MissingNestedTemplate { placeholder: String },
    /// A component appeared where the builder cannot place it in the graph.
    UnexpectedComponent,
}

impl Error for BuildError {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use BuildError::*;

        match self {
            MissingTemplateHeader => {
                write!(f, "branching block does not start with the option template marker")
            }
            RedundantChoice { name } => write!(f, "redundant choice '{}' found", name),
            RedundantContinuation { name } => {
                write!(f, "redundant continuation '{}' found", name)
            }
            UnpairedContinuation { name } => {
                write!(f, "no pairing choice found for continuation '{}'", name)
            }
            MissingChoiceIndex { name } => {
                write!(f, "parameter '{}' carries no trailing index", name)
            }
            UnknownParameter { name } => write!(
                f,
                "parameter '{}' is neither a choice nor a continuation",
                name
            ),
            MissingNestedTemplate { placeholder } => write!(
                f,
                "placeholder '{}' has no matching nested template",
                placeholder
            ),
            UnexpectedComponent => {
                write!(f, "component cannot be placed in the dialogue graph")
            }
        }
    }
}
