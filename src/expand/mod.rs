//! Expansion of nested templates into placeholder-keyed component trees.

mod component;
mod expand;
mod handler;

pub use component::{ExpandedComponent, ExpandedParameter, NestedTemplate, TextValue};
pub(crate) use component::{placeholder_reference, sequence_text};
pub use expand::parse_option_template;
pub use handler::{
    DefaultHandler, HandledTemplate, LenientHandler, TemplateArgument, TemplateHandler,
};
