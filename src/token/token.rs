use std::ops::Range;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A single token scanned from a template invocation.
pub enum Token {
    /// Plain text found outside any template.
    Text(String),
    /// Name of a template, marking entry into its invocation.
    TemplateName(String),
    /// A parameter assignment inside a template.
    Parameter(Parameter),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A raw template parameter before nested templates are expanded.
pub struct Parameter {
    /// Parameter name, trimmed. Empty for positional parameters.
    pub name: String,
    /// Raw parameter value, untrimmed so that `nested_spans` stays valid.
    pub value: String,
    /// Byte ranges within `value` covering nested `{{...}}` template spans,
    /// in the order they appear.
    pub nested_spans: Vec<Range<usize>>,
}
