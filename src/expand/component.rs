//! Expanded components and text normalization.

use std::{collections::HashMap, slice};

use sha2::{Digest, Sha256};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::{
    consts::{PLACEHOLDER_GUARD, PLACEHOLDER_ID_LENGTH},
    expand::handler::HandledTemplate,
};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A typed component after nested template expansion.
pub enum ExpandedComponent {
    /// Name marker of a template invocation, for example the branching
    /// template head.
    TemplateName(String),
    /// An expanded parameter of a branching template.
    Parameter(ExpandedParameter),
    /// A plain run of text outside any template.
    Text(TextValue),
    /// Content of a collapsible box.
    Collapse(TextValue),
    /// Colored description text.
    Description(TextValue),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// A template parameter with its nested sub-templates expanded.
///
/// Each nested template span in the raw value has been replaced by a
/// `$$id$$` placeholder; `nested` maps every such id to its expanded
/// sub-structure. The id is a content hash of the exact span text, so it is
/// stable for identical text within one document.
pub struct ExpandedParameter {
    /// Parameter name, for example `选项1` or `剧情2`.
    pub name: String,
    /// Normalized value with placeholders spliced in, or `None` when the
    /// value was empty.
    pub value: Option<TextValue>,
    /// Expanded sub-structure per placeholder id appearing in `value`.
    pub nested: HashMap<String, NestedTemplate>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// The expanded sub-structure a placeholder stands in for.
pub enum NestedTemplate {
    /// A nested branching template, expanded to its component list.
    OptionBlock(Vec<ExpandedComponent>),
    /// Output of the registered handler for a non-branching template.
    Handled(HandledTemplate),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Normalized text content: a single line or an ordered sequence of lines.
pub enum TextValue {
    Line(String),
    Lines(Vec<String>),
}

impl TextValue {
    /// Iterate over the contained lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        let lines: &[String] = match self {
            TextValue::Line(line) => slice::from_ref(line),
            TextValue::Lines(lines) => lines.as_slice(),
        };

        lines.iter().map(String::as_str)
    }
}

/// Normalize raw text into a line-or-sequence form.
///
/// Strips the text, removes markup leftovers and splits on line breaks,
/// dropping lines that end up empty. Returns `None` when nothing remains.
pub(crate) fn sequence_text(text: &str) -> Option<TextValue> {
    let cleaned = clean_markup(text.trim());

    if !cleaned.contains('\n') {
        let line = cleaned.trim();

        if line.is_empty() {
            None
        } else {
            Some(TextValue::Line(line.to_string()))
        }
    } else {
        let lines = cleaned
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();

        if lines.is_empty() {
            None
        } else {
            Some(TextValue::Lines(lines))
        }
    }
}

/// Remove markup that carries no dialogue: html-style tags (including
/// `<br>`), emphasis stars and horizontal rules.
fn clean_markup(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];

        if rest.starts_with("----") {
            pos += 4;
        } else if rest.starts_with('<') {
            match rest.find('>') {
                Some(end) => pos += end + 1,
                None => {
                    cleaned.push('<');
                    pos += 1;
                }
            }
        } else if rest.starts_with('*') {
            pos += 1;
        } else {
            let character = rest.chars().next().unwrap();
            cleaned.push(character);
            pos += character.len_utf8();
        }
    }

    cleaned
}

/// Compute the placeholder id for a nested template span: the leading
/// digits of its SHA-256 digest as a fixed-width decimal string.
pub(crate) fn placeholder_id(span_text: &str) -> String {
    let digest = Sha256::digest(span_text.as_bytes());

    let mut leading = [0; 8];
    leading.copy_from_slice(&digest[..8]);
    let value = u64::from_be_bytes(leading) % 10_000_000_000;

    format!("{:0width$}", value, width = PLACEHOLDER_ID_LENGTH)
}

/// Format a placeholder id as it appears spliced into a value.
pub(crate) fn make_placeholder(id: &str) -> String {
    format!("{}{}{}", PLACEHOLDER_GUARD, id, PLACEHOLDER_GUARD)
}

/// Get the placeholder id if the line is exactly a placeholder reference.
pub(crate) fn placeholder_reference(line: &str) -> Option<&str> {
    let inner = line
        .trim()
        .strip_prefix(PLACEHOLDER_GUARD)?
        .strip_suffix(PLACEHOLDER_GUARD)?;

    if inner.len() == PLACEHOLDER_ID_LENGTH && inner.bytes().all(|byte| byte.is_ascii_digit()) {
        Some(inner)
    } else {
        None
    }
}
