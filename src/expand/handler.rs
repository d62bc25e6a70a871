//! Handler seam for non-branching templates.
//!
//! Branching (`剧情选项`) templates are expanded by this crate itself.
//! Everything else that can nest inside a continuation (colored text,
//! collapsible boxes, tab groups) is dispatched through the
//! [`TemplateHandler`] trait, so a consumer can extend or replace the
//! [`DefaultHandler`] without touching the expander.

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::{
    consts::{
        COLLAPSE_CONTENT_PARAMETER, COLLAPSE_TEMPLATE_NAME, COLOR_TEMPLATE_NAME,
        DESCRIPTION_MARKER, IGNORED_TEMPLATE_NAMES, TABBER_TEMPLATE_NAME,
    },
    error::{ExpandError, ExpandErrorKind, ParseError},
    expand::{
        component::{sequence_text, ExpandedComponent},
        expand::expand_handled_content,
    },
    log::{Logger, Warning},
};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// One argument of a template invocation.
pub struct TemplateArgument {
    /// Argument name, or `None` for positional arguments.
    pub name: Option<String>,
    /// Raw argument value.
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// What a handler produced for a non-branching template.
pub enum HandledTemplate {
    /// Fully expanded components, ready for graph building.
    Components(Vec<ExpandedComponent>),
    /// Raw values (one per tab) that the caller should parse further.
    RawValues(Vec<String>),
    /// Replacement text spliced directly into the surrounding value.
    Inline(String),
}

/// Dispatcher for templates the expander does not handle itself.
///
/// Returning `Ok(None)` drops the template without error (the ignore list);
/// returning [`ExpandErrorKind::UnknownTemplate`] aborts the parse. A
/// handler may recurse back into the expander for argument content that
/// holds further templates, hence the parse-level error type.
pub trait TemplateHandler {
    fn handle(
        &mut self,
        name: &str,
        arguments: &[TemplateArgument],
    ) -> Result<Option<HandledTemplate>, ParseError>;
}

#[derive(Clone, Debug)]
/// Handler covering the templates found on dialogue pages.
pub struct DefaultHandler {
    ignored: Vec<String>,
}

impl Default for DefaultHandler {
    fn default() -> Self {
        DefaultHandler {
            ignored: IGNORED_TEMPLATE_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl TemplateHandler for DefaultHandler {
    fn handle(
        &mut self,
        name: &str,
        arguments: &[TemplateArgument],
    ) -> Result<Option<HandledTemplate>, ParseError> {
        let name = name.trim();

        if self.ignored.iter().any(|ignored| ignored == name) {
            return Ok(None);
        }

        match name {
            TABBER_TEMPLATE_NAME => Ok(Some(HandledTemplate::RawValues(
                arguments
                    .iter()
                    .map(|argument| argument.value.trim().to_string())
                    .collect(),
            ))),
            COLLAPSE_TEMPLATE_NAME => collapse_content(arguments, self),
            COLOR_TEMPLATE_NAME => Ok(colored_text(arguments)),
            _ => Err(ExpandError::unknown_template(name).into()),
        }
    }
}

/// Content of a `折叠` box, taken from its `内容` argument.
///
/// Content holding further templates goes back through the expander, so an
/// inline splice lands inside the collapse text while component output
/// follows the collapse component in document order.
fn collapse_content(
    arguments: &[TemplateArgument],
    handler: &mut dyn TemplateHandler,
) -> Result<Option<HandledTemplate>, ParseError> {
    let content = match arguments
        .iter()
        .find(|argument| argument.name.as_deref() == Some(COLLAPSE_CONTENT_PARAMETER))
    {
        Some(content) => content,
        None => return Ok(None),
    };

    let (text, mut trailing) = if content.value.contains("{{") {
        expand_handled_content(&content.value, handler)?
    } else {
        (content.value.clone(), Vec::new())
    };

    let mut components = Vec::new();
    if let Some(value) = sequence_text(&text) {
        components.push(ExpandedComponent::Collapse(value));
    }
    components.append(&mut trailing);

    if components.is_empty() {
        Ok(None)
    } else {
        Ok(Some(HandledTemplate::Components(components)))
    }
}

/// A `颜色` invocation: `描述` text is spliced inline, any other color
/// becomes a description component.
fn colored_text(arguments: &[TemplateArgument]) -> Option<HandledTemplate> {
    match arguments {
        [color, content, ..] if color.value.trim() == DESCRIPTION_MARKER => {
            Some(HandledTemplate::Inline(content.value.trim().to_string()))
        }
        [_, content, ..] => {
            let value = sequence_text(&content.value)?;

            Some(HandledTemplate::Components(vec![
                ExpandedComponent::Description(value),
            ]))
        }
        _ => None,
    }
}

/// Wrapper downgrading unknown templates to collected warnings.
///
/// This is a diagnostic mode: unknown templates resolve to nothing, so the
/// resulting graph may be missing content. The dropped names are recorded
/// in [`Logger`] for inspection after the run.
#[derive(Clone, Debug)]
pub struct LenientHandler<H> {
    inner: H,
    /// Collected diagnostics.
    pub logger: Logger,
}

impl<H: TemplateHandler> LenientHandler<H> {
    pub fn new(inner: H) -> Self {
        LenientHandler {
            inner,
            logger: Logger::default(),
        }
    }
}

impl<H: TemplateHandler> TemplateHandler for LenientHandler<H> {
    fn handle(
        &mut self,
        name: &str,
        arguments: &[TemplateArgument],
    ) -> Result<Option<HandledTemplate>, ParseError> {
        match self.inner.handle(name, arguments) {
            Err(ParseError::Expand(ExpandError {
                kind: ExpandErrorKind::UnknownTemplate,
                template,
            })) => {
                self.logger.add_warning(Warning::UnknownTemplate { name: template });
                Ok(None)
            }
            other => other,
        }
    }
}
