//! Recursive expansion of tokenized templates.

use std::collections::HashMap;

use crate::{
    consts::OPTION_TEMPLATE_NAME,
    error::{ExpandError, ParseError},
    expand::{
        component::{
            make_placeholder, placeholder_id, sequence_text, ExpandedComponent,
            ExpandedParameter, NestedTemplate,
        },
        handler::{HandledTemplate, TemplateArgument, TemplateHandler},
    },
    token::{scan_nested_spans, scan_template, Parameter, Token},
};

/// Parse a raw option template invocation into expanded components.
///
/// Tokenizes the invocation and expands every nested template span found in
/// parameter values: branching sub-templates are expanded recursively and
/// recorded under a `$$id$$` placeholder, all other templates go through
/// the given handler. The returned component list starts with the template
/// name marker and is ready for graph building.
pub fn parse_option_template(
    code: &str,
    handler: &mut dyn TemplateHandler,
) -> Result<Vec<ExpandedComponent>, ParseError> {
    let tokens = scan_template(code)?;

    expand_tokens(tokens, handler)
}

fn expand_tokens(
    tokens: Vec<Token>,
    handler: &mut dyn TemplateHandler,
) -> Result<Vec<ExpandedComponent>, ParseError> {
    let mut components = Vec::new();

    for token in tokens {
        if let Some(component) = expand_token(token, handler)? {
            components.push(component);
        }
    }

    Ok(components)
}

fn expand_token(
    token: Token,
    handler: &mut dyn TemplateHandler,
) -> Result<Option<ExpandedComponent>, ParseError> {
    match token {
        Token::Text(text) => Ok(sequence_text(&text).map(ExpandedComponent::Text)),
        Token::TemplateName(name) => Ok(Some(ExpandedComponent::TemplateName(name))),
        Token::Parameter(parameter) => expand_parameter(parameter, handler)
            .map(|parameter| Some(ExpandedComponent::Parameter(parameter))),
    }
}

/// Expand one parameter, splicing placeholders in place of nested spans.
fn expand_parameter(
    parameter: Parameter,
    handler: &mut dyn TemplateHandler,
) -> Result<ExpandedParameter, ParseError> {
    if parameter.nested_spans.is_empty() {
        return Ok(ExpandedParameter {
            name: parameter.name,
            value: sequence_text(&parameter.value),
            nested: HashMap::new(),
        });
    }

    let mut spliced = String::with_capacity(parameter.value.len());
    let mut nested = HashMap::new();
    let mut slice_start = 0;

    for span in &parameter.nested_spans {
        spliced.push_str(&parameter.value[slice_start..span.start]);
        slice_start = span.end;

        let span_text = &parameter.value[span.clone()];

        match expand_span(span_text, handler)? {
            SpanExpansion::Nested(id, template) => {
                spliced.push_str(&make_placeholder(&id));
                insert_nested(&mut nested, id, template, span_text)?;
            }
            SpanExpansion::Inline(text) => spliced.push_str(&text),
            SpanExpansion::Dropped => (),
        }
    }

    spliced.push_str(&parameter.value[slice_start..]);

    Ok(ExpandedParameter {
        name: parameter.name,
        value: sequence_text(&spliced),
        nested,
    })
}

/// Record a nested expansion under its placeholder id.
///
/// Identical span text deliberately shares one id and one entry. A
/// differing entry under the same id means the 10-digit truncation
/// collided for two distinct spans, which is fatal.
fn insert_nested(
    nested: &mut HashMap<String, NestedTemplate>,
    id: String,
    template: NestedTemplate,
    span_text: &str,
) -> Result<(), ExpandError> {
    match nested.get(&id) {
        Some(existing) if *existing != template => {
            Err(ExpandError::placeholder_collision(span_text))
        }
        _ => {
            nested.insert(id, template);
            Ok(())
        }
    }
}

enum SpanExpansion {
    /// The span becomes a placeholder with an entry in the nested map.
    Nested(String, NestedTemplate),
    /// The span is replaced by literal text.
    Inline(String),
    /// The span resolves to nothing (ignored template).
    Dropped,
}

/// Expand one nested `{{...}}` span.
///
/// A span whose tokens contain the branching template marker is expanded
/// recursively; anything else is dispatched to the handler.
fn expand_span(
    span_text: &str,
    handler: &mut dyn TemplateHandler,
) -> Result<SpanExpansion, ParseError> {
    let tokens = scan_template(span_text)?;

    let is_option_template = tokens
        .iter()
        .any(|token| matches!(token, Token::TemplateName(name) if name == OPTION_TEMPLATE_NAME));

    if is_option_template {
        let components = expand_tokens(tokens, handler)?;

        Ok(SpanExpansion::Nested(
            placeholder_id(span_text),
            NestedTemplate::OptionBlock(components),
        ))
    } else {
        let (name, arguments) = template_invocation(&tokens, span_text)?;

        match handler.handle(&name, &arguments)? {
            None => Ok(SpanExpansion::Dropped),
            Some(HandledTemplate::Inline(text)) => Ok(SpanExpansion::Inline(text)),
            Some(handled) => Ok(SpanExpansion::Nested(
                placeholder_id(span_text),
                NestedTemplate::Handled(handled),
            )),
        }
    }
}

/// Expand the nested template spans inside the content of a handled
/// template, for example a collapse box.
///
/// Inline output splices into the returned text and ignored templates
/// splice to nothing, exactly as in parameter values. Component output
/// cannot sit inside the carrying text and is collected separately, in
/// document order. A branching template cannot attach here and is fatal.
pub(crate) fn expand_handled_content(
    content: &str,
    handler: &mut dyn TemplateHandler,
) -> Result<(String, Vec<ExpandedComponent>), ParseError> {
    let spans = scan_nested_spans(content)?;

    let mut spliced = String::with_capacity(content.len());
    let mut components = Vec::new();
    let mut slice_start = 0;

    for span in &spans {
        spliced.push_str(&content[slice_start..span.start]);
        slice_start = span.end;

        let span_text = &content[span.clone()];

        match expand_span(span_text, handler)? {
            SpanExpansion::Inline(text) => spliced.push_str(&text),
            SpanExpansion::Dropped => (),
            SpanExpansion::Nested(_, NestedTemplate::OptionBlock(_)) => {
                return Err(ExpandError::misplaced_option_template(span_text).into());
            }
            SpanExpansion::Nested(_, NestedTemplate::Handled(handled)) => match handled {
                HandledTemplate::Components(inner) => components.extend(inner),
                HandledTemplate::RawValues(values) => components.extend(
                    values
                        .iter()
                        .filter_map(|value| sequence_text(value))
                        .map(ExpandedComponent::Text),
                ),
                HandledTemplate::Inline(text) => spliced.push_str(&text),
            },
        }
    }

    spliced.push_str(&content[slice_start..]);

    Ok((spliced, components))
}

/// Split a token stream into the template name and its argument list.
fn template_invocation(
    tokens: &[Token],
    span_text: &str,
) -> Result<(String, Vec<TemplateArgument>), ExpandError> {
    let mut name = None;
    let mut arguments = Vec::new();

    for token in tokens {
        match token {
            Token::TemplateName(template_name) if name.is_none() => {
                name = Some(template_name.clone());
            }
            Token::Parameter(parameter) => arguments.push(TemplateArgument {
                name: if parameter.name.is_empty() {
                    None
                } else {
                    Some(parameter.name.clone())
                },
                value: parameter.value.clone(),
            }),
            _ => (),
        }
    }

    let name = name.ok_or_else(|| ExpandError::missing_template_name(span_text))?;

    Ok((name, arguments))
}
