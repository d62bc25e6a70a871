//! Building the branching part of the graph from an expanded option block.
//!
//! One invocation covers one `剧情选项` template: every choice becomes an
//! option node fanning in from the caller's frontier, every continuation a
//! chain of plot nodes behind its choice, and nested option templates
//! recurse under a fresh branch tag so leaf detection per scope stays
//! isolated.

use petgraph::graph::NodeIndex;

use crate::{
    consts::{CHOICE_PARAMETER_MARKER, OPTION_TEMPLATE_NAME, PLOT_PARAMETER_MARKER},
    error::BuildError,
    expand::{
        placeholder_reference, sequence_text, ExpandedComponent, ExpandedParameter,
        HandledTemplate, NestedTemplate,
    },
    graph::{
        graph::DialogueGraph,
        node::{BranchTag, DialogueNode, IdGenerator, NodeKind},
    },
    line::split_speaker_line,
};

/// One choice with its optional continuation script.
struct ChoicePair<'a> {
    name: &'a str,
    /// 1-based index from the trailing digits of the parameter name.
    index: u32,
    choice: &'a ExpandedParameter,
    continuation: Option<&'a ExpandedParameter>,
}

/// Build the graph for one option template block.
///
/// Edges fan out from every node in `frontier` to each choice node: all
/// preceding alternatives converge into the junction before diverging
/// again. Returns the block's terminal set, which becomes the caller's new
/// frontier.
pub(crate) fn build_option_block(
    components: &[ExpandedComponent],
    graph: &mut DialogueGraph,
    ids: &mut IdGenerator,
    frontier: &[NodeIndex],
    branch: BranchTag,
) -> Result<Vec<NodeIndex>, BuildError> {
    let parameters = option_template_parameters(components)?;
    let pairs = pair_choices(&parameters)?;

    let mut choice_nodes = Vec::with_capacity(pairs.len());
    for pair in &pairs {
        choice_nodes.push(add_choice_node(pair, graph, ids, frontier, branch));
    }

    // Frontiers left over where a continuation ended in a nested block.
    // Such nodes belong to the nested scope, so the branch-filtered scan
    // below cannot see them, yet they are real endpoints of this block.
    let mut nested_tails = Vec::new();

    for (pair, choice_node) in pairs.iter().zip(&choice_nodes) {
        let continuation = match pair.continuation {
            Some(continuation) => continuation,
            None => continue,
        };

        // A choice whose line was empty created no node to chain from.
        let choice_node = match choice_node {
            Some(node) => *node,
            None => continue,
        };

        let value = match &continuation.value {
            Some(value) => value,
            None => continue,
        };

        let mut local_frontier = vec![choice_node];

        for line in value.lines() {
            if let Some(id) = placeholder_reference(line) {
                let nested = continuation.nested.get(id).ok_or_else(|| {
                    BuildError::MissingNestedTemplate {
                        placeholder: id.to_string(),
                    }
                })?;

                local_frontier = build_nested(nested, graph, ids, &local_frontier, branch)?;
            } else if let Some(speaker_line) = split_speaker_line(line) {
                let id = ids.node_id(&speaker_line.speaker, &speaker_line.content);
                let node = graph.add_node(DialogueNode::new(
                    id,
                    speaker_line.speaker,
                    speaker_line.content,
                    NodeKind::Plot(pair.index),
                    branch,
                ));

                graph.connect(&local_frontier, node);
                local_frontier = vec![node];
            }
        }

        nested_tails.extend(local_frontier);
    }

    let mut ends = graph.branch_leaves(branch);
    for node in nested_tails {
        if graph.out_degree(node) == 0 && !ends.contains(&node) {
            ends.push(node);
        }
    }

    Ok(ends)
}

/// Verify the block head and collect its parameters.
fn option_template_parameters(
    components: &[ExpandedComponent],
) -> Result<Vec<&ExpandedParameter>, BuildError> {
    match components.first() {
        Some(ExpandedComponent::TemplateName(name)) if name == OPTION_TEMPLATE_NAME => (),
        _ => return Err(BuildError::MissingTemplateHeader),
    }

    components[1..]
        .iter()
        .map(|component| match component {
            ExpandedComponent::Parameter(parameter) => Ok(parameter),
            _ => Err(BuildError::UnexpectedComponent),
        })
        .collect()
}

/// Pair every choice with its continuation, in document order.
///
/// A duplicated choice or continuation name and a continuation without a
/// preceding matching choice are fatal: silently overwriting or dropping a
/// definition would change the script.
fn pair_choices<'a>(
    parameters: &[&'a ExpandedParameter],
) -> Result<Vec<ChoicePair<'a>>, BuildError> {
    let mut pairs: Vec<ChoicePair> = Vec::new();

    for parameter in parameters {
        let name = parameter.name.as_str();

        if name.contains(CHOICE_PARAMETER_MARKER) {
            if pairs.iter().any(|pair| pair.name == name) {
                return Err(BuildError::RedundantChoice {
                    name: name.to_string(),
                });
            }

            let index = trailing_index(name).ok_or_else(|| BuildError::MissingChoiceIndex {
                name: name.to_string(),
            })?;

            pairs.push(ChoicePair {
                name,
                index,
                choice: parameter,
                continuation: None,
            });
        } else if name.contains(PLOT_PARAMETER_MARKER) {
            let index = trailing_index(name).ok_or_else(|| BuildError::MissingChoiceIndex {
                name: name.to_string(),
            })?;

            let choice_name = format!("{}{}", CHOICE_PARAMETER_MARKER, index);
            let pair = pairs
                .iter_mut()
                .find(|pair| pair.name == choice_name)
                .ok_or_else(|| BuildError::UnpairedContinuation {
                    name: name.to_string(),
                })?;

            if pair.continuation.is_some() {
                return Err(BuildError::RedundantContinuation {
                    name: name.to_string(),
                });
            }

            pair.continuation = Some(parameter);
        } else {
            return Err(BuildError::UnknownParameter {
                name: name.to_string(),
            });
        }
    }

    Ok(pairs)
}

/// Parse the 1-based index from the trailing digits of a parameter name.
fn trailing_index(name: &str) -> Option<u32> {
    let digits = name
        .chars()
        .rev()
        .take_while(|character| character.is_ascii_digit())
        .collect::<Vec<_>>();

    if digits.is_empty() {
        return None;
    }

    digits.iter().rev().collect::<String>().parse().ok()
}

/// Create the option node for one choice and fan in from the frontier.
///
/// Choices with an empty line are skipped. A multi-line choice value labels
/// the node with its first line.
fn add_choice_node(
    pair: &ChoicePair,
    graph: &mut DialogueGraph,
    ids: &mut IdGenerator,
    frontier: &[NodeIndex],
    branch: BranchTag,
) -> Option<NodeIndex> {
    let value = pair.choice.value.as_ref()?;
    let line = value.lines().next()?;
    let speaker_line = split_speaker_line(line)?;

    let id = ids.node_id(&speaker_line.speaker, &speaker_line.content);
    let node = graph.add_node(DialogueNode::new(
        id,
        speaker_line.speaker,
        speaker_line.content,
        NodeKind::Option(pair.index),
        branch,
    ));

    graph.connect(frontier, node);

    Some(node)
}

/// Build the sub-structure a placeholder resolved to.
///
/// Nested option blocks recurse under a freshly drawn branch tag; handler
/// output chains into the current scope as line or collapse nodes.
fn build_nested(
    nested: &NestedTemplate,
    graph: &mut DialogueGraph,
    ids: &mut IdGenerator,
    frontier: &[NodeIndex],
    branch: BranchTag,
) -> Result<Vec<NodeIndex>, BuildError> {
    match nested {
        NestedTemplate::OptionBlock(components) => {
            let nested_branch = ids.branch_tag();

            build_option_block(components, graph, ids, frontier, nested_branch)
        }
        NestedTemplate::Handled(HandledTemplate::Components(components)) => {
            let mut local_frontier = frontier.to_vec();

            for component in components {
                let (value, kind) = match component {
                    ExpandedComponent::Collapse(value) => (value, NodeKind::Collapse),
                    ExpandedComponent::Text(value) | ExpandedComponent::Description(value) => {
                        (value, NodeKind::Line)
                    }
                    _ => return Err(BuildError::UnexpectedComponent),
                };

                local_frontier =
                    chain_text_nodes(graph, ids, &local_frontier, value.lines(), kind, branch);
            }

            Ok(local_frontier)
        }
        NestedTemplate::Handled(HandledTemplate::RawValues(values)) => {
            let mut local_frontier = frontier.to_vec();

            for value in values {
                if let Some(value) = sequence_text(value) {
                    local_frontier = chain_text_nodes(
                        graph,
                        ids,
                        &local_frontier,
                        value.lines(),
                        NodeKind::Line,
                        branch,
                    );
                }
            }

            Ok(local_frontier)
        }
        NestedTemplate::Handled(HandledTemplate::Inline(text)) => Ok(chain_text_nodes(
            graph,
            ids,
            frontier,
            std::iter::once(text.as_str()),
            NodeKind::Line,
            branch,
        )),
    }
}

/// Chain lines as a linear run of nodes behind the frontier.
///
/// Returns the new frontier: the last created node, or the input frontier
/// unchanged when every line was empty.
pub(crate) fn chain_text_nodes<'a>(
    graph: &mut DialogueGraph,
    ids: &mut IdGenerator,
    frontier: &[NodeIndex],
    lines: impl Iterator<Item = &'a str>,
    kind: NodeKind,
    branch: BranchTag,
) -> Vec<NodeIndex> {
    let mut current = frontier.to_vec();

    for line in lines {
        if let Some(speaker_line) = split_speaker_line(line) {
            let id = ids.node_id(&speaker_line.speaker, &speaker_line.content);
            let node = graph.add_node(DialogueNode::new(
                id,
                speaker_line.speaker,
                speaker_line.content,
                kind,
                branch,
            ));

            graph.connect(&current, node);
            current = vec![node];
        }
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::{parse_option_template, DefaultHandler};

    fn parse(code: &str) -> Vec<ExpandedComponent> {
        let mut handler = DefaultHandler::default();

        parse_option_template(code, &mut handler).unwrap()
    }

    fn build(code: &str) -> (DialogueGraph, Vec<NodeIndex>) {
        let components = parse(code);
        let mut graph = DialogueGraph::new();
        let mut ids = IdGenerator::new();
        let branch = ids.branch_tag();

        let ends = build_option_block(&components, &mut graph, &mut ids, &[], branch).unwrap();

        (graph, ends)
    }

    fn build_error(code: &str) -> BuildError {
        let components = parse(code);
        let mut graph = DialogueGraph::new();
        let mut ids = IdGenerator::new();
        let branch = ids.branch_tag();

        build_option_block(&components, &mut graph, &mut ids, &[], branch).unwrap_err()
    }

    #[test]
    fn choice_and_continuation_build_a_two_node_chain() {
        let (graph, ends) = build("{{剧情选项|选项1=A: hi|剧情1=B: bye}}");

        assert_eq!(graph.node_count(), 2);

        let option = graph.find_by_content("hi").unwrap();
        let plot = graph.find_by_content("bye").unwrap();

        assert_eq!(graph[option].kind, NodeKind::Option(1));
        assert_eq!(graph[option].speaker, "A");
        assert_eq!(graph[plot].kind, NodeKind::Plot(1));
        assert_eq!(graph[plot].speaker, "B");
        assert!(graph.has_edge(option, plot));
        assert_eq!(ends, vec![plot]);
    }

    #[test]
    fn choice_without_continuation_is_its_own_terminal() {
        let (graph, ends) = build("{{剧情选项|选项1=A: hi}}");

        assert_eq!(graph.node_count(), 1);

        let option = graph.find_by_content("hi").unwrap();
        assert_eq!(ends, vec![option]);
    }

    #[test]
    fn one_option_node_per_distinct_choice_name() {
        let (graph, _) = build("{{剧情选项|选项1=a|选项2=b|选项3=c}}");

        let options = graph
            .nodes()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Option(_)))
            .count();

        assert_eq!(options, 3);
    }

    #[test]
    fn every_option_node_fans_in_from_the_whole_frontier() {
        let components = parse("{{剧情选项|选项1=a|选项2=b}}");
        let mut graph = DialogueGraph::new();
        let mut ids = IdGenerator::new();

        let first = graph.add_node(DialogueNode::new(
            ids.node_id("甲", "一"),
            "甲".to_string(),
            "一".to_string(),
            NodeKind::Line,
            BranchTag::ROOT,
        ));
        let second = graph.add_node(DialogueNode::new(
            ids.node_id("乙", "二"),
            "乙".to_string(),
            "二".to_string(),
            NodeKind::Line,
            BranchTag::ROOT,
        ));

        let branch = ids.branch_tag();
        build_option_block(&components, &mut graph, &mut ids, &[first, second], branch).unwrap();

        for (index, node) in graph.nodes() {
            if matches!(node.kind, NodeKind::Option(_)) {
                assert_eq!(graph.in_degree(index), 2);
            }
        }
    }

    #[test]
    fn multiline_continuation_chains_plot_nodes_in_order() {
        let (graph, ends) = build("{{剧情选项|选项1=a|剧情1=甲: 一\n乙: 二\n丙: 三}}");

        let first = graph.find_by_content("一").unwrap();
        let second = graph.find_by_content("二").unwrap();
        let third = graph.find_by_content("三").unwrap();

        assert!(graph.has_edge(first, second));
        assert!(graph.has_edge(second, third));
        assert_eq!(ends, vec![third]);
    }

    #[test]
    fn nested_option_block_builds_under_its_own_branch() {
        let (graph, _) =
            build("{{剧情选项|选项1=a|剧情1={{剧情选项|选项1=b|剧情1=c}}}}");

        let outer = graph.find_by_content("a").unwrap();
        let inner = graph.find_by_content("b").unwrap();

        assert!(graph.has_edge(outer, inner));
        assert_ne!(graph[outer].branch, graph[inner].branch);
    }

    #[test]
    fn terminal_set_of_uneven_continuations_holds_every_true_leaf() {
        let (graph, ends) =
            build("{{剧情选项|选项1=a|剧情1=甲: 一\n乙: 二|选项2=b|剧情2=丙: 三}}");

        let long_tail = graph.find_by_content("二").unwrap();
        let short_tail = graph.find_by_content("三").unwrap();

        assert_eq!(ends.len(), 2);
        assert!(ends.contains(&long_tail));
        assert!(ends.contains(&short_tail));
    }

    #[test]
    fn trailing_nested_block_leaves_stay_in_the_terminal_set() {
        let (graph, ends) =
            build("{{剧情选项|选项1=a|剧情1=甲: 一\n{{剧情选项|选项1=b|选项2=c}}}}");

        let nested_first = graph.find_by_content("b").unwrap();
        let nested_second = graph.find_by_content("c").unwrap();

        assert_eq!(ends.len(), 2);
        assert!(ends.contains(&nested_first));
        assert!(ends.contains(&nested_second));
    }

    #[test]
    fn continuation_of_an_empty_choice_is_skipped() {
        let (graph, ends) = build("{{剧情选项|选项1=|剧情1=甲: 一}}");

        assert_eq!(graph.node_count(), 0);
        assert!(ends.is_empty());
    }

    #[test]
    fn redundant_choice_is_a_fatal_error() {
        let error = build_error("{{剧情选项|选项1=a|选项1=b}}");

        assert_eq!(
            error,
            BuildError::RedundantChoice {
                name: "选项1".to_string()
            }
        );
    }

    #[test]
    fn redundant_continuation_is_a_fatal_error() {
        let error = build_error("{{剧情选项|选项1=a|剧情1=b|剧情1=c}}");

        assert_eq!(
            error,
            BuildError::RedundantContinuation {
                name: "剧情1".to_string()
            }
        );
    }

    #[test]
    fn continuation_without_matching_choice_is_a_fatal_error() {
        let error = build_error("{{剧情选项|选项1=a|剧情2=b}}");

        assert_eq!(
            error,
            BuildError::UnpairedContinuation {
                name: "剧情2".to_string()
            }
        );
    }

    #[test]
    fn parameter_that_is_neither_choice_nor_continuation_is_a_fatal_error() {
        let error = build_error("{{剧情选项|台词1=a}}");

        assert_eq!(
            error,
            BuildError::UnknownParameter {
                name: "台词1".to_string()
            }
        );
    }

    #[test]
    fn choice_indices_use_the_full_trailing_digit_run() {
        assert_eq!(trailing_index("选项12"), Some(12));
        assert_eq!(trailing_index("剧情3"), Some(3));
        assert_eq!(trailing_index("选项"), None);
    }
}
