//! Sequencing section blocks into the cumulative dialogue graph.

use petgraph::graph::NodeIndex;

use crate::{
    consts::TASK_SECTION_NAME,
    document::section::Section,
    error::BuildError,
    expand::ExpandedComponent,
    graph::{
        build_option_block, chain_text_nodes, BranchTag, DialogueGraph, DialogueNode, IdGenerator,
        NodeKind,
    },
};

/// Assemble pre-split document sections into one dialogue graph.
///
/// Every section gets an entry node carrying its name; blocks chain behind
/// it in document order, the previous block's terminal set feeding the next
/// block's start. The section named `任务剧情` carries no dialogue and is
/// skipped entirely.
pub fn build_document_graph(sections: &[Section]) -> Result<DialogueGraph, BuildError> {
    let mut graph = DialogueGraph::new();
    let mut ids = IdGenerator::new();

    for section in sections {
        if section.name.trim() == TASK_SECTION_NAME {
            continue;
        }

        let id = ids.node_id("", &section.name);
        let entry = graph.add_node(DialogueNode::section(id, &section.name));

        let mut frontier = vec![entry];
        let block_count = section.blocks.len();

        for (index, block) in section.blocks.iter().enumerate() {
            let followed_by_more = index + 1 < block_count;

            frontier = assemble_block(block, &mut graph, &mut ids, &frontier, followed_by_more)?;
        }
    }

    Ok(graph)
}

/// Chain one block behind the current frontier, returning the new frontier.
fn assemble_block(
    block: &[ExpandedComponent],
    graph: &mut DialogueGraph,
    ids: &mut IdGenerator,
    frontier: &[NodeIndex],
    followed_by_more: bool,
) -> Result<Vec<NodeIndex>, BuildError> {
    match block.first() {
        None => Ok(frontier.to_vec()),
        Some(ExpandedComponent::Text(value)) | Some(ExpandedComponent::Description(value)) => {
            Ok(chain_text_nodes(
                graph,
                ids,
                frontier,
                value.lines(),
                NodeKind::Line,
                BranchTag::ROOT,
            ))
        }
        Some(ExpandedComponent::Collapse(value)) => Ok(chain_text_nodes(
            graph,
            ids,
            frontier,
            value.lines(),
            NodeKind::Collapse,
            BranchTag::ROOT,
        )),
        Some(ExpandedComponent::TemplateName(_)) => {
            // Each top-level branching block scans for its leaves under its
            // own tag, so leaves of earlier blocks or sections stay out.
            let branch = ids.branch_tag();
            let ends = build_option_block(block, graph, ids, frontier, branch)?;

            if ends.is_empty() {
                return Ok(frontier.to_vec());
            }

            if followed_by_more {
                let id = ids.node_id("", "END");
                let join = graph.add_node(DialogueNode::end(id));
                graph.connect(&ends, join);

                Ok(vec![join])
            } else {
                Ok(ends)
            }
        }
        Some(_) => Err(BuildError::UnexpectedComponent),
    }
}
