use plotline::*;

fn parse(code: &str) -> Vec<ExpandedComponent> {
    let mut handler = DefaultHandler::default();

    parse_option_template(code, &mut handler).unwrap()
}

fn single_section(blocks: Vec<Block>) -> DialogueGraph {
    let sections = [Section::new("测试", blocks)];

    build_document_graph(&sections).unwrap()
}

#[test]
fn choice_with_continuation_builds_option_and_plot_chain() {
    let graph = single_section(vec![parse("{{剧情选项|选项1=A: hi|剧情1=B: bye}}")]);

    let option = graph.find_by_content("hi").expect("option node missing");
    let plot = graph.find_by_content("bye").expect("plot node missing");

    assert_eq!(graph[option].speaker, "A");
    assert_eq!(graph[option].kind, NodeKind::Option(1));
    assert_eq!(graph[plot].speaker, "B");
    assert_eq!(graph[plot].kind, NodeKind::Plot(1));

    assert!(graph.has_edge(option, plot));
    assert_eq!(graph.leaves(), vec![plot]);
}

#[test]
fn choice_without_continuation_is_the_terminal_node() {
    let graph = single_section(vec![parse("{{剧情选项|选项1=A: hi}}")]);

    let option = graph.find_by_content("hi").unwrap();

    assert_eq!(graph.leaves(), vec![option]);
    assert!(graph
        .nodes()
        .all(|(_, node)| !matches!(node.kind, NodeKind::Plot(_))));
}

#[test]
fn plain_text_run_chains_lines_under_the_default_speaker() {
    let lines = TextValue::Lines(vec![
        "第一句".to_string(),
        "第二句".to_string(),
        "第三句".to_string(),
    ]);
    let graph = single_section(vec![vec![ExpandedComponent::Text(lines)]]);

    let first = graph.find_by_content("第一句").unwrap();
    let second = graph.find_by_content("第二句").unwrap();
    let third = graph.find_by_content("第三句").unwrap();

    for index in [first, second, third].iter() {
        assert_eq!(graph[*index].speaker, DEFAULT_SPEAKER);
        assert_eq!(graph[*index].kind, NodeKind::Line);
    }

    assert!(graph.has_edge(first, second));
    assert!(graph.has_edge(second, third));
    assert_eq!(graph.leaves(), vec![third]);
}

#[test]
fn all_choices_fan_out_from_the_preceding_line() {
    let graph = single_section(vec![
        vec![ExpandedComponent::Text(TextValue::Line("旁白: 抉择".to_string()))],
        parse("{{剧情选项|选项1=a|选项2=b|选项3=c}}"),
    ]);

    let junction = graph.find_by_content("抉择").unwrap();

    for content in ["a", "b", "c"].iter() {
        let option = graph.find_by_content(content).unwrap();

        assert!(graph.has_edge(junction, option));
        assert_eq!(graph.in_degree(option), 1);
    }
}

#[test]
fn sibling_nested_branches_do_not_cross_contaminate_leaf_sets() {
    // One parent choice whose continuation holds two independent nested
    // branching blocks of different lengths. Every leaf of the first block
    // must feed every choice of the second, and only the second block's
    // leaves survive as the graph's terminal set.
    let graph = single_section(vec![parse(
        "{{剧情选项|选项1=主: 走|剧情1={{剧情选项|选项1=甲: 一|剧情1=甲: 二|选项2=乙: 一}}\n{{剧情选项|选项1=丙: 一}}}}",
    )]);

    let long_leaf = graph.find_by_content("二").unwrap();
    let short_leaf = graph
        .nodes()
        .find(|(_, node)| node.speaker == "乙")
        .map(|(index, _)| index)
        .unwrap();
    let second_block_option = graph
        .nodes()
        .find(|(_, node)| node.speaker == "丙")
        .map(|(index, _)| index)
        .unwrap();

    assert!(graph.has_edge(long_leaf, second_block_option));
    assert!(graph.has_edge(short_leaf, second_block_option));
    assert_eq!(graph.in_degree(second_block_option), 2);

    assert_eq!(graph.leaves(), vec![second_block_option]);
}

#[test]
fn nested_branches_recurse_to_arbitrary_depth() {
    let graph = single_section(vec![parse(
        "{{剧情选项|选项1=a|剧情1={{剧情选项|选项1=b|剧情1={{剧情选项|选项1=c}}}}}}",
    )]);

    let first = graph.find_by_content("a").unwrap();
    let second = graph.find_by_content("b").unwrap();
    let third = graph.find_by_content("c").unwrap();

    assert!(graph.has_edge(first, second));
    assert!(graph.has_edge(second, third));
    assert_eq!(graph.leaves(), vec![third]);

    // Three recursion levels, three distinct branch scopes.
    assert_ne!(graph[first].branch, graph[second].branch);
    assert_ne!(graph[second].branch, graph[third].branch);
    assert_ne!(graph[first].branch, graph[third].branch);
}

#[test]
fn collapse_boxes_expand_their_nested_templates() {
    let graph = single_section(vec![parse(
        "{{剧情选项|选项1=甲: 走|剧情1={{折叠|内容=乙: 往事{{颜色|描述|雨声}}}}}}",
    )]);

    let collapse = graph
        .find_by_content("往事雨声")
        .expect("collapse node missing or nested template kept as literal braces");

    assert_eq!(graph[collapse].kind, NodeKind::Collapse);
    assert_eq!(graph[collapse].speaker, "乙");

    let option = graph.find_by_content("走").unwrap();
    assert!(graph.has_edge(option, collapse));
}

#[test]
fn blocks_chain_across_a_section_through_an_end_join() {
    let graph = single_section(vec![
        parse("{{剧情选项|选项1=a|选项2=b}}"),
        vec![ExpandedComponent::Text(TextValue::Line("旁白: 后记".to_string()))],
    ]);

    let afterword = graph.find_by_content("后记").unwrap();

    // Both choices reach the afterword through exactly one join node.
    assert_eq!(graph.in_degree(afterword), 1);
    assert_eq!(graph.leaves(), vec![afterword]);

    let join = graph
        .nodes()
        .find(|(_, node)| node.kind == NodeKind::End)
        .map(|(index, _)| index)
        .unwrap();

    assert_eq!(graph.in_degree(join), 2);
}

#[test]
fn sections_are_independent_entry_points() {
    let sections = [
        Section::new(
            "第一幕",
            vec![vec![ExpandedComponent::Text(TextValue::Line(
                "甲: 一".to_string(),
            ))]],
        ),
        Section::new(
            "第二幕",
            vec![vec![ExpandedComponent::Text(TextValue::Line(
                "乙: 二".to_string(),
            ))]],
        ),
    ];

    let graph = build_document_graph(&sections).unwrap();

    let first_line = graph.find_by_content("一").unwrap();
    let second_line = graph.find_by_content("二").unwrap();
    let second_entry = graph.find_by_content("第二幕").unwrap();

    // The first section's terminal does not leak into the second section.
    assert!(!graph.has_edge(first_line, second_line));
    assert!(!graph.has_edge(first_line, second_entry));
    assert_eq!(graph.leaves().len(), 2);
}

#[test]
fn a_later_branching_block_ignores_leaves_of_an_earlier_section() {
    let sections = [
        Section::new(
            "第一幕",
            vec![vec![ExpandedComponent::Text(TextValue::Line(
                "甲: 一".to_string(),
            ))]],
        ),
        Section::new("第二幕", vec![parse("{{剧情选项|选项1=乙: 二}}")]),
    ];

    let graph = build_document_graph(&sections).unwrap();

    let stray_leaf = graph.find_by_content("一").unwrap();
    let option = graph.find_by_content("二").unwrap();

    assert!(!graph.has_edge(stray_leaf, option));
    assert_eq!(graph.in_degree(option), 1);
}
