use plotline::error::{BuildError, ExpandErrorKind, ParseError, TokenizeErrorKind};
use plotline::log::Warning;
use plotline::*;

fn parse(code: &str) -> Vec<ExpandedComponent> {
    let mut handler = DefaultHandler::default();

    parse_option_template(code, &mut handler).unwrap()
}

fn build(code: &str) -> Result<DialogueGraph, BuildError> {
    build_document_graph(&[Section::new("测试", vec![parse(code)])])
}

#[test]
fn duplicate_choice_parameter_is_rejected() {
    let error = build("{{剧情选项|选项1=a|选项1=b}}").unwrap_err();

    match error {
        BuildError::RedundantChoice { name } => assert_eq!(name, "选项1"),
        other => panic!("expected redundant choice error, got {:?}", other),
    }
}

#[test]
fn duplicate_continuation_parameter_is_rejected() {
    let error = build("{{剧情选项|选项1=a|剧情1=b|剧情1=c}}").unwrap_err();

    match error {
        BuildError::RedundantContinuation { name } => assert_eq!(name, "剧情1"),
        other => panic!("expected redundant continuation error, got {:?}", other),
    }
}

#[test]
fn continuation_without_matching_choice_is_rejected() {
    let error = build("{{剧情选项|选项1=a|剧情2=b}}").unwrap_err();

    match error {
        BuildError::UnpairedContinuation { name } => assert_eq!(name, "剧情2"),
        other => panic!("expected unpaired continuation error, got {:?}", other),
    }
}

#[test]
fn choice_parameter_without_a_trailing_index_is_rejected() {
    let error = build("{{剧情选项|选项=a}}").unwrap_err();

    assert!(matches!(error, BuildError::MissingChoiceIndex { .. }));
}

#[test]
fn unknown_nested_template_fails_parsing_with_the_strict_handler() {
    let mut handler = DefaultHandler::default();
    let error =
        parse_option_template("{{剧情选项|选项1={{神秘模板|x}}}}", &mut handler).unwrap_err();

    match error {
        ParseError::Expand(inner) => match inner.kind {
            ExpandErrorKind::UnknownTemplate => assert_eq!(inner.template, "神秘模板"),
            other => panic!("expected unknown template kind, got {:?}", other),
        },
        other => panic!("expected expansion error, got {:?}", other),
    }
}

#[test]
fn lenient_handler_collects_unknown_templates_as_warnings() {
    let mut handler = LenientHandler::new(DefaultHandler::default());

    let components =
        parse_option_template("{{剧情选项|选项1=a{{神秘模板|x}}}}", &mut handler).unwrap();

    let warnings: Vec<_> = handler.logger.iter().collect();
    assert_eq!(
        warnings,
        vec![&Warning::UnknownTemplate {
            name: "神秘模板".to_string()
        }]
    );

    // The unknown template splices to nothing, leaving the choice text intact.
    let graph = build_document_graph(&[Section::new("测试", vec![components])]).unwrap();
    assert!(graph.find_by_content("a").is_some());
}

#[test]
fn stray_pipe_outside_a_template_is_an_unsupported_character() {
    let mut handler = DefaultHandler::default();
    let error = parse_option_template("文本|文本", &mut handler).unwrap_err();

    match error {
        ParseError::Tokenize(inner) => match inner.kind {
            TokenizeErrorKind::UnsupportedCharacter { character } => {
                assert_eq!(character, '|');
            }
            other => panic!("expected unsupported character, got {:?}", other),
        },
        other => panic!("expected tokenize error, got {:?}", other),
    }
}

#[test]
fn unclosed_nested_template_braces_are_rejected() {
    let mut handler = DefaultHandler::default();
    let error = parse_option_template("{{剧情选项|选项1={{折叠|内容=a", &mut handler).unwrap_err();

    match error {
        ParseError::Tokenize(inner) => {
            assert!(matches!(inner.kind, TokenizeErrorKind::UnmatchedBraces));
        }
        other => panic!("expected tokenize error, got {:?}", other),
    }
}

#[test]
fn build_errors_convert_into_the_read_error_roof() {
    let error: ReadError = build("{{剧情选项|剧情1=b}}").unwrap_err().into();

    assert!(matches!(
        error,
        ReadError::Build(BuildError::UnpairedContinuation { .. })
    ));
}
