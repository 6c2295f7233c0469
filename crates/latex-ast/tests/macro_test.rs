use latex_ast::{
    parse, parse_with_config, parse_with_diagnostics, DiagnosticKind, Node, ParserConfig,
    StyleKind,
};

#[test]
fn zero_arg_macro_expands() {
    let document = parse(r"\newcommand{\half}{\frac{1}{2}} x = \half");
    assert!(document
        .children
        .iter()
        .any(|n| matches!(n, Node::Fraction { .. })));
}

#[test]
fn one_arg_macro_substitutes_argument() {
    let document = parse(r"\newcommand{\mycmd}[1]{\sqrt{#1}} \mycmd{3}");
    assert!(document
        .children
        .iter()
        .any(|n| matches!(n, Node::Root { .. })));
}

#[test]
fn redefinition_overwrites_silently() {
    let document = parse(
        r"\newcommand{\x}{first}\newcommand{\x}{second} \x",
    );
    let text: String = document
        .children
        .iter()
        .filter_map(|n| match n {
            Node::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    assert!(text.contains("second"));
    assert!(!text.contains("first"));
}

#[test]
fn predefined_macros_seed_before_parsing() {
    let config = ParserConfig {
        predefined_macros: vec![("half".to_owned(), r"\frac{1}{2}".to_owned())],
        ..Default::default()
    };
    let (document, _diagnostics) = parse_with_config(r"\half", &config);
    assert!(matches!(document.children[0], Node::Fraction { .. }));
}

#[test]
fn nested_macro_expansion_resolves() {
    let document = parse(
        r"\newcommand{\inner}{\alpha}\newcommand{\outer}{\inner + \inner} \outer",
    );
    let symbol_count = document
        .children
        .iter()
        .filter(|n| matches!(n, Node::Symbol { name, .. } if name == "alpha"))
        .count();
    assert_eq!(symbol_count, 2);
}

#[test]
fn self_referential_macro_stops_at_recursion_cap() {
    let (document, diagnostics) = parse_with_diagnostics(r"\newcommand{\x}{\x} \x");
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::MacroRecursionOverflow));
    assert!(document
        .children
        .iter()
        .any(|n| matches!(n, Node::Command { name, .. } if name == "x")));
}

#[test]
fn mathbb_style_from_macro_body() {
    let document = parse(r"\newcommand{\R}{\mathbb{R}} \R");
    assert!(document
        .children
        .iter()
        .any(|n| matches!(n, Node::Style { kind: StyleKind::Blackboard, .. })));
}
