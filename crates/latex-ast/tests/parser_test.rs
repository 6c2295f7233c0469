use latex_ast::{parse, MatrixKind, Node};

#[test]
fn quadratic_formula_numerator_holds_a_root() {
    let document = parse(r"\frac{-b \pm \sqrt{b^2 - 4ac}}{2a}");
    assert_eq!(document.children.len(), 1);
    let Node::Fraction { numerator, denominator } = &document.children[0] else {
        panic!("expected Fraction, got {:?}", document.children[0]);
    };
    let Node::Group(numerator_children) = numerator.as_ref() else {
        panic!("expected Group numerator, got {numerator:?}");
    };
    assert!(numerator_children
        .iter()
        .any(|n| matches!(n, Node::Symbol { name, .. } if name == "pm")));
    assert!(numerator_children.iter().any(|n| matches!(n, Node::Root { .. })));
    let Node::Group(denominator_children) = denominator.as_ref() else {
        panic!("expected Group denominator, got {denominator:?}");
    };
    assert_eq!(denominator_children, &vec![Node::Text("2a".to_owned())]);
}

#[test]
fn pmatrix_environment_builds_two_by_two_rows() {
    let document = parse(r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}");
    assert_eq!(
        document.children,
        vec![Node::Matrix {
            rows: vec![
                vec![Node::Text("a".to_owned()), Node::Text("b".to_owned())],
                vec![Node::Text("c".to_owned()), Node::Text("d".to_owned())],
            ],
            kind: MatrixKind::Paren,
            is_small: false,
        }]
    );
}

#[test]
fn custom_command_expands_to_blackboard_style() {
    let document = parse(r"\newcommand{\R}{\mathbb{R}} x \in \R");
    let texts: Vec<&str> = document
        .children
        .iter()
        .filter_map(|n| match n {
            Node::Text(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    assert!(texts.contains(&"x"));
    assert!(document
        .children
        .iter()
        .any(|n| matches!(n, Node::Symbol { name, .. } if name == "in")));
    assert!(document.children.iter().any(|n| matches!(
        n,
        Node::Style { kind: latex_ast::StyleKind::Blackboard, .. }
    )));
}

#[test]
fn sum_binds_limits_and_trailing_superscript_is_separate() {
    let document = parse(r"\sum_{i=1}^{n} i^2");
    let Node::BigOperator { subscript, superscript, .. } = &document.children[0] else {
        panic!("expected BigOperator, got {:?}", document.children[0]);
    };
    assert!(subscript.is_some());
    assert!(superscript.is_some());
    assert!(document
        .children
        .iter()
        .any(|n| matches!(n, Node::Superscript { .. })));
}

#[test]
fn left_right_delimited_fraction_is_scalable() {
    let document = parse(r"\left( \frac{a}{b} \right)");
    assert_eq!(document.children.len(), 1);
    let Node::Delimited { left, right, content, scalable } = &document.children[0] else {
        panic!("expected Delimited, got {:?}", document.children[0]);
    };
    assert_eq!(left, "(");
    assert_eq!(right, ")");
    assert!(*scalable);
    assert!(content.iter().any(|n| matches!(n, Node::Fraction { .. })));
}

#[test]
fn left_right_bracket_delimiters_are_consumed_as_brackets() {
    let document = parse(r"\left[ x \right]");
    assert_eq!(document.children.len(), 1);
    let Node::Delimited { left, right, content, .. } = &document.children[0] else {
        panic!("expected Delimited, got {:?}", document.children[0]);
    };
    assert_eq!(left, "[");
    assert_eq!(right, "]");
    assert_eq!(content, &vec![Node::Text("x".to_owned())]);
}

#[test]
fn big_bracket_delimiter_is_manual_sized() {
    use latex_ast::DelimiterScale;

    let document = parse(r"\big[ x \big]");
    let Node::ManualSizedDelimiter { glyph, scale } = &document.children[0] else {
        panic!("expected ManualSizedDelimiter, got {:?}", document.children[0]);
    };
    assert_eq!(glyph, "[");
    assert_eq!(*scale, DelimiterScale::Big);
    assert!(document.children.iter().any(
        |n| matches!(n, Node::ManualSizedDelimiter { glyph, .. } if glyph == "]")
    ));
}

#[test]
fn cases_environment_pairs_value_with_condition() {
    let document = parse(r"\begin{cases} x & x \geq 0 \\ -x & x < 0 \end{cases}");
    let Node::Cases { pairs } = &document.children[0] else {
        panic!("expected Cases, got {:?}", document.children[0]);
    };
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0, vec![Node::Text("x".to_owned())]);
    assert!(pairs[0]
        .1
        .iter()
        .any(|n| matches!(n, Node::Symbol { name, .. } if name == "geq")));
    assert_eq!(pairs[1].0, vec![Node::Text("-x".to_owned())]);
}

#[test]
fn parse_is_deterministic_on_repeated_calls() {
    let input = r"\alpha + \beta = \gamma";
    assert_eq!(parse(input), parse(input));
}

#[test]
fn deeply_nested_groups_do_not_overflow() {
    let depth = 10_000;
    let mut source = String::new();
    for _ in 0..depth {
        source.push('{');
    }
    source.push('x');
    for _ in 0..depth {
        source.push('}');
    }
    let (document, diagnostics) = latex_ast::parse_with_diagnostics(&source);
    assert_eq!(document.children.len(), 1);
    assert!(diagnostics
        .iter()
        .any(|d| d.kind == latex_ast::DiagnosticKind::NestingTooDeep));
}

#[test]
fn moderately_nested_groups_stay_under_the_cap_and_parse_exactly() {
    let depth = 32;
    let mut source = String::new();
    for _ in 0..depth {
        source.push('{');
    }
    source.push('x');
    for _ in 0..depth {
        source.push('}');
    }
    let (document, diagnostics) = latex_ast::parse_with_diagnostics(&source);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");

    let mut node = &document.children[0];
    for _ in 0..depth - 1 {
        let Node::Group(children) = node else {
            panic!("expected nested Group, got {node:?}");
        };
        node = &children[0];
    }
    let Node::Group(innermost) = node else {
        panic!("expected innermost Group, got {node:?}");
    };
    assert_eq!(innermost, &vec![Node::Text("x".to_owned())]);
}
