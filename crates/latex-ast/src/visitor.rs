//! Consumer-facing AST walk.
//!
//! `math-core`'s `MathMLEmitter` is a single struct with one method per
//! node kind that recurses into children while appending to a `String`
//! buffer. `Visit` is the same shape turned inside-out: a trait with a
//! default, recursing method per node kind, so a consumer overrides only
//! the variants it cares about (e.g. a layout engine overriding
//! `visit_fraction` to measure a bar, while everything else free-rides on
//! the default recursion).

use crate::ast::{
    AccentKind, AlignType, ArrowDirection, BinomialStyle, DelimiterScale, Document, MatrixKind,
    Node, SpaceKind, StyleKind,
};

#[allow(unused_variables)]
pub trait Visit {
    fn visit_document(&mut self, doc: &Document) {
        for child in &doc.children {
            self.visit_node(child);
        }
    }

    fn visit_node(&mut self, node: &Node) {
        walk_node(self, node);
    }

    fn visit_text(&mut self, content: &str) {}
    fn visit_symbol(&mut self, name: &str, unicode: &str) {}
    fn visit_operator(&mut self, op: &str) {}
    fn visit_space(&mut self, kind: SpaceKind) {}
    fn visit_hspace(&mut self, dimension: &str) {}
    fn visit_new_line(&mut self) {}
    fn visit_command(&mut self, name: &str, options: &[String]) {}
    fn visit_environment_start(&mut self, name: &str, options: &[String]) {}
    fn visit_matrix_start(&mut self, kind: MatrixKind, is_small: bool) {}
    fn visit_array_start(&mut self, alignment: &str) {}
    fn visit_cases_start(&mut self) {}
    fn visit_aligned_start(&mut self, align_type: AlignType) {}
    fn visit_accent_start(&mut self, kind: AccentKind) {}
    fn visit_stack_start(&mut self) {}
    fn visit_style_start(&mut self, kind: StyleKind) {}
    fn visit_color_start(&mut self, color: &str) {}
    fn visit_delimited_start(&mut self, left: &str, right: &str, scalable: bool) {}
    fn visit_manual_sized_delimiter(&mut self, glyph: &str, scale: DelimiterScale) {}
    fn visit_extensible_arrow_start(&mut self, direction: ArrowDirection) {}
    fn visit_binomial_start(&mut self, style: BinomialStyle) {}
    fn visit_text_mode(&mut self, text: &str) {}
}

/// Dispatches `node` to the matching `visit_*` callback and recurses into
/// its children. Exposed as a free function so `Visit::visit_node`'s
/// default body and hand-written overrides that still want the default
/// recursion can both call it.
pub fn walk_node<V: Visit + ?Sized>(visitor: &mut V, node: &Node) {
    match node {
        Node::Text(s) => visitor.visit_text(s),
        Node::Symbol { name, unicode } => visitor.visit_symbol(name, unicode),
        Node::Operator(op) => visitor.visit_operator(op),
        Node::Space(kind) => visitor.visit_space(*kind),
        Node::HSpace(dim) => visitor.visit_hspace(dim),
        Node::NewLine => visitor.visit_new_line(),
        Node::Command { name, args, options } => {
            visitor.visit_command(name, options);
            for a in args {
                visitor.visit_node(a);
            }
        }
        Node::Environment { name, content, options } => {
            visitor.visit_environment_start(name, options);
            for n in content {
                visitor.visit_node(n);
            }
        }
        Node::Group(children) => {
            for n in children {
                visitor.visit_node(n);
            }
        }
        Node::Superscript { base, exponent } => {
            visitor.visit_node(base);
            visitor.visit_node(exponent);
        }
        Node::Subscript { base, index } => {
            visitor.visit_node(base);
            visitor.visit_node(index);
        }
        Node::Fraction { numerator, denominator } => {
            visitor.visit_node(numerator);
            visitor.visit_node(denominator);
        }
        Node::Root { content, index } => {
            visitor.visit_node(content);
            if let Some(i) = index {
                visitor.visit_node(i);
            }
        }
        Node::Matrix { rows, kind, is_small } => {
            visitor.visit_matrix_start(*kind, *is_small);
            for row in rows {
                for cell in row {
                    visitor.visit_node(cell);
                }
            }
        }
        Node::Array { rows, alignment } => {
            visitor.visit_array_start(alignment);
            for row in rows {
                for cell in row {
                    visitor.visit_node(cell);
                }
            }
        }
        Node::Delimited { left, right, content, scalable } => {
            visitor.visit_delimited_start(left, right, *scalable);
            for n in content {
                visitor.visit_node(n);
            }
        }
        Node::ManualSizedDelimiter { glyph, scale } => {
            visitor.visit_manual_sized_delimiter(glyph, *scale);
        }
        Node::Accent { content, kind } => {
            visitor.visit_accent_start(*kind);
            visitor.visit_node(content);
        }
        Node::ExtensibleArrow { above, below, direction } => {
            visitor.visit_extensible_arrow_start(*direction);
            visitor.visit_node(above);
            if let Some(b) = below {
                visitor.visit_node(b);
            }
        }
        Node::Stack { base, above, below } => {
            visitor.visit_stack_start();
            visitor.visit_node(base);
            if let Some(a) = above {
                visitor.visit_node(a);
            }
            if let Some(b) = below {
                visitor.visit_node(b);
            }
        }
        Node::Style { content, kind } => {
            visitor.visit_style_start(*kind);
            for n in content {
                visitor.visit_node(n);
            }
        }
        Node::Color { content, color } => {
            visitor.visit_color_start(color);
            for n in content {
                visitor.visit_node(n);
            }
        }
        Node::BigOperator { op, subscript, superscript } => {
            visitor.visit_operator(op);
            if let Some(s) = subscript {
                visitor.visit_node(s);
            }
            if let Some(s) = superscript {
                visitor.visit_node(s);
            }
        }
        Node::Aligned { rows, align_type } => {
            visitor.visit_aligned_start(*align_type);
            for row in rows {
                for cell in row {
                    visitor.visit_node(cell);
                }
            }
        }
        Node::Cases { pairs } => {
            visitor.visit_cases_start();
            for (value, condition) in pairs {
                for n in value {
                    visitor.visit_node(n);
                }
                for n in condition {
                    visitor.visit_node(n);
                }
            }
        }
        Node::Split { rows } | Node::Eqnarray { rows } => {
            for row in rows {
                for cell in row {
                    visitor.visit_node(cell);
                }
            }
        }
        Node::Multline { lines } => {
            for line in lines {
                for cell in line {
                    visitor.visit_node(cell);
                }
            }
        }
        Node::Subequations { content } => {
            for n in content {
                visitor.visit_node(n);
            }
        }
        Node::Binomial { top, bottom, style } => {
            visitor.visit_binomial_start(*style);
            visitor.visit_node(top);
            visitor.visit_node(bottom);
        }
        Node::TextMode(text) => visitor.visit_text_mode(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[derive(Default)]
    struct TextCollector(Vec<String>);

    impl Visit for TextCollector {
        fn visit_text(&mut self, content: &str) {
            self.0.push(content.to_owned());
        }
    }

    #[test]
    fn default_recursion_reaches_nested_text() {
        let doc = parse(r"\frac{a}{b}");
        let mut collector = TextCollector::default();
        collector.visit_document(&doc);
        assert_eq!(collector.0, vec!["a".to_owned(), "b".to_owned()]);
    }
}
