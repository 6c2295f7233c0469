//! The typed AST produced by [`crate::parser::Parser`].
//!
//! `Node` is a closed sum type, the same shape as `math-core`'s own
//! `mathml_renderer::ast::Node` (one tagged variant per construct,
//! `#[derive(Debug, Clone, PartialEq)]`), but its variants describe LaTeX
//! syntax structure rather than MathML presentation. Nodes are owned
//! (`Vec`/`Box`), not arena-allocated, so that a [`Document`] can outlive
//! the call that produced it and be retained across
//! [`crate::incremental::IncrementalDriver::append`] calls.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Document { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    Plain,
    Paren,
    Bracket,
    Brace,
    VBar,
    DoubleVBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceKind {
    Thin,
    Medium,
    Thick,
    Quad,
    QQuad,
    Normal,
    NegativeThin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentKind {
    Hat,
    Tilde,
    Bar,
    Dot,
    DDot,
    Vec,
    Overline,
    Underline,
    Overbrace,
    Underbrace,
    WideHat,
    OverRightArrow,
    OverLeftArrow,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Right,
    Left,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathStyle {
    Display,
    Text,
    Script,
    ScriptScript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Bold,
    Italic,
    Roman,
    SansSerif,
    Typewriter,
    Blackboard,
    Fraktur,
    Script,
    Calligraphic,
    MathStyle(MathStyle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignType {
    Align,
    Gather,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinomialStyle {
    Normal,
    Text,
    Display,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterScale {
    Big,
    BBig,
    Bigg,
    BBigg,
}

impl DelimiterScale {
    pub fn factor(self) -> f32 {
        match self {
            DelimiterScale::Big => 1.2,
            DelimiterScale::BBig => 1.8,
            DelimiterScale::Bigg => 2.4,
            DelimiterScale::BBigg => 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Command {
        name: String,
        args: Vec<Node>,
        options: Vec<String>,
    },
    Environment {
        name: String,
        content: Vec<Node>,
        options: Vec<String>,
    },
    Group(Vec<Node>),
    Superscript {
        base: Box<Node>,
        exponent: Box<Node>,
    },
    Subscript {
        base: Box<Node>,
        index: Box<Node>,
    },
    Fraction {
        numerator: Box<Node>,
        denominator: Box<Node>,
    },
    Root {
        content: Box<Node>,
        index: Option<Box<Node>>,
    },
    Matrix {
        rows: Vec<Vec<Node>>,
        kind: MatrixKind,
        is_small: bool,
    },
    Array {
        rows: Vec<Vec<Node>>,
        alignment: String,
    },
    Space(SpaceKind),
    HSpace(String),
    NewLine,
    Symbol {
        name: String,
        unicode: String,
    },
    /// Reserved; the parser never constructs this variant (see
    /// `SPEC_FULL.md` §9 — kept only so consumers have somewhere to match
    /// it without a wildcard arm).
    Operator(String),
    Delimited {
        left: String,
        right: String,
        content: Vec<Node>,
        scalable: bool,
    },
    ManualSizedDelimiter {
        glyph: String,
        scale: DelimiterScale,
    },
    Accent {
        content: Box<Node>,
        kind: AccentKind,
    },
    ExtensibleArrow {
        above: Box<Node>,
        below: Option<Box<Node>>,
        direction: ArrowDirection,
    },
    Stack {
        base: Box<Node>,
        above: Option<Box<Node>>,
        below: Option<Box<Node>>,
    },
    Style {
        content: Vec<Node>,
        kind: StyleKind,
    },
    Color {
        content: Vec<Node>,
        color: String,
    },
    BigOperator {
        op: String,
        subscript: Option<Box<Node>>,
        superscript: Option<Box<Node>>,
    },
    Aligned {
        rows: Vec<Vec<Node>>,
        align_type: AlignType,
    },
    Cases {
        pairs: Vec<(Vec<Node>, Vec<Node>)>,
    },
    Split {
        rows: Vec<Vec<Node>>,
    },
    Multline {
        lines: Vec<Vec<Node>>,
    },
    Eqnarray {
        rows: Vec<Vec<Node>>,
    },
    Subequations {
        content: Vec<Node>,
    },
    Binomial {
        top: Box<Node>,
        bottom: Box<Node>,
        style: BinomialStyle,
    },
    TextMode(String),
}

// Mirrors `math-core/src/token.rs`'s own `assert_eq_size!` guard on `Token`:
// a compile-time tripwire for an accidental size regression (e.g. a
// `String` where a `Box` would do), without pinning an exact byte count
// that would churn on every field addition.
static_assertions::const_assert!(std::mem::size_of::<Node>() <= 96);
