//! Recursive-descent parser: token stream -> [`Document`].
//!
//! The control-flow skeleton (peek the next token, dispatch on its kind,
//! recurse for nested groups) follows `math-core`'s lexer/parser pair; the
//! postfix `^`/`_` handling is the pending-primary register the
//! specification calls for rather than the teacher's own operator-class
//! driven approach, since this tokenizer performs no semantic
//! classification for the parser to key off of.

use crate::ast::{
    AccentKind, AlignType, ArrowDirection, BinomialStyle, DelimiterScale, Document, MathStyle,
    MatrixKind, Node, SpaceKind, StyleKind,
};
use crate::config::ParserConfig;
use crate::environments::Env;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::lexer::Lexer;
use crate::macros::MacroTable;
use crate::token::{TokLoc, Token};
use crate::token_queue::TokenQueue;

/// Hard cap on recursive-descent nesting depth (groups, environments), so
/// that adversarially deep input degrades to flat literal text instead of
/// overflowing the stack. Chosen well under the depths (tens of thousands
/// of frames) a default thread stack can safely hold even for this
/// parser's fairly large per-call stack usage.
const MAX_NESTING_DEPTH: u32 = 128;

pub struct Parser {
    queue: TokenQueue,
    macros: MacroTable,
    diagnostics: Vec<Diagnostic>,
    config: ParserConfig,
    expansion_watermarks: Vec<usize>,
    /// Whitespace is elided rather than collapsed to `Text(" ")` while
    /// parsing the cells of a matrix/array/aligned-style environment row.
    elide_whitespace: bool,
    /// Current recursive-descent nesting depth; see [`MAX_NESTING_DEPTH`].
    depth: u32,
    /// Set once [`MAX_NESTING_DEPTH`] is hit, so only one diagnostic is
    /// recorded even if the remaining (degraded) input is still very deep.
    depth_diagnostic_emitted: bool,
}

/// Parses `source` with default configuration, discarding diagnostics.
pub fn parse(source: &str) -> Document {
    parse_with_diagnostics(source).0
}

/// Parses `source`, returning both the document and any soft errors
/// recorded along the way.
pub fn parse_with_diagnostics(source: &str) -> (Document, Vec<Diagnostic>) {
    parse_with_config(source, &ParserConfig::default())
}

pub fn parse_with_config(source: &str, config: &ParserConfig) -> (Document, Vec<Diagnostic>) {
    let mut parser = Parser::new(source, config.clone());
    parser.run()
}

impl Parser {
    pub fn new(source: &str, config: ParserConfig) -> Self {
        let tokens = Lexer::new(source).tokenize();
        let mut parser = Parser {
            queue: TokenQueue::new(tokens),
            macros: MacroTable::new(),
            diagnostics: Vec::new(),
            config,
            expansion_watermarks: Vec::new(),
            elide_whitespace: false,
            depth: 0,
            depth_diagnostic_emitted: false,
        };
        parser.seed_predefined_macros();
        parser
    }

    fn seed_predefined_macros(&mut self) {
        for (name, body) in self.config.predefined_macros.clone() {
            let mut body_tokens = Lexer::new(&body).tokenize();
            body_tokens.pop(); // drop the body's own Eof
            let arity = infer_arity(&body_tokens);
            self.macros.define(name, arity, body_tokens);
        }
    }

    pub fn run(mut self) -> (Document, Vec<Diagnostic>) {
        let mut children = Vec::new();
        loop {
            children.extend(self.parse_row());
            match self.queue.peek() {
                Token::Eof => break,
                Token::RightBrace => {
                    self.push_diag(DiagnosticKind::UnmatchedClose);
                    self.queue.next();
                }
                Token::EndEnvironment(_) => {
                    self.push_diag(DiagnosticKind::MismatchedEnvironment);
                    self.queue.next();
                }
                _ => {
                    // Stray `&`/`\\` outside any environment: skip and keep going.
                    self.queue.next();
                }
            }
        }
        (Document::new(children), self.diagnostics)
    }

    fn push_diag(&mut self, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::new(self.queue.peek_loc(), kind));
    }

    /// Attempts to descend one more level of group/environment nesting.
    /// Returns `false` (without changing `depth`) once [`MAX_NESTING_DEPTH`]
    /// is reached; callers must not recurse further in that case.
    fn enter_nesting(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            if !self.depth_diagnostic_emitted {
                self.push_diag(DiagnosticKind::NestingTooDeep);
                self.depth_diagnostic_emitted = true;
            }
            false
        } else {
            self.depth += 1;
            true
        }
    }

    fn exit_nesting(&mut self) {
        self.depth -= 1;
    }

    fn sync_depth(&mut self) {
        while let Some(&wm) = self.expansion_watermarks.last() {
            if self.queue.len() <= wm {
                self.expansion_watermarks.pop();
            } else {
                break;
            }
        }
    }

    /// Parses primaries, with postfix `^`/`_` attachment, until a brace
    /// close, cell/row separator, environment end, or EOF. The terminator
    /// itself is left unconsumed for the caller to interpret.
    fn parse_row(&mut self) -> Vec<Node> {
        let mut nodes: Vec<Node> = Vec::new();
        loop {
            self.sync_depth();
            match self.queue.peek() {
                Token::Eof
                | Token::RightBrace
                | Token::Ampersand
                | Token::NewLine
                | Token::EndEnvironment(_) => break,
                Token::Superscript | Token::Subscript => self.attach_postfix(&mut nodes),
                _ => {
                    if let Some(node) = self.parse_primary() {
                        nodes.push(node);
                    }
                }
            }
        }
        nodes
    }

    fn attach_postfix(&mut self, nodes: &mut Vec<Node>) {
        let is_super = matches!(self.queue.peek(), Token::Superscript);
        self.queue.next();
        let base = nodes.pop().unwrap_or_else(|| Node::Group(Vec::new()));
        let operand = self.parse_primary().unwrap_or_else(|| Node::Group(Vec::new()));

        if let Node::BigOperator { op, subscript, superscript } = base {
            let (subscript, superscript) = if is_super {
                (subscript, Some(Box::new(operand)))
            } else {
                (Some(Box::new(operand)), superscript)
            };
            nodes.push(Node::BigOperator { op, subscript, superscript });
            if let Some(opposite) = self.try_consume_opposite(is_super) {
                if let Some(Node::BigOperator { subscript, superscript, .. }) = nodes.last_mut() {
                    if is_super {
                        *subscript = Some(Box::new(opposite));
                    } else {
                        *superscript = Some(Box::new(opposite));
                    }
                }
            }
            return;
        }

        let mut node = if is_super {
            Node::Superscript { base: Box::new(base), exponent: Box::new(operand) }
        } else {
            Node::Subscript { base: Box::new(base), index: Box::new(operand) }
        };
        if let Some(opposite) = self.try_consume_opposite(is_super) {
            node = if is_super {
                Node::Subscript { base: Box::new(node), index: Box::new(opposite) }
            } else {
                Node::Superscript { base: Box::new(node), exponent: Box::new(opposite) }
            };
        }
        nodes.push(node);
    }

    fn try_consume_opposite(&mut self, had_super: bool) -> Option<Node> {
        let want_sub = had_super;
        let matches_opposite = if want_sub {
            matches!(self.queue.peek(), Token::Subscript)
        } else {
            matches!(self.queue.peek(), Token::Superscript)
        };
        if matches_opposite {
            self.queue.next();
            Some(self.parse_primary().unwrap_or_else(|| Node::Group(Vec::new())))
        } else {
            None
        }
    }

    fn parse_primary(&mut self) -> Option<Node> {
        loop {
            self.sync_depth();
            match self.queue.peek().clone() {
                Token::Eof | Token::RightBrace | Token::Ampersand | Token::NewLine => return None,
                Token::EndEnvironment(_) => return None,
                Token::Text(s) => {
                    self.queue.next();
                    return Some(Node::Text(s));
                }
                Token::Whitespace(_) => {
                    self.queue.next();
                    if self.elide_whitespace {
                        continue;
                    }
                    return Some(Node::Text(" ".to_owned()));
                }
                Token::LeftBrace => {
                    self.queue.next();
                    if self.enter_nesting() {
                        let body = self.parse_row();
                        self.expect_right_brace();
                        self.exit_nesting();
                        return Some(Node::Group(body));
                    }
                    return Some(Node::Group(vec![self.flatten_balanced_group()]));
                }
                Token::LeftBracket => {
                    self.queue.next();
                    return Some(Node::Text("[".to_owned()));
                }
                Token::RightBracket => {
                    self.queue.next();
                    return Some(Node::Text("]".to_owned()));
                }
                Token::BeginEnvironment(name) => {
                    self.queue.next();
                    if self.enter_nesting() {
                        let node = self.parse_environment(name);
                        self.exit_nesting();
                        return Some(node);
                    }
                    let content = vec![self.flatten_balanced_environment()];
                    return Some(Node::Environment { name, content, options: Vec::new() });
                }
                Token::Command(name) => {
                    let loc = self.queue.peek_loc();
                    self.queue.next();
                    if self.try_expand_macro(&name, loc) {
                        continue;
                    }
                    if name == "newcommand" || name == "renewcommand" {
                        self.define_macro();
                        continue;
                    }
                    return Some(self.dispatch_command(name, loc));
                }
                Token::Superscript | Token::Subscript => return None,
            }
        }
    }

    fn expect_right_brace(&mut self) {
        match self.queue.peek() {
            Token::RightBrace => {
                self.queue.next();
            }
            _ => self.push_diag(DiagnosticKind::UnterminatedGroup),
        }
    }

    // ---- arguments -----------------------------------------------------

    fn read_argument(&mut self) -> Node {
        self.parse_primary().unwrap_or_else(|| Node::Text(String::new()))
    }

    fn read_optional_bracketed_node(&mut self) -> Option<Node> {
        if !matches!(self.queue.peek(), Token::LeftBracket) {
            return None;
        }
        self.queue.next();
        let mut nodes = Vec::new();
        loop {
            self.sync_depth();
            match self.queue.peek() {
                Token::RightBracket => {
                    self.queue.next();
                    break;
                }
                Token::Eof | Token::RightBrace | Token::EndEnvironment(_) => {
                    self.push_diag(DiagnosticKind::UnclosedBracket);
                    break;
                }
                Token::Superscript | Token::Subscript => self.attach_postfix(&mut nodes),
                _ => match self.parse_primary() {
                    Some(n) => nodes.push(n),
                    None => break,
                },
            }
        }
        Some(Node::Group(nodes))
    }

    fn read_raw_group_text(&mut self) -> String {
        if !matches!(self.queue.peek(), Token::LeftBrace) {
            return String::new();
        }
        self.queue.next();
        let mut s = String::new();
        loop {
            match self.queue.peek() {
                Token::RightBrace => {
                    self.queue.next();
                    break;
                }
                Token::Eof => {
                    self.push_diag(DiagnosticKind::UnterminatedGroup);
                    break;
                }
                Token::Text(t) => {
                    s.push_str(t);
                    self.queue.next();
                }
                Token::Whitespace(w) => {
                    s.push_str(w);
                    self.queue.next();
                }
                _ => {
                    self.queue.next();
                }
            }
        }
        s
    }

    /// Non-recursive fallback once [`MAX_NESTING_DEPTH`] is hit inside a
    /// `{...}` group: consumes the balanced remainder (the opening brace is
    /// already gone) by tracking a plain integer counter instead of
    /// recursing through `parse_row`/`parse_primary`, and returns it as a
    /// single flattened text node.
    fn flatten_balanced_group(&mut self) -> Node {
        let mut depth = 1u32;
        let mut s = String::new();
        loop {
            match self.queue.peek().clone() {
                Token::Eof => {
                    self.push_diag(DiagnosticKind::UnterminatedGroup);
                    break;
                }
                Token::LeftBrace => {
                    depth += 1;
                    s.push('{');
                    self.queue.next();
                }
                Token::RightBrace => {
                    self.queue.next();
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    s.push('}');
                }
                tok => {
                    s.push_str(&Self::token_to_literal(&tok));
                    self.queue.next();
                }
            }
        }
        Node::Text(s)
    }

    /// Non-recursive fallback once [`MAX_NESTING_DEPTH`] is hit inside a
    /// `\begin{...}...\end{...}`: the opening `\begin{name}` is already
    /// consumed, so this tracks nested `\begin`/`\end` pairs with a plain
    /// counter and flattens everything in between to literal text.
    fn flatten_balanced_environment(&mut self) -> Node {
        let mut depth = 1u32;
        let mut s = String::new();
        loop {
            match self.queue.peek().clone() {
                Token::Eof => {
                    self.push_diag(DiagnosticKind::UnterminatedEnvironment);
                    break;
                }
                Token::BeginEnvironment(name) => {
                    depth += 1;
                    s.push_str(&format!("\\begin{{{name}}}"));
                    self.queue.next();
                }
                Token::EndEnvironment(name) => {
                    self.queue.next();
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    s.push_str(&format!("\\end{{{name}}}"));
                }
                tok => {
                    s.push_str(&Self::token_to_literal(&tok));
                    self.queue.next();
                }
            }
        }
        Node::Text(s)
    }

    /// Reconstructs a literal textual form of a token for the flattening
    /// fallbacks above. `Token`'s own `Display` impl prints token *kind*
    /// names (for diagnostics), not their content, so it can't be reused here.
    fn token_to_literal(tok: &Token) -> String {
        match tok {
            Token::Text(s) | Token::Whitespace(s) => s.clone(),
            Token::Command(name) => format!("\\{name}"),
            Token::BeginEnvironment(name) => format!("\\begin{{{name}}}"),
            Token::EndEnvironment(name) => format!("\\end{{{name}}}"),
            Token::LeftBrace => "{".to_owned(),
            Token::RightBrace => "}".to_owned(),
            Token::LeftBracket => "[".to_owned(),
            Token::RightBracket => "]".to_owned(),
            Token::Superscript => "^".to_owned(),
            Token::Subscript => "_".to_owned(),
            Token::Ampersand => "&".to_owned(),
            Token::NewLine => "\\\\".to_owned(),
            Token::Eof => String::new(),
        }
    }

    fn read_trailing_group_args(&mut self) -> Vec<Node> {
        let mut args = Vec::new();
        while matches!(self.queue.peek(), Token::LeftBrace) {
            args.push(self.read_argument());
        }
        args
    }

    fn read_delimiter_glyph(&mut self) -> String {
        match self.queue.peek().clone() {
            Token::Text(s) if !s.is_empty() => {
                let mut chars = s.chars();
                let first = chars.next().unwrap();
                let rest: String = chars.collect();
                let loc = self.queue.peek_loc();
                self.queue.next();
                if !rest.is_empty() {
                    self.queue.queue_in_front(vec![TokLoc(loc, Token::Text(rest))]);
                }
                first.to_string()
            }
            Token::Command(name) => {
                self.queue.next();
                if name == "." {
                    ".".to_owned()
                } else {
                    crate::symbol::resolve(&name).map(str::to_owned).unwrap_or(name)
                }
            }
            Token::LeftBracket => {
                self.queue.next();
                "[".to_owned()
            }
            Token::RightBracket => {
                self.queue.next();
                "]".to_owned()
            }
            _ => {
                self.push_diag(DiagnosticKind::ExpectedDelimiter);
                ".".to_owned()
            }
        }
    }

    // ---- command dispatch ----------------------------------------------

    fn dispatch_command(&mut self, name: String, loc: usize) -> Node {
        match name.as_str() {
            "frac" | "dfrac" | "tfrac" | "cfrac" => {
                let numerator = self.read_argument();
                let denominator = self.read_argument();
                let frac = Node::Fraction {
                    numerator: Box::new(numerator),
                    denominator: Box::new(denominator),
                };
                match name.as_str() {
                    "dfrac" => Node::Style {
                        content: vec![frac],
                        kind: StyleKind::MathStyle(MathStyle::Display),
                    },
                    "tfrac" => Node::Style {
                        content: vec![frac],
                        kind: StyleKind::MathStyle(MathStyle::Text),
                    },
                    _ => frac,
                }
            }
            "sqrt" => {
                let index = self.read_optional_bracketed_node();
                let content = self.read_argument();
                Node::Root { content: Box::new(content), index: index.map(Box::new) }
            }
            "binom" | "tbinom" | "dbinom" => {
                let top = self.read_argument();
                let bottom = self.read_argument();
                let style = match name.as_str() {
                    "tbinom" => BinomialStyle::Text,
                    "dbinom" => BinomialStyle::Display,
                    _ => BinomialStyle::Normal,
                };
                Node::Binomial { top: Box::new(top), bottom: Box::new(bottom), style }
            }
            "hat" => self.read_accent(AccentKind::Hat),
            "widehat" => self.read_accent(AccentKind::WideHat),
            "tilde" => self.read_accent(AccentKind::Tilde),
            "bar" => self.read_accent(AccentKind::Bar),
            "overline" => self.read_accent(AccentKind::Overline),
            "dot" => self.read_accent(AccentKind::Dot),
            "ddot" => self.read_accent(AccentKind::DDot),
            "vec" => self.read_accent(AccentKind::Vec),
            "underline" => self.read_accent(AccentKind::Underline),
            "overbrace" => self.read_accent(AccentKind::Overbrace),
            "underbrace" => self.read_accent(AccentKind::Underbrace),
            "overrightarrow" => self.read_accent(AccentKind::OverRightArrow),
            "overleftarrow" => self.read_accent(AccentKind::OverLeftArrow),
            "cancel" => self.read_accent(AccentKind::Cancel),
            "overset" => {
                let above = self.read_argument();
                let base = self.read_argument();
                Node::Stack { base: Box::new(base), above: Some(Box::new(above)), below: None }
            }
            "underset" => {
                let below = self.read_argument();
                let base = self.read_argument();
                Node::Stack { base: Box::new(base), above: None, below: Some(Box::new(below)) }
            }
            "xrightarrow" | "xleftarrow" => {
                let below = self.read_optional_bracketed_node();
                let above = self.read_argument();
                let direction = if name == "xrightarrow" {
                    ArrowDirection::Right
                } else {
                    ArrowDirection::Left
                };
                Node::ExtensibleArrow { above: Box::new(above), below: below.map(Box::new), direction }
            }
            "mathbf" | "boldsymbol" | "textbf" => self.read_style(StyleKind::Bold),
            "mathit" | "textit" => self.read_style(StyleKind::Italic),
            "mathrm" | "textrm" => self.read_style(StyleKind::Roman),
            "mathsf" => self.read_style(StyleKind::SansSerif),
            "mathtt" => self.read_style(StyleKind::Typewriter),
            "mathbb" => self.read_style(StyleKind::Blackboard),
            "mathfrak" => self.read_style(StyleKind::Fraktur),
            "mathscr" => self.read_style(StyleKind::Script),
            "mathcal" => self.read_style(StyleKind::Calligraphic),
            "displaystyle" => self.read_rest_as_style(StyleKind::MathStyle(MathStyle::Display)),
            "textstyle" => self.read_rest_as_style(StyleKind::MathStyle(MathStyle::Text)),
            "scriptstyle" => self.read_rest_as_style(StyleKind::MathStyle(MathStyle::Script)),
            "scriptscriptstyle" => {
                self.read_rest_as_style(StyleKind::MathStyle(MathStyle::ScriptScript))
            }
            "text" => Node::TextMode(self.read_raw_group_text()),
            "color" => {
                let color = self.read_raw_group_text();
                let rest = self.parse_row();
                Node::Color { content: rest, color }
            }
            "textcolor" => {
                let color = self.read_raw_group_text();
                let body = self.read_argument();
                Node::Color { content: vec![body], color }
            }
            "," => Node::Space(SpaceKind::Thin),
            ":" => Node::Space(SpaceKind::Medium),
            ";" => Node::Space(SpaceKind::Thick),
            "!" => Node::Space(SpaceKind::NegativeThin),
            "quad" => Node::Space(SpaceKind::Quad),
            "qquad" => Node::Space(SpaceKind::QQuad),
            "hspace" => Node::HSpace(self.read_raw_group_text()),
            "left" => self.read_delimited(),
            "right" => {
                // No preceding `\left`: the delimiter is literal content, not
                // the close of a scalable pair.
                self.push_diag(DiagnosticKind::UnmatchedRight);
                Node::Text(self.read_delimiter_glyph())
            }
            "big" => self.read_manual_sized_delimiter(DelimiterScale::Big),
            "Big" => self.read_manual_sized_delimiter(DelimiterScale::BBig),
            "bigg" => self.read_manual_sized_delimiter(DelimiterScale::Bigg),
            "Bigg" => self.read_manual_sized_delimiter(DelimiterScale::BBigg),
            "sum" | "prod" | "int" | "oint" | "bigcup" | "bigcap" | "bigvee" | "bigwedge"
            | "bigoplus" | "bigotimes" | "coprod" => {
                Node::BigOperator { op: name, subscript: None, superscript: None }
            }
            _ => {
                if let Some(unicode) = crate::symbol::resolve(&name) {
                    Node::Symbol { name, unicode: unicode.to_owned() }
                } else {
                    let _ = loc;
                    let options: Vec<String> = self.read_optional_bracketed_raw().into_iter().collect();
                    let args = self.read_trailing_group_args();
                    Node::Command { name, args, options }
                }
            }
        }
    }

    fn read_accent(&mut self, kind: AccentKind) -> Node {
        let content = self.read_argument();
        Node::Accent { content: Box::new(content), kind }
    }

    fn read_style(&mut self, kind: StyleKind) -> Node {
        let content = vec![self.read_argument()];
        Node::Style { content, kind }
    }

    fn read_rest_as_style(&mut self, kind: StyleKind) -> Node {
        let content = self.parse_row();
        Node::Style { content, kind }
    }

    fn read_delimited(&mut self) -> Node {
        let left = self.read_delimiter_glyph();
        let content = self.parse_until_right();
        let right = if matches!(self.queue.peek(), Token::Command(n) if n == "right") {
            self.queue.next();
            self.read_delimiter_glyph()
        } else {
            self.push_diag(DiagnosticKind::UnterminatedLeft);
            ".".to_owned()
        };
        Node::Delimited { left, right, content, scalable: true }
    }

    fn parse_until_right(&mut self) -> Vec<Node> {
        let mut nodes = Vec::new();
        loop {
            self.sync_depth();
            match self.queue.peek() {
                Token::Command(n) if n == "right" => break,
                Token::Eof | Token::EndEnvironment(_) | Token::RightBrace => break,
                Token::Ampersand | Token::NewLine => break,
                Token::Superscript | Token::Subscript => self.attach_postfix(&mut nodes),
                _ => match self.parse_primary() {
                    Some(n) => nodes.push(n),
                    None => break,
                },
            }
        }
        nodes
    }

    fn read_manual_sized_delimiter(&mut self, scale: DelimiterScale) -> Node {
        let glyph = self.read_delimiter_glyph();
        Node::ManualSizedDelimiter { glyph, scale }
    }

    // ---- environments ----------------------------------------------------

    fn parse_environment(&mut self, name: String) -> Node {
        match Env::from_name(&name) {
            Some(env) if env.is_matrix_like() => {
                let kind = matrix_kind(env);
                let is_small = matches!(env, Env::SmallMatrix);
                let rows = Self::wrap_rows(self.parse_row_groups(&name));
                Node::Matrix { rows, kind, is_small }
            }
            Some(Env::Array) => {
                let alignment = self.read_raw_group_text();
                let rows = Self::wrap_rows(self.parse_row_groups(&name));
                Node::Array { rows, alignment }
            }
            Some(Env::Cases) => self.parse_cases(name),
            Some(Env::Align) | Some(Env::Aligned) => {
                let rows = Self::wrap_rows(self.parse_row_groups(&name));
                Node::Aligned { rows, align_type: AlignType::Align }
            }
            Some(Env::Gather) | Some(Env::Gathered) => {
                let rows = Self::wrap_rows(self.parse_row_groups(&name));
                Node::Aligned { rows, align_type: AlignType::Gather }
            }
            Some(Env::Split) => {
                let rows = Self::wrap_rows(self.parse_row_groups(&name));
                Node::Split { rows }
            }
            Some(Env::Multline) => {
                let lines = Self::wrap_rows(self.parse_row_groups(&name));
                Node::Multline { lines }
            }
            Some(Env::Eqnarray) => {
                let rows = Self::wrap_rows(self.parse_row_groups(&name));
                Node::Eqnarray { rows }
            }
            Some(Env::Subequations) => {
                let content = self.parse_row();
                self.expect_end_environment(&name);
                Node::Subequations { content }
            }
            None => {
                let content = self.parse_row();
                self.expect_end_environment(&name);
                Node::Environment { name, content, options: Vec::new() }
            }
        }
    }

    /// Rows of raw, un-wrapped cell node lists: `[[cell_nodes, ...], ...]`.
    fn parse_row_groups(&mut self, name: &str) -> Vec<Vec<Vec<Node>>> {
        let previous_elide = self.elide_whitespace;
        self.elide_whitespace = true;
        let rows = self.parse_row_groups_inner(name);
        self.elide_whitespace = previous_elide;
        rows
    }

    fn parse_row_groups_inner(&mut self, name: &str) -> Vec<Vec<Vec<Node>>> {
        let mut rows = Vec::new();
        let mut cells: Vec<Vec<Node>> = Vec::new();
        loop {
            let cell = self.parse_row();
            cells.push(cell);
            match self.queue.peek() {
                Token::Ampersand => {
                    self.queue.next();
                }
                Token::NewLine => {
                    self.queue.next();
                    rows.push(std::mem::take(&mut cells));
                }
                Token::EndEnvironment(n) if n == name => {
                    self.queue.next();
                    rows.push(std::mem::take(&mut cells));
                    break;
                }
                Token::Eof => {
                    self.push_diag(DiagnosticKind::UnterminatedEnvironment);
                    rows.push(std::mem::take(&mut cells));
                    break;
                }
                _ => {
                    self.expect_end_environment(name);
                    rows.push(std::mem::take(&mut cells));
                    break;
                }
            }
        }
        rows
    }

    fn wrap_cell(mut nodes: Vec<Node>) -> Node {
        if nodes.len() == 1 {
            nodes.pop().unwrap()
        } else {
            Node::Group(nodes)
        }
    }

    fn wrap_rows(rows: Vec<Vec<Vec<Node>>>) -> Vec<Vec<Node>> {
        rows.into_iter()
            .map(|row| row.into_iter().map(Self::wrap_cell).collect())
            .collect()
    }

    fn parse_cases(&mut self, name: String) -> Node {
        let rows = self.parse_row_groups(&name);
        let pairs = rows
            .into_iter()
            .map(|mut row| {
                if row.len() >= 2 {
                    let condition = row.pop().unwrap();
                    let value: Vec<Node> = row.into_iter().flatten().collect();
                    (value, condition)
                } else {
                    (row.into_iter().next().unwrap_or_default(), Vec::new())
                }
            })
            .collect();
        Node::Cases { pairs }
    }

    fn expect_end_environment(&mut self, name: &str) {
        match self.queue.peek() {
            Token::EndEnvironment(n) if n == name => {
                self.queue.next();
            }
            Token::EndEnvironment(_) => {
                self.push_diag(DiagnosticKind::MismatchedEnvironment);
                self.queue.next();
            }
            Token::Eof => self.push_diag(DiagnosticKind::UnterminatedEnvironment),
            _ => {}
        }
    }

    // ---- macro definition / expansion -----------------------------------

    fn define_macro(&mut self) {
        let Some(name) = self.read_command_name_argument() else {
            self.push_diag(DiagnosticKind::InvalidMacroName);
            return;
        };
        let arity = self
            .read_optional_bracketed_raw()
            .and_then(|s| s.trim().parse::<u8>().ok())
            .unwrap_or(0)
            .min(9);
        let body = self.read_balanced_group_tokens();
        self.macros.define(name, arity, body);
    }

    fn read_command_name_argument(&mut self) -> Option<String> {
        if !matches!(self.queue.peek(), Token::LeftBrace) {
            return None;
        }
        self.queue.next();
        let name = match self.queue.peek().clone() {
            Token::Command(n) => {
                self.queue.next();
                n
            }
            _ => return None,
        };
        if matches!(self.queue.peek(), Token::RightBrace) {
            self.queue.next();
        }
        Some(name)
    }

    fn read_optional_bracketed_raw(&mut self) -> Option<String> {
        if !matches!(self.queue.peek(), Token::LeftBracket) {
            return None;
        }
        self.queue.next();
        let mut s = String::new();
        loop {
            match self.queue.peek() {
                Token::RightBracket => {
                    self.queue.next();
                    break;
                }
                Token::Eof => {
                    self.push_diag(DiagnosticKind::UnclosedBracket);
                    break;
                }
                Token::Text(t) => {
                    s.push_str(t);
                    self.queue.next();
                }
                _ => {
                    self.queue.next();
                }
            }
        }
        Some(s)
    }

    fn read_balanced_group_tokens(&mut self) -> Vec<TokLoc> {
        if !matches!(self.queue.peek(), Token::LeftBrace) {
            return Vec::new();
        }
        self.queue.next();
        let mut depth = 1u32;
        let mut out = Vec::new();
        loop {
            match self.queue.peek() {
                Token::LeftBrace => {
                    depth += 1;
                    out.push(self.queue.next());
                }
                Token::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        self.queue.next();
                        break;
                    }
                    out.push(self.queue.next());
                }
                Token::Eof => {
                    self.push_diag(DiagnosticKind::UnterminatedGroup);
                    break;
                }
                _ => out.push(self.queue.next()),
            }
        }
        out
    }

    fn try_expand_macro(&mut self, name: &str, loc: usize) -> bool {
        self.sync_depth();
        let Some(def) = self.macros.get(name).cloned() else {
            return false;
        };
        if self.expansion_watermarks.len() >= self.config.max_macro_recursion_depth as usize {
            self.diagnostics.push(Diagnostic::new(loc, DiagnosticKind::MacroRecursionOverflow));
            return false;
        }
        let mut args = Vec::with_capacity(def.arity as usize);
        for _ in 0..def.arity {
            match self.read_macro_argument_tokens() {
                Some(arg) => args.push(arg),
                // Input ran out before every declared argument was supplied;
                // stop collecting so the unfilled `#i` placeholders are left
                // as literal text by `substitute` instead of being dropped.
                None => {
                    self.push_diag(DiagnosticKind::MacroArityMismatch);
                    break;
                }
            }
        }
        let expanded = MacroTable::substitute(&def.body, &args);
        let watermark = self.queue.len();
        self.queue.queue_in_front(expanded);
        self.expansion_watermarks.push(watermark);
        true
    }

    fn read_macro_argument_tokens(&mut self) -> Option<Vec<TokLoc>> {
        self.sync_depth();
        match self.queue.peek() {
            Token::LeftBrace => Some(self.read_balanced_group_tokens()),
            Token::Eof => None,
            _ => Some(vec![self.queue.next()]),
        }
    }
}

fn matrix_kind(env: Env) -> MatrixKind {
    match env {
        Env::PMatrix => MatrixKind::Paren,
        Env::BMatrix => MatrixKind::Bracket,
        Env::BraceMatrix => MatrixKind::Brace,
        Env::VMatrix => MatrixKind::VBar,
        Env::DoubleVMatrix => MatrixKind::DoubleVBar,
        Env::Matrix | Env::SmallMatrix => MatrixKind::Plain,
        _ => MatrixKind::Plain,
    }
}

fn infer_arity(body: &[TokLoc]) -> u8 {
    let mut max = 0u8;
    for tok in body {
        if let Token::Text(s) = &tok.1 {
            let mut chars = s.chars().peekable();
            while let Some(c) = chars.next() {
                if c == '#' {
                    if let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                        if (1..=9).contains(&d) {
                            max = max.max(d as u8);
                        }
                    }
                }
            }
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_fraction() {
        let doc = parse(r"\frac{1}{2}");
        assert_eq!(doc.children.len(), 1);
        assert!(matches!(doc.children[0], Node::Fraction { .. }));
    }

    #[test]
    fn parses_superscript_and_subscript() {
        let doc = parse("x^2_1");
        assert_eq!(doc.children.len(), 1);
    }

    #[test]
    fn resolves_known_symbol() {
        let doc = parse(r"\alpha");
        assert_eq!(
            doc.children[0],
            Node::Symbol { name: "alpha".to_owned(), unicode: "\u{03B1}".to_owned() }
        );
    }

    #[test]
    fn parses_pmatrix() {
        let doc = parse(r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}");
        let Node::Matrix { rows, kind, is_small } = &doc.children[0] else {
            panic!("expected Matrix node");
        };
        assert_eq!(kind, &MatrixKind::Paren);
        assert!(!is_small);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn newcommand_expands_with_argument() {
        let doc = parse(r"\newcommand{\R}[0]{\mathbb{R}} x \in \R");
        let has_style = doc
            .children
            .iter()
            .any(|n| matches!(n, Node::Style { kind: StyleKind::Blackboard, .. }));
        assert!(has_style, "{doc:#?}");
    }

    #[test]
    fn newcommand_definition_itself_emits_no_node() {
        let doc = parse(r"\newcommand{\R}{\mathbb{R}}");
        assert!(doc.children.is_empty(), "{doc:#?}");
    }

    #[test]
    fn macro_invoked_without_enough_arguments_keeps_unfilled_placeholder_as_text() {
        let (doc, diags) = parse_with_diagnostics(r"\newcommand{\pair}[2]{#1,#2}\pair{x}");
        let texts: Vec<&str> = doc
            .children
            .iter()
            .filter_map(|n| match n {
                Node::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["x", ",#2"], "{doc:#?}");
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::MacroArityMismatch));
    }

    #[test]
    fn big_operator_binds_limits_not_scripts() {
        let doc = parse(r"\sum_{i=1}^{n} i^2");
        let Node::BigOperator { subscript, superscript, .. } = &doc.children[0] else {
            panic!("expected BigOperator, got {:?}", doc.children[0]);
        };
        assert!(subscript.is_some());
        assert!(superscript.is_some());
    }

    #[test]
    fn unterminated_group_soft_closes() {
        let (doc, diags) = parse_with_diagnostics("{a");
        assert_eq!(doc.children.len(), 1);
        assert!(!diags.is_empty());
    }

    #[test]
    fn unknown_command_becomes_command_node() {
        let doc = parse(r"\asdf");
        assert_eq!(
            doc.children[0],
            Node::Command { name: "asdf".to_owned(), args: Vec::new(), options: Vec::new() }
        );
    }

    #[test]
    fn unknown_environment_falls_back_without_a_diagnostic() {
        let (doc, diags) = parse_with_diagnostics(r"\begin{foo} x \end{foo}");
        assert_eq!(
            doc.children[0],
            Node::Environment {
                name: "foo".to_owned(),
                content: vec![Node::Text(" ".to_owned()), Node::Text("x".to_owned()), Node::Text(" ".to_owned())],
                options: Vec::new(),
            }
        );
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn unmatched_right_becomes_literal_delimiter_with_diagnostic() {
        let (doc, diags) = parse_with_diagnostics(r"a \right) b");
        assert_eq!(
            doc.children,
            vec![
                Node::Text("a".to_owned()),
                Node::Text(" ".to_owned()),
                Node::Text(")".to_owned()),
                Node::Text(" ".to_owned()),
                Node::Text("b".to_owned()),
            ]
        );
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::UnmatchedRight));
    }

    #[test]
    fn gather_and_aligned_environments_get_distinct_align_types() {
        let doc = parse(r"\begin{gather} a \end{gather}");
        let Node::Aligned { align_type, .. } = &doc.children[0] else {
            panic!("expected Aligned, got {:?}", doc.children[0]);
        };
        assert_eq!(*align_type, AlignType::Gather);

        let doc = parse(r"\begin{aligned} a \end{aligned}");
        let Node::Aligned { align_type, .. } = &doc.children[0] else {
            panic!("expected Aligned, got {:?}", doc.children[0]);
        };
        assert_eq!(*align_type, AlignType::Align);
    }
}
