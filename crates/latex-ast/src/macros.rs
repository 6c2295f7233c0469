//! User-defined macro table (`\newcommand`/`\renewcommand`).
//!
//! Uses `rustc_hash::FxHashMap`, the same fast non-cryptographic hasher
//! `math-core` keeps its own macro table in. Parameter substitution has no
//! teacher equivalent to copy directly: the teacher represents `#1..#9` as
//! a dedicated `CustomCmdArg2(usize)` token, but this crate's tokenizer
//! (per the specification) has no such token kind, so substitution instead
//! scans `Token::Text` contents for a bare `#` followed by a digit 1-9.

use rustc_hash::FxHashMap;

use crate::token::{TokLoc, Token};

#[derive(Debug, Clone)]
pub struct MacroDef {
    pub arity: u8,
    pub body: Vec<TokLoc>,
}

#[derive(Debug, Default)]
pub struct MacroTable {
    macros: FxHashMap<String, MacroDef>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redefinitions silently overwrite, per the specification.
    pub fn define(&mut self, name: String, arity: u8, body: Vec<TokLoc>) {
        self.macros.insert(name, MacroDef { arity, body });
    }

    pub fn get(&self, name: &str) -> Option<&MacroDef> {
        self.macros.get(name)
    }

    /// Splices `args` into `body` wherever a `#1..#9` placeholder occurs,
    /// including placeholders embedded inside a larger `Text` run (e.g.
    /// `a#1b`). Non-text tokens pass through unchanged.
    pub fn substitute(body: &[TokLoc], args: &[Vec<TokLoc>]) -> Vec<TokLoc> {
        let mut out = Vec::with_capacity(body.len());
        for tok in body {
            match &tok.1 {
                Token::Text(s) => substitute_in_text(tok.0, s, args, &mut out),
                other => out.push(TokLoc(tok.0, other.clone())),
            }
        }
        out
    }
}

fn substitute_in_text(loc: usize, s: &str, args: &[Vec<TokLoc>], out: &mut Vec<TokLoc>) {
    let mut buf = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '#' {
            if let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                if (1..=9).contains(&d) {
                    chars.next();
                    match args.get(d as usize - 1) {
                        Some(arg) => {
                            if !buf.is_empty() {
                                out.push(TokLoc(loc, Token::Text(std::mem::take(&mut buf))));
                            }
                            out.extend(arg.iter().cloned());
                        }
                        // Fewer arguments were available at the call site than the
                        // macro body references: leave `#d` as literal text instead
                        // of silently dropping it.
                        None => {
                            buf.push('#');
                            buf.push_str(&d.to_string());
                        }
                    }
                    continue;
                }
            }
        }
        buf.push(c);
    }
    if !buf.is_empty() {
        out.push(TokLoc(loc, Token::Text(buf)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn toks(s: &str) -> Vec<TokLoc> {
        let mut v = Lexer::new(s).tokenize();
        v.pop(); // drop Eof
        v
    }

    #[test]
    fn redefinition_overwrites_silently() {
        let mut table = MacroTable::new();
        table.define("foo".to_owned(), 0, toks("a"));
        table.define("foo".to_owned(), 0, toks("b"));
        assert_eq!(table.get("foo").unwrap().body, toks("b"));
    }

    #[test]
    fn substitutes_parameter_embedded_in_text() {
        let body = toks("a#1b");
        let args = vec![toks("X")];
        let result = MacroTable::substitute(&body, &args);
        let rendered: String = result
            .into_iter()
            .map(|t| match t.1 {
                Token::Text(s) => s,
                _ => String::new(),
            })
            .collect();
        assert_eq!(rendered, "aXb");
    }

    #[test]
    fn substitutes_parameter_as_its_own_token() {
        let body = toks(r"\sqrt{#1}");
        let args = vec![toks("3")];
        let result = MacroTable::substitute(&body, &args);
        assert!(result
            .iter()
            .any(|t| matches!(&t.1, Token::Text(s) if s == "3")));
    }

    #[test]
    fn parameter_beyond_available_arguments_is_kept_as_literal_text() {
        let body = toks("#1#2");
        let args = vec![toks("X")];
        let result = MacroTable::substitute(&body, &args);
        let rendered: String = result
            .into_iter()
            .map(|t| match t.1 {
                Token::Text(s) => s,
                _ => String::new(),
            })
            .collect();
        assert_eq!(rendered, "X#2");
    }
}
