//! Lexical tokens produced by [`crate::lexer::Lexer`].
//!
//! The tokenizer performs no semantic interpretation: a `Command` token is
//! just a name, not yet classified as an accent, a style switch, or
//! anything else. That classification happens in [`crate::parser`].

use strum_macros::Display;

/// One lexical unit together with the byte offset in the source it starts at.
///
/// Mirrors the `TokLoc(usize, Token)` pairing used for span-carrying
/// diagnostics: the offset lets [`crate::error::Diagnostic`] point at the
/// exact span that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokLoc(pub usize, pub Token);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Token {
    /// A run of ordinary characters.
    #[strum(serialize = "text")]
    Text(String),
    /// `\name`, with the leading backslash stripped.
    #[strum(serialize = "command")]
    Command(String),
    /// `\begin{name}`.
    #[strum(serialize = "begin")]
    BeginEnvironment(String),
    /// `\end{name}`.
    #[strum(serialize = "end")]
    EndEnvironment(String),
    #[strum(serialize = "{")]
    LeftBrace,
    #[strum(serialize = "}")]
    RightBrace,
    #[strum(serialize = "[")]
    LeftBracket,
    #[strum(serialize = "]")]
    RightBracket,
    #[strum(serialize = "^")]
    Superscript,
    #[strum(serialize = "_")]
    Subscript,
    #[strum(serialize = "&")]
    Ampersand,
    /// `\\`.
    #[strum(serialize = "newline")]
    NewLine,
    /// A run of spaces/tabs.
    #[strum(serialize = "whitespace")]
    Whitespace(String),
    #[strum(serialize = "EOF")]
    Eof,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_match_spec_token_kinds() {
        assert_eq!(Token::LeftBrace.to_string(), "{");
        assert_eq!(Token::Command("frac".to_owned()).to_string(), "command");
        assert_eq!(Token::Eof.to_string(), "EOF");
    }
}
