//! Single-pass, semantics-free tokenizer.
//!
//! Structured the way `math-core`'s own lexer is: a `CharIndices` cursor
//! with one character of lookahead, a `read_char`/`peek_char` pair, and a
//! greedy `read_command`/`read_env_token` split for `\begin{...}`/`\end{...}`.

use crate::token::{TokLoc, Token};

pub struct Lexer<'source> {
    chars: std::str::CharIndices<'source>,
    peek: Option<(usize, char)>,
    len: usize,
}

fn is_special(c: char) -> bool {
    matches!(
        c,
        '\\' | '{' | '}' | '[' | ']' | '^' | '_' | '&' | ' ' | '\t' | '\n' | '\r' | '%'
    )
}

impl<'source> Lexer<'source> {
    pub fn new(input: &'source str) -> Self {
        let mut chars = input.char_indices();
        let peek = chars.next();
        Lexer {
            chars,
            peek,
            len: input.len(),
        }
    }

    /// Tokenizes the whole input, always ending with exactly one `Eof`.
    pub fn tokenize(mut self) -> Vec<TokLoc> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let done = tok.1.is_eof();
            tokens.push(tok);
            if done {
                break;
            }
        }
        tokens
    }

    fn read_char(&mut self) -> Option<(usize, char)> {
        let cur = self.peek;
        self.peek = self.chars.next();
        cur
    }

    fn peek_char(&self) -> Option<char> {
        self.peek.map(|(_, c)| c)
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.read_char();
        }
    }

    fn next_token(&mut self) -> TokLoc {
        loop {
            let Some((pos, c)) = self.peek else {
                return TokLoc(self.len, Token::Eof);
            };
            match c {
                '%' => {
                    self.read_char();
                    self.skip_line_comment();
                }
                '\n' | '\r' => {
                    self.read_char();
                }
                ' ' | '\t' => return self.read_whitespace(pos),
                '\\' => {
                    self.read_char();
                    return self.read_command(pos);
                }
                '{' => {
                    self.read_char();
                    return TokLoc(pos, Token::LeftBrace);
                }
                '}' => {
                    self.read_char();
                    return TokLoc(pos, Token::RightBrace);
                }
                '[' => {
                    self.read_char();
                    return TokLoc(pos, Token::LeftBracket);
                }
                ']' => {
                    self.read_char();
                    return TokLoc(pos, Token::RightBracket);
                }
                '^' => {
                    self.read_char();
                    return TokLoc(pos, Token::Superscript);
                }
                '_' => {
                    self.read_char();
                    return TokLoc(pos, Token::Subscript);
                }
                '&' => {
                    self.read_char();
                    return TokLoc(pos, Token::Ampersand);
                }
                _ => return self.read_text(pos),
            }
        }
    }

    fn read_command(&mut self, start: usize) -> TokLoc {
        match self.peek_char() {
            Some('\\') => {
                self.read_char();
                TokLoc(start, Token::NewLine)
            }
            Some(c) if c.is_ascii_alphabetic() || c == '@' => {
                let name = self.read_name();
                if name == "begin" || name == "end" {
                    self.read_env_token(start, &name)
                } else {
                    TokLoc(start, Token::Command(name))
                }
            }
            Some(c) => {
                self.read_char();
                TokLoc(start, Token::Command(c.to_string()))
            }
            None => TokLoc(start, Token::Command(String::new())),
        }
    }

    fn read_name(&mut self) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphabetic() || (s.is_empty() && c == '@') {
                s.push(c);
                self.read_char();
            } else {
                break;
            }
        }
        s
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(' ' | '\t' | '\n' | '\r')) {
            self.read_char();
        }
    }

    fn read_env_token(&mut self, start: usize, kind: &str) -> TokLoc {
        self.skip_inline_whitespace();
        if self.peek_char() != Some('{') {
            return TokLoc(start, Token::Command(kind.to_owned()));
        }
        self.read_char();
        let mut name = String::new();
        loop {
            match self.peek_char() {
                Some('}') => {
                    self.read_char();
                    break;
                }
                Some(c) if c.is_whitespace() => {
                    self.read_char();
                }
                Some(c) => {
                    name.push(c);
                    self.read_char();
                }
                None => break,
            }
        }
        if kind == "begin" {
            TokLoc(start, Token::BeginEnvironment(name))
        } else {
            TokLoc(start, Token::EndEnvironment(name))
        }
    }

    fn read_whitespace(&mut self, start: usize) -> TokLoc {
        let mut s = String::new();
        while matches!(self.peek_char(), Some(' ' | '\t')) {
            s.push(self.peek_char().unwrap());
            self.read_char();
        }
        TokLoc(start, Token::Whitespace(s))
    }

    fn read_text(&mut self, start: usize) -> TokLoc {
        let mut s = String::new();
        while let Some(c) = self.peek_char() {
            if is_special(c) {
                break;
            }
            s.push(c);
            self.read_char();
        }
        TokLoc(start, Token::Text(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .into_iter()
            .map(|t| t.1)
            .collect()
    }

    #[test]
    fn tokenizes_plain_text() {
        assert_eq!(
            kinds("abc"),
            vec![Token::Text("abc".to_owned()), Token::Eof]
        );
    }

    #[test]
    fn tokenizes_command() {
        assert_eq!(
            kinds(r"\alpha"),
            vec![Token::Command("alpha".to_owned()), Token::Eof]
        );
    }

    #[test]
    fn tokenizes_one_char_command() {
        assert_eq!(
            kinds(r"\,"),
            vec![Token::Command(",".to_owned()), Token::Eof]
        );
    }

    #[test]
    fn tokenizes_begin_end_environment() {
        assert_eq!(
            kinds(r"\begin{pmatrix}\end{pmatrix}"),
            vec![
                Token::BeginEnvironment("pmatrix".to_owned()),
                Token::EndEnvironment("pmatrix".to_owned()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn tolerates_whitespace_in_environment_name() {
        assert_eq!(
            kinds(r"\begin{  pmatrix   }"),
            vec![
                Token::BeginEnvironment("pmatrix".to_owned()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn double_backslash_is_newline() {
        assert_eq!(kinds(r"\\"), vec![Token::NewLine, Token::Eof]);
    }

    #[test]
    fn strips_line_comments() {
        assert_eq!(
            kinds("a % comment\nb"),
            vec![
                Token::Text("a".to_owned()),
                Token::Whitespace(" ".to_owned()),
                Token::Text("b".to_owned()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn superscript_and_subscript() {
        assert_eq!(
            kinds("x^2_1"),
            vec![
                Token::Text("x".to_owned()),
                Token::Superscript,
                Token::Text("2".to_owned()),
                Token::Subscript,
                Token::Text("1".to_owned()),
                Token::Eof,
            ]
        );
    }
}
