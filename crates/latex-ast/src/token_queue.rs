//! Peekable, splice-able token stream.
//!
//! Carried over almost verbatim from `math-core`'s own `token_queue.rs`:
//! a `VecDeque` the parser can peek one or two tokens into, and that the
//! macro expander can push spliced tokens onto the front of, so expansion
//! looks to the parser exactly like more input arrived at the current
//! position.

use std::collections::VecDeque;

use crate::token::{TokLoc, Token};

pub struct TokenQueue {
    queue: VecDeque<TokLoc>,
    eof_loc: usize,
}

impl TokenQueue {
    pub fn new(tokens: Vec<TokLoc>) -> Self {
        let eof_loc = tokens.last().map(|t| t.0).unwrap_or(0);
        TokenQueue {
            queue: tokens.into(),
            eof_loc,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn peek(&self) -> &Token {
        self.queue.front().map(|t| &t.1).unwrap_or(&Token::Eof)
    }

    pub fn peek_loc(&self) -> usize {
        self.queue.front().map(|t| t.0).unwrap_or(self.eof_loc)
    }

    pub fn next(&mut self) -> TokLoc {
        self.queue
            .pop_front()
            .unwrap_or(TokLoc(self.eof_loc, Token::Eof))
    }

    /// Splices `tokens` in front of the current position, in order, so the
    /// next call to [`Self::next`] yields `tokens[0]`.
    pub fn queue_in_front(&mut self, tokens: Vec<TokLoc>) {
        for t in tokens.into_iter().rev() {
            self.queue.push_front(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    #[test]
    fn peek_does_not_consume() {
        let mut q = TokenQueue::new(Lexer::new("ab").tokenize());
        assert_eq!(q.peek(), &Token::Text("ab".to_owned()));
        assert_eq!(q.peek(), &Token::Text("ab".to_owned()));
        q.next();
        assert_eq!(q.peek(), &Token::Eof);
    }

    #[test]
    fn queue_in_front_splices_before_remaining_tokens() {
        let mut q = TokenQueue::new(Lexer::new("b").tokenize());
        q.queue_in_front(Lexer::new("a").tokenize());
        // Lexer::new("a").tokenize() ends in its own Eof; only the first
        // token is meaningful to splice in practice, but queue_in_front
        // itself makes no assumption about that.
        assert_eq!(q.next().1, Token::Text("a".to_owned()));
    }

    #[test]
    fn next_past_end_keeps_yielding_eof() {
        let mut q = TokenQueue::new(Lexer::new("").tokenize());
        assert_eq!(q.next().1, Token::Eof);
        assert_eq!(q.next().1, Token::Eof);
    }
}
