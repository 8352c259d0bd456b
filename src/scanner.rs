//! Phase 1: Scanner
//!
//! The scanner wraps raw source text and exposes it one character at a
//! time with:
//! - Column tracking (0-based, reset after every consumed newline)
//! - Arbitrary-depth lookahead
//! - Whitespace skipping (spaces and newlines only, never tabs)
//!
//! End of input is the `None` sentinel, not an error.

use std::collections::VecDeque;
use std::str::Chars;

/// A column-tracking character stream with arbitrary lookahead.
pub struct Scanner<'a> {
    chars: Chars<'a>,
    pending: VecDeque<Option<char>>,
    column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            pending: VecDeque::new(),
            column: 0,
        }
    }

    /// Current 0-based column on the current line.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Consume and return one character, advancing the column state.
    pub fn next(&mut self) -> Option<char> {
        let ch = match self.pending.pop_front() {
            Some(ch) => ch,
            None => self.chars.next(),
        };
        match ch {
            Some('\n') => self.column = 0,
            Some(_) => self.column += 1,
            None => {}
        }
        ch
    }

    /// Look `depth` characters ahead without consuming anything.
    pub fn peek(&mut self, depth: usize) -> Option<char> {
        while self.pending.len() <= depth {
            let ch = self.chars.next();
            self.pending.push_back(ch);
        }
        self.pending[depth]
    }

    /// Consume consecutive spaces and newlines.
    pub fn skip_whitespace(&mut self) {
        while let Some(' ' | '\n') = self.peek(0) {
            self.next();
        }
    }
}
