//! Phase 2: Tokenizer
//!
//! The tokenizer converts the character stream into a token sequence that
//! makes the indentation-defined block structure explicit. It tracks the
//! active indent level plus a stack of enclosing levels and emits:
//! - `BlockSequenceStart`/`BlockMappingStart`: indentation opened a block
//! - `BlockEnd`: indentation fell back to an enclosing level
//! - `BlockEntry`, `Key`, `Value`: structure markers inside a block
//! - `ScalarPlain`: a run of plain text
//! - `Eof`: end of the stream
//!
//! A `-` or `:` counts as a structural marker only when followed by a
//! space, a newline, or end of input. Anywhere else it is ordinary scalar
//! content, so values like `http://host` and `a-b` stay plain text.

use crate::scanner::Scanner;
use std::fmt;

/// A lexical token with the block structure made explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An unquoted run of text.
    ScalarPlain(String),
    /// Start of an indentation-delimited sequence.
    BlockSequenceStart,
    /// Start of an indentation-delimited mapping.
    BlockMappingStart,
    /// End of the innermost open block.
    BlockEnd,
    /// A `-` sequence entry marker.
    BlockEntry,
    /// Marks the following scalar as a mapping key.
    Key,
    /// Separates a mapping key from its value.
    Value,
    /// End of the token stream.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::ScalarPlain(text) => write!(f, "SCALAR({}, plain)", text),
            Token::BlockSequenceStart => write!(f, "BLOCK-SEQUENCE-START"),
            Token::BlockMappingStart => write!(f, "BLOCK-MAPPING-START"),
            Token::BlockEnd => write!(f, "BLOCK-END"),
            Token::BlockEntry => write!(f, "BLOCK-ENTRY"),
            Token::Key => write!(f, "KEY"),
            Token::Value => write!(f, "VALUE"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Indent level meaning no block is open.
const NO_INDENT: isize = -1;

/// Convert the character stream into a fully-materialized token sequence.
pub fn tokenize(scanner: Scanner) -> Vec<Token> {
    let tokenizer = Tokenizer {
        scanner,
        tokens: Vec::new(),
        indent: NO_INDENT,
        indents: Vec::new(),
        simple_key_column: NO_INDENT,
    };
    tokenizer.run()
}

/// A space, a newline, or end of input.
fn is_blank_or_end(ch: Option<char>) -> bool {
    matches!(ch, None | Some(' ' | '\n'))
}

struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    tokens: Vec<Token>,
    /// Column of the innermost open block, or `NO_INDENT`.
    indent: isize,
    /// Enclosing indent levels, innermost last.
    indents: Vec<isize>,
    /// Column at which the most recent scalar began.
    simple_key_column: isize,
}

impl Tokenizer<'_> {
    fn run(mut self) -> Vec<Token> {
        loop {
            self.scanner.skip_whitespace();
            self.unroll_indent(self.scanner.column() as isize);

            let ch = match self.scanner.peek(0) {
                Some(ch) => ch,
                None => break,
            };

            if ch == '-' && is_blank_or_end(self.scanner.peek(1)) {
                // Sequence entry marker. The first entry at a deeper
                // column opens the sequence block.
                let column = self.scanner.column() as isize;
                self.roll_indent(Token::BlockSequenceStart, column);
                self.scanner.next();
                self.tokens.push(Token::BlockEntry);
                continue;
            }

            if ch == ':' && is_blank_or_end(self.scanner.peek(1)) {
                // The most recently emitted scalar turns out to be a
                // mapping key, anchored at the column where it began.
                let key = self.tokens.pop();
                self.roll_indent(Token::BlockMappingStart, self.simple_key_column);
                self.scanner.next();
                self.tokens.push(Token::Key);
                if let Some(key) = key {
                    self.tokens.push(key);
                }
                self.tokens.push(Token::Value);
                continue;
            }

            self.simple_key_column = self.scanner.column() as isize;
            let text = self.fetch_plain_scalar();
            self.tokens.push(Token::ScalarPlain(text));
        }

        self.unroll_indent(NO_INDENT);
        self.tokens.push(Token::Eof);
        self.tokens
    }

    /// Open a new block at `column` if it is deeper than the active indent.
    fn roll_indent(&mut self, start: Token, column: isize) {
        if self.indent < column {
            self.tokens.push(start);
            self.indents.push(self.indent);
            self.indent = column;
        }
    }

    /// Close every open block deeper than `column`.
    fn unroll_indent(&mut self, column: isize) {
        while self.indent > column {
            self.indent = self.indents.pop().unwrap_or(NO_INDENT);
            self.tokens.push(Token::BlockEnd);
        }
    }

    /// Accumulate plain text up to a newline, end of input, or a `:`
    /// followed by blank. The terminator is left unconsumed.
    fn fetch_plain_scalar(&mut self) -> String {
        let mut text = String::new();
        loop {
            let ch = match self.scanner.peek(0) {
                Some(ch) => ch,
                None => break,
            };
            if ch == '\n' {
                break;
            }
            if ch == ':' && is_blank_or_end(self.scanner.peek(1)) {
                break;
            }
            text.push(ch);
            self.scanner.next();
        }
        text
    }
}
