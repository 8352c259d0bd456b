//! Phase 3: Parser
//!
//! A recursive-descent consumer of the token sequence. Each production
//! either consumes the token it expects or fails with the offending
//! token; no partial tree is ever returned. The grammar is LL(1):
//!
//! ```text
//! block-content    := scalar-plain | block-collection
//! block-collection := block-sequence-start (block-entry block-content)* block-end
//!                   | block-mapping-start mapping-entry* block-end
//! mapping-entry    := key scalar-plain value block-value
//! block-value      := (block-entry block-content)+ | block-content
//! ```
//!
//! The document root is a single `block-content`; trailing tokens after
//! the root value are left unconsumed.

use crate::error::{Error, Result};
use crate::lexer::Token;
use crate::value::Value;
use std::collections::HashMap;

/// Maximum block nesting depth. Deeper input fails with [`Error::TooDeep`]
/// instead of exhausting the call stack.
const MAX_DEPTH: usize = 128;

/// Parse the first top-level value from the token sequence.
pub fn parse(tokens: &[Token]) -> Result<Value> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    parser.block_content()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    /// The token at the cursor; `Eof` once past the end.
    fn peek(&self) -> &Token {
        static EOF: Token = Token::Eof;
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    /// Consume the cursor token if it equals `token`.
    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == token {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Consume the cursor token if it is a plain scalar.
    fn eat_scalar(&mut self) -> Option<String> {
        match self.peek() {
            Token::ScalarPlain(text) => {
                let text = text.clone();
                self.pos += 1;
                Some(text)
            }
            _ => None,
        }
    }

    fn expect_scalar(&mut self) -> Result<String> {
        match self.eat_scalar() {
            Some(text) => Ok(text),
            None => Err(self.unexpected()),
        }
    }

    fn unexpected(&self) -> Error {
        Error::UnexpectedToken(self.peek().clone())
    }

    fn block_content(&mut self) -> Result<Value> {
        if let Some(text) = self.eat_scalar() {
            return Ok(Value::String(text));
        }
        self.block_collection()
    }

    fn block_collection(&mut self) -> Result<Value> {
        if self.depth == MAX_DEPTH {
            return Err(Error::TooDeep);
        }
        self.depth += 1;

        let value = if self.eat(&Token::BlockSequenceStart) {
            let mut items = Vec::new();
            while self.eat(&Token::BlockEntry) {
                items.push(self.block_content()?);
            }
            self.expect(&Token::BlockEnd)?;
            Value::Sequence(items)
        } else if self.eat(&Token::BlockMappingStart) {
            let mut entries = HashMap::new();
            while self.eat(&Token::Key) {
                let key = self.expect_scalar()?;
                self.expect(&Token::Value)?;
                let value = self.block_value()?;
                // First occurrence of a duplicate key wins.
                entries.entry(key).or_insert(value);
            }
            self.expect(&Token::BlockEnd)?;
            Value::Mapping(entries)
        } else {
            return Err(self.unexpected());
        };

        self.depth -= 1;
        Ok(value)
    }

    /// The value side of a mapping entry: either entries inlined at the
    /// mapping's own indent level, or a nested block content.
    fn block_value(&mut self) -> Result<Value> {
        if matches!(self.peek(), Token::BlockEntry) {
            let mut items = Vec::new();
            while self.eat(&Token::BlockEntry) {
                items.push(self.block_content()?);
            }
            return Ok(Value::Sequence(items));
        }
        self.block_content()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::scanner::Scanner;

    fn parse_source(source: &str) -> Result<Value> {
        let tokens = tokenize(Scanner::new(source));
        parse(&tokens)
    }

    #[test]
    fn test_scalar_document() {
        let value = parse_source("abc\n").unwrap();
        assert_eq!(value, Value::String("abc".to_string()));
    }

    #[test]
    fn test_numeric_text_stays_string() {
        // Scalars are always strings; Int is never auto-detected.
        let value = parse_source("123\n").unwrap();
        assert_eq!(value, Value::String("123".to_string()));
    }

    #[test]
    fn test_sequence() {
        let value = parse_source("- abc\n- def\n").unwrap();
        assert_eq!(value.to_debug_text(), "seq(string(abc), string(def))");
    }

    #[test]
    fn test_mapping_of_scalars() {
        let value = parse_source("a: 1\nb: two\n").unwrap();
        let entries = value.as_mapping().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(value.get_key("a").unwrap().as_str().unwrap(), "1");
        assert_eq!(value.get_key("b").unwrap().as_str().unwrap(), "two");
    }

    #[test]
    fn test_mapping_with_indented_sequence() {
        let value = parse_source("a:\n  - 1\n  - 2\n").unwrap();
        assert_eq!(value.to_debug_text(), "map(a: seq(string(1), string(2)))");
    }

    #[test]
    fn test_mapping_with_inline_sequence() {
        // Entries at the key's own column form the value sequence.
        let value = parse_source("key:\n- item 1\n- item 2\n").unwrap();
        assert_eq!(
            value.to_debug_text(),
            "map(key: seq(string(item 1), string(item 2)))"
        );
    }

    #[test]
    fn test_colon_literal_content() {
        let value = parse_source("url: http://example.com\n").unwrap();
        assert_eq!(
            value.get_key("url").unwrap().as_str().unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_duplicate_key_first_wins() {
        let value = parse_source("a: 1\na: 2\n").unwrap();
        let entries = value.as_mapping().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(value.get_key("a").unwrap().as_str().unwrap(), "1");
    }

    #[test]
    fn test_dedent_closes_sequence() {
        // The dedented entry opens a new block after the first sequence
        // closes; only the first top-level value is returned.
        let value = parse_source("  - 1\n- 2\n").unwrap();
        assert_eq!(value.to_debug_text(), "seq(string(1))");
    }

    #[test]
    fn test_dedent_inside_mapping_is_error() {
        // The shallower entry closes the sequence, then opens a block
        // where the mapping expects its own end.
        let err = parse_source("a:\n  - 1\n - 2\n").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken(_)));
    }

    #[test]
    fn test_scalar_then_deeper_mapping_is_error() {
        let err = parse_source("a: 1\n  b: 2\n").unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedToken(Token::BlockMappingStart)
        ));
    }

    #[test]
    fn test_empty_document_is_error() {
        let err = parse_source("").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken(Token::Eof)));
    }

    #[test]
    fn test_sequence_of_mappings() {
        let value = parse_source("- key 1: value 1\n  key 2: value 2\n").unwrap();
        assert_eq!(
            value.to_debug_text(),
            "seq(map(key 1: string(value 1), key 2: string(value 2)))"
        );
    }

    #[test]
    fn test_compact_nested_sequence() {
        let value = parse_source("- - item 1\n  - item 2\n").unwrap();
        assert_eq!(
            value.to_debug_text(),
            "seq(seq(string(item 1), string(item 2)))"
        );
    }

    #[test]
    fn test_nesting_depth_limit() {
        // 200 nested sequences, one dash deeper per level.
        let mut source = String::new();
        for _ in 0..200 {
            source.push_str("- ");
        }
        source.push_str("x\n");
        let err = parse_source(&source).unwrap_err();
        assert!(matches!(err, Error::TooDeep));
    }

    #[test]
    fn test_deep_but_allowed_nesting() {
        let mut source = String::new();
        for _ in 0..100 {
            source.push_str("- ");
        }
        source.push_str("x\n");
        let mut value = parse_source(&source).unwrap();
        for _ in 0..100 {
            value = value.get_index(0).unwrap().clone();
        }
        assert_eq!(value.as_str().unwrap(), "x");
    }
}
