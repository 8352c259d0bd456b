//! yamlet parses and serializes a restricted, block-style subset of a
//! YAML-like data language: plain scalars, indentation-delimited
//! sequences and mappings, and nothing else. It is meant as an
//! embeddable data-interchange layer; callers load a tree and query it
//! with typed accessors.
//!
//! # Parsing Pipeline
//!
//! The parser operates in three phases:
//!
//! 1. **Scanner**: wraps the source characters, tracking the current
//!    column and providing arbitrary lookahead.
//!
//! 2. **Tokenizer**: converts the character stream into tokens with
//!    explicit block start/end markers inferred from indentation.
//!
//! 3. **Parser**: recursively parses the token stream into a [`Value`]
//!    tree.
//!
//! Serialization walks a [`Value`] tree with a running output column and
//! regenerates the indentation.
//!
//! Plain scalars always parse as [`Value::String`]; the [`Value::Int`]
//! variant exists for programmatic tree construction only. Cloning a
//! `Value` deep-copies contained containers; clones never share storage.

mod encode;
mod error;
mod lexer;
mod parser;
mod scanner;
mod value;

pub use encode::serialize;
pub use error::{Error, Result};
pub use lexer::Token;
pub use value::Value;

use std::io::Read;

/// Parse one document from a reader.
///
/// # Example
///
/// ```
/// let value = yamlet::load("a: 1\n".as_bytes()).unwrap();
/// assert_eq!(value.get_key("a").unwrap().as_str().unwrap(), "1");
/// ```
pub fn load<R: Read>(mut reader: R) -> Result<Value> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    load_string(&source)
}

/// Parse one document from a string.
pub fn load_string(source: &str) -> Result<Value> {
    let scanner = scanner::Scanner::new(source);
    let tokens = lexer::tokenize(scanner);
    parser::parse(&tokens)
}
