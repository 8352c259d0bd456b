//! Error types for parsing and tree access.

use crate::lexer::Token;
use thiserror::Error;

/// Result type for yamlet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type covering parsing, typed access, and stream I/O.
#[derive(Error, Debug)]
pub enum Error {
    /// A token the current grammar production does not accept.
    #[error("Unexpected token {0}")]
    UnexpectedToken(Token),

    /// Block structure nested beyond the supported depth.
    #[error("Block structure nested too deeply")]
    TooDeep,

    /// A typed accessor was invoked on the wrong variant.
    #[error("Expected {expected} but found {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },

    /// A sequence index past the end.
    #[error("Index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A mapping key with no entry.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Failure reading the source or writing the sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
