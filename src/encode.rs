//! Phase 4: Serializer
//!
//! The serializer walks a value tree with a running output column and
//! regenerates indented block-style text, the inverse of the structure
//! the tokenizer infers. Layout rules:
//! - Scalars print at the target indent, one per line
//! - Sequence items print `- ` at the indent, contents two columns deeper
//! - Mapping entries print `key: value` inline for scalar values;
//!   nested mappings indent two columns deeper, nested sequences stay at
//!   the key's own indent so the dashes align under the key
//!
//! Mapping entries are emitted in sorted key order, making the output a
//! deterministic pure function of the tree.

use crate::error::Result;
use crate::value::Value;
use std::io::Write;

/// Write canonical block-style text for the given tree to `sink`.
pub fn serialize<W: Write>(mut sink: W, value: &Value) -> Result<()> {
    sink.write_all(encode(value).as_bytes())?;
    Ok(())
}

/// Encode a value tree to block-style text.
pub(crate) fn encode(value: &Value) -> String {
    let mut encoder = Encoder {
        out: String::new(),
        column: 0,
    };
    encoder.write_value(value, 0);
    encoder.out
}

struct Encoder {
    out: String,
    column: usize,
}

impl Encoder {
    fn push(&mut self, ch: char) {
        self.out.push(ch);
        if ch == '\n' {
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    fn push_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.push(ch);
        }
    }

    fn push_line(&mut self, text: &str) {
        self.push_str(text);
        self.push('\n');
    }

    /// Pad with spaces from the current column out to `indent`.
    fn pad_to(&mut self, indent: usize) {
        while self.column < indent {
            self.push(' ');
        }
    }

    fn write_value(&mut self, value: &Value, indent: usize) {
        match value {
            Value::Int(n) => {
                self.pad_to(indent);
                self.push_line(&n.to_string());
            }
            Value::String(text) => {
                self.pad_to(indent);
                self.push_line(text);
            }
            Value::Sequence(items) => {
                for item in items {
                    self.pad_to(indent);
                    self.push_str("- ");
                    self.write_value(item, indent + 2);
                }
            }
            Value::Mapping(entries) => {
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                for key in keys {
                    let value = &entries[key];
                    self.pad_to(indent);
                    if value.is_int() || value.is_string() {
                        self.push_str(key);
                        self.push_str(": ");
                        self.write_value(value, 0);
                    } else {
                        self.push_str(key);
                        self.push_line(":");
                        let child = if value.is_sequence() {
                            indent
                        } else {
                            indent + 2
                        };
                        self.write_value(value, child);
                    }
                }
            }
        }
    }
}
