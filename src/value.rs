//! The in-memory value tree.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// A node in the data tree: a scalar, a sequence, or a mapping.
///
/// The parser only ever produces `String` scalars; `Int` exists for
/// programmatic tree construction. Cloning a value deep-copies any
/// contained container, so two clones never share storage.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Signed integer scalar.
    Int(i64),
    /// Raw, unescaped text scalar.
    String(String),
    /// Ordered list of values.
    Sequence(Vec<Value>),
    /// String-keyed map; insertion order is not significant.
    Mapping(HashMap<String, Value>),
}

impl Value {
    /// Name of the active variant, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    fn type_error(&self, expected: &'static str) -> Error {
        Error::Type {
            expected,
            found: self.kind(),
        }
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(self.type_error("int")),
        }
    }

    /// Returns the text if this is a `String`.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.type_error("string")),
        }
    }

    /// Returns the items if this is a `Sequence`.
    pub fn as_sequence(&self) -> Result<&Vec<Value>> {
        match self {
            Value::Sequence(items) => Ok(items),
            _ => Err(self.type_error("sequence")),
        }
    }

    pub fn as_sequence_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Sequence(items) => Ok(items),
            _ => Err(self.type_error("sequence")),
        }
    }

    /// Returns the entries if this is a `Mapping`.
    pub fn as_mapping(&self) -> Result<&HashMap<String, Value>> {
        match self {
            Value::Mapping(entries) => Ok(entries),
            _ => Err(self.type_error("mapping")),
        }
    }

    pub fn as_mapping_mut(&mut self) -> Result<&mut HashMap<String, Value>> {
        match self {
            Value::Mapping(entries) => Ok(entries),
            _ => Err(self.type_error("mapping")),
        }
    }

    /// Indexed access into a `Sequence`.
    pub fn get_index(&self, index: usize) -> Result<&Value> {
        let items = self.as_sequence()?;
        items.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }

    pub fn get_index_mut(&mut self, index: usize) -> Result<&mut Value> {
        let items = self.as_sequence_mut()?;
        let len = items.len();
        items
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Keyed access into a `Mapping`.
    pub fn get_key(&self, key: &str) -> Result<&Value> {
        self.as_mapping()?
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    pub fn get_key_mut(&mut self, key: &str) -> Result<&mut Value> {
        self.as_mapping_mut()?
            .get_mut(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Serialize this tree to block-style text.
    pub fn to_text(&self) -> String {
        crate::encode::encode(self)
    }

    /// A diagnostic rendering showing variant tags, e.g. `map(a: int(1))`.
    ///
    /// Mapping entries are rendered in sorted key order so the rendering
    /// is deterministic. Not round-trippable.
    pub fn to_debug_text(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "int({})", n),
            Value::String(s) => write!(f, "string({})", s),
            Value::Sequence(items) => {
                write!(f, "seq(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                write!(f, ")")
            }
            Value::Mapping(entries) => {
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                write!(f, "map(")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {:?}", key, entries[*key])?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(entries: HashMap<String, Value>) -> Self {
        Value::Mapping(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mapping() -> Value {
        let mut entries = HashMap::new();
        entries.insert("a".to_string(), Value::Int(1));
        entries.insert("b".to_string(), Value::from("two"));
        Value::Mapping(entries)
    }

    #[test]
    fn test_typed_accessors() {
        assert_eq!(Value::Int(7).as_int().unwrap(), 7);
        assert_eq!(Value::from("hi").as_str().unwrap(), "hi");
        let seq = Value::Sequence(vec![Value::Int(1)]);
        assert_eq!(seq.as_sequence().unwrap().len(), 1);
        assert_eq!(sample_mapping().as_mapping().unwrap().len(), 2);
    }

    #[test]
    fn test_type_mismatch() {
        let err = Value::from("hi").as_int().unwrap_err();
        assert!(matches!(
            err,
            Error::Type {
                expected: "int",
                found: "string"
            }
        ));
        assert!(Value::Int(1).as_mapping().is_err());
        assert!(sample_mapping().get_index(0).is_err());
    }

    #[test]
    fn test_index_out_of_bounds() {
        let seq = Value::Sequence(vec![Value::Int(1)]);
        assert_eq!(seq.get_index(0).unwrap(), &Value::Int(1));
        let err = seq.get_index(3).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfBounds { index: 3, len: 1 }
        ));
    }

    #[test]
    fn test_key_not_found() {
        let map = sample_mapping();
        assert_eq!(map.get_key("a").unwrap(), &Value::Int(1));
        let err = map.get_key("missing").unwrap_err();
        assert!(matches!(err, Error::KeyNotFound(k) if k == "missing"));
    }

    #[test]
    fn test_indexed_mutation() {
        let mut map = sample_mapping();
        *map.get_key_mut("a").unwrap() = Value::Int(10);
        assert_eq!(map.get_key("a").unwrap().as_int().unwrap(), 10);

        let mut seq = Value::Sequence(vec![Value::Int(1), Value::Int(2)]);
        *seq.get_index_mut(1).unwrap() = Value::from("x");
        assert_eq!(seq.get_index(1).unwrap().as_str().unwrap(), "x");
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut original = Value::Sequence(vec![Value::Int(1)]);
        let copy = original.clone();
        *original.get_index_mut(0).unwrap() = Value::Int(9);
        assert_eq!(copy.get_index(0).unwrap().as_int().unwrap(), 1);
    }

    #[test]
    fn test_debug_text() {
        assert_eq!(Value::Int(1).to_debug_text(), "int(1)");
        assert_eq!(Value::from("x y").to_debug_text(), "string(x y)");
        let seq = Value::Sequence(vec![Value::Int(1), Value::from("a")]);
        assert_eq!(seq.to_debug_text(), "seq(int(1), string(a))");
        // Keys render sorted regardless of hash order.
        assert_eq!(
            sample_mapping().to_debug_text(),
            "map(a: int(1), b: string(two))"
        );
    }

    #[test]
    fn test_debug_text_empty_containers() {
        assert_eq!(Value::Sequence(Vec::new()).to_debug_text(), "seq()");
        assert_eq!(Value::Mapping(HashMap::new()).to_debug_text(), "map()");
    }
}
