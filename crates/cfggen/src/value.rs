/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The value model shared by templates and generated configurations.
//!
//! Templates and results are built from the same [`Value`] type. Operator
//! invocations are not a separate variant: they are recognized structurally
//! (see [`crate::operator::Invocation`]) so that any JSON or YAML document can
//! be loaded as a template without a dedicated syntax.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// An ordered string-keyed mapping. Insertion order is kept for stable output.
pub type Mapping = IndexMap<String, Value>;

/// A template or configuration value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// A null/missing value.
    #[default]
    Null,

    /// A boolean value.
    Bool(bool),

    /// An integral number.
    Int(i64),

    /// A floating point number.
    Float(f64),

    /// A string value.
    String(String),

    /// An ordered list of values.
    Sequence(Vec<Value>),

    /// A fixed-arity group produced by `$product` (list form) and `$zip`.
    ///
    /// Templates never contain tuples; they only appear in results.
    Tuple(Vec<Value>),

    /// A map of string keys to values.
    Mapping(Mapping),
}

impl Value {
    /// Build a tuple value.
    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    /// Build a sequence value.
    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Sequence(items.into_iter().collect())
    }

    /// Build a mapping value from key/value pairs, keeping their order.
    pub fn mapping(
        entries: impl IntoIterator<Item = (impl Into<String>, Value)>,
    ) -> Self {
        Value::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The elements of a sequence or tuple.
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Consume a sequence or tuple, returning its elements.
    pub fn into_items(self) -> Result<Vec<Value>, Value> {
        match self {
            Value::Sequence(items) | Value::Tuple(items) => Ok(items),
            other => Err(other),
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// A short name for the kind of value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Tuple(_) => "tuple",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Get a nested value by a path of mapping keys.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self
                .as_mapping()
                .and_then(|m| m.get(*first))
                .and_then(|v| v.get_path(rest)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 beyond i64::MAX and reals both land here
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) | Value::Tuple(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_key_order() {
        let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<&str> = value
            .as_mapping()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(json!(5)), Value::Int(5));
        assert_eq!(Value::from(json!(-5)), Value::Int(-5));
        assert_eq!(Value::from(json!(2.5)), Value::Float(2.5));
    }

    #[test]
    fn test_tuple_serializes_as_array() {
        let value = Value::sequence([
            Value::tuple([Value::from("a"), Value::Int(1)]),
            Value::tuple([Value::from("b"), Value::Int(2)]),
        ]);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"[["a",1],["b",2]]"#
        );
    }

    #[test]
    fn test_tuple_differs_from_sequence() {
        assert_ne!(
            Value::tuple([Value::Int(1)]),
            Value::sequence([Value::Int(1)])
        );
    }

    #[test]
    fn test_get_path() {
        let value = Value::from(json!({"model": {"layers": 4}}));
        assert_eq!(value.get_path(&["model", "layers"]), Some(&Value::Int(4)));
        assert_eq!(value.get_path(&["model", "width"]), None);
        assert_eq!(value.get_path(&[]), Some(&value));
    }

    #[test]
    fn test_into_items() {
        let items = Value::tuple([Value::Int(1), Value::Int(2)]).into_items();
        assert_eq!(items, Ok(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(Value::from("x").into_items(), Err(Value::from("x")));
    }
}
