//! Runtime value tree per MODEL.md
//!
//! Supported kinds:
//! - null: explicit empty value (distinct from a missing value)
//! - bool, number, string: JSON-native primitives
//! - bigint: integers beyond JSON number range
//! - timestamp: UTC point in time
//! - array: ordered sequence
//! - object: plain keyed object
//! - map: keyed collection with non-string keys, insertion-ordered
//! - instance: hydrated child schema instance
//!
//! A missing value is represented outside the tree as `Option::None`;
//! `Value::Null` is always a present value.

use chrono::{DateTime, Utc};
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;

use crate::schema::ModelInstance;

/// A runtime value held by an instance field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit empty value
    Null,
    /// Boolean
    Bool(bool),
    /// JSON-native number (integer or float)
    Number(Number),
    /// Integer beyond JSON number range; serializes as a decimal string
    BigInt(i128),
    /// UTF-8 string
    String(String),
    /// UTC point in time; serializes as an RFC 3339 string
    Timestamp(DateTime<Utc>),
    /// Ordered sequence
    Array(Vec<Value>),
    /// Plain keyed object
    Object(BTreeMap<String, Value>),
    /// Keyed collection with non-string keys; serializes with
    /// string-coerced keys (M5)
    Map(Vec<(MapKey, Value)>),
    /// Hydrated child schema instance (M4)
    Instance(ModelInstance),
}

impl Value {
    /// Returns the runtime kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::String(_) => ValueKind::String,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Map(_) => ValueKind::Map,
            Value::Instance(_) => ValueKind::Instance,
        }
    }

    /// Returns true for `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the string content if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean content if this is a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer content if this is an integer-valued number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the numeric content as a float if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a plain object.
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Short rendering for error messages: primitives print their
    /// content, containers print their kind.
    pub fn preview(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::BigInt(i) => i.to_string(),
            Value::String(s) => format!("\"{}\"", s),
            Value::Timestamp(t) => t.to_rfc3339(),
            Value::Array(_) => "array".to_string(),
            Value::Object(_) => "object".to_string(),
            Value::Map(_) => "map".to_string(),
            Value::Instance(instance) => format!("{} instance", instance.schema().name()),
        }
    }
}

/// Runtime kind of a value, used by shape checks and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    BigInt,
    String,
    Timestamp,
    Array,
    Object,
    Map,
    Instance,
}

impl ValueKind {
    /// Returns the kind name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::BigInt => "bigint",
            ValueKind::String => "string",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Map => "map",
            ValueKind::Instance => "instance",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Key of a map-like collection.
///
/// Keys coerce to strings when a map renders as a JSON object; two
/// distinct keys coercing to the same string is a serialization error
/// (M5).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    String(String),
    Int(i64),
    Bool(bool),
}

impl MapKey {
    /// Returns the string form used in JSON output.
    pub fn coerce(&self) -> String {
        match self {
            MapKey::String(s) => s.clone(),
            MapKey::Int(i) => i.to_string(),
            MapKey::Bool(b) => b.to_string(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Number(Number::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        // NaN and infinities have no JSON form and fall back to null
        Number::from_f64(f).map_or(Value::Null, Value::Number)
    }
}

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        Value::BigInt(i)
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

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<ModelInstance> for Value {
    fn from(instance: ModelInstance) -> Self {
        Value::Instance(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Null.kind().name(), "null");
        assert_eq!(Value::Bool(true).kind().name(), "bool");
        assert_eq!(Value::from(1i64).kind().name(), "number");
        assert_eq!(Value::BigInt(1).kind().name(), "bigint");
        assert_eq!(Value::from("x").kind().name(), "string");
        assert_eq!(Value::Array(vec![]).kind().name(), "array");
        assert_eq!(Value::Object(BTreeMap::new()).kind().name(), "object");
        assert_eq!(Value::Map(vec![]).kind().name(), "map");
    }

    #[test]
    fn test_from_json_recurses() {
        let value = Value::from(json!({
            "name": "Ada",
            "tags": ["a", "b"],
            "meta": { "depth": 2 }
        }));

        let map = value.as_object().unwrap();
        assert_eq!(map["name"], Value::from("Ada"));
        assert_eq!(
            map["tags"],
            Value::Array(vec![Value::from("a"), Value::from("b")])
        );
        let meta = map["meta"].as_object().unwrap();
        assert_eq!(meta["depth"].as_i64(), Some(2));
    }

    #[test]
    fn test_null_is_present() {
        let value = Value::from(json!(null));
        assert!(value.is_null());
        assert_eq!(value.kind(), ValueKind::Null);
    }

    #[test]
    fn test_map_key_coercion() {
        assert_eq!(MapKey::String("a".into()).coerce(), "a");
        assert_eq!(MapKey::Int(42).coerce(), "42");
        assert_eq!(MapKey::Int(-7).coerce(), "-7");
        assert_eq!(MapKey::Bool(true).coerce(), "true");
    }

    #[test]
    fn test_int_and_string_keys_collide_after_coercion() {
        assert_eq!(MapKey::Int(1).coerce(), MapKey::String("1".into()).coerce());
    }

    #[test]
    fn test_preview_quotes_strings() {
        assert_eq!(Value::from("x").preview(), "\"x\"");
        assert_eq!(Value::from(5i64).preview(), "5");
        assert_eq!(Value::BigInt(-9).preview(), "-9");
        assert_eq!(Value::Array(vec![]).preview(), "array");
    }

    #[test]
    fn test_nan_has_no_json_form() {
        assert!(Value::from(f64::NAN).is_null());
        assert_eq!(Value::from(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn test_accessors_are_strict() {
        assert_eq!(Value::from("5").as_i64(), None);
        assert_eq!(Value::from(5i64).as_str(), None);
        assert_eq!(Value::BigInt(5).as_i64(), None);
    }
}
