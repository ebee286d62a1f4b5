//! Instance rendering and value normalization
//!
//! Per field: missing values are omitted, nested instances render
//! through their own `to_json`, a codec's `encode` applies to non-null
//! values, everything else passes as stored. Normalization then maps
//! the rendered tree onto JSON:
//! - bigint → decimal string
//! - timestamp → RFC 3339 string
//! - map → plain object with string-coerced keys (collision is fatal)
//! - instance mid-tree → its own `to_json`

use serde_json::Map;

use crate::schema::{FieldDescriptor, ModelError, ModelInstance, ModelResult};
use crate::value::Value;

pub(crate) fn to_json(instance: &ModelInstance) -> ModelResult<serde_json::Value> {
    let mut output = Map::new();
    for ((name, descriptor), stored) in instance.schema().fields().iter().zip(instance.stored()) {
        let value = match &stored.value {
            None => continue,
            Some(value) => value,
        };
        output.insert(name.clone(), render(descriptor, value)?);
    }
    Ok(serde_json::Value::Object(output))
}

fn render(descriptor: &FieldDescriptor, value: &Value) -> ModelResult<serde_json::Value> {
    if !descriptor.nested_target().is_none() {
        // nested values normalize through their instances' own to_json
        return normalize(value);
    }
    match descriptor.codec() {
        Some(codec) if !value.is_null() => normalize(&codec.encode(value)),
        _ => normalize(value),
    }
}

fn normalize(value: &Value) -> ModelResult<serde_json::Value> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => Ok(serde_json::Value::Number(n.clone())),
        Value::BigInt(i) => Ok(serde_json::Value::String(i.to_string())),
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Timestamp(t) => Ok(serde_json::Value::String(t.to_rfc3339())),
        Value::Array(items) => {
            let normalized = items
                .iter()
                .map(normalize)
                .collect::<ModelResult<Vec<_>>>()?;
            Ok(serde_json::Value::Array(normalized))
        }
        Value::Object(map) => {
            let mut output = Map::new();
            for (key, value) in map {
                output.insert(key.clone(), normalize(value)?);
            }
            Ok(serde_json::Value::Object(output))
        }
        Value::Map(entries) => {
            let mut output = Map::new();
            for (key, value) in entries {
                let coerced = key.coerce();
                if output.contains_key(&coerced) {
                    return Err(ModelError::duplicate_key(coerced));
                }
                output.insert(coerced, normalize(value)?);
            }
            Ok(serde_json::Value::Object(output))
        }
        Value::Instance(child) => to_json(child),
    }
}
