//! Nested value resolution per MODEL.md (M4)
//!
//! Variant selection precedence, first match wins:
//! 1. value already an instance of a candidate: kept as-is
//! 2. discriminator key pinned by a candidate to the same literal
//! 3. widest field-name overlap; ties keep declaration order
//! 4. first declared candidate

use std::collections::BTreeMap;

use crate::schema::{FieldDescriptor, ModelResult, ModelSchema, NestedTarget};
use crate::value::Value;

use super::hydrator::hydrate;

pub(crate) fn resolve(value: Option<Value>, target: &NestedTarget) -> ModelResult<Option<Value>> {
    let value = match value {
        None => return Ok(None),
        Some(Value::Null) => return Ok(Some(Value::Null)),
        Some(value) => value,
    };

    match target {
        NestedTarget::None => Ok(Some(value)),
        NestedTarget::Scalar(schema) => resolve_scalar(value, schema).map(Some),
        NestedTarget::Array(schema) => {
            let items = match value {
                Value::Array(items) => items,
                // scalar input wraps into a one-element sequence;
                // arrays are never wrapped again
                single => vec![single],
            };
            let resolved = items
                .into_iter()
                .map(|item| resolve_element(item, schema))
                .collect::<ModelResult<Vec<_>>>()?;
            Ok(Some(Value::Array(resolved)))
        }
        NestedTarget::Variant {
            candidates,
            discriminator,
        } => {
            let candidate = select_candidate(&value, candidates, discriminator);
            resolve_scalar(value, candidate).map(Some)
        }
    }
}

fn resolve_element(item: Value, schema: &ModelSchema) -> ModelResult<Value> {
    if item.is_null() {
        Ok(Value::Null)
    } else {
        resolve_scalar(item, schema)
    }
}

fn resolve_scalar(value: Value, schema: &ModelSchema) -> ModelResult<Value> {
    match value {
        Value::Instance(instance) if instance.schema().same_schema(schema) => {
            Ok(Value::Instance(instance))
        }
        // a foreign instance contributes its stored values and is
        // hydrated afresh against the target
        Value::Instance(foreign) => hydrate(schema, foreign.shallow_object()).map(Value::Instance),
        value @ Value::Object(_) => hydrate(schema, value).map(Value::Instance),
        // any other shape hydrates from nothing; the child reports its
        // own missing fields under the parent's prefix
        _ => hydrate(schema, Value::Object(BTreeMap::new())).map(Value::Instance),
    }
}

fn select_candidate<'a>(
    value: &Value,
    candidates: &'a [ModelSchema],
    discriminator: &str,
) -> &'a ModelSchema {
    // the builder rejects empty candidate sets (M1)
    if let Value::Instance(instance) = value {
        for candidate in candidates {
            if instance.schema().same_schema(candidate) {
                return candidate;
            }
        }
    }

    if let Value::Object(map) = value {
        if let Some(tag) = map.get(discriminator) {
            for candidate in candidates {
                let pinned = candidate
                    .descriptor(discriminator)
                    .and_then(FieldDescriptor::pinned);
                if pinned == Some(tag) {
                    return candidate;
                }
            }
        }

        let mut best = &candidates[0];
        let mut best_overlap = overlap(best, map);
        for candidate in &candidates[1..] {
            let count = overlap(candidate, map);
            if count > best_overlap {
                best = candidate;
                best_overlap = count;
            }
        }
        return best;
    }

    // no usable signal
    &candidates[0]
}

fn overlap(candidate: &ModelSchema, map: &BTreeMap<String, Value>) -> usize {
    candidate
        .field_names()
        .filter(|name| map.contains_key(*name))
        .count()
}
