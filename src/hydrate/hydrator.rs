//! Field-by-field instance construction per MODEL.md
//!
//! Hydration order per field:
//! 1. supplied value; on omission the default (a thunk runs exactly
//!    once, and only here)
//! 2. codec decode on present, non-null values; a rejection is fatal
//! 3. nested resolution
//! 4. check derivation: explicit validators, else the built-in shape
//!    check pinned from the value's kind; nested fields get no check

use std::collections::BTreeMap;

use crate::schema::{
    FieldCheck, FieldDescriptor, ModelError, ModelInstance, ModelResult, ModelSchema, StoredField,
};
use crate::validate::compose;
use crate::value::{Value, ValueKind};

use super::resolver;

pub(crate) fn hydrate(schema: &ModelSchema, raw: Value) -> ModelResult<ModelInstance> {
    let mut supplied = match raw {
        Value::Object(map) => map,
        // reading declared fields off a non-object yields nothing
        _ => BTreeMap::new(),
    };

    let mut fields = Vec::with_capacity(schema.field_count());
    for (name, descriptor) in schema.fields() {
        fields.push(hydrate_field(name, descriptor, supplied.remove(name))?);
    }
    Ok(ModelInstance::new(schema.clone(), fields))
}

fn hydrate_field(
    name: &str,
    descriptor: &FieldDescriptor,
    supplied: Option<Value>,
) -> ModelResult<StoredField> {
    let value = match supplied {
        Some(value) => Some(value),
        None => descriptor.default_value(),
    };

    let value = match (descriptor.codec(), value) {
        (Some(codec), Some(value)) if !value.is_null() => Some(
            codec
                .decode(&value)
                .map_err(|reason| ModelError::deserialization(name, reason))?,
        ),
        (_, value) => value,
    };

    let value = resolver::resolve(value, descriptor.nested_target())?;
    let check = derive_check(descriptor, value.as_ref());
    Ok(StoredField { value, check })
}

/// Shape checks pin only the JSON-shaped kinds; richer kinds and
/// missing or null values carry no built-in check.
fn derive_check(descriptor: &FieldDescriptor, value: Option<&Value>) -> FieldCheck {
    if descriptor.has_validators() {
        return FieldCheck::Composed(compose(descriptor.validators()));
    }
    if !descriptor.nested_target().is_none() {
        return FieldCheck::None;
    }
    match value.map(Value::kind) {
        Some(
            kind @ (ValueKind::Bool
            | ValueKind::Number
            | ValueKind::String
            | ValueKind::Array
            | ValueKind::Object),
        ) => FieldCheck::Shape(kind),
        _ => FieldCheck::None,
    }
}
