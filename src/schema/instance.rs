//! Instance storage per MODEL.md
//!
//! An instance owns one stored field per schema field, index-aligned
//! with the declaration order. Each stored field carries the value (or
//! its absence) and the check resolved at hydration. Setters overwrite
//! the value only; the pinned check stays, so a kind drift introduced
//! after construction is caught by the next `validate()` (M3).

use std::fmt;

use crate::serialize;
use crate::validate::{self, ValidateConfig};
use crate::value::{Value, ValueKind};

use super::descriptor::Predicate;
use super::errors::{ModelError, ModelResult};
use super::model::ModelSchema;

/// Field-local check resolved at hydration.
#[derive(Clone)]
pub(crate) enum FieldCheck {
    /// No check; nested correctness comes from recursive validation
    None,
    /// Explicit validators, composed with short-circuit
    Composed(Predicate),
    /// Built-in shape check pinned from the hydrated value's kind
    Shape(ValueKind),
}

impl fmt::Debug for FieldCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldCheck::None => write!(f, "None"),
            FieldCheck::Composed(_) => write!(f, "Composed"),
            FieldCheck::Shape(kind) => f.debug_tuple("Shape").field(kind).finish(),
        }
    }
}

/// One stored field: value plus resolved check.
#[derive(Debug, Clone)]
pub(crate) struct StoredField {
    pub(crate) value: Option<Value>,
    pub(crate) check: FieldCheck,
}

/// A hydrated instance of a schema.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    schema: ModelSchema,
    fields: Vec<StoredField>,
}

impl ModelInstance {
    pub(crate) fn new(schema: ModelSchema, fields: Vec<StoredField>) -> Self {
        Self { schema, fields }
    }

    /// Returns the schema this instance was hydrated from.
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Returns the stored value for a field; `None` means the field is
    /// unset or unknown.
    pub fn get(&self, field: &str) -> Option<&Value> {
        let position = self.schema.position(field)?;
        self.fields[position].value.as_ref()
    }

    /// Returns true when the field holds a value (`null` counts as a
    /// value).
    pub fn is_set(&self, field: &str) -> bool {
        self.schema
            .position(field)
            .map_or(false, |position| self.fields[position].value.is_some())
    }

    /// Overwrites a field value. The check resolved at hydration is
    /// kept, so drifted values are reported by the next `validate()`.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> ModelResult<()> {
        let position = self
            .schema
            .position(field)
            .ok_or_else(|| ModelError::unknown_field(self.schema.name(), field))?;
        self.fields[position].value = Some(value.into());
        Ok(())
    }

    /// Clears a field back to the unset state.
    pub fn clear(&mut self, field: &str) -> ModelResult<()> {
        let position = self
            .schema
            .position(field)
            .ok_or_else(|| ModelError::unknown_field(self.schema.name(), field))?;
        self.fields[position].value = None;
        Ok(())
    }

    /// Collects every violation in declaration order (M3).
    pub fn validate(&self) -> Vec<String> {
        validate::collect(self, &ValidateConfig::default())
    }

    /// Collects violations, bounded by the config's `max_errors`.
    pub fn validate_with(&self, config: &ValidateConfig) -> Vec<String> {
        validate::collect(self, config)
    }

    /// Renders the instance as a JSON value (M5).
    pub fn to_json(&self) -> ModelResult<serde_json::Value> {
        serialize::to_json(self)
    }

    /// Iterates fields in declaration order with their stored values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> + '_ {
        self.schema
            .fields()
            .iter()
            .zip(&self.fields)
            .map(|((name, _), stored)| (name.as_str(), stored.value.as_ref()))
    }

    pub(crate) fn stored(&self) -> &[StoredField] {
        &self.fields
    }

    /// Present stored values as a plain object; used when a foreign
    /// instance contributes its fields to another schema.
    pub(crate) fn shallow_object(&self) -> Value {
        let map = self
            .iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v.clone())))
            .collect();
        Value::Object(map)
    }
}

/// Instances are equal when they share a schema and store equal
/// values; resolved checks are derived state and do not participate.
impl PartialEq for ModelInstance {
    fn eq(&self, other: &Self) -> bool {
        self.schema.same_schema(&other.schema)
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.value == b.value)
    }
}
