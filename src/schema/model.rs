//! Schema handle per MODEL.md
//!
//! A `ModelSchema` is an immutable, ordered field table behind an
//! `Arc`: cloning is cheap, sharing across threads needs no
//! synchronization, and two handles are the same schema exactly when
//! they share the table (M1). Nested targets hold their child schemas
//! directly; there is no process-wide registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::hydrate::hydrate;
use crate::validate::ErrorLog;
use crate::value::Value;

use super::builder::ModelBuilder;
use super::descriptor::FieldDescriptor;
use super::errors::ModelResult;
use super::instance::ModelInstance;

struct SchemaInner {
    name: String,
    fields: Vec<(String, FieldDescriptor)>,
    index: HashMap<String, usize>,
}

/// Immutable schema handle, cheap to clone and share.
#[derive(Clone)]
pub struct ModelSchema {
    inner: Arc<SchemaInner>,
}

impl ModelSchema {
    /// Starts a schema declaration.
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder::new(name)
    }

    pub(crate) fn from_parts(name: String, fields: Vec<(String, FieldDescriptor)>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(position, (field, _))| (field.clone(), position))
            .collect();
        Self {
            inner: Arc::new(SchemaInner {
                name,
                fields,
                index,
            }),
        }
    }

    /// Returns the schema name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the number of declared fields.
    pub fn field_count(&self) -> usize {
        self.inner.fields.len()
    }

    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the descriptor for a field.
    pub fn descriptor(&self, field: &str) -> Option<&FieldDescriptor> {
        self.position(field)
            .map(|position| &self.inner.fields[position].1)
    }

    /// Returns true when both handles share one field table.
    pub fn same_schema(&self, other: &ModelSchema) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Builds an instance from raw input.
    ///
    /// Never fails for missing or ill-typed values (M2); the only
    /// error is a field deserializer rejecting its input.
    pub fn instantiate(&self, raw: impl Into<Value>) -> ModelResult<ModelInstance> {
        hydrate(self, raw.into())
    }

    /// Builds and validates an instance without throwing.
    ///
    /// Deserializer failures and validation messages both land in the
    /// `ErrorLog`; `Ok` means the instance validated cleanly.
    pub fn try_new(&self, raw: impl Into<Value>) -> Result<ModelInstance, ErrorLog> {
        let instance = match hydrate(self, raw.into()) {
            Ok(instance) => instance,
            Err(err) => return Err(ErrorLog::from_error(self.name(), &err)),
        };

        let messages = instance.validate();
        if messages.is_empty() {
            Ok(instance)
        } else {
            Err(ErrorLog::from_messages(self.name(), messages))
        }
    }

    pub(crate) fn fields(&self) -> &[(String, FieldDescriptor)] {
        &self.inner.fields
    }

    pub(crate) fn position(&self, field: &str) -> Option<usize> {
        self.inner.index.get(field).copied()
    }
}

impl fmt::Debug for ModelSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSchema")
            .field("name", &self.inner.name)
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

impl PartialEq for ModelSchema {
    fn eq(&self, other: &Self) -> bool {
        self.same_schema(other)
    }
}

impl Eq for ModelSchema {}
