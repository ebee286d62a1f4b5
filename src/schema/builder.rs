//! Schema assembly with declaration-time validation (M1)
//!
//! All declaration mistakes are rejected here, before any instance
//! exists. Runtime code can therefore assume every schema it sees is
//! well-formed:
//! - no duplicate field names
//! - at least one field
//! - field names are non-empty and carry no path delimiters, so
//!   validation paths and error-log keys parse unambiguously
//! - variant targets carry candidates and a non-empty discriminator key

use std::collections::HashSet;

use super::descriptor::{FieldDescriptor, NestedTarget};
use super::errors::{ModelError, ModelResult};
use super::model::ModelSchema;

/// Assembles a schema field by field; `build` validates the
/// declaration and produces the immutable handle.
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<(String, FieldDescriptor)>,
}

impl ModelBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field; declaration order is preserved and drives
    /// hydration, validation, and serialization order.
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.push((name.into(), descriptor));
        self
    }

    /// Validates the declaration and produces the schema handle.
    pub fn build(self) -> ModelResult<ModelSchema> {
        if self.fields.is_empty() {
            return Err(ModelError::configuration(
                self.name.as_str(),
                "schema declares no fields",
            ));
        }

        let mut seen = HashSet::new();
        for (name, descriptor) in &self.fields {
            if name.is_empty() {
                return Err(ModelError::configuration(
                    self.name.as_str(),
                    "field with an empty name",
                ));
            }
            if name.contains(|c: char| matches!(c, '.' | '[' | ']' | ':')) {
                return Err(ModelError::configuration(
                    self.name.as_str(),
                    format!("field name '{}' contains a path delimiter", name),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(ModelError::configuration(
                    self.name.as_str(),
                    format!("field '{}' declared twice", name),
                ));
            }

            if let NestedTarget::Variant {
                candidates,
                discriminator,
            } = descriptor.nested_target()
            {
                if candidates.is_empty() {
                    return Err(ModelError::configuration(
                        self.name.as_str(),
                        format!("variant field '{}' has no candidate schemas", name),
                    ));
                }
                if discriminator.is_empty() {
                    return Err(ModelError::configuration(
                        self.name.as_str(),
                        format!("variant field '{}' has an empty discriminator key", name),
                    ));
                }
            }
        }

        Ok(ModelSchema::from_parts(self.name, self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child() -> ModelSchema {
        ModelSchema::builder("Child")
            .field("id", FieldDescriptor::required())
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_preserves_declaration_order() {
        let schema = ModelSchema::builder("User")
            .field("zeta", FieldDescriptor::new())
            .field("alpha", FieldDescriptor::new())
            .field("mid", FieldDescriptor::new())
            .build()
            .unwrap();

        let names: Vec<_> = schema.field_names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = ModelSchema::builder("Empty").build().unwrap_err();
        assert_eq!(err.code(), "MODEL_CONFIGURATION");
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = ModelSchema::builder("User")
            .field("name", FieldDescriptor::new())
            .field("name", FieldDescriptor::new())
            .build()
            .unwrap_err();

        assert_eq!(err.code(), "MODEL_CONFIGURATION");
        assert!(format!("{}", err).contains("declared twice"));
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let err = ModelSchema::builder("User")
            .field("", FieldDescriptor::new())
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "MODEL_CONFIGURATION");
    }

    #[test]
    fn test_field_name_with_path_delimiter_rejected() {
        for name in ["a.b", "a[0]", "a:b", "a]b"] {
            let err = ModelSchema::builder("User")
                .field(name, FieldDescriptor::new())
                .build()
                .unwrap_err();
            assert_eq!(err.code(), "MODEL_CONFIGURATION");
            assert!(format!("{}", err).contains("path delimiter"));
        }
    }

    #[test]
    fn test_variant_without_candidates_rejected() {
        let err = ModelSchema::builder("Holder")
            .field("shape", FieldDescriptor::new().nested_variant(vec![], "kind"))
            .build()
            .unwrap_err();

        assert_eq!(err.code(), "MODEL_CONFIGURATION");
        assert!(format!("{}", err).contains("no candidate schemas"));
    }

    #[test]
    fn test_variant_with_empty_discriminator_rejected() {
        let err = ModelSchema::builder("Holder")
            .field(
                "shape",
                FieldDescriptor::new().nested_variant(vec![child()], ""),
            )
            .build()
            .unwrap_err();

        assert!(format!("{}", err).contains("empty discriminator key"));
    }

    #[test]
    fn test_variant_with_candidates_builds() {
        let schema = ModelSchema::builder("Holder")
            .field(
                "shape",
                FieldDescriptor::new().nested_variant(vec![child()], "kind"),
            )
            .build();
        assert!(schema.is_ok());
    }
}
