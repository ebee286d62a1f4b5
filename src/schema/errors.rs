//! Error types following the MODEL.md taxonomy
//!
//! Fatal error codes:
//! - MODEL_CONFIGURATION (schema declaration time)
//! - MODEL_DESERIALIZATION (instance construction time)
//! - MODEL_DUPLICATE_KEY (serialization time)
//! - MODEL_UNKNOWN_FIELD (instance access)
//!
//! Validation violations are not errors (M3): they travel as ordered
//! message lists and are never thrown.

use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Fatal model errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Malformed schema declaration, rejected at build time (M1)
    #[error("schema '{schema}' is misconfigured: {reason}")]
    Configuration { schema: String, reason: String },

    /// A field deserializer rejected its input (M2)
    #[error("field '{field}' failed to deserialize: {reason}")]
    Deserialization { field: String, reason: String },

    /// Two map keys coerced to the same string during serialization (M5)
    #[error("duplicate key '{key}' after string coercion")]
    DuplicateKey { key: String },

    /// Access to a field the schema does not declare
    #[error("schema '{schema}' has no field '{field}'")]
    UnknownField { schema: String, field: String },
}

impl ModelError {
    /// Create a configuration error
    pub fn configuration(schema: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::Configuration {
            schema: schema.into(),
            reason: reason.into(),
        }
    }

    /// Create a deserialization error
    pub fn deserialization(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::Deserialization {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate key error
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        ModelError::DuplicateKey { key: key.into() }
    }

    /// Create an unknown field error
    pub fn unknown_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        ModelError::UnknownField {
            schema: schema.into(),
            field: field.into(),
        }
    }

    /// Returns the stable error code per MODEL.md
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::Configuration { .. } => "MODEL_CONFIGURATION",
            ModelError::Deserialization { .. } => "MODEL_DESERIALIZATION",
            ModelError::DuplicateKey { .. } => "MODEL_DUPLICATE_KEY",
            ModelError::UnknownField { .. } => "MODEL_UNKNOWN_FIELD",
        }
    }
}
