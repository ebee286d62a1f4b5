//! modelkit - declarative data models
//!
//! A schema describes an object's fields once: defaults, validators,
//! wire codecs, nested and polymorphic children. Instances hydrate
//! from raw JSON-shaped input, report violations as ordered data, and
//! serialize back to a JSON-compatible tree.
//!
//! ```
//! use modelkit::{FieldDescriptor, ModelSchema};
//! use modelkit::validate::at_least;
//! use serde_json::json;
//!
//! let schema = ModelSchema::builder("User")
//!     .field("name", FieldDescriptor::required())
//!     .field("age", FieldDescriptor::new().with_validator(at_least(0.0)))
//!     .build()
//!     .unwrap();
//!
//! let user = schema.try_new(json!({ "name": "Ada", "age": 36 })).unwrap();
//! assert_eq!(user.to_json().unwrap(), json!({ "name": "Ada", "age": 36 }));
//! ```

pub mod observe;
pub mod schema;
pub mod validate;
pub mod value;

mod hydrate;
mod serialize;

pub use schema::{
    Codec, FieldDescriptor, ModelBuilder, ModelError, ModelInstance, ModelResult, ModelSchema,
    NestedTarget, Predicate,
};
pub use validate::{ErrorLog, ValidateConfig};
pub use value::{MapKey, Value, ValueKind};
