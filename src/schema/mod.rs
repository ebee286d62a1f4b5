//! Schema subsystem for modelkit
//!
//! Per MODEL.md, schemas are immutable, declaration-ordered field
//! tables built once and shared by handle.
//!
//! # Design Principles
//!
//! - Declaration mistakes fail at build time (M1)
//! - Construction is total over bad data (M2)
//! - Validation messages are data, never exceptions (M3)
//! - Nested fields hold instances or nothing (M4)
//! - No process-wide registry; nested targets hold their child schemas

mod builder;
mod descriptor;
mod errors;
mod instance;
mod model;

pub use builder::ModelBuilder;
pub use descriptor::{Codec, FieldDescriptor, NestedTarget, Predicate};
pub use errors::{ModelError, ModelResult};
pub use instance::ModelInstance;
pub use model::ModelSchema;

pub(crate) use instance::{FieldCheck, StoredField};
