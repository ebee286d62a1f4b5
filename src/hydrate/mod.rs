//! Instance hydration subsystem
//!
//! Per MODEL.md, construction runs four steps per field in declaration
//! order: supplied value or default, codec decode, nested resolution,
//! check derivation. Only a rejecting deserializer aborts construction
//! (M2); everything else is stored and left for validation to report.

mod hydrator;
mod resolver;

pub(crate) use hydrator::hydrate;
