//! JSON serialization per MODEL.md (M5)
//!
//! Rendering walks fields in declaration order; normalization then
//! rewrites beyond-JSON values into their wire form. The single
//! failure mode is two distinct map keys coercing to one string.

mod json;

pub(crate) use json::to_json;
