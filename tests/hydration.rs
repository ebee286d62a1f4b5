//! Hydration Invariant Tests
//!
//! Construction is total over bad data: defaults apply on omission,
//! thunks run exactly once per construction, codecs decode present
//! non-null values, and the only construction-time failure is a
//! rejecting deserializer.

use modelkit::{Codec, FieldDescriptor, ModelSchema, Value};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// =============================================================================
// Helper Functions
// =============================================================================

fn user_schema() -> ModelSchema {
    ModelSchema::builder("User")
        .field("name", FieldDescriptor::required())
        .field("role", FieldDescriptor::new().with_default("member"))
        .field("age", FieldDescriptor::new())
        .build()
        .unwrap()
}

fn counting_default() -> (Arc<AtomicUsize>, ModelSchema) {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = counter.clone();
    let schema = ModelSchema::builder("Ticket")
        .field(
            "serial",
            FieldDescriptor::new().with_default_fn(move || {
                Value::from(seen.fetch_add(1, Ordering::SeqCst) as i64)
            }),
        )
        .build()
        .unwrap();
    (counter, schema)
}

// =============================================================================
// Default Application Tests
// =============================================================================

/// A supplied value always wins over the declared default.
#[test]
fn test_supplied_value_beats_default() {
    let schema = user_schema();
    let instance = schema
        .instantiate(json!({ "name": "Ada", "role": "admin" }))
        .unwrap();
    assert_eq!(instance.get("role"), Some(&Value::from("admin")));
}

/// An omitted field picks up its default.
#[test]
fn test_omitted_field_gets_default() {
    let schema = user_schema();
    let instance = schema.instantiate(json!({ "name": "Ada" })).unwrap();
    assert_eq!(instance.get("role"), Some(&Value::from("member")));
}

/// An explicit null is a present value and suppresses the default.
#[test]
fn test_explicit_null_suppresses_default() {
    let schema = user_schema();
    let instance = schema
        .instantiate(json!({ "name": "Ada", "role": null }))
        .unwrap();
    assert_eq!(instance.get("role"), Some(&Value::Null));
}

/// A default thunk runs exactly once per construction that omits the
/// field, and never when the field is supplied.
#[test]
fn test_thunk_runs_once_per_construction() {
    let (counter, schema) = counting_default();

    let first = schema.instantiate(json!({})).unwrap();
    let second = schema.instantiate(json!({})).unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert_eq!(first.get("serial"), Some(&Value::from(0i64)));
    assert_eq!(second.get("serial"), Some(&Value::from(1i64)));

    schema.instantiate(json!({ "serial": 99 })).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Codec Tests
// =============================================================================

fn cents_codec() -> Codec {
    Codec::new(
        "cents",
        |value: &Value| match value.as_i64() {
            Some(cents) => Value::from(format!("{}.{:02}", cents / 100, (cents % 100).abs())),
            None => value.clone(),
        },
        |value: &Value| match value.as_str() {
            Some(s) => s
                .replace('.', "")
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("invalid decimal literal '{}'", s)),
            None => Err(format!("expected string, got {}", value.kind())),
        },
    )
}

fn price_schema() -> ModelSchema {
    ModelSchema::builder("Price")
        .field("amount", FieldDescriptor::new().with_codec(cents_codec()))
        .build()
        .unwrap()
}

/// A codec decodes raw input into the in-memory form.
#[test]
fn test_codec_decodes_on_construction() {
    let schema = price_schema();
    let instance = schema.instantiate(json!({ "amount": "12.34" })).unwrap();
    assert_eq!(instance.get("amount"), Some(&Value::from(1234i64)));
}

/// A rejecting decoder is the one fatal construction failure.
#[test]
fn test_codec_rejection_is_fatal() {
    let schema = price_schema();
    let err = schema
        .instantiate(json!({ "amount": "not money" }))
        .unwrap_err();
    assert_eq!(err.code(), "MODEL_DESERIALIZATION");
    assert!(format!("{}", err).contains("amount"));
}

/// Missing and null values never reach the decoder.
#[test]
fn test_codec_skips_missing_and_null() {
    let schema = price_schema();
    assert!(schema.instantiate(json!({})).is_ok());
    assert!(schema.instantiate(json!({ "amount": null })).is_ok());
}

/// Encode and decode stay inverse through a full construction cycle.
#[test]
fn test_codec_round_trips_through_to_json() {
    let schema = price_schema();
    let instance = schema.instantiate(json!({ "amount": "12.34" })).unwrap();
    assert_eq!(instance.to_json().unwrap(), json!({ "amount": "12.34" }));
}

// =============================================================================
// Setter Tests
// =============================================================================

/// Setters overwrite values; the check pinned at construction stays.
#[test]
fn test_setter_overwrites_value() {
    let schema = user_schema();
    let mut instance = schema.instantiate(json!({ "name": "Ada" })).unwrap();

    instance.set("age", 36i64).unwrap();
    assert_eq!(instance.get("age"), Some(&Value::from(36i64)));

    instance.clear("age").unwrap();
    assert!(!instance.is_set("age"));
}

/// A kind drift introduced through a setter trips the pinned check.
#[test]
fn test_setter_drift_caught_by_validate() {
    let schema = user_schema();
    let mut instance = schema
        .instantiate(json!({ "name": "Ada", "age": 36 }))
        .unwrap();
    assert!(instance.validate().is_empty());

    instance.set("age", "thirty-six").unwrap();
    assert_eq!(
        instance.validate(),
        vec!["age: expected number, got string"]
    );
}

/// Writing to an undeclared field fails with a stable code.
#[test]
fn test_unknown_field_rejected() {
    let schema = user_schema();
    let mut instance = schema.instantiate(json!({ "name": "Ada" })).unwrap();

    let err = instance.set("nickname", "ada").unwrap_err();
    assert_eq!(err.code(), "MODEL_UNKNOWN_FIELD");
}

// =============================================================================
// Input Shape Tests
// =============================================================================

/// Undeclared keys on raw input are dropped silently.
#[test]
fn test_undeclared_keys_ignored() {
    let schema = user_schema();
    let instance = schema
        .instantiate(json!({ "name": "Ada", "stray": true }))
        .unwrap();
    assert_eq!(instance.get("stray"), None);
}

/// Non-object raw input reads as empty; defaults still apply and
/// validation reports what is missing.
#[test]
fn test_non_object_input_reads_as_empty() {
    let schema = user_schema();
    let instance = schema.instantiate(json!(42)).unwrap();
    assert_eq!(instance.get("role"), Some(&Value::from("member")));
    assert_eq!(instance.validate(), vec!["name: is required"]);
}
