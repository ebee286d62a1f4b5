//! Field descriptor definitions per MODEL.md
//!
//! A descriptor declares everything the runtime needs for one field:
//! - default: fixed value or thunk, applied when input omits the field
//! - validators: ordered predicates, composed with short-circuit
//! - codec: named encode/decode pair crossing the wire boundary
//! - nested: child schema target (scalar, array, or variant)
//! - required: a missing value is reported by validation, never thrown
//! - pinned literal: fixed constant that doubles as the variant tag

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

use super::model::ModelSchema;

/// Validation predicate: `Ok` accepts the value, `Err` carries the
/// rejection message.
pub type Predicate = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Default source for a field omitted from raw input.
#[derive(Clone)]
pub(crate) enum DefaultSource {
    /// Fixed value, cloned per construction
    Fixed(Value),
    /// Thunk, invoked once per construction and only on omission
    Thunk(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultSource {
    pub(crate) fn produce(&self) -> Value {
        match self {
            DefaultSource::Fixed(value) => value.clone(),
            DefaultSource::Thunk(thunk) => thunk(),
        }
    }
}

impl fmt::Debug for DefaultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultSource::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            DefaultSource::Thunk(_) => write!(f, "Thunk"),
        }
    }
}

/// Named wire codec for one field.
///
/// `decode` parses raw input during construction and may reject it;
/// `encode` renders the in-memory value for JSON output and cannot
/// fail. Naming the pair keeps the inverse contract testable in
/// isolation.
#[derive(Clone)]
pub struct Codec {
    name: String,
    encode: Arc<dyn Fn(&Value) -> Value + Send + Sync>,
    decode: Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>,
}

impl Codec {
    /// Creates a codec from an encode/decode pair.
    pub fn new<E, D>(name: impl Into<String>, encode: E, decode: D) -> Self
    where
        E: Fn(&Value) -> Value + Send + Sync + 'static,
        D: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            encode: Arc::new(encode),
            decode: Arc::new(decode),
        }
    }

    /// Returns the codec name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders an in-memory value for output.
    pub fn encode(&self, value: &Value) -> Value {
        (self.encode)(value)
    }

    /// Parses a raw value; an `Err` aborts construction (M2).
    pub fn decode(&self, value: &Value) -> Result<Value, String> {
        (self.decode)(value)
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Codec").field(&self.name).finish()
    }
}

/// Nested child target for a field.
#[derive(Debug, Clone)]
pub enum NestedTarget {
    /// Plain value, no child schema
    None,
    /// Single child instance
    Scalar(ModelSchema),
    /// Homogeneous sequence of child instances
    Array(ModelSchema),
    /// One of several candidate schemas, selected per value
    Variant {
        /// Candidate schemas in declaration order
        candidates: Vec<ModelSchema>,
        /// Raw key consulted for tag-based selection
        discriminator: String,
    },
}

impl NestedTarget {
    /// Returns true when the field holds plain values.
    pub fn is_none(&self) -> bool {
        matches!(self, NestedTarget::None)
    }
}

/// Immutable metadata for one schema field.
#[derive(Clone)]
pub struct FieldDescriptor {
    default: Option<DefaultSource>,
    validators: Vec<Predicate>,
    codec: Option<Codec>,
    nested: NestedTarget,
    required: bool,
    literal: Option<Value>,
}

impl FieldDescriptor {
    /// Creates an optional field with no default, checks, or children.
    pub fn new() -> Self {
        Self {
            default: None,
            validators: Vec::new(),
            codec: None,
            nested: NestedTarget::None,
            required: false,
            literal: None,
        }
    }

    /// Creates a field whose absence is a validation failure.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::new()
        }
    }

    /// Creates a field pinned to a constant value.
    ///
    /// The constant becomes the field's default and its equality check,
    /// and marks the field as a variant tag for discriminator matching.
    pub fn literal(value: impl Into<Value>) -> Self {
        let pinned: Value = value.into();
        let expected = pinned.clone();
        let mut descriptor = Self::new().with_default(pinned.clone()).with_validator(
            move |value: &Value| {
                if *value == expected {
                    Ok(())
                } else {
                    Err(format!("must equal {}", expected.preview()))
                }
            },
        );
        descriptor.literal = Some(pinned);
        descriptor
    }

    /// Sets a fixed default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultSource::Fixed(value.into()));
        self
    }

    /// Sets a default thunk, invoked once per construction when the
    /// field is omitted.
    pub fn with_default_fn<F>(mut self, thunk: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultSource::Thunk(Arc::new(thunk)));
        self
    }

    /// Appends a validation predicate; predicates run in declaration
    /// order and short-circuit on the first failure.
    pub fn with_validator<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(check));
        self
    }

    /// Attaches a wire codec.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Declares a single nested child schema.
    pub fn nested(mut self, target: ModelSchema) -> Self {
        self.nested = NestedTarget::Scalar(target);
        self
    }

    /// Declares a nested array of child instances.
    pub fn nested_array(mut self, target: ModelSchema) -> Self {
        self.nested = NestedTarget::Array(target);
        self
    }

    /// Declares a discriminated set of candidate schemas.
    pub fn nested_variant(
        mut self,
        candidates: Vec<ModelSchema>,
        discriminator: impl Into<String>,
    ) -> Self {
        self.nested = NestedTarget::Variant {
            candidates,
            discriminator: discriminator.into(),
        };
        self
    }

    /// Returns true when the field declares a default.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns the default when it is a fixed value (thunks stay
    /// opaque; they only run during construction).
    pub fn default_literal(&self) -> Option<&Value> {
        match &self.default {
            Some(DefaultSource::Fixed(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns true when explicit validators are declared.
    pub fn has_validators(&self) -> bool {
        !self.validators.is_empty()
    }

    /// Returns the wire codec, if any.
    pub fn codec(&self) -> Option<&Codec> {
        self.codec.as_ref()
    }

    /// Returns the nested child target.
    pub fn nested_target(&self) -> &NestedTarget {
        &self.nested
    }

    /// Returns true when a missing value is a validation failure.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the pinned constant for literal fields.
    pub fn pinned(&self) -> Option<&Value> {
        self.literal.as_ref()
    }

    pub(crate) fn validators(&self) -> &[Predicate] {
        &self.validators
    }

    pub(crate) fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(DefaultSource::produce)
    }
}

impl Default for FieldDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("required", &self.required)
            .field("default", &self.default)
            .field("validators", &self.validators.len())
            .field("codec", &self.codec)
            .field("nested", &self.nested)
            .field("literal", &self.literal)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_is_bare() {
        let descriptor = FieldDescriptor::new();
        assert!(!descriptor.is_required());
        assert!(!descriptor.has_default());
        assert!(!descriptor.has_validators());
        assert!(descriptor.codec().is_none());
        assert!(descriptor.nested_target().is_none());
        assert!(descriptor.pinned().is_none());
    }

    #[test]
    fn test_required_field() {
        assert!(FieldDescriptor::required().is_required());
    }

    #[test]
    fn test_fixed_default_is_readable() {
        let descriptor = FieldDescriptor::new().with_default("member");
        assert!(descriptor.has_default());
        assert_eq!(descriptor.default_literal(), Some(&Value::from("member")));
    }

    #[test]
    fn test_thunk_default_stays_opaque() {
        let descriptor = FieldDescriptor::new().with_default_fn(|| Value::from(1i64));
        assert!(descriptor.has_default());
        assert_eq!(descriptor.default_literal(), None);
        assert_eq!(descriptor.default_value(), Some(Value::from(1i64)));
    }

    #[test]
    fn test_literal_pins_default_and_check() {
        let descriptor = FieldDescriptor::literal("circle");
        assert_eq!(descriptor.pinned(), Some(&Value::from("circle")));
        assert_eq!(descriptor.default_literal(), Some(&Value::from("circle")));
        assert!(descriptor.has_validators());

        let check = &descriptor.validators()[0];
        assert!(check(&Value::from("circle")).is_ok());
        let err = check(&Value::from("square")).unwrap_err();
        assert_eq!(err, "must equal \"circle\"");
    }

    #[test]
    fn test_validators_keep_declaration_order() {
        let descriptor = FieldDescriptor::new()
            .with_validator(|_| Err("first".into()))
            .with_validator(|_| Err("second".into()));
        assert_eq!(descriptor.validators().len(), 2);
        assert_eq!(
            descriptor.validators()[0](&Value::Null).unwrap_err(),
            "first"
        );
    }

    #[test]
    fn test_codec_round_trip() {
        let cents = Codec::new(
            "cents",
            |value: &Value| match value {
                Value::Number(n) => {
                    let cents = n.as_i64().unwrap_or(0);
                    Value::from(format!("{}.{:02}", cents / 100, (cents % 100).abs()))
                }
                other => other.clone(),
            },
            |value: &Value| match value.as_str() {
                Some(s) => {
                    let cleaned = s.replace('.', "");
                    cleaned
                        .parse::<i64>()
                        .map(Value::from)
                        .map_err(|_| format!("invalid decimal literal '{}'", s))
                }
                None => Err(format!("expected string, got {}", value.kind())),
            },
        );

        assert_eq!(cents.name(), "cents");
        let decoded = cents.decode(&Value::from("12.34")).unwrap();
        assert_eq!(decoded, Value::from(1234i64));
        assert_eq!(cents.encode(&decoded), Value::from("12.34"));
        assert!(cents.decode(&Value::from("not money")).is_err());
    }
}
