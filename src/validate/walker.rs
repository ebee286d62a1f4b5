//! Ordered violation collection per MODEL.md (M3)
//!
//! The walk visits fields in declaration order. Per field:
//! 1. a required field holding no value reports `field: is required`;
//! 2. nested instances recurse under a `field.` or `field[i].` prefix;
//! 3. a present, non-null value with a check runs it; composed checks
//!    on array values run per element, one message per failing index.
//!
//! Explicit null is a present value: required accepts it and checks
//! skip it.

use crate::schema::{FieldCheck, ModelInstance};
use crate::value::Value;

/// Runtime knobs for a validation walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateConfig {
    max_errors: usize,
}

impl ValidateConfig {
    /// Collects every violation.
    pub fn new() -> Self {
        Self { max_errors: 0 }
    }

    /// Stops the walk after `max` messages; 0 collects everything.
    pub fn with_max_errors(mut self, max: usize) -> Self {
        self.max_errors = max;
        self
    }

    /// Returns the message cap (0 = unlimited).
    pub fn max_errors(&self) -> usize {
        self.max_errors
    }

    fn is_full(&self, collected: &[String]) -> bool {
        self.max_errors != 0 && collected.len() >= self.max_errors
    }
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn collect(instance: &ModelInstance, config: &ValidateConfig) -> Vec<String> {
    let mut messages = Vec::new();
    walk(instance, "", config, &mut messages);
    messages
}

fn walk(instance: &ModelInstance, prefix: &str, config: &ValidateConfig, out: &mut Vec<String>) {
    for ((name, descriptor), stored) in instance.schema().fields().iter().zip(instance.stored()) {
        if config.is_full(out) {
            return;
        }
        let path = format!("{}{}", prefix, name);

        let value = match &stored.value {
            None => {
                if descriptor.is_required() {
                    out.push(format!("{}: is required", path));
                }
                continue;
            }
            Some(Value::Null) => continue,
            Some(value) => value,
        };

        match value {
            Value::Instance(child) => {
                walk(child, &format!("{}.", path), config, out);
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if config.is_full(out) {
                        return;
                    }
                    if let Value::Instance(child) = item {
                        walk(child, &format!("{}[{}].", path, index), config, out);
                    }
                }
            }
            _ => {}
        }

        // a nested recursion may have filled the budget
        if config.is_full(out) {
            return;
        }

        match &stored.check {
            FieldCheck::None => {}
            FieldCheck::Composed(check) => match value {
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if config.is_full(out) {
                            return;
                        }
                        if item.is_null() {
                            continue;
                        }
                        if let Err(message) = check(item) {
                            out.push(format!("{}[{}]: {}", path, index, message));
                        }
                    }
                }
                value => {
                    if let Err(message) = check(value) {
                        out.push(format!("{}: {}", path, message));
                    }
                }
            },
            FieldCheck::Shape(expected) => {
                if value.kind() != *expected {
                    out.push(format!(
                        "{}: expected {}, got {}",
                        path,
                        expected,
                        value.kind()
                    ));
                }
            }
        }
    }
}
