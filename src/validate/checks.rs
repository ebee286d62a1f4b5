//! Shipped predicate factories
//!
//! Each factory returns a plain closure satisfying the `Predicate`
//! bound, so shipped and hand-written checks compose identically.
//! Comparisons are strict: no type coercion, a wrong kind is its own
//! rejection rather than a silent pass.

use regex::Regex;

use crate::value::{Value, ValueKind};

fn length_of(value: &Value) -> Result<usize, String> {
    match value {
        Value::String(s) => Ok(s.chars().count()),
        Value::Array(items) => Ok(items.len()),
        other => Err(format!("expected string or array, got {}", other.kind())),
    }
}

/// Numeric content of a value; big integers keep their exact width
/// instead of rounding through f64.
enum Magnitude {
    Float(f64),
    Big(i128),
}

impl Magnitude {
    fn below(&self, bound: f64) -> bool {
        match *self {
            Magnitude::Float(f) => f < bound,
            Magnitude::Big(i) => {
                if bound.is_nan() || bound <= i128::MIN as f64 {
                    false
                } else if bound >= i128::MAX as f64 {
                    true
                } else {
                    // for integer i, i < bound iff i < ceil(bound)
                    i < bound.ceil() as i128
                }
            }
        }
    }

    fn above(&self, bound: f64) -> bool {
        match *self {
            Magnitude::Float(f) => f > bound,
            Magnitude::Big(i) => {
                if bound.is_nan() || bound >= i128::MAX as f64 {
                    false
                } else if bound < i128::MIN as f64 {
                    true
                } else {
                    // for integer i, i > bound iff i > floor(bound)
                    i > bound.floor() as i128
                }
            }
        }
    }
}

fn number_of(value: &Value) -> Result<Magnitude, String> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(Magnitude::Float)
            .ok_or_else(|| "number out of range".to_string()),
        Value::BigInt(i) => Ok(Magnitude::Big(*i)),
        other => Err(format!("expected number, got {}", other.kind())),
    }
}

/// Rejects empty strings and empty arrays.
pub fn non_empty() -> impl Fn(&Value) -> Result<(), String> + Send + Sync {
    move |value: &Value| {
        if length_of(value)? == 0 {
            Err("must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}

/// Rejects strings shorter than `min` characters (arrays: elements).
pub fn min_len(min: usize) -> impl Fn(&Value) -> Result<(), String> + Send + Sync {
    move |value: &Value| {
        if length_of(value)? < min {
            Err(format!("length must be at least {}", min))
        } else {
            Ok(())
        }
    }
}

/// Rejects strings longer than `max` characters (arrays: elements).
pub fn max_len(max: usize) -> impl Fn(&Value) -> Result<(), String> + Send + Sync {
    move |value: &Value| {
        if length_of(value)? > max {
            Err(format!("length must be at most {}", max))
        } else {
            Ok(())
        }
    }
}

/// Rejects numbers below `min`.
pub fn at_least(min: f64) -> impl Fn(&Value) -> Result<(), String> + Send + Sync {
    move |value: &Value| {
        if number_of(value)?.below(min) {
            Err(format!("must be at least {}", min))
        } else {
            Ok(())
        }
    }
}

/// Rejects numbers above `max`.
pub fn at_most(max: f64) -> impl Fn(&Value) -> Result<(), String> + Send + Sync {
    move |value: &Value| {
        if number_of(value)?.above(max) {
            Err(format!("must be at most {}", max))
        } else {
            Ok(())
        }
    }
}

/// Rejects fractional numbers; big integers always pass.
pub fn is_integer() -> impl Fn(&Value) -> Result<(), String> + Send + Sync {
    move |value: &Value| match value {
        Value::Number(n) if n.as_i64().is_some() || n.as_u64().is_some() => Ok(()),
        Value::Number(_) => Err("must be an integer".to_string()),
        Value::BigInt(_) => Ok(()),
        other => Err(format!("expected number, got {}", other.kind())),
    }
}

/// Rejects values outside the allowed set.
pub fn one_of(allowed: Vec<Value>) -> impl Fn(&Value) -> Result<(), String> + Send + Sync {
    move |value: &Value| {
        if allowed.contains(value) {
            Ok(())
        } else {
            let options: Vec<String> = allowed.iter().map(Value::preview).collect();
            Err(format!("must be one of {}", options.join(", ")))
        }
    }
}

/// Rejects strings not matching the regular expression. An invalid
/// pattern yields a predicate that rejects every value with the
/// compile failure, so misdeclared schemas surface at first use
/// instead of passing silently.
pub fn matches(pattern: &str) -> impl Fn(&Value) -> Result<(), String> + Send + Sync {
    let compiled = Regex::new(pattern).map_err(|_| format!("invalid pattern '{}'", pattern));
    move |value: &Value| {
        let regex = compiled.as_ref().map_err(Clone::clone)?;
        match value {
            Value::String(s) if regex.is_match(s) => Ok(()),
            Value::String(_) => Err(format!("must match pattern '{}'", regex.as_str())),
            other => Err(format!("expected string, got {}", other.kind())),
        }
    }
}
