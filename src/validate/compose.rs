//! Predicate composition with short-circuit semantics
//!
//! Composition preserves declaration order and stops at the first
//! rejection, so a value failing an early range check never reaches a
//! later parse-heavy one.

use std::sync::Arc;

use crate::schema::Predicate;
use crate::value::Value;

/// Composes an ordered predicate list into one predicate that returns
/// the first rejection, or success when every predicate passes. An
/// empty list composes into an always-passing predicate.
pub(crate) fn compose(predicates: &[Predicate]) -> Predicate {
    let chain: Vec<Predicate> = predicates.to_vec();
    Arc::new(move |value: &Value| {
        for check in &chain {
            check(value)?;
        }
        Ok(())
    })
}
