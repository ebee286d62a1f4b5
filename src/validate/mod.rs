//! Validation subsystem for modelkit
//!
//! Violations are data, not control flow (M3): walking an instance
//! produces an ordered list of path-scoped messages and throws nothing.
//! Fatal failures belong to the schema errors module; nothing in here
//! constructs one.

mod checks;
mod compose;
mod report;
mod walker;

pub use checks::{at_least, at_most, is_integer, matches, max_len, min_len, non_empty, one_of};
pub use report::ErrorLog;
pub use walker::ValidateConfig;

pub(crate) use compose::compose;
pub(crate) use walker::collect;
