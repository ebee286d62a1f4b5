//! Structured validation report for `try_new`
//!
//! The log keys failures by the root segment of each message path (the
//! instance's own field) and keeps the first message per field; the
//! full ordered list stays available through `summarize()`. A decode
//! failure folds in the same way, keyed by the failing field.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::observe::{EventWriter, Severity};
use crate::schema::ModelError;

/// Per-field error report produced by a failed `try_new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorLog {
    schema: String,
    errors: BTreeMap<String, String>,
    messages: Vec<String>,
}

impl ErrorLog {
    pub(crate) fn from_messages(schema: &str, messages: Vec<String>) -> Self {
        let mut errors = BTreeMap::new();
        for message in &messages {
            errors
                .entry(root_segment(message).to_string())
                .or_insert_with(|| message.clone());
        }
        Self {
            schema: schema.to_string(),
            errors,
            messages,
        }
    }

    pub(crate) fn from_error(schema: &str, error: &ModelError) -> Self {
        let field = match error {
            ModelError::Deserialization { field, .. } => field.clone(),
            ModelError::UnknownField { field, .. } => field.clone(),
            _ => schema.to_string(),
        };
        let message = error.to_string();
        Self {
            schema: schema.to_string(),
            errors: BTreeMap::from([(field, message.clone())]),
            messages: vec![message],
        }
    }

    /// Returns the schema the failed construction targeted.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Returns the first message recorded for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns the complete ordered message list.
    pub fn summarize(&self) -> &[String] {
        &self.messages
    }

    /// Iterates the failing fields with their first message each.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// Returns the total message count.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true when no message was recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Renders the report as one WARN event per message.
    pub fn emit_events<W: Write>(&self, events: &mut EventWriter<W>) {
        for message in &self.messages {
            events.emit(
                Severity::Warn,
                "VALIDATION_FAILED",
                &[("schema", self.schema.as_str()), ("message", message)],
            );
        }
    }
}

/// The instance's own field: everything before the first descent,
/// index, or message separator. The builder rejects field names
/// containing these characters, so the split is unambiguous.
fn root_segment(message: &str) -> &str {
    let end = message
        .find(|c| c == '.' || c == '[' || c == ':')
        .unwrap_or(message.len());
    &message[..end]
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.schema, self.messages.join("; "))
    }
}

impl std::error::Error for ErrorLog {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ErrorLog {
        ErrorLog::from_messages(
            "Order",
            vec![
                "customer.name: is required".to_string(),
                "items[0].qty: must be at least 1".to_string(),
                "items[2].sku: is required".to_string(),
                "total: expected number, got string".to_string(),
            ],
        )
    }

    #[test]
    fn test_keys_by_root_segment() {
        let log = sample();
        assert_eq!(log.get("customer"), Some("customer.name: is required"));
        assert_eq!(log.get("total"), Some("total: expected number, got string"));
        assert_eq!(log.get("absent"), None);
    }

    #[test]
    fn test_first_message_per_field_wins() {
        let log = sample();
        // both items[0] and items[2] fail; the earliest message sticks
        assert_eq!(log.get("items"), Some("items[0].qty: must be at least 1"));
    }

    #[test]
    fn test_summarize_keeps_every_message_in_order() {
        let log = sample();
        assert_eq!(log.len(), 4);
        assert_eq!(log.summarize()[2], "items[2].sku: is required");
    }

    #[test]
    fn test_from_error_keys_by_failing_field() {
        let error = ModelError::deserialization("price", "invalid decimal literal");
        let log = ErrorLog::from_error("Order", &error);
        assert_eq!(log.len(), 1);
        assert!(log.get("price").unwrap().contains("invalid decimal literal"));
    }

    #[test]
    fn test_display_joins_messages() {
        let log = sample();
        let rendered = format!("{}", log);
        assert!(rendered.starts_with("Order: "));
        assert!(rendered.contains("; items[0].qty: must be at least 1; "));
    }

    #[test]
    fn test_serializes_as_field_map() {
        let log = sample();
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["schema"], "Order");
        assert_eq!(json["errors"]["customer"], "customer.name: is required");
        assert_eq!(json["messages"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_emit_events_renders_one_warn_per_message() {
        let log = sample();
        let mut events = EventWriter::new(Vec::new());
        log.emit_events(&mut events);

        let output = String::from_utf8(events.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 4);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "VALIDATION_FAILED");
        assert_eq!(first["severity"], "WARN");
        assert_eq!(first["schema"], "Order");
        assert_eq!(first["message"], "customer.name: is required");
    }
}
