//! Structured event output for modelkit
//!
//! Event discipline:
//! - One event = one JSON line
//! - Deterministic key ordering (event, severity, then fields sorted
//!   alphabetically)
//! - Synchronous, no buffering
//! - Caller-injected sink; the library never writes to stdout on its own

use std::fmt;
use std::io::Write;

/// Event severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues, including validation reports
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Writes structured events to an injected sink, filtered by severity.
pub struct EventWriter<W: Write> {
    sink: W,
    min_severity: Severity,
}

impl<W: Write> EventWriter<W> {
    /// Creates a writer that emits every severity.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            min_severity: Severity::Trace,
        }
    }

    /// Drops events below the given severity.
    pub fn with_min_severity(mut self, min: Severity) -> Self {
        self.min_severity = min;
        self
    }

    /// Emits one event as a single JSON line.
    pub fn emit(&mut self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if severity < self.min_severity {
            return;
        }
        let line = format_event(severity, event, fields);
        // A failing sink must never disturb the caller
        let _ = self.sink.write_all(line.as_bytes());
        let _ = self.sink.flush();
    }

    /// Consumes the writer and returns the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Renders one event line: `{"event":...,"severity":...,<sorted fields>}\n`.
pub fn format_event(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    // Build JSON by hand for deterministic ordering
    let mut output = String::with_capacity(256);

    output.push_str("{\"event\":\"");
    escape_json_string(&mut output, event);
    output.push('"');

    output.push_str(",\"severity\":\"");
    output.push_str(severity.as_str());
    output.push('"');

    let mut sorted_fields: Vec<_> = fields.iter().collect();
    sorted_fields.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted_fields {
        output.push_str(",\"");
        escape_json_string(&mut output, key);
        output.push_str("\":\"");
        escape_json_string(&mut output, value);
        output.push('"');
    }

    output.push('}');
    output.push('\n');
    output
}

fn escape_json_string(output: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c.is_control() => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
}
