//! JSON and plain-text formatters

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a value as pretty JSON
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Plain text formatter.
///
/// A list prints one record per line as `key=value` pairs, which keeps the
/// output friendly to `grep` and `cut`. A single record prints one field
/// per line.
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let json = serde_json::to_value(value)?;
        Ok(match &json {
            Value::Array(items) => items
                .iter()
                .map(Self::inline)
                .collect::<Vec<_>>()
                .join("\n"),
            Value::Object(fields) => fields
                .iter()
                .map(|(k, v)| format!("{k}: {}", Self::inline(v)))
                .collect::<Vec<_>>()
                .join("\n"),
            other => Self::inline(other),
        })
    }

    fn inline(value: &Value) -> String {
        match value {
            Value::Null => "-".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(items) => items.iter().map(Self::inline).collect::<Vec<_>>().join(","),
            Value::Object(fields) => fields
                .iter()
                .map(|(k, v)| format!("{k}={}", Self::inline(v)))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
