//! Validation result types.
//!
//! Form-style checks (contest drafts) collect every failing field instead of
//! stopping at the first one, so the caller can show all messages at once.

use serde::{Deserialize, Serialize};

/// Outcome of validating a record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    /// True when no error-level issue was recorded
    pub valid: bool,

    /// Blocking issues
    pub errors: Vec<ValidationIssue>,

    /// Non-blocking issues
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// A result with no issues
    pub fn success() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a blocking issue
    pub fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationIssue::error(path, message));
    }

    /// Record a non-blocking issue
    pub fn add_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::warning(path, message));
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
    }

    /// Whether any error was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error messages for a single field, in insertion order
    pub fn messages_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |issue| issue.path == path)
            .map(|issue| issue.message.as_str())
    }

    /// Join error messages into one line, `path: message; ...`
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|issue| format!("{}: {}", issue.path, issue.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

impl From<validator::ValidationErrors> for ValidationResult {
    /// Field errors are emitted sorted by field name so output is stable.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let mut result = Self::success();
        for (field, field_errors) in fields {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                result.add_error(field, message);
            }
        }
        result
    }
}

/// A single validation issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Field the issue is attached to (e.g. "title", "end_date")
    pub path: String,

    /// Human-readable message
    pub message: String,

    /// Severity level
    pub severity: IssueSeverity,
}

impl ValidationIssue {
    /// Error-level issue
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: IssueSeverity::Error,
        }
    }

    /// Warning-level issue
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: IssueSeverity::Warning,
        }
    }
}

/// Severity level of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Blocks submission of the form
    Error,

    /// Shown but does not block
    Warning,
}

impl IssueSeverity {
    /// Check if this severity level is blocking
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_error_marks_invalid() {
        let mut result = ValidationResult::success();
        assert!(result.valid);

        result.add_error("title", "Title must be at least 5 characters");
        result.add_error("problems", "At least one problem is required");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(
            result.summary(),
            "title: Title must be at least 5 characters; problems: At least one problem is required"
        );
    }

    #[test]
    fn test_warnings_do_not_block() {
        let mut result = ValidationResult::success();
        result.add_warning("registration_limit", "No limit set");
        assert!(result.valid);
        assert!(!result.has_errors());
        assert!(!result.warnings[0].severity.is_blocking());
    }

    #[test]
    fn test_merge_recomputes_validity() {
        let mut first = ValidationResult::success();
        let mut second = ValidationResult::success();
        second.add_error("languages", "Select at least one language");

        first.merge(second);
        assert!(!first.valid);
        assert_eq!(first.messages_for("languages").count(), 1);
        assert_eq!(first.messages_for("title").count(), 0);
    }
}
