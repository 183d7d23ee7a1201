//! Syntax feedback for the editor.
//!
//! A best-effort hint list for the current buffer. Step 1 asks the language's
//! [`SyntaxChecker`] whether the text parses; the remaining rules are plain
//! text checks that run regardless. Hints are advisory and never block.

pub mod javascript;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

pub use javascript::JavaScriptChecker;

/// Marker used when no checker is registered for the language
const DEFAULT_DEBUG_MARKER: &str = "console.log";

static NESTED_LOOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)for.*for").expect("valid regex"));

static UNDEFINED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"'?([A-Za-z_$][\w$]*)'? is not defined").expect("valid regex")
});

/// Result of asking a checker to parse a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Ok,
    Failed { message: String },
}

/// Per-language parse capability.
pub trait SyntaxChecker: Send + Sync {
    /// Canonical language tag
    fn language(&self) -> &'static str;

    /// Other tags that select this checker
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Try to parse `source` as a standalone function body.
    fn try_parse(&self, source: &str) -> ParseOutcome;

    /// Text whose presence indicates a leftover debug print
    fn debug_print_marker(&self) -> &'static str;
}

/// Checkers keyed by lowercase language tag.
#[derive(Clone, Default)]
pub struct CheckerRegistry {
    checkers: HashMap<String, Arc<dyn SyntaxChecker>>,
}

impl CheckerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in JavaScript checker
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JavaScriptChecker));
        registry
    }

    /// Register a checker under its language and aliases
    pub fn register(&mut self, checker: Arc<dyn SyntaxChecker>) {
        for tag in std::iter::once(checker.language()).chain(checker.aliases().iter().copied()) {
            self.checkers.insert(tag.to_ascii_lowercase(), Arc::clone(&checker));
        }
    }

    pub fn get(&self, language: &str) -> Option<Arc<dyn SyntaxChecker>> {
        self.checkers.get(&language.to_ascii_lowercase()).cloned()
    }

    /// Registered tags, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.checkers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}

/// Hint category, rendered as the text prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    SyntaxError,
    Tip,
    Fix,
    Note,
    Optimization,
    Hint,
}

/// One line of feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub kind: HintKind,
    pub text: String,
}

impl Hint {
    fn new(kind: HintKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The hint rule engine.
#[derive(Debug, Clone)]
pub struct SyntaxFeedback {
    registry: CheckerRegistry,
}

impl Default for SyntaxFeedback {
    fn default() -> Self {
        Self::new(CheckerRegistry::with_defaults())
    }
}

impl SyntaxFeedback {
    pub fn new(registry: CheckerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    /// Produce hints for `source`, in rule order.
    #[instrument(skip(self, source), fields(len = source.len()))]
    pub fn analyze(&self, language: &str, source: &str) -> Vec<Hint> {
        let mut hints = Vec::new();
        let checker = self.registry.get(language);

        match &checker {
            Some(checker) => {
                if let ParseOutcome::Failed { message } = checker.try_parse(source) {
                    parse_failure_hints(&message, source, &mut hints);
                }
            }
            None => debug!(language, "no checker registered, skipping parse"),
        }

        let marker = checker
            .as_ref()
            .map_or(DEFAULT_DEBUG_MARKER, |c| c.debug_print_marker());
        if source.contains(marker) {
            hints.push(Hint::new(
                HintKind::Note,
                format!("Note: Remember to remove debugging {marker} statements before submission"),
            ));
        }

        if NESTED_LOOP.is_match(source) {
            hints.push(Hint::new(
                HintKind::Optimization,
                "Optimization: Consider using a HashMap to avoid nested loops and achieve O(n) time complexity",
            ));
        }

        if source.contains("return") && !source.contains("return [") {
            hints.push(Hint::new(
                HintKind::Hint,
                "Hint: For the Two Sum problem, remember to return an array of indices",
            ));
        }

        debug!(count = hints.len(), "feedback computed");
        hints
    }
}

/// Step 1 hints. The brace and paren checks are presence tests, not balance
/// counts.
fn parse_failure_hints(message: &str, source: &str, hints: &mut Vec<Hint>) {
    hints.push(Hint::new(
        HintKind::SyntaxError,
        format!("Syntax Error: {message}"),
    ));

    if message.contains("unexpected token") {
        hints.push(Hint::new(
            HintKind::Tip,
            "Tip: Check for missing brackets, parentheses, or semicolons",
        ));
        if source.contains('{') && !source.contains('}') {
            hints.push(Hint::new(
                HintKind::Fix,
                "Fix: You may be missing a closing curly brace '}'",
            ));
        }
        if source.contains('(') && !source.contains(')') {
            hints.push(Hint::new(
                HintKind::Fix,
                "Fix: You may be missing a closing parenthesis ')'",
            ));
        }
    }

    if message.contains("is not defined") {
        if let Some(name) = UNDEFINED_NAME.captures(message).and_then(|c| c.get(1)) {
            hints.push(Hint::new(
                HintKind::Fix,
                format!(
                    "Fix: Define variable '{}' before using it, or check for typos",
                    name.as_str()
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(language: &str, source: &str) -> Vec<String> {
        SyntaxFeedback::default()
            .analyze(language, source)
            .into_iter()
            .map(|h| h.text)
            .collect()
    }

    #[test]
    fn test_undefined_name_with_debug_print() {
        assert_eq!(
            texts("javascript", "console.log(x)"),
            vec![
                "Syntax Error: ReferenceError: x is not defined",
                "Fix: Define variable 'x' before using it, or check for typos",
                "Note: Remember to remove debugging console.log statements before submission",
            ]
        );
    }

    #[test]
    fn test_valid_function_without_array_return() {
        assert_eq!(
            texts("javascript", "function f(a,b){return a+b}"),
            vec!["Hint: For the Two Sum problem, remember to return an array of indices"]
        );
    }

    #[test]
    fn test_missing_brace_and_paren() {
        let hints = texts("javascript", "function f(a, b {");
        assert_eq!(hints[0], "Syntax Error: SyntaxError: unexpected token '{'");
        assert_eq!(
            hints[1..],
            [
                "Tip: Check for missing brackets, parentheses, or semicolons",
                "Fix: You may be missing a closing curly brace '}'",
                "Fix: You may be missing a closing parenthesis ')'",
            ]
        );
    }

    #[test]
    fn test_presence_checks_are_naive() {
        // An extra `}` elsewhere suppresses the brace fix even though the
        // block is still unclosed.
        let hints = texts("javascript", "const o = {a: '}'}; if (o) {");
        assert!(hints[0].contains("unexpected token end of input"));
        assert!(!hints.iter().any(|h| h.contains("curly brace")));
    }

    #[test]
    fn test_nested_loops_and_array_return() {
        let source = "function twoSum(nums, target) {\n  for (let i = 0; i < nums.length; i++) {\n    for (let j = i + 1; j < nums.length; j++) {\n      if (nums[i] + nums[j] === target) return [i, j];\n    }\n  }\n}";
        assert_eq!(
            texts("javascript", source),
            vec!["Optimization: Consider using a HashMap to avoid nested loops and achieve O(n) time complexity"]
        );
    }

    #[test]
    fn test_unknown_language_skips_parse() {
        assert_eq!(
            texts("cobol", "DISPLAY x. console.log"),
            vec!["Note: Remember to remove debugging console.log statements before submission"]
        );
    }

    #[test]
    fn test_deeply_nested_buffers_report_instead_of_crashing() {
        let deep = [
            format!("{}x", "!".repeat(100_000)),
            format!("let a = {}1{};", "[".repeat(10_000), "]".repeat(10_000)),
            "(".repeat(100_000),
            format!("let s = {}x{}", "`${".repeat(10_000), "}`".repeat(10_000)),
        ];
        for source in &deep {
            let hints = texts("javascript", source);
            assert_eq!(
                hints[0],
                "Syntax Error: RangeError: Maximum call stack size exceeded"
            );
            assert!(!hints.iter().any(|h| h.starts_with("Tip:")));
        }
    }

    #[test]
    fn test_megabyte_buffer_is_analyzed() {
        let source = format!("let a = 1;\nlet b = {}a;\nreturn [b];", "a+".repeat(500_000));
        assert!(source.len() > 1_000_000);
        assert!(texts("javascript", &source).is_empty());

        let unclosed = format!("function f() {{\n{}", "let x = 1;\n".repeat(100_000));
        let hints = texts("javascript", &unclosed);
        assert_eq!(hints[0], "Syntax Error: SyntaxError: unexpected token end of input");
        assert!(hints.contains(&"Fix: You may be missing a closing curly brace '}'".to_string()));
    }

    #[test]
    fn test_empty_buffer_has_no_hints() {
        assert!(texts("javascript", "").is_empty());
    }

    #[test]
    fn test_registry_aliases() {
        let registry = CheckerRegistry::with_defaults();
        assert!(registry.get("JS").is_some());
        assert!(registry.get("JavaScript").is_some());
        assert!(registry.get("python").is_none());
        assert_eq!(registry.languages(), vec!["javascript", "js", "node"]);
    }
}
