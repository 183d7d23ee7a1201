//! Built-in JavaScript checker.
//!
//! Parses the buffer as a standalone function body, then looks for the first
//! identifier read that nothing declares and that is not a well-known global.

mod lexer;
mod parser;
mod scope;

use super::{ParseOutcome, SyntaxChecker};
use once_cell::sync::Lazy;
use parser::Parser;
use scope::ScopeTree;
use std::collections::HashSet;
use thiserror::Error;

/// Engine-style failure messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("SyntaxError: unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("SyntaxError: unexpected token end of input")]
    UnexpectedEnd,

    /// Bad character, unterminated string, comment or template
    #[error("SyntaxError: invalid or unexpected token")]
    InvalidToken,

    #[error("ReferenceError: {0} is not defined")]
    NotDefined(String),

    /// Nesting deeper than the checker follows
    #[error("RangeError: Maximum call stack size exceeded")]
    TooDeep,
}

/// Names a function body can read without declaring them
static GLOBALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "console", "Math", "JSON", "Object", "Array", "String", "Number", "Boolean", "Symbol",
        "BigInt", "Map", "Set", "WeakMap", "WeakSet", "Promise", "Date", "RegExp", "Error",
        "TypeError", "RangeError", "SyntaxError", "ReferenceError", "Reflect", "Proxy", "Intl",
        "ArrayBuffer", "DataView", "Int8Array", "Uint8Array", "Int16Array", "Uint16Array",
        "Int32Array", "Uint32Array", "Float32Array", "Float64Array", "parseInt", "parseFloat",
        "isNaN", "isFinite", "Infinity", "NaN", "undefined", "globalThis", "eval",
        "encodeURIComponent", "decodeURIComponent", "encodeURI", "decodeURI", "setTimeout",
        "clearTimeout", "setInterval", "clearInterval", "queueMicrotask", "structuredClone",
        "require", "module", "exports", "process", "window", "document", "fetch", "alert",
    ]
    .into_iter()
    .collect()
});

/// Check a function body. The first failure wins: lexing, then parsing, then
/// undeclared names.
pub fn check(source: &str) -> Result<(), SyntaxError> {
    let tokens = lexer::tokenize(source)?;
    let mut scopes = ScopeTree::new();
    scopes.declare_lexical("arguments");
    Parser::new(tokens, &mut scopes).program()?;

    match scopes.first_unresolved(|name| GLOBALS.contains(name)) {
        Some(name) => Err(SyntaxError::NotDefined(name.to_string())),
        None => Ok(()),
    }
}

/// JavaScript [`SyntaxChecker`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptChecker;

impl SyntaxChecker for JavaScriptChecker {
    fn language(&self) -> &'static str {
        "javascript"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["js", "node"]
    }

    fn try_parse(&self, source: &str) -> ParseOutcome {
        match check(source) {
            Ok(()) => ParseOutcome::Ok,
            Err(err) => ParseOutcome::Failed {
                message: err.to_string(),
            },
        }
    }

    fn debug_print_marker(&self) -> &'static str {
        "console.log"
    }
}
