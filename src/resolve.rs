//! Output-path pattern resolution.
//!
//! Path patterns are plain strings containing placeholder tokens wrapped in
//! a delimiter pair, `{{` and `}}` by default:
//!
//! ```text
//! /posts/{{slug}}.html    + {slug: "hello"}  →  /posts/hello.html
//! /posts/{{ slug }}.html  + {slug: "hello"}  →  /posts/hello.html
//! /posts/{{other}}.html   + {slug: "hello"}  →  /posts//.html
//! ```
//!
//! Rules:
//!
//! - Whitespace inside a token is trimmed before lookup.
//! - A token naming a key absent from the record substitutes the empty
//!   string, never an error.
//! - Delimiters are matched as literal text. Any pair works, including ones
//!   that would be metacharacters in a regular expression.
//! - Substitution is single-pass: a substituted value is not re-scanned, so
//!   delimiter sequences inside record values stay literal.
//! - A dangling open delimiter with no matching close is ordinary text.

use crate::types::DataRecord;
use serde_json::Value;
use std::borrow::Cow;

/// A placeholder delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "{{".to_string(),
            close: "}}".to_string(),
        }
    }
}

impl Delimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Parse a whitespace-separated pair string like `"[[ ]]"`.
    ///
    /// Fewer than two tokens falls back to the default `{{` `}}` pair.
    /// Extra tokens beyond the first two are ignored.
    pub fn parse(spec: &str) -> Self {
        let mut tokens = spec.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(open), Some(close)) => Self::new(open, close),
            _ => Self::default(),
        }
    }
}

/// Substitute placeholder tokens in `pattern` with values from `data`.
///
/// Scans left to right for non-overlapping `open … close` spans; the token
/// between them is trimmed and looked up in the record. Matched spans are
/// replaced by the value's string form ([`value_text`]); everything else is
/// copied through untouched.
pub fn resolve(pattern: &str, data: &DataRecord, delimiters: &Delimiters) -> String {
    let (open, close) = (delimiters.open.as_str(), delimiters.close.as_str());
    // An empty delimiter can never delimit anything.
    if open.is_empty() || close.is_empty() {
        return pattern.to_string();
    }

    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(start) = rest.find(open) {
        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find(close) else {
            // Dangling open delimiter: the remainder is literal text.
            break;
        };
        out.push_str(&rest[..start]);
        let token = after_open[..end].trim();
        if let Some(value) = data.get(token) {
            out.push_str(&value_text(value));
        }
        rest = &after_open[end + close.len()..];
    }

    out.push_str(rest);
    out
}

/// String form of a record value for path substitution.
///
/// Strings are used verbatim; numbers and booleans via `Display`. `null`
/// and nested containers have no path spelling and substitute as empty,
/// same as an absent key.
fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Cow::Borrowed(""),
    }
}
