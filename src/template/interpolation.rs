//! Parameter references inside template strings.
//!
//! # Syntax
//!
//! - `${NAME}` - replaced with the parameter value as text
//! - `${{NAME}}` - when it is the whole string, replaced with the value
//!   decoded as JSON (so `"${{REPLICAS}}"` with `REPLICAS=3` becomes `3`);
//!   inside a longer string it behaves like `${NAME}`
//!
//! Names are `[A-Za-z0-9_]+`. References to names without a value are left
//! exactly as written.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Matches `${{NAME}}` (group 1) or `${NAME}` (group 2).
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\{([A-Za-z0-9_]+)\}\}|\$\{([A-Za-z0-9_]+)\}")
        .expect("REFERENCE_REGEX must compile")
});

/// A segment of a template string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// String reference: ${NAME}
    Param(String),
    /// Typed reference: ${{NAME}}
    RawParam(String),
}

/// Split a string into literal text and parameter references.
pub fn parse_references(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in REFERENCE_REGEX.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        if whole.start() > last {
            segments.push(Segment::Literal(input[last..whole.start()].to_string()));
        }

        if let Some(raw) = caps.get(1) {
            segments.push(Segment::RawParam(raw.as_str().to_string()));
        } else if let Some(name) = caps.get(2) {
            segments.push(Segment::Param(name.as_str().to_string()));
        }

        last = whole.end();
    }

    if last < input.len() {
        segments.push(Segment::Literal(input[last..].to_string()));
    }

    segments
}

/// Substitute references in `input` as text.
pub fn substitute_text(input: &str, values: &BTreeMap<String, String>) -> String {
    let mut result = String::with_capacity(input.len());

    for segment in parse_references(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Param(name) => match values.get(&name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("${");
                    result.push_str(&name);
                    result.push('}');
                }
            },
            Segment::RawParam(name) => match values.get(&name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("${{");
                    result.push_str(&name);
                    result.push_str("}}");
                }
            },
        }
    }

    result
}

/// Substitute references in a string value, honoring `${{NAME}}` typing.
pub fn substitute(input: &str, values: &BTreeMap<String, String>) -> Value {
    if let [Segment::RawParam(name)] = parse_references(input).as_slice() {
        if let Some(value) = values.get(name) {
            return serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.clone()));
        }
    }

    Value::String(substitute_text(input, values))
}
