//! Structured extraction from raw generator text.
//!
//! The fallback order is a fixed slice of pure attempt functions, tried in
//! sequence with first success winning. Extraction never fails: when every
//! attempt misses, the caller gets the empty value for the shape it asked
//! for, and a warning is logged. Callers must treat an empty return as a
//! soft failure, not as "the hazard has no data".

use serde_json::Value;
use tracing::{debug, warn};

use crate::relaxed;

/// Shape the caller expects from the generator.
///
/// Chooses only the empty fallback value; a successfully parsed value of
/// the other shape is returned as-is rather than coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedShape {
    Mapping,
    Sequence,
}

impl ExpectedShape {
    pub fn empty_value(self) -> Value {
        match self {
            ExpectedShape::Mapping => Value::Object(serde_json::Map::new()),
            ExpectedShape::Sequence => Value::Array(Vec::new()),
        }
    }
}

type Attempt = fn(&str) -> Option<Value>;

/// Ordered parse strategies; first success wins.
const ATTEMPTS: &[(&str, Attempt)] = &[
    ("strict", attempt_strict),
    ("relaxed", attempt_relaxed),
    ("bracket-repair", attempt_bracket_repair),
];

/// Coerce raw generator text into a structured value.
///
/// Extracting the re-serialized output of a successful extraction returns
/// an identical value: serialized output is strict JSON and short-circuits
/// on the first attempt.
pub fn extract(raw_text: &str, shape: ExpectedShape) -> Value {
    let cleaned = strip_fences(raw_text);
    for (strategy, attempt) in ATTEMPTS {
        if let Some(value) = attempt(cleaned) {
            debug!(strategy, "structured extraction succeeded");
            return value;
        }
    }
    let preview: String = raw_text.chars().take(80).collect();
    warn!(
        preview = %preview,
        "all extraction strategies failed, returning empty {:?}", shape
    );
    shape.empty_value()
}

/// Remove boundary code fences and a bare `json` token.
///
/// Only markers at the text boundaries are stripped; fences quoted inside
/// the payload are left alone.
fn strip_fences(text: &str) -> &str {
    let mut t = text.trim();
    if let Some(rest) = t.strip_prefix("```") {
        t = rest;
    }
    if let Some(rest) = t.strip_suffix("```") {
        t = rest;
    }
    t = t.trim();
    if let Some(rest) = t.strip_prefix("json") {
        let rest = rest.trim_start();
        if rest.is_empty() || rest.starts_with('{') || rest.starts_with('[') {
            t = rest;
        }
    }
    if let Some(rest) = t.strip_suffix("json") {
        let rest = rest.trim_end();
        if rest.ends_with('}') || rest.ends_with(']') {
            t = rest;
        }
    }
    t.trim()
}

fn attempt_strict(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

fn attempt_relaxed(text: &str) -> Option<Value> {
    relaxed::parse(text)
}

/// Last resort: take the first bracketed substring (non-recursive text
/// search; nested same-type brackets are the strict/relaxed parsers' job),
/// swap single quotes for double quotes, and retry strict parsing.
fn attempt_bracket_repair(text: &str) -> Option<Value> {
    let candidate = first_bracketed(text)?;
    serde_json::from_str(&candidate.replace('\'', "\"")).ok()
}

fn first_bracketed(text: &str) -> Option<&str> {
    let (open_at, close) = match (text.find('['), text.find('{')) {
        (Some(a), Some(b)) if a < b => (a, ']'),
        (Some(a), None) => (a, ']'),
        (_, Some(b)) => (b, '}'),
        (None, None) => return None,
    };
    let rest = &text[open_at + 1..];
    let close_at = rest.find(close)?;
    Some(&text[open_at..open_at + 1 + close_at + 1])
}
