//! Risk parameter normalization.
//!
//! Generator responses for a hazard batch arrive as a sequence of mappings,
//! often wrapped in one or more extra sequence layers (single-hazard
//! responses get listed, lists get re-listed). Normalization flattens the
//! nesting, drops anything that is not a mapping, and recovers the four
//! IEC 61508 parameter codes by scanning the serialized entry text.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use hara_types::{
    AvoidanceCode, FrequencyCode, MitigationCode, RiskParameterRecord, SeverityCode, Sil,
};

/// Fallback hazard attribution for callers that have no source hazard to
/// attribute an entry to. The scan itself never applies it, so an absent
/// `hazard` key stays distinguishable from a hazard genuinely named this.
pub const UNKNOWN_HAZARD: &str = "UNKNOWN HAZARD";

fn severity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bC([1-4])\b").unwrap())
}

fn frequency_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bF([1-3])\b").unwrap())
}

fn avoidance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bP([1-2])\b").unwrap())
}

fn mitigation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bW([1-3])\b").unwrap())
}

/// Parameters recovered from one response entry.
///
/// `hazard` reflects the entry verbatim: `None` means the key was absent,
/// which is not the same as a hazard that happens to be named
/// [`UNKNOWN_HAZARD`]. Attribution is the caller's decision, made through
/// [`RecoveredParameters::into_record`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecoveredParameters {
    pub idx: Option<String>,
    pub hazard: Option<String>,
    pub severity: SeverityCode,
    pub frequency: FrequencyCode,
    pub avoidance: AvoidanceCode,
    pub mitigation: MitigationCode,
}

impl RecoveredParameters {
    /// Build the final record, attributing an entry that named no hazard
    /// to `fallback` (the source hazard description, or [`UNKNOWN_HAZARD`]
    /// when the caller has none).
    pub fn into_record(self, fallback: &str) -> RiskParameterRecord {
        RiskParameterRecord {
            idx: self.idx,
            hazard: self.hazard.unwrap_or_else(|| fallback.to_string()),
            severity: self.severity,
            frequency: self.frequency,
            avoidance: self.avoidance,
            mitigation: self.mitigation,
            sil: Sil::Unknown,
        }
    }
}

/// Flatten nested response layers and produce one recovered parameter set
/// per mapping entry. Non-mapping entries (parse artifacts, stray strings)
/// are dropped silently so one malformed response cannot abort the batch.
pub fn normalize(records: &Value) -> Vec<RecoveredParameters> {
    let mut entries = Vec::new();
    flatten_into(records, &mut entries);

    let mut clean = Vec::new();
    for entry in entries {
        let Some(mapping) = entry.as_object() else {
            debug!("dropping non-mapping entry during normalization");
            continue;
        };

        let idx = mapping.get("idx").map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        let hazard = mapping
            .get("hazard")
            .and_then(Value::as_str)
            .map(str::to_string);

        // Parameter codes can sit anywhere in the entry (top level, inside
        // a {value, rationale} object, even in prose), so the scan runs
        // over the serialized entry text and takes the first match.
        let text = entry.to_string();
        clean.push(RecoveredParameters {
            idx,
            hazard,
            severity: first_digit(severity_re(), &text)
                .and_then(SeverityCode::from_digit)
                .unwrap_or(SeverityCode::Unknown),
            frequency: first_digit(frequency_re(), &text)
                .and_then(FrequencyCode::from_digit)
                .unwrap_or(FrequencyCode::Unknown),
            avoidance: first_digit(avoidance_re(), &text)
                .and_then(AvoidanceCode::from_digit)
                .unwrap_or(AvoidanceCode::Unknown),
            mitigation: first_digit(mitigation_re(), &text)
                .and_then(MitigationCode::from_digit)
                .unwrap_or(MitigationCode::Unknown),
        });
    }
    clean
}

fn flatten_into<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        other => out.push(other),
    }
}

fn first_digit(re: &Regex, text: &str) -> Option<u8> {
    re.captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|digit| digit.as_str().parse().ok())
}
