//! ISO 26262 assessment run.

use futures::future::join_all;
use serde_json::Value;
use tracing::warn;

use hara_extract::{extract, ExpectedShape};
use hara_model::{ExpectedFormat, TextGenerator};
use hara_types::{
    AsilParameterRecord, ControllabilityClass, ExposureClass, HazardRecord, RatedValue,
    SeverityClass,
};

use crate::prompts;

/// Run the full ISO 26262 path for a hazard list.
///
/// One generator call per hazard, fanned out concurrently with fan-in by
/// input position. Each response is extracted as a mapping and read
/// leniently: a factor that is missing or malformed becomes `UNKNOWN`,
/// which [`hara_asil::resolve_asil`] then propagates to an `UNKNOWN` ASIL.
/// The hazard list is already known; there is no run-level failure mode
/// here, every hazard yields a record.
pub async fn run_asil_assessment(
    generator: &dyn TextGenerator,
    hazards: &[HazardRecord],
) -> Vec<AsilParameterRecord> {
    let ratings = join_all(
        hazards
            .iter()
            .map(|hazard| classify_hazard(generator, hazard)),
    )
    .await;

    ratings
        .iter()
        .map(|record| hara_asil::annotate(record))
        .collect()
}

async fn classify_hazard(
    generator: &dyn TextGenerator,
    hazard: &HazardRecord,
) -> AsilParameterRecord {
    let messages = prompts::iso_rating(&hazard.description);
    let text = match generator.generate(&messages, ExpectedFormat::Json).await {
        Ok(text) => text,
        Err(e) => {
            warn!(hazard = %hazard.description, error = %e, "generator call failed");
            return AsilParameterRecord::unresolved(&hazard.description);
        }
    };

    let value = extract(&text, ExpectedShape::Mapping);
    record_from_value(&hazard.description, &value)
}

/// Lenient per-field read of a classification mapping.
///
/// `serde_json::from_value` on the whole record would reject the entire
/// response over one malformed factor; reading field by field confines the
/// damage to that factor.
fn record_from_value(hazard: &str, value: &Value) -> AsilParameterRecord {
    let Some(mapping) = value.as_object() else {
        return AsilParameterRecord::unresolved(hazard);
    };

    AsilParameterRecord {
        hazard: mapping
            .get("hazard")
            .and_then(Value::as_str)
            .unwrap_or(hazard)
            .to_string(),
        severity: rated_field::<SeverityClass>(mapping, "Severity"),
        exposure: rated_field::<ExposureClass>(mapping, "Exposure"),
        controllability: rated_field::<ControllabilityClass>(mapping, "Controllability"),
        asil: hara_types::Asil::Unknown,
    }
}

fn rated_field<T>(mapping: &serde_json::Map<String, Value>, key: &str) -> RatedValue<T>
where
    T: Default + serde::de::DeserializeOwned,
{
    let Some(raw) = mapping.get(key) else {
        return RatedValue::default();
    };
    // Accept both the {"value", "reason"} object and a bare code string.
    if let Ok(rated) = serde_json::from_value::<RatedValue<T>>(raw.clone()) {
        return rated;
    }
    if let Ok(value) = serde_json::from_value::<T>(raw.clone()) {
        return RatedValue::new(value, "");
    }
    warn!(key, "malformed classification factor, treating as UNKNOWN");
    RatedValue::default()
}
