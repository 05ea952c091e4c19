//! Injury statistics acquisition.
//!
//! The statistics are the denominator of every PFH the risk graph derives,
//! so unlike per-hazard steps this one is allowed to fail the run: an
//! uncooperative generator or an empty extraction surfaces as
//! [`PipelineError::StatsUnavailable`] instead of a silent zero.

use serde_json::Value;
use tracing::{info, warn};

use hara_extract::{extract, ExpectedShape};
use hara_model::{ExpectedFormat, TextGenerator};
use hara_types::InjuryStatistics;

use crate::error::PipelineError;
use crate::prompts;

const KEY_INDUSTRY: &str = "Industry";
const KEY_WORKERS: &str = "Total Number of workers";
const KEY_MINOR: &str = "Number of minor injuries per year";
const KEY_MAJOR: &str = "Number of major injuries per year";
const KEY_FATAL: &str = "Number of fatal injuries per year";

/// Ask the generator for the industry's annual injury numbers and validate
/// them into [`InjuryStatistics`].
pub async fn fetch_injury_statistics(
    generator: &dyn TextGenerator,
    system_description: &str,
) -> Result<InjuryStatistics, PipelineError> {
    let messages = prompts::injury_statistics(system_description);
    let text = generator
        .generate(&messages, ExpectedFormat::Json)
        .await
        .map_err(|e| {
            warn!(model = generator.model_id(), error = %e, "statistics call failed");
            PipelineError::StatsUnavailable {
                reason: e.to_string(),
            }
        })?;

    let value = extract(&text, ExpectedShape::Sequence);
    let entry = first_mapping(&value).ok_or_else(|| PipelineError::StatsUnavailable {
        reason: "generator response contained no statistics mapping".to_string(),
    })?;

    let stats = InjuryStatistics::new(
        entry
            .get(KEY_INDUSTRY)
            .and_then(Value::as_str)
            .unwrap_or_default(),
        count_field(entry, KEY_WORKERS),
        count_field(entry, KEY_MINOR),
        count_field(entry, KEY_MAJOR),
        count_field(entry, KEY_FATAL),
    );
    stats.validate()?;
    info!(
        industry = %stats.industry,
        workers = stats.total_workers,
        "injury statistics acquired"
    );
    Ok(stats)
}

/// The response is nominally a one-element array, but generators wrap and
/// unwrap freely; accept the first mapping wherever it sits.
fn first_mapping(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.iter().find_map(first_mapping),
        _ => None,
    }
}

/// Counts arrive as integers, floats ("31000.0"), or strings with
/// separators ("600,000"). Floats are rounded to the nearest count; a
/// number outside the countable range degrades to 0 with a warning.
fn count_field(entry: &serde_json::Map<String, Value>, key: &str) -> u64 {
    match entry.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && *f < u64::MAX as f64)
                    .map(|f| f.round() as u64)
            })
            .unwrap_or_else(|| {
                warn!(key, count = %n, "count outside the valid range, treating as 0");
                0
            }),
        Some(Value::String(s)) => s
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>()
            .parse()
            .unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hara_model::ScriptedGenerator;

    #[tokio::test]
    async fn parses_the_long_form_statistics_keys() {
        let generator = ScriptedGenerator::new([r#"```json
[{"Industry": "warehouse logistics",
  "Total Number of workers": 600000,
  "Number of minor injuries per year": 31000,
  "Number of major injuries per year": 500,
  "Number of fatal injuries per year": 10}]
```"#]);
        let stats = fetch_injury_statistics(&generator, "an AGV fleet")
            .await
            .unwrap();
        assert_eq!(stats.industry, "warehouse logistics");
        assert_eq!(stats.total_workers, 600_000);
        assert_eq!(stats.fatal_per_year, 10);
    }

    #[tokio::test]
    async fn accepts_string_counts_with_separators() {
        let generator = ScriptedGenerator::new(
            [r#"[{"Industry": "x", "Total Number of workers": "600,000",
                 "Number of minor injuries per year": "31000",
                 "Number of major injuries per year": 500,
                 "Number of fatal injuries per year": 10}]"#],
        );
        let stats = fetch_injury_statistics(&generator, "x").await.unwrap();
        assert_eq!(stats.total_workers, 600_000);
        assert_eq!(stats.minor_per_year, 31_000);
    }

    #[tokio::test]
    async fn accepts_float_counts() {
        // Generators routinely emit counts as floats; zeroing them would
        // shift the PFH exponent to 0 and void every SIL in that tier.
        let generator = ScriptedGenerator::new(
            [r#"[{"Industry": "x", "Total Number of workers": 600000.0,
                 "Number of minor injuries per year": 31000.0,
                 "Number of major injuries per year": 500.0,
                 "Number of fatal injuries per year": 10}]"#],
        );
        let stats = fetch_injury_statistics(&generator, "x").await.unwrap();
        assert_eq!(stats.total_workers, 600_000);
        assert_eq!(stats.minor_per_year, 31_000);
        assert_eq!(stats.major_per_year, 500);
        assert_eq!(stats.fatal_per_year, 10);
    }

    #[tokio::test]
    async fn negative_counts_degrade_to_zero() {
        let generator = ScriptedGenerator::new(
            [r#"[{"Industry": "x", "Total Number of workers": 600000,
                 "Number of minor injuries per year": -31000,
                 "Number of major injuries per year": 500,
                 "Number of fatal injuries per year": 10}]"#],
        );
        let stats = fetch_injury_statistics(&generator, "x").await.unwrap();
        assert_eq!(stats.minor_per_year, 0);
        assert_eq!(stats.major_per_year, 500);
    }

    #[tokio::test]
    async fn unparseable_response_is_fatal() {
        let generator = ScriptedGenerator::new(["I cannot help with that."]);
        let err = fetch_injury_statistics(&generator, "x").await.unwrap_err();
        assert!(matches!(err, PipelineError::StatsUnavailable { .. }));
    }

    #[tokio::test]
    async fn zero_worker_count_is_fatal() {
        let generator = ScriptedGenerator::new(
            [r#"[{"Industry": "x", "Total Number of workers": 0,
                 "Number of minor injuries per year": 1,
                 "Number of major injuries per year": 1,
                 "Number of fatal injuries per year": 1}]"#],
        );
        let err = fetch_injury_statistics(&generator, "x").await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidStatistics(_)));
    }

    #[tokio::test]
    async fn generator_failure_is_reported_not_swallowed() {
        let generator = ScriptedGenerator::new(Vec::<String>::new());
        let err = fetch_injury_statistics(&generator, "x").await.unwrap_err();
        assert!(matches!(err, PipelineError::StatsUnavailable { .. }));
    }
}
