//! Flat-file persistence of assessment results.
//!
//! Reports are a single JSON file with no schema versioning; loading
//! tolerates missing optional keys so older files and hand-edited reports
//! keep working. Writes are atomic (write to `.tmp`, then rename) to
//! prevent corruption from interrupted writes.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hara_types::{AsilParameterRecord, InjuryStatistics, RiskParameterRecord};

use crate::error::PipelineError;

/// Persisted outcome of an assessment run.
///
/// Unresolved hazards are kept in the record lists tagged UNKNOWN/`-` so a
/// reviewer can complete them manually.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub system: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<InjuryStatistics>,
    #[serde(default)]
    pub iec_records: Vec<RiskParameterRecord>,
    #[serde(default)]
    pub asil_records: Vec<AsilParameterRecord>,
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
}

impl AssessmentReport {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            statistics: None,
            iec_records: Vec::new(),
            asil_records: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    /// Save the report as pretty-printed JSON, atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Load a previously saved report.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
