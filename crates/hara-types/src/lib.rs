//! Shared data model for the HARA automation kernel.
//!
//! Everything the deterministic engines exchange lives here: hazard records,
//! per-industry injury statistics, the discrete IEC 61508 risk parameter
//! codes, the ISO 26262 severity/exposure/controllability classes, and the
//! resolved SIL/ASIL values. Each record kind is an explicit type with its
//! wire shape pinned down by serde attributes; "unknown" is always a named
//! variant, never a silent default.

pub mod hazard;
pub mod iec;
pub mod injury;
pub mod iso;

pub use hazard::HazardRecord;
pub use iec::{AvoidanceCode, FrequencyCode, MitigationCode, RiskParameterRecord, SeverityCode, Sil};
pub use injury::{InjuryStatistics, InjuryStatisticsError};
pub use iso::{
    Asil, AsilParameterRecord, ControllabilityClass, ExposureClass, RatedValue, SeverityClass,
};
