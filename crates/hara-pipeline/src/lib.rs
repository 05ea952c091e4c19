//! Assessment orchestration.
//!
//! Wires the text-generation collaborator to the deterministic kernel:
//! injury statistics acquisition, one generator call per hazard fanned out
//! concurrently, extraction and normalization of every response, SIL/ASIL
//! resolution, and flat-file report persistence. Output order always
//! follows input order, never completion order.

pub mod error;
pub mod iec;
pub mod iso;
pub mod prompts;
pub mod report;
pub mod stats;

pub use error::PipelineError;
pub use iec::{run_iec_assessment, IecAssessment};
pub use iso::run_asil_assessment;
pub use report::AssessmentReport;
pub use stats::fetch_injury_statistics;
