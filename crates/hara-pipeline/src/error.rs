use hara_risk_graph::RiskGraphError;
use hara_types::InjuryStatisticsError;
use thiserror::Error;

/// Errors that abort an assessment run.
///
/// Per-hazard problems never appear here: a hazard whose response cannot be
/// interpreted degrades to an UNKNOWN-tagged record and the batch
/// continues. Only run-level failures (no statistics denominator, no graph,
/// broken report I/O) are worth stopping for.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("injury statistics unavailable: {reason}")]
    StatsUnavailable { reason: String },

    #[error(transparent)]
    InvalidStatistics(#[from] InjuryStatisticsError),

    #[error(transparent)]
    RiskGraph(#[from] RiskGraphError),

    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
