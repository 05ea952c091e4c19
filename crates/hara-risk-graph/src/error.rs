use hara_types::InjuryStatisticsError;
use thiserror::Error;

/// Errors from risk graph construction.
///
/// Construction failures are fatal to the whole assessment run: every SIL
/// depends on the statistics denominator, so nothing here is recovered
/// silently.
#[derive(Error, Debug)]
pub enum RiskGraphError {
    #[error(transparent)]
    InvalidStatistics(#[from] InjuryStatisticsError),

    #[error("mitigation tier must be a concrete code, not '?'")]
    UnknownMitigation,
}
