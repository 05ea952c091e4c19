use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from injury statistics validation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InjuryStatisticsError {
    #[error("total worker count must be positive (industry: {industry:?})")]
    ZeroWorkers { industry: String },
}

/// Annual injury statistics for one industry sector.
///
/// These numbers are the denominator and numerators of every PFH magnitude
/// the risk graph derives, so `total_workers` must be positive before a
/// graph is built. Counts are per calendar year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryStatistics {
    pub industry: String,
    pub total_workers: u64,
    pub minor_per_year: u64,
    pub major_per_year: u64,
    pub fatal_per_year: u64,
}

impl InjuryStatistics {
    pub fn new(
        industry: impl Into<String>,
        total_workers: u64,
        minor_per_year: u64,
        major_per_year: u64,
        fatal_per_year: u64,
    ) -> Self {
        Self {
            industry: industry.into(),
            total_workers,
            minor_per_year,
            major_per_year,
            fatal_per_year,
        }
    }

    /// Check the arithmetic-domain invariant: a zero worker count would
    /// poison every SIL in the run and must be rejected up front.
    pub fn validate(&self) -> Result<(), InjuryStatisticsError> {
        if self.total_workers == 0 {
            return Err(InjuryStatisticsError::ZeroWorkers {
                industry: self.industry.clone(),
            });
        }
        Ok(())
    }
}
