use std::collections::BTreeMap;

use tracing::{debug, warn};

use hara_types::{InjuryStatistics, MitigationCode, RiskParameterRecord, Sil};

use crate::error::RiskGraphError;

/// Operating hours per year used to convert annual incident rates to PFH.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// One row of the risk graph: the exponent at each step of the addition
/// chain, plus the SIL the final exponent maps to. Keeping the
/// intermediate exponents makes the tie-breaking auditable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiskGraphRow {
    /// Severity tier's PFH exponent.
    pub base_exponent: i32,
    /// After the frequency adjustment (+2/+1/+0 for F1/F2/F3).
    pub frequency_exponent: i32,
    /// After the avoidance adjustment (+1/+0 for P1/P2).
    pub final_exponent: i32,
    pub sil: Sil,
}

/// Immutable decision table from 4-digit CFPW codes to SILs.
///
/// Keys are positional: `severity*1000 + frequency*100 + avoidance*10 +
/// mitigation`. Encoding the parameters as one integer keeps the table
/// dense and the dominance order of the digits explicit.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskGraph {
    rows: BTreeMap<u16, RiskGraphRow>,
    mitigation: MitigationCode,
}

impl RiskGraph {
    /// Build the graph for one assessment run.
    ///
    /// The mitigation tier is a run-level configuration: the original
    /// IEC 61508 risk graph spans W1..W3, but an assessment is built
    /// against exactly one tier, and that tier's digit becomes the fixed
    /// last digit of every key.
    pub fn build(
        stats: &InjuryStatistics,
        mitigation: MitigationCode,
    ) -> Result<Self, RiskGraphError> {
        stats.validate()?;
        let w_digit = mitigation
            .digit()
            .ok_or(RiskGraphError::UnknownMitigation)?;

        let minor = pfh_exponent(stats.minor_per_year, stats.total_workers);
        let major = pfh_exponent(stats.major_per_year, stats.total_workers);
        let fatal = pfh_exponent(stats.fatal_per_year, stats.total_workers);
        debug!(
            industry = %stats.industry,
            minor, major, fatal,
            "derived PFH exponents"
        );

        let mut rows = BTreeMap::new();
        for severity in [2u16, 3, 4] {
            for frequency in [1u16, 2, 3] {
                for avoidance in [1u16, 2] {
                    let key =
                        severity * 1000 + frequency * 100 + avoidance * 10 + u16::from(w_digit);
                    let base_exponent = match severity {
                        2 => minor,
                        3 => major,
                        4 => fatal,
                        _ => 0,
                    };
                    let frequency_exponent = base_exponent
                        + match frequency {
                            1 => 2,
                            2 => 1,
                            _ => 0,
                        };
                    let final_exponent = frequency_exponent + if avoidance == 1 { 1 } else { 0 };
                    rows.insert(
                        key,
                        RiskGraphRow {
                            base_exponent,
                            frequency_exponent,
                            final_exponent,
                            sil: sil_for_exponent(final_exponent),
                        },
                    );
                }
            }
        }

        Ok(Self { rows, mitigation })
    }

    /// Resolve the SIL for one hazard's parameter record.
    ///
    /// Any unknown C/F/P code yields `Sil::Unknown`; the table is never
    /// consulted with a guessed digit. The mitigation digit is fixed to
    /// the tier the graph was built with.
    pub fn resolve(&self, record: &RiskParameterRecord) -> Sil {
        let (Some(c), Some(f), Some(p)) = (
            record.severity.digit(),
            record.frequency.digit(),
            record.avoidance.digit(),
        ) else {
            return Sil::Unknown;
        };
        let Some(w) = self.mitigation.digit() else {
            return Sil::Unknown;
        };
        let key = (u16::from(c) * 100 + u16::from(f) * 10 + u16::from(p)) * 10 + u16::from(w);
        match self.rows.get(&key) {
            Some(row) => row.sil,
            None => {
                // C1 (no-injury severity) falls outside the enumerated
                // table; it degrades to Unknown for manual review rather
                // than crashing the batch.
                warn!(key, hazard = %record.hazard, "no risk graph entry for code");
                Sil::Unknown
            }
        }
    }

    /// Resolve and produce the terminal annotated record.
    ///
    /// When the lookup actually consulted the table, the record's W code is
    /// pinned to the tier the graph was built with; an unresolved record
    /// keeps whatever the normalizer recovered.
    pub fn annotate(&self, record: &RiskParameterRecord) -> RiskParameterRecord {
        let sil = self.resolve(record);
        let mut annotated = record.with_sil(sil);
        if sil != Sil::Unknown {
            annotated.mitigation = self.mitigation;
        }
        annotated
    }

    /// Mitigation tier the graph was built with.
    pub fn mitigation(&self) -> MitigationCode {
        self.mitigation
    }

    /// Row for a raw 4-digit code, mainly for inspection and audit output.
    pub fn row(&self, code: u16) -> Option<&RiskGraphRow> {
        self.rows.get(&code)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Incidents per worker-year converted to an hourly rate, reduced to the
/// exponent of its one-significant-digit scientific representation.
///
/// The exponent is taken after rounding, so 9.97e-8 counts as 1.0e-7 and
/// yields -7. A zero incident count gives PFH 0.0, whose representation
/// `0.0e0` yields exponent 0 and therefore no applicable SIL.
fn pfh_exponent(incidents_per_year: u64, total_workers: u64) -> i32 {
    let pfh = incidents_per_year as f64 / total_workers as f64 / HOURS_PER_YEAR;
    let formatted = format!("{:.1e}", pfh);
    formatted
        .split('e')
        .nth(1)
        .and_then(|exp| exp.parse().ok())
        .unwrap_or(0)
}

/// Threshold table from final exponent to SIL.
///
/// Ordering decision: the four exact bands are checked before the
/// process-only band, so -9 and below is always `ProcessOnly` and the
/// bands cannot overlap. Exponents shallower than -5 (including 0 from a
/// zero incident count) need no SIL.
fn sil_for_exponent(exponent: i32) -> Sil {
    match exponent {
        -8 => Sil::Sil4,
        -7 => Sil::Sil3,
        -6 => Sil::Sil2,
        -5 => Sil::Sil1,
        e if e <= -9 => Sil::ProcessOnly,
        _ => Sil::NotApplicable,
    }
}
