//! IEC 61508 style risk parameter codes and the resolved SIL value.
//!
//! Each parameter family is a closed enum with an explicit `Unknown`
//! variant that serializes to `"?"`. `Unknown` means "code not recoverable
//! from the generator's text" and must flow through to an unresolved SIL;
//! it is never replaced by a default tier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity / consequence of the hazard (C parameter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityCode {
    /// No injury.
    C1,
    /// Minor injury.
    C2,
    /// Major injury.
    C3,
    /// Fatal injury.
    C4,
    #[serde(rename = "?")]
    Unknown,
}

/// Frequency of exposure to the hazardous zone (F parameter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyCode {
    /// Rare exposure.
    F1,
    /// Medium exposure.
    F2,
    /// Regular exposure.
    F3,
    #[serde(rename = "?")]
    Unknown,
}

/// Possibility of avoiding the hazard (P parameter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvoidanceCode {
    /// Avoidance possible (>= 10%).
    P1,
    /// Avoidance practically impossible (< 10%).
    P2,
    #[serde(rename = "?")]
    Unknown,
}

/// Probability that external measures mitigate the hazard (W parameter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MitigationCode {
    W1,
    W2,
    W3,
    #[serde(rename = "?")]
    Unknown,
}

macro_rules! code_impl {
    ($ty:ident, $($variant:ident => $digit:literal),+) => {
        impl $ty {
            /// Numeric suffix of the code, `None` for `Unknown`.
            pub fn digit(self) -> Option<u8> {
                match self {
                    $( $ty::$variant => Some($digit), )+
                    $ty::Unknown => None,
                }
            }

            /// Code for a numeric suffix, `None` when out of range.
            pub fn from_digit(digit: u8) -> Option<Self> {
                match digit {
                    $( $digit => Some($ty::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( $ty::$variant => write!(f, stringify!($variant)), )+
                    $ty::Unknown => write!(f, "?"),
                }
            }
        }
    };
}

code_impl!(SeverityCode, C1 => 1, C2 => 2, C3 => 3, C4 => 4);
code_impl!(FrequencyCode, F1 => 1, F2 => 2, F3 => 3);
code_impl!(AvoidanceCode, P1 => 1, P2 => 2);
code_impl!(MitigationCode, W1 => 1, W2 => 2, W3 => 3);

/// Safety Integrity Level resolved from the risk graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sil {
    #[serde(rename = "1")]
    Sil1,
    #[serde(rename = "2")]
    Sil2,
    #[serde(rename = "3")]
    Sil3,
    #[serde(rename = "4")]
    Sil4,
    /// Process measures suffice; the hazard rate is already below the
    /// SIL 4 band.
    #[serde(rename = "P")]
    ProcessOnly,
    /// No SIL applicable (hazard rate above the SIL 1 band, or severity
    /// tier without injury potential).
    #[serde(rename = "-")]
    NotApplicable,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl fmt::Display for Sil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Sil::Sil1 => "1",
            Sil::Sil2 => "2",
            Sil::Sil3 => "3",
            Sil::Sil4 => "4",
            Sil::ProcessOnly => "P",
            Sil::NotApplicable => "-",
            Sil::Unknown => "UNKNOWN",
        };
        write!(f, "{}", text)
    }
}

/// One hazard's IEC 61508 parameter assignment, terminal once the SIL is
/// annotated. The wire shape uses the standard's single-letter field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskParameterRecord {
    /// Generator-assigned index, when one was present in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx: Option<String>,
    pub hazard: String,
    #[serde(rename = "C")]
    pub severity: SeverityCode,
    #[serde(rename = "F")]
    pub frequency: FrequencyCode,
    #[serde(rename = "P")]
    pub avoidance: AvoidanceCode,
    #[serde(rename = "W")]
    pub mitigation: MitigationCode,
    #[serde(rename = "SIL", default = "unknown_sil")]
    pub sil: Sil,
}

fn unknown_sil() -> Sil {
    Sil::Unknown
}

impl RiskParameterRecord {
    /// Record with every parameter unresolved, used when a hazard's
    /// generator response could not be interpreted at all.
    pub fn unresolved(hazard: impl Into<String>) -> Self {
        Self {
            idx: None,
            hazard: hazard.into(),
            severity: SeverityCode::Unknown,
            frequency: FrequencyCode::Unknown,
            avoidance: AvoidanceCode::Unknown,
            mitigation: MitigationCode::Unknown,
            sil: Sil::Unknown,
        }
    }

    /// Terminal copy of the record with its SIL annotation applied.
    pub fn with_sil(&self, sil: Sil) -> Self {
        let mut annotated = self.clone();
        annotated.sil = sil;
        annotated
    }
}
