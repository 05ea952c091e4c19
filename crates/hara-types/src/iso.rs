//! ISO 26262 style hazard classification and the resolved ASIL value.
//!
//! Severity, exposure, and controllability are closed enums; class 0 is a
//! real rating (the hazard needs no integrity level), `Unknown` means the
//! generator could not justify any rating. The two must never be conflated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Potential severity of the resulting harm (S class).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityClass {
    S0,
    S1,
    S2,
    S3,
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Probability of the operational situation (E class).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExposureClass {
    E0,
    E1,
    E2,
    E3,
    E4,
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Ability of the persons involved to avoid the harm (C class).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllabilityClass {
    C0,
    C1,
    C2,
    C3,
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

macro_rules! class_impl {
    ($ty:ident, $($variant:ident => $class:literal),+) => {
        impl $ty {
            /// Numeric class, `None` for `Unknown`.
            pub fn class(self) -> Option<u8> {
                match self {
                    $( $ty::$variant => Some($class), )+
                    $ty::Unknown => None,
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( $ty::$variant => write!(f, stringify!($variant)), )+
                    $ty::Unknown => write!(f, "UNKNOWN"),
                }
            }
        }
    };
}

class_impl!(SeverityClass, S0 => 0, S1 => 1, S2 => 2, S3 => 3);
class_impl!(ExposureClass, E0 => 0, E1 => 1, E2 => 2, E3 => 3, E4 => 4);
class_impl!(ControllabilityClass, C0 => 0, C1 => 1, C2 => 2, C3 => 3);

/// A rated classification together with the generator's justification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RatedValue<T> {
    pub value: T,
    #[serde(default)]
    pub reason: String,
}

impl<T> RatedValue<T> {
    pub fn new(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            reason: reason.into(),
        }
    }
}

/// Automotive Safety Integrity Level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asil {
    /// Quality-managed; standard quality processes suffice.
    #[serde(rename = "QM")]
    Qm,
    A,
    B,
    C,
    D,
    /// One of S/E/C is class 0: no ASIL assignment is required.
    #[serde(rename = "-")]
    NotRequired,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl fmt::Display for Asil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Asil::Qm => "QM",
            Asil::A => "A",
            Asil::B => "B",
            Asil::C => "C",
            Asil::D => "D",
            Asil::NotRequired => "-",
            Asil::Unknown => "UNKNOWN",
        };
        write!(f, "{}", text)
    }
}

/// One hazard's ISO 26262 classification, terminal once the ASIL is
/// annotated. Wire keys are capitalized as in the assessment reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsilParameterRecord {
    pub hazard: String,
    #[serde(rename = "Severity", default)]
    pub severity: RatedValue<SeverityClass>,
    #[serde(rename = "Exposure", default)]
    pub exposure: RatedValue<ExposureClass>,
    #[serde(rename = "Controllability", default)]
    pub controllability: RatedValue<ControllabilityClass>,
    #[serde(rename = "ASIL", default = "unknown_asil")]
    pub asil: Asil,
}

fn unknown_asil() -> Asil {
    Asil::Unknown
}

impl AsilParameterRecord {
    /// Record with every factor unresolved, used when a hazard's generator
    /// response could not be interpreted at all.
    pub fn unresolved(hazard: impl Into<String>) -> Self {
        Self {
            hazard: hazard.into(),
            severity: RatedValue::default(),
            exposure: RatedValue::default(),
            controllability: RatedValue::default(),
            asil: Asil::Unknown,
        }
    }

    /// Terminal copy of the record with its ASIL annotation applied.
    pub fn with_asil(&self, asil: Asil) -> Self {
        let mut annotated = self.clone();
        annotated.asil = asil;
        annotated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_zero_is_distinct_from_unknown() {
        assert_eq!(SeverityClass::S0.class(), Some(0));
        assert_eq!(SeverityClass::Unknown.class(), None);
        assert_eq!(ExposureClass::E0.class(), Some(0));
        assert_eq!(ControllabilityClass::Unknown.class(), None);
    }

    #[test]
    fn record_wire_shape_matches_report_keys() {
        let record = AsilParameterRecord {
            hazard: "unintended acceleration".to_string(),
            severity: RatedValue::new(SeverityClass::S3, "head-on collision likely"),
            exposure: RatedValue::new(ExposureClass::E4, "occurs on every drive"),
            controllability: RatedValue::new(ControllabilityClass::C3, "no driver mitigation"),
            asil: Asil::D,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["Severity"]["value"], "S3");
        assert_eq!(json["Exposure"]["value"], "E4");
        assert_eq!(json["Controllability"]["value"], "C3");
        assert_eq!(json["ASIL"], "D");
    }

    #[test]
    fn record_tolerates_missing_factors() {
        let record: AsilParameterRecord = serde_json::from_value(serde_json::json!({
            "hazard": "h",
            "Severity": {"value": "S2"}
        }))
        .unwrap();
        assert_eq!(record.severity.value, SeverityClass::S2);
        assert_eq!(record.severity.reason, "");
        assert_eq!(record.exposure.value, ExposureClass::Unknown);
        assert_eq!(record.asil, Asil::Unknown);
    }
}
