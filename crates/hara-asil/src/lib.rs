//! ISO 26262 style ASIL decision matrix.
//!
//! The matrix is a fixed constant, total over severity 1-3, exposure 1-4,
//! and controllability 1-3. Class 0 in any factor means the hazard needs no
//! integrity rating and is handled before the lookup; `Unknown` in any
//! factor makes the whole result `Unknown` with no partial inference.

use hara_types::{Asil, AsilParameterRecord};

/// Resolve the ASIL for one hazard's S/E/C classification.
pub fn resolve_asil(record: &AsilParameterRecord) -> Asil {
    let (Some(s), Some(e), Some(c)) = (
        record.severity.value.class(),
        record.exposure.value.class(),
        record.controllability.value.class(),
    ) else {
        return Asil::Unknown;
    };
    if s == 0 || e == 0 || c == 0 {
        return Asil::NotRequired;
    }
    matrix(s, e, c)
}

/// Resolve and produce the terminal annotated record.
pub fn annotate(record: &AsilParameterRecord) -> AsilParameterRecord {
    record.with_asil(resolve_asil(record))
}

/// The ISO 26262 table, written out cell by cell.
///
/// Inputs are the numeric classes with 0 already filtered out, so every
/// reachable key is one of the 36 listed combinations; anything else would
/// be a bug in the class enums, not a runtime condition.
#[rustfmt::skip]
fn matrix(s: u8, e: u8, c: u8) -> Asil {
    use Asil::{Qm, A, B, C, D};
    match (s, e, c) {
        (1, 1, 1) => Qm, (1, 1, 2) => Qm, (1, 1, 3) => Qm,
        (1, 2, 1) => Qm, (1, 2, 2) => Qm, (1, 2, 3) => Qm,
        (1, 3, 1) => Qm, (1, 3, 2) => Qm, (1, 3, 3) => A,
        (1, 4, 1) => Qm, (1, 4, 2) => A,  (1, 4, 3) => B,
        (2, 1, 1) => Qm, (2, 1, 2) => Qm, (2, 1, 3) => Qm,
        (2, 2, 1) => Qm, (2, 2, 2) => Qm, (2, 2, 3) => A,
        (2, 3, 1) => Qm, (2, 3, 2) => A,  (2, 3, 3) => B,
        (2, 4, 1) => A,  (2, 4, 2) => B,  (2, 4, 3) => C,
        (3, 1, 1) => Qm, (3, 1, 2) => Qm, (3, 1, 3) => A,
        (3, 2, 1) => Qm, (3, 2, 2) => A,  (3, 2, 3) => B,
        (3, 3, 1) => A,  (3, 3, 2) => B,  (3, 3, 3) => C,
        (3, 4, 1) => B,  (3, 4, 2) => C,  (3, 4, 3) => D,
        _ => unreachable!("class enums guarantee s in 1..=3, e in 1..=4, c in 1..=3"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hara_types::{ControllabilityClass, ExposureClass, RatedValue, SeverityClass};

    fn record(
        s: SeverityClass,
        e: ExposureClass,
        c: ControllabilityClass,
    ) -> AsilParameterRecord {
        AsilParameterRecord {
            hazard: "test hazard".to_string(),
            severity: RatedValue::new(s, ""),
            exposure: RatedValue::new(e, ""),
            controllability: RatedValue::new(c, ""),
            asil: Asil::Unknown,
        }
    }

    #[test]
    fn worst_case_is_asil_d() {
        let rec = record(SeverityClass::S3, ExposureClass::E4, ControllabilityClass::C3);
        assert_eq!(resolve_asil(&rec), Asil::D);
    }

    #[test]
    fn mild_corners_are_quality_managed() {
        let rec = record(SeverityClass::S1, ExposureClass::E1, ControllabilityClass::C1);
        assert_eq!(resolve_asil(&rec), Asil::Qm);
        let rec = record(SeverityClass::S1, ExposureClass::E4, ControllabilityClass::C1);
        assert_eq!(resolve_asil(&rec), Asil::Qm);
    }

    #[test]
    fn unknown_factor_blocks_all_inference() {
        let rec = record(
            SeverityClass::Unknown,
            ExposureClass::E4,
            ControllabilityClass::C3,
        );
        assert_eq!(resolve_asil(&rec), Asil::Unknown);
        let rec = record(
            SeverityClass::S3,
            ExposureClass::Unknown,
            ControllabilityClass::C3,
        );
        assert_eq!(resolve_asil(&rec), Asil::Unknown);
        let rec = record(
            SeverityClass::S3,
            ExposureClass::E4,
            ControllabilityClass::Unknown,
        );
        assert_eq!(resolve_asil(&rec), Asil::Unknown);
    }

    #[test]
    fn class_zero_needs_no_rating() {
        let rec = record(SeverityClass::S0, ExposureClass::E4, ControllabilityClass::C3);
        assert_eq!(resolve_asil(&rec), Asil::NotRequired);
        let rec = record(SeverityClass::S3, ExposureClass::E0, ControllabilityClass::C3);
        assert_eq!(resolve_asil(&rec), Asil::NotRequired);
        let rec = record(SeverityClass::S3, ExposureClass::E4, ControllabilityClass::C0);
        assert_eq!(resolve_asil(&rec), Asil::NotRequired);
    }

    #[test]
    fn matrix_is_total_and_monotone_in_each_factor() {
        fn rank(asil: Asil) -> i32 {
            match asil {
                Asil::Qm => 0,
                Asil::A => 1,
                Asil::B => 2,
                Asil::C => 3,
                Asil::D => 4,
                _ => panic!("matrix must only yield QM..D"),
            }
        }
        for s in 1..=3u8 {
            for e in 1..=4u8 {
                for c in 1..=3u8 {
                    let here = rank(matrix(s, e, c));
                    if s < 3 {
                        assert!(here <= rank(matrix(s + 1, e, c)));
                    }
                    if e < 4 {
                        assert!(here <= rank(matrix(s, e + 1, c)));
                    }
                    if c < 3 {
                        assert!(here <= rank(matrix(s, e, c + 1)));
                    }
                }
            }
        }
    }

    #[test]
    fn annotate_produces_terminal_record() {
        let rec = record(SeverityClass::S2, ExposureClass::E3, ControllabilityClass::C3);
        let annotated = annotate(&rec);
        assert_eq!(annotated.asil, Asil::B);
        assert_eq!(rec.asil, Asil::Unknown);
    }
}
