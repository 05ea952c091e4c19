//! End-to-end assessment flow against a scripted generator: statistics
//! acquisition, concurrent hazard rating, SIL/ASIL resolution, and report
//! persistence, without any network access.

use hara_model::ScriptedGenerator;
use hara_pipeline::{run_asil_assessment, run_iec_assessment, AssessmentReport};
use hara_types::{Asil, HazardRecord, MitigationCode, SeverityCode, Sil};

const STATS_RESPONSE: &str = r#"```json
[{"Industry": "manufacturing",
  "Total Number of workers": 600000,
  "Number of minor injuries per year": 31000,
  "Number of major injuries per year": 500,
  "Number of fatal injuries per year": 10}]
```"#;

fn hazards() -> Vec<HazardRecord> {
    vec![
        HazardRecord::new("1", "operator struck by moving arm"),
        HazardRecord::new("2", "gripper drops payload onto walkway"),
        HazardRecord::new("3", "controller reboots mid-motion"),
    ]
}

#[tokio::test]
async fn iec_run_rates_every_hazard_and_survives_persistence() {
    let generator = ScriptedGenerator::new([
        STATS_RESPONSE,
        // Fatal, frequent, unavoidable: worst cell of the graph.
        r#"{"hazard": "operator struck by moving arm",
            "C": {"value": "C4", "reason": "crushing injuries can be fatal"},
            "F": {"value": "F3", "reason": "operators share the cell"},
            "P": {"value": "P2", "reason": "arm moves faster than reaction time"},
            "W": {"value": "W3"}}"#,
        // Single-quoted pseudo-JSON with prose around it still resolves.
        "Here is my rating: {'hazard': 'gripper drops payload onto walkway', 'C': 'C3', 'F': 'F1', 'P': 'P1', 'W': 'W3'} Hope this helps!",
        // A refusal degrades this one hazard only.
        "I am unable to assess this hazard.",
    ]);

    let hazards = hazards();
    let assessment = run_iec_assessment(
        &generator,
        "a collaborative welding robot",
        &hazards,
        MitigationCode::W3,
    )
    .await
    .unwrap();

    assert_eq!(assessment.records.len(), 3);
    assert_eq!(assessment.records[0].sil, Sil::ProcessOnly);
    assert_eq!(assessment.records[1].severity, SeverityCode::C3);
    assert_eq!(assessment.records[1].sil, Sil::Sil1);
    assert_eq!(assessment.records[2].hazard, "controller reboots mid-motion");
    assert_eq!(assessment.records[2].sil, Sil::Unknown);
    assert_eq!(assessment.records[2].idx.as_deref(), Some("3"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iec.json");
    let mut report = AssessmentReport::new("a collaborative welding robot");
    report.statistics = Some(assessment.statistics.clone());
    report.iec_records = assessment.records.clone();
    report.save(&path).unwrap();

    let loaded = AssessmentReport::load(&path).unwrap();
    assert_eq!(loaded.iec_records.len(), 3);
    assert_eq!(loaded.iec_records[0].sil, Sil::ProcessOnly);
    assert_eq!(loaded.statistics.unwrap().minor_per_year, 31_000);
}

#[tokio::test]
async fn asil_run_resolves_the_matrix_for_each_hazard() {
    let generator = ScriptedGenerator::new([
        r#"{"hazard": "operator struck by moving arm",
            "Severity": {"value": "S3", "reason": "life-threatening crush"},
            "Exposure": {"value": "E4", "reason": "every production shift"},
            "Controllability": {"value": "C3", "reason": "no time to react"}}"#,
        r#"{"hazard": "gripper drops payload onto walkway",
            "Severity": {"value": "S2"},
            "Exposure": {"value": "E2"},
            "Controllability": {"value": "C2"}}"#,
        r#"{"hazard": "controller reboots mid-motion",
            "Severity": {"value": "S1"},
            "Exposure": {"value": "E1"},
            "Controllability": {"value": "C1"}}"#,
    ]);

    let records = run_asil_assessment(&generator, &hazards()).await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].asil, Asil::D);
    assert_eq!(records[1].asil, Asil::Qm);
    assert_eq!(records[2].asil, Asil::Qm);
    assert_eq!(records[0].severity.reason, "life-threatening crush");
}

#[tokio::test]
async fn both_runs_share_one_report_file() {
    let generator = ScriptedGenerator::new([
        STATS_RESPONSE,
        r#"{"hazard": "operator struck by moving arm",
            "C": {"value": "C3"}, "F": {"value": "F2"}, "P": {"value": "P2"}, "W": {"value": "W3"}}"#,
    ]);
    let hazards = vec![HazardRecord::new("1", "operator struck by moving arm")];
    let iec = run_iec_assessment(&generator, "a palletizer", &hazards, MitigationCode::W3)
        .await
        .unwrap();

    let iso_generator = ScriptedGenerator::new([
        r#"{"hazard": "operator struck by moving arm",
            "Severity": {"value": "S3"}, "Exposure": {"value": "E3"},
            "Controllability": {"value": "C2"}}"#,
    ]);
    let asil_records = run_asil_assessment(&iso_generator, &hazards).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined.json");
    let mut report = AssessmentReport::new("a palletizer");
    report.statistics = Some(iec.statistics);
    report.iec_records = iec.records;
    report.asil_records = asil_records;
    report.save(&path).unwrap();

    let loaded = AssessmentReport::load(&path).unwrap();
    assert_eq!(loaded.iec_records.len(), 1);
    assert_eq!(loaded.asil_records.len(), 1);
    assert_eq!(loaded.asil_records[0].asil, Asil::B);
}
