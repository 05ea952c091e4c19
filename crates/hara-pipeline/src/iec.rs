//! IEC 61508 assessment run.

use futures::future::join_all;
use tracing::{info, warn};

use hara_extract::{extract, normalize, ExpectedShape};
use hara_model::{ExpectedFormat, TextGenerator};
use hara_risk_graph::RiskGraph;
use hara_types::{HazardRecord, InjuryStatistics, MitigationCode, RiskParameterRecord};

use crate::error::PipelineError;
use crate::prompts;
use crate::stats::fetch_injury_statistics;

/// Outcome of one IEC 61508 run: the statistics the graph was built from
/// and one annotated record per input hazard, in input order.
#[derive(Clone, Debug)]
pub struct IecAssessment {
    pub statistics: InjuryStatistics,
    pub records: Vec<RiskParameterRecord>,
}

/// Run the full IEC 61508 path for a hazard list.
///
/// The risk graph is built exactly once, before any hazard is rated; the
/// per-hazard generator calls then fan out concurrently. Fan-in is keyed by
/// input position, so the output order is the input order regardless of
/// which call finishes first. A hazard whose response cannot be interpreted
/// yields an all-unknown record; the batch never aborts on one bad hazard.
pub async fn run_iec_assessment(
    generator: &dyn TextGenerator,
    system_description: &str,
    hazards: &[HazardRecord],
    mitigation: MitigationCode,
) -> Result<IecAssessment, PipelineError> {
    let statistics = fetch_injury_statistics(generator, system_description).await?;
    let graph = RiskGraph::build(&statistics, mitigation)?;
    info!(
        hazards = hazards.len(),
        mitigation = %graph.mitigation(),
        "risk graph built, rating hazards"
    );

    let ratings = join_all(
        hazards
            .iter()
            .map(|hazard| rate_hazard(generator, hazard)),
    )
    .await;

    let records = ratings
        .into_iter()
        .map(|record| graph.annotate(&record))
        .collect();

    Ok(IecAssessment {
        statistics,
        records,
    })
}

/// One generator call for one hazard, degraded to an unresolved record on
/// any failure.
async fn rate_hazard(generator: &dyn TextGenerator, hazard: &HazardRecord) -> RiskParameterRecord {
    let messages = prompts::iec_parameters(&hazard.description);
    let text = match generator.generate(&messages, ExpectedFormat::Json).await {
        Ok(text) => text,
        Err(e) => {
            warn!(hazard = %hazard.description, error = %e, "generator call failed");
            return unresolved_for(hazard);
        }
    };

    let value = extract(&text, ExpectedShape::Sequence);
    let mut recovered = normalize(&value);
    if recovered.is_empty() {
        warn!(hazard = %hazard.description, "response yielded no parameter record");
        return unresolved_for(hazard);
    }

    // An entry that named no hazard is attributed to the source hazard.
    let mut record = recovered.swap_remove(0).into_record(&hazard.description);
    if record.idx.is_none() {
        record.idx = Some(hazard.id.clone());
    }
    record
}

fn unresolved_for(hazard: &HazardRecord) -> RiskParameterRecord {
    let mut record = RiskParameterRecord::unresolved(&hazard.description);
    record.idx = Some(hazard.id.clone());
    record
}
