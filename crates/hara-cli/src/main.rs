//! Command line entrypoint for assessment runs.
//!
//! Reads a hazard list from a plain text file (one hazard per line), runs
//! the requested assessment against an OpenAI-compatible endpoint, prints
//! the resulting table as JSON, and optionally persists a report file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hara_model::{OpenAiConfig, OpenAiGenerator};
use hara_pipeline::{run_asil_assessment, run_iec_assessment, AssessmentReport};
use hara_types::{HazardRecord, MitigationCode};

#[derive(Parser)]
#[command(name = "hara", about = "Model-assisted hazard analysis and risk assessment")]
#[command(version)]
struct Cli {
    /// Chat completion model to use
    #[arg(long, env = "HARA_MODEL", default_value = "gpt-4o-mini", global = true)]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// IEC 61508 assessment: injury statistics, risk graph, SIL per hazard
    Iec(IecArgs),

    /// ISO 26262 assessment: S/E/C classification, ASIL per hazard
    Asil(AsilArgs),
}

#[derive(Args)]
struct IecArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Demand rate tier the risk graph is built for
    #[arg(long, value_enum, default_value_t = MitigationArg::W3)]
    mitigation: MitigationArg,
}

#[derive(Args)]
struct AsilArgs {
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args)]
struct RunArgs {
    /// One-sentence description of the system under assessment
    #[arg(short, long)]
    system: String,

    /// Hazard list file, one hazard description per line
    #[arg(short = 'f', long)]
    hazards: PathBuf,

    /// Write the full report to this path as JSON
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MitigationArg {
    W1,
    W2,
    W3,
}

impl From<MitigationArg> for MitigationCode {
    fn from(arg: MitigationArg) -> Self {
        match arg {
            MitigationArg::W1 => MitigationCode::W1,
            MitigationArg::W2 => MitigationCode::W2,
            MitigationArg::W3 => MitigationCode::W3,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = OpenAiConfig::from_env(&cli.model)?;
    let generator = OpenAiGenerator::new(config);

    match cli.command {
        Commands::Iec(args) => {
            let hazards = load_hazards(&args.run.hazards)?;
            let assessment = run_iec_assessment(
                &generator,
                &args.run.system,
                &hazards,
                args.mitigation.into(),
            )
            .await?;

            let mut report = AssessmentReport::new(&args.run.system);
            report.statistics = Some(assessment.statistics);
            report.iec_records = assessment.records;
            println!("{}", serde_json::to_string_pretty(&report.iec_records)?);
            write_report(&report, args.run.out.as_deref())?;
        }
        Commands::Asil(args) => {
            let hazards = load_hazards(&args.run.hazards)?;
            let records = run_asil_assessment(&generator, &hazards).await;

            let mut report = AssessmentReport::new(&args.run.system);
            report.asil_records = records;
            println!("{}", serde_json::to_string_pretty(&report.asil_records)?);
            write_report(&report, args.run.out.as_deref())?;
        }
    }

    Ok(())
}

/// One hazard per non-empty line; the line number (1-based) becomes the id.
fn load_hazards(path: &Path) -> anyhow::Result<Vec<HazardRecord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading hazard list {}", path.display()))?;
    let hazards: Vec<HazardRecord> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| HazardRecord::new((i + 1).to_string(), line))
        .collect();
    anyhow::ensure!(
        !hazards.is_empty(),
        "hazard list {} contains no hazards",
        path.display()
    );
    Ok(hazards)
}

fn write_report(report: &AssessmentReport, out: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = out {
        report
            .save(path)
            .with_context(|| format!("writing report {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }
    Ok(())
}
