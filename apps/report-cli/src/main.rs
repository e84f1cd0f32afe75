//! Compliance report CLI
//!
//! Renders a JSON array of compliance results into a PDF report.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use report_core::{ReportConfig, ReportGenerator, ReportStats};
use serde::Serialize;
use shared_types::ComplianceResult;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "compliance-report")]
#[command(version, about = "Render compliance results as a PDF report")]
struct Args {
    /// JSON file holding an array of results, or `-` for stdin
    input: PathBuf,

    /// JSON configuration overriding report text and layout
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the report is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Generation time (RFC 3339); defaults to now
    #[arg(long)]
    timestamp: Option<DateTime<Utc>>,

    /// Reject results whose overall status disagrees with their rules
    #[arg(long)]
    validate_status: bool,

    /// Print a JSON summary instead of the bare output path
    #[arg(long)]
    json: bool,
}

/// Summary printed with `--json`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Written<'a> {
    path: &'a Path,
    page_count: usize,
    compliance_rate: u8,
    stats: &'a ReportStats,
}

fn read_results(input: &Path) -> Result<Vec<ComplianceResult>> {
    let mut content = String::new();
    if input.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read results from stdin")?;
    } else {
        content = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
    }
    serde_json::from_str(&content).context("Results must be a JSON array of compliance results")
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the written path only
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if args.validate_status {
        config.validate_status = true;
    }

    let results = read_results(&args.input)?;
    let generated_at = args.timestamp.unwrap_or_else(Utc::now);
    tracing::info!("Loaded {} results", results.len());

    let Some(report) = ReportGenerator::new(config).generate(&results, &generated_at)? else {
        eprintln!("Nothing to report: no results supplied");
        return Ok(());
    };

    let path = report
        .save_in(&args.output_dir)
        .with_context(|| format!("Failed to write report to {}", args.output_dir.display()))?;
    if args.json {
        let written = Written {
            path: &path,
            page_count: report.page_count,
            compliance_rate: report.stats.compliance_rate(),
            stats: &report.stats,
        };
        println!("{}", serde_json::to_string_pretty(&written)?);
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
