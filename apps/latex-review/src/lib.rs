//! LaTeX review command line front end
//!
//! Discovers sources under the configured root, runs the review engine over
//! them in order and writes the JSON report.

pub mod discovery;
pub mod output;

use anyhow::Context;
use review_engine::{EngineOptions, ReviewConfig, ReviewEngine, ReviewSummary};
use review_types::Report;
use std::path::PathBuf;

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: ReviewSummary,
    pub report: Report,
    pub report_path: PathBuf,
}

pub fn run(config: &ReviewConfig) -> anyhow::Result<RunOutcome> {
    let documents = discovery::discover_documents(&config.root, &config.extensions)
        .with_context(|| format!("Failed to collect sources under {}", config.root.display()))?;
    tracing::info!(
        root = %config.root.display(),
        documents = documents.len(),
        "collected sources"
    );

    let options = EngineOptions::from_config(config).context("Failed to prepare review")?;
    let engine = ReviewEngine::new(options).context("Failed to build rule chain")?;

    let mut report = Report::new();
    let summary = engine.review_files(&documents, &mut report)?;

    let report_path = config.report_path();
    output::write_report(&report, &report_path)?;
    tracing::info!(path = %report_path.display(), issues = report.total(), "wrote report");

    Ok(RunOutcome {
        summary,
        report,
        report_path,
    })
}
