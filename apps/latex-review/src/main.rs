//! LaTeX review binary
//!
//! Entry point: loads configuration, applies command line overrides and runs
//! the review over the project.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use review_engine::{ReviewConfig, UnderscoreScope};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const TIME_FORMAT: &str = "%d/%m/%Y - %H:%M:%S";

#[derive(Parser, Debug)]
#[command(name = "latex-review")]
#[command(
    version,
    about = "Detect and safely fix common writing and formatting defects in LaTeX sources"
)]
struct Args {
    /// Project root: a directory to search, or a single source file
    root: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report output path
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Bibliography file used to check citation keys
    #[arg(short, long)]
    bibliography: Option<PathBuf>,

    /// Word list enabling spelling suggestions
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Maximum edit distance for spelling suggestions
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    max_edit_distance: Option<u8>,

    /// Pronoun language pack to check (repeatable)
    #[arg(short, long = "language")]
    languages: Vec<String>,

    /// Which part of a line the underscore fixer may rewrite
    #[arg(long, value_enum)]
    underscore_scope: Option<ScopeArg>,

    /// Report without writing any source file
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScopeArg {
    Code,
    Line,
}

impl From<ScopeArg> for UnderscoreScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Code => UnderscoreScope::Code,
            ScopeArg::Line => UnderscoreScope::Line,
        }
    }
}

impl Args {
    fn load_config(&self) -> anyhow::Result<ReviewConfig> {
        let mut config = match &self.config {
            Some(path) => ReviewConfig::from_file(path)?,
            None => ReviewConfig::default(),
        };

        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(report) = &self.report {
            config.report = report.clone();
        }
        if let Some(bibliography) = &self.bibliography {
            config.bibliography = Some(bibliography.clone());
        }
        if let Some(dictionary) = &self.dictionary {
            config.dictionary = Some(dictionary.clone());
        }
        if let Some(distance) = self.max_edit_distance {
            config.max_edit_distance = distance;
        }
        if !self.languages.is_empty() {
            config.languages = self.languages.clone();
        }
        if let Some(scope) = self.underscore_scope {
            config.underscore_scope = scope.into();
        }
        config.dry_run |= self.dry_run;

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.load_config()?;
    let started = chrono::Local::now();
    tracing::info!("Starting latex-review v{}", env!("CARGO_PKG_VERSION"));

    let outcome = latex_review::run(&config)?;

    for (category, count) in outcome.report.counts() {
        if count > 0 {
            tracing::info!(category = %category, count, "issues");
        }
    }

    let finished = chrono::Local::now();
    tracing::info!(
        documents = outcome.summary.documents,
        changed = outcome.summary.changed,
        applied_fixes = outcome.report.applied_fixes(),
        dry_run = config.dry_run,
        "Review finished"
    );
    tracing::info!(
        "Start time: {} | Finish time: {} | Execution time: {:.3}s",
        started.format(TIME_FORMAT),
        finished.format(TIME_FORMAT),
        (finished - started).num_milliseconds() as f64 / 1000.0
    );

    Ok(())
}
