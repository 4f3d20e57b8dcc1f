//! Violation Pipeline Driver
//!
//! Loads settings and raw rows, runs the feature pipeline and writes the
//! frozen feature table and optional correlation diagnostics as JSON.

pub mod args;
pub mod io;
pub mod settings;

use anyhow::{Context, Result};
use args::{Command, PipelineArgs};
use correlation::CorrelationProjector;
use settings::Settings;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use violation_features::FeaturePipeline;

/// Initialize logging to stderr at the given level
pub fn init_logging(level: &str) -> Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("invalid log level {:?}", level))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Execute one command with loaded settings
pub fn run(args: &PipelineArgs, settings: &Settings) -> Result<()> {
    let pipeline = FeaturePipeline::new(settings.features.clone())?;

    match &args.command {
        Command::Features { input, output } => {
            let table = io::read_table(input)?;
            let features = pipeline.process(&table)?;
            io::write_json(&features, output.as_deref(), args.pretty)?;
            info!("Wrote {} feature rows", features.len());
        }
        Command::Analyze {
            input,
            output,
            matrix,
        } => {
            let projector = CorrelationProjector::new(settings.analysis.clone())?;
            let table = io::read_table(input)?;
            let report = projector.analyze(&pipeline, &table)?;
            io::write_json(&report.features, output.as_deref(), args.pretty)?;
            if let Some(path) = matrix {
                io::write_json(&report, Some(path.as_path()), args.pretty)?;
                info!(
                    "Wrote {}x{} correlation matrix to {}",
                    report.matrix.len(),
                    report.matrix.len(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}
