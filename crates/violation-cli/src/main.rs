//! Violation Pipeline - Main Entry Point

use anyhow::Result;
use clap::Parser;
use tracing::info;
use violation_cli::{args::PipelineArgs, init_logging, run, settings::Settings};

fn main() -> Result<()> {
    let args = PipelineArgs::parse();
    let settings = Settings::load(args.config.as_deref())?;
    init_logging(args.log_level().unwrap_or(settings.log_level.as_str()))?;

    info!("=== Violation Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    run(&args, &settings)
}
