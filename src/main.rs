//! Weather Pipeline - command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tracing_subscriber::fmt;

use weather_pipeline::charts::PlottersRenderer;
use weather_pipeline::cli::Args;

fn main() {
    let args = Args::parse();

    fmt()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Returns whether any data was processed.
fn run(args: &Args) -> Result<bool> {
    let config = args
        .resolve_config()
        .context("Failed to resolve pipeline configuration")?;

    let outcome = weather_pipeline::run(&config, &PlottersRenderer)
        .with_context(|| format!("Pipeline failed for {}", config.input_path.display()))?;

    Ok(outcome.is_some())
}
