//! # geodesic
//!
//! Integrates test-particle orbits described in an INI scenario file.
//!
//! ## Usage
//!
//! ```text
//! geodesic                      # built-in scenario "test"
//! geodesic scenarios/orbits.ini # every section of the file
//! geodesic -v orbits.ini        # debug logging
//! RUST_LOG=geodesic_rs=trace geodesic orbits.ini
//! ```
//!
//! Images and CSV files are written next to the configuration file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use geodesic_rs::config::{load_scenarios, ScenarioParameters};
use geodesic_rs::driver::{integrate_geodesics, render_outputs};

// ─────────────────────────────────────────────
// CLI
// ─────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "geodesic", version)]
#[command(about = "Newtonian and Schwarzschild test-particle orbits around a central mass")]
struct Cli {
    /// Scenario file (INI); runs the built-in default scenario when omitted
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .init();
}

fn run_scenario(params: &ScenarioParameters) -> anyhow::Result<()> {
    let run = integrate_geodesics(params).map_err(|e| anyhow::anyhow!(e))?;

    if let Some(reason) = run.primary.status.failure_reason() {
        log::warn!("{}: integration stopped early: {}", params.name, reason);
    }
    if let Some(reason) = run.newtonian.as_ref().and_then(|r| r.status.failure_reason()) {
        log::warn!("{}: Newtonian comparison stopped early: {}", params.name, reason);
    }

    render_outputs(params, &run).map_err(|e| anyhow::anyhow!("cannot write outputs: {e}"))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let scenarios = match &cli.config {
        Some(path) => load_scenarios(path)
            .with_context(|| format!("failed to load scenarios from {}", path.display()))?,
        None => {
            log::info!("No scenario file given, running the default scenario");
            vec![ScenarioParameters::default_scenario()]
        }
    };

    let mut failures = 0usize;
    for params in &scenarios {
        if let Err(e) = run_scenario(params) {
            log::error!("{}: {:#}", params.name, e);
            failures += 1;
        }
    }

    log::info!(
        "{} scenario(s) processed, {} with errors",
        scenarios.len(),
        failures
    );
    Ok(())
}
