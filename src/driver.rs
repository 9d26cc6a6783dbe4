//! Integration driver
//!
//! Turns one [`ScenarioParameters`] into sampled trajectories: the primary
//! run with the configured force law and, when `compare` is set, a second
//! run with the Newtonian potential from the same initial state on the same
//! output grid. [`render_outputs`] then writes the images and CSV files the
//! scenario asks for.

use std::error::Error;
use std::path::PathBuf;

use crate::config::ScenarioParameters;
use crate::models::{ForceLaw, GeodesicModel};
use crate::output::{
    plot_diagnostics, plot_trajectory, CsvConfig, CsvExporter, CsvMetadata, Exporter, PlotConfig,
};
use crate::solver::{Dopri5Solver, Scenario, SimulationResult, Solver, SolverConfiguration};

/// Number of equally spaced output samples in `[0, t_max]`
pub const OUTPUT_POINTS: usize = 10_000;

/// Trajectories produced for one scenario
#[derive(Debug, Clone)]
pub struct GeodesicRun {
    /// Run with the configured force law
    pub primary: SimulationResult,
    /// Newtonian comparison run, present when `compare` is set
    pub newtonian: Option<SimulationResult>,
}

/// Integrate a single model from the scenario's initial state
pub fn integrate_model(
    params: &ScenarioParameters,
    model: GeodesicModel,
) -> Result<SimulationResult, String> {
    let scenario = Scenario::new(Box::new(model), params.initial_state());
    let config = SolverConfiguration::adaptive(params.t_max, OUTPUT_POINTS, params.max_step);

    let mut result = Dopri5Solver::new().solve(&scenario, &config)?;
    result.add_metadata("model", scenario.get_model_name());
    result.add_metadata("scenario", &params.name);
    result.add_metadata("angular momentum", &params.angular_momentum.to_string());
    Ok(result)
}

/// Integrate a scenario and its optional Newtonian comparison
///
/// Numerical breakdown is not an error: the returned trajectories carry a
/// [`SolverStatus`](crate::solver::SolverStatus) and keep every sample
/// reached before the failure. `Err` is only returned when the parameters
/// cannot be integrated at all (non-positive `t_max`, non-positive `r_0`...).
///
/// # Example
///
/// ```rust
/// use geodesic_rs::config::ScenarioParameters;
/// use geodesic_rs::driver::integrate_geodesics;
///
/// let mut params = ScenarioParameters::default_scenario();
/// params.t_max = 100.0;
/// params.compare = true;
///
/// let run = integrate_geodesics(&params)?;
/// assert!(run.primary.is_success());
/// assert!(run.newtonian.is_some());
/// # Ok::<(), String>(())
/// ```
pub fn integrate_geodesics(params: &ScenarioParameters) -> Result<GeodesicRun, String> {
    let model = params.model();

    log::info!("##### Integrating {} #####", params.name);
    for line in params.to_string().lines() {
        log::info!("    {}", line);
    }
    log::info!("    Initial energy: {}", model.energy(&params.initial_state()));

    let primary = integrate_model(params, model)?;
    log::info!("Solver message: {}", primary.message);

    let newtonian = if params.compare {
        let result = integrate_model(params, model.with_law(ForceLaw::Newtonian))?;
        log::info!("Solver message (Newton): {}", result.message);
        Some(result)
    } else {
        None
    };

    Ok(GeodesicRun { primary, newtonian })
}

/// Write the artifacts enabled in `params` and return their paths
///
/// - `show`: four-panel figure `<name>_diagnostics.png`
/// - `save_trajectory`: orbital plane `<name>_trajectory.jpeg`
/// - `save_csv`: samples of the primary run `<name>_trajectory.csv`
///
/// Files land in the scenario folder. The first failing artifact aborts the
/// remaining ones.
pub fn render_outputs(
    params: &ScenarioParameters,
    run: &GeodesicRun,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let law = params.force_law();
    let mut written = Vec::new();

    if params.show {
        let path = params.output_path("_diagnostics.png");
        let config = PlotConfig::diagnostics(format!("{} ({})", params.name, law));
        plot_diagnostics(&run.primary, law, run.newtonian.as_ref(), &path, Some(&config))?;
        log::info!("Diagnostics saved to {}", path.display());
        written.push(path);
    }

    if params.save_trajectory {
        let path = params.output_path("_trajectory.jpeg");
        let config = PlotConfig::trajectory(params.name.as_str());
        plot_trajectory(&run.primary, law, run.newtonian.as_ref(), &path, Some(&config))?;
        log::info!("Trajectory saved to {}", path.display());
        written.push(path);
    }

    if params.save_csv {
        let path = params.output_path("_trajectory.csv");
        let model = params.model();
        let config = CsvConfig::default().with_metadata(CsvMetadata::from_result(&run.primary, &model));
        CsvExporter::new(config).export_trajectory(&run.primary, &model, None, &path)?;
        log::info!("Samples saved to {}", path.display());
        written.push(path);
    }

    Ok(written)
}

// =================================================================================================
// Tests
// =================================================================================================
