//! Helper functions for integration tests

use std::path::PathBuf;

use geodesic_rs::config::ScenarioParameters;
use geodesic_rs::models::{effective_potential, escape_velocity, ForceLaw};
use geodesic_rs::physics::{OrbitalState, PhysicalModel};
use geodesic_rs::solver::Scenario;

/// Assert that two orbital states are close (within tolerance)
pub fn assert_states_close(
    state1: &OrbitalState,
    state2: &OrbitalState,
    tolerance: f64,
    message: &str,
) {
    for (i, (v1, v2)) in state1.to_array().iter().zip(state2.to_array()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Component {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Relative error |a - b| / |b|, absolute when `b` is zero
pub fn relative_error(computed: f64, exact: f64) -> f64 {
    if exact == 0.0 {
        computed.abs()
    } else {
        ((computed - exact) / exact).abs()
    }
}

/// Scenario with the model and initial radius, angle and radial velocity zero
pub fn create_simple_scenario<M: PhysicalModel + 'static>(model: M, r0: f64) -> Scenario {
    Scenario::new(Box::new(model), OrbitalState::new(r0, 0.0, 0.0))
}

/// Scenario parameters with the optional keys at their defaults and no
/// artifact written
pub fn orbit_params(
    name: &str,
    angular_momentum: f64,
    r_0: f64,
    r_dot_0: f64,
    gr: bool,
    t_max: f64,
) -> ScenarioParameters {
    let mut params = ScenarioParameters::default_scenario();
    params.name = name.to_string();
    params.folder = PathBuf::from(".");
    params.angular_momentum = angular_momentum;
    params.phi_0 = 0.0;
    params.r_0 = r_0;
    params.r_dot_0 = r_dot_0;
    params.gr = gr;
    params.t_max = t_max;
    params.show = false;
    params
}

/// Bound orbit oscillating between r ≈ 69 and r ≈ 163
pub fn elliptic_params(gr: bool) -> ScenarioParameters {
    orbit_params("ELLIPTIC", 10.02, 150.0, -0.02, gr, 3e5)
}

/// Inbound particle with specific energy 1e-3, below the GR barrier peak
pub fn hyperbolic_params() -> ScenarioParameters {
    let (l, r_0, energy) = (4.02, 50.0, 1e-3);
    let potential = effective_potential(r_0, l, ForceLaw::Schwarzschild);
    let r_dot_0 = -(2.0 * (energy - potential)).sqrt();
    orbit_params("HYPERBOLIC", l, r_0, r_dot_0, true, 2e3)
}

/// Starts inside the horizon moving inwards; the integration cannot finish
pub fn plunge_params() -> ScenarioParameters {
    let (l, r_0) = (4.02, 1.5);
    let r_dot_0 = -1.02 * escape_velocity(r_0, l, ForceLaw::Schwarzschild);
    let mut params = orbit_params("PLUNGE", l, r_0, r_dot_0, true, 2e3);
    params.max_step = 1e11;
    params
}
