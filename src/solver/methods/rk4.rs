//! Runge-Kutta 4 (RK4) numerical solver
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method integrates `dy/dt = f(y)`
//! with a weighted average of four slope estimates:
//!
//! ```text
//! k₁ = f(yₙ)
//! k₂ = f(yₙ + dt/2 * k₁)
//! k₃ = f(yₙ + dt/2 * k₂)
//! k₄ = f(yₙ + dt * k₃)
//!
//! yₙ₊₁ = yₙ + dt/6 * (k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (global error ~ O(dt⁴))
//! - **Complexity**: 4 function evaluations per step
//! - **Step**: fixed, no error control
//!
//! Orbits with a close periapsis need tiny steps near the centre and large
//! ones far away, which a fixed step cannot provide. RK4 is kept as a
//! reference integrator for convergence tests and benchmarks; production
//! runs use [`Dopri5Solver`](crate::solver::Dopri5Solver).
//!
//! # Example
//!
//! ```rust
//! use geodesic_rs::models::{ForceLaw, GeodesicModel};
//! use geodesic_rs::physics::OrbitalState;
//! use geodesic_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration};
//!
//! let model = GeodesicModel::new(10.02, ForceLaw::Newtonian);
//! let scenario = Scenario::new(Box::new(model), OrbitalState::new(150.0, 0.0, -0.02));
//!
//! let config = SolverConfiguration::time_evolution(1000.0, 1000);
//! let result = RK4Solver::new().solve(&scenario, &config)?;
//!
//! assert_eq!(result.len(), 1001);
//! # Ok::<(), String>(())
//! ```

use crate::solver::{validate_state, Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta solver
///
/// Only accepts [`SolverType::TimeEvolution`]. Every state is checked for
/// NaN/Inf; the first non-finite state aborts the run with `Err`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    ///
    /// ```rust
    /// use geodesic_rs::solver::{RK4Solver, Solver};
    ///
    /// let solver = RK4Solver::new();
    /// assert_eq!(solver.name(), "Runge Kutta (RK4)");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for RK4Solver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let (total_time, time_steps) = match &config.solver_type {
            SolverType::TimeEvolution { total_time, time_steps } => (*total_time, *time_steps),
            other => {
                return Err(format!(
                    "RK4Solver only supports TimeEvolution configuration, got {}",
                    other.name()
                ));
            }
        };

        // ====== Step 2: Setup ======

        let dt = total_time / (time_steps as f64);
        let mut state = scenario.initial;

        let mut time_points = Vec::with_capacity(time_steps + 1);
        let mut state_trajectory = Vec::with_capacity(time_steps + 1);

        time_points.push(0.0);
        state_trajectory.push(state);

        // ====== Step 3: Time Integration ======

        for step in 0..time_steps {
            let k1 = scenario.model.compute_physics(&state);
            let k2 = scenario.model.compute_physics(&state.advanced(&k1, dt / 2.0));
            let k3 = scenario.model.compute_physics(&state.advanced(&k2, dt / 2.0));
            let k4 = scenario.model.compute_physics(&state.advanced(&k3, dt));

            // Simpson weights: endpoints 1/6, midpoints 1/3
            let weighted_slope = k1 + k2 * 2.0 + k3 * 2.0 + k4;
            state = state.advanced(&weighted_slope, dt / 6.0);

            validate_state(&state, step + 1)?;

            state_trajectory.push(state);

            // Computed from the index so the last point is exactly total_time
            time_points.push((step as f64 + 1.0) * dt);
        }

        // ====== Step 4: Build Result ======

        let mut result = SimulationResult::new(time_points, state_trajectory, state);

        result.add_metadata("solver", "Runge-Kutta 4");
        result.add_metadata("time steps", &time_steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &total_time.to_string());
        result.add_metadata("function evaluations", &(4 * time_steps).to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Runge Kutta (RK4)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
