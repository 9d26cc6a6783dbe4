//! geodesic-rs: test-particle orbits around a central mass
//!
//! Integrates the planar motion of a test particle in the effective potential
//! of a point mass, either Newtonian or with the Schwarzschild correction
//! `-L²/r³`, and compares both. Geometric units `G = M = c = 1` are used
//! throughout; the horizon sits at `r = 2`.
//!
//! # Architecture
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define the equations of motion (what to solve)
//!    - Numerical solvers provide the integration methods (how to solve)
//!
//! 2. **Scenario files drive runs**
//!    - [`config`] turns INI sections into immutable [`ScenarioParameters`](config::ScenarioParameters)
//!    - [`driver`] integrates them and hands results to [`output`]
//!
//! # Quick Start
//!
//! ```rust
//! use geodesic_rs::prelude::*;
//!
//! # fn main() -> Result<(), String> {
//! // 1. Equations of motion and initial state
//! let model = GeodesicModel::new(10.02, ForceLaw::Schwarzschild);
//! let scenario = Scenario::new(Box::new(model), OrbitalState::new(150.0, 0.0, -0.02));
//!
//! // 2. Adaptive integration over 1000 time units, 500 output samples
//! let config = SolverConfiguration::adaptive(1000.0, 500, 1e4);
//!
//! // 3. Run
//! let result = Dopri5Solver::new().solve(&scenario, &config)?;
//!
//! // 4. Access results
//! assert!(result.is_success());
//! assert_eq!(result.len(), 500);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: State vector, coordinates and the model trait
//! - [`models`]: Effective potentials and geodesic equations
//! - [`solver`]: Fixed-step RK4 and adaptive Dormand-Prince integrators
//! - [`config`]: INI scenario files
//! - [`driver`]: Scenario to trajectories to artifacts
//! - [`analysis`]: Apsides, precession and energy drift
//! - [`output`]: Plots and CSV export

// Core modules
pub mod physics;

pub mod models;
pub mod solver;

pub mod config;
pub mod driver;

pub mod analysis;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use geodesic_rs::prelude::*;
    //! ```
    pub use crate::config::{load_scenarios, ScenarioParameters};
    pub use crate::driver::{integrate_geodesics, GeodesicRun};
    pub use crate::models::{ForceLaw, GeodesicModel};
    pub use crate::physics::{OrbitalState, PhysicalModel};
    pub use crate::solver::{
        Dopri5Solver,
        RK4Solver,
        Scenario,
        SimulationResult,
        Solver,
        SolverConfiguration,
        SolverStatus,
        SolverType,
    };
}
