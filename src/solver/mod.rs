//! Numerical solvers
//!
//! This module provides traits and implementations for numerical solvers.
//! A numerical solver applies a numerical method to the equations provided
//! by a physical model within a specific scenario.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (equations)
//!    - Initial state
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Solver type (fixed step or adaptive)
//!    - Horizon, number of steps or output points, step bound
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the numerical scheme
//!    - Returns the sampled trajectory
//!    - Independent of physics
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverType`, `SolverConfiguration`,
//!   `SimulationResult`, `SolverStatus`
//! - **`scenario`**: `Scenario` (model + initial state)
//! - **`methods`**: `Dopri5Solver` (adaptive) and `RK4Solver` (fixed step)
//!
//! # Quick Start Example
//!
//! ```rust
//! use geodesic_rs::models::{ForceLaw, GeodesicModel};
//! use geodesic_rs::physics::OrbitalState;
//! use geodesic_rs::solver::{Dopri5Solver, Scenario, Solver, SolverConfiguration};
//!
//! // 1. Create scenario (WHAT to solve)
//! let model = GeodesicModel::new(10.02, ForceLaw::Schwarzschild);
//! let scenario = Scenario::new(Box::new(model), OrbitalState::new(150.0, 0.0, -0.02));
//!
//! // 2. Create configuration (HOW to solve)
//! let config = SolverConfiguration::adaptive(1000.0, 101, 1e4);
//!
//! // 3. Solve
//! let result = Dopri5Solver::new().solve(&scenario, &config)?;
//!
//! assert!(result.is_success());
//! assert_eq!(result.len(), 101);
//! # Ok::<(), String>(())
//! ```
//!
//! # Error Handling
//!
//! Solver methods return `Result<SimulationResult, String>`. `Err` means the
//! configuration or the scenario was rejected before any step was taken. A
//! run that breaks down numerically (step size collapse, non-finite state)
//! is reported through [`SolverStatus::Failed`] on an `Ok` result for the
//! adaptive solver, so the partial trajectory can still be plotted.

// =================================================================================================
// Module Declarations
// =================================================================================================
mod methods;
mod scenario;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand work off to Rayon is a numerical-execution concern,
// not a physics concern, so it lives here rather than in the models.
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (benchmarks and tests) without a mutex. Relaxed ordering is
// sufficient: the value is a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of batch rows above which
/// [`GeodesicModel::derivatives_batch`](crate::models::GeodesicModel::derivatives_batch)
/// switches to parallel iteration.
const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Batches with more rows than this value are evaluated with Rayon, but only
/// when the crate is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use geodesic_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use geodesic_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(50);
/// // threshold is now 50 and is restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    SimulationResult,
    Solver,
    SolverConfiguration,
    SolverStatus,
    SolverType,
};

pub use scenario::Scenario;

pub use methods::{Dopri5Solver, RK4Solver, Stats, Tolerances};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::physics::OrbitalState;

/// Validate an orbital state for numerical issues
///
/// Returns `Err` with a diagnostic when any component is NaN or infinite.
///
/// ```rust,ignore
/// validate_state(&state, 42)?;  // Validates state at step 42
/// ```
pub(crate) fn validate_state(state: &OrbitalState, step: usize) -> Result<(), String> {
    const NAMES: [&str; 3] = ["r", "phi", "r_dot"];

    for (name, value) in NAMES.iter().zip(state.to_array()) {
        if value.is_nan() {
            return Err(format!(
                "NaN detected in {} at step {}. This indicates numerical instability. \
                 Try reducing the time step.",
                name, step
            ));
        }
        if value.is_infinite() {
            return Err(format!(
                "Infinity detected in {} at step {}. The orbit probably plunged \
                 into the central mass.",
                name, step
            ));
        }
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 4096);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        let before = parallel_threshold();
        {
            let _guard = ThresholdGuard::save(42);
            assert_eq!(parallel_threshold(), 42);
        }
        assert_eq!(parallel_threshold(), before);
    }

    #[test]
    fn test_validate_state_reports_component() {
        assert!(validate_state(&OrbitalState::new(1.0, 2.0, 3.0), 0).is_ok());

        let err = validate_state(&OrbitalState::new(1.0, f64::NAN, 3.0), 7).unwrap_err();
        assert!(err.contains("phi"));
        assert!(err.contains("step 7"));

        let err = validate_state(&OrbitalState::new(1.0, 2.0, f64::INFINITY), 3).unwrap_err();
        assert!(err.contains("Infinity"));
        assert!(err.contains("r_dot"));
    }
}
