//! Physical model trait
//!
//! This module defines the core API for physical models: a model turns the
//! current [`OrbitalState`] into its time derivative. It does NOT integrate
//! anything (that's the Solver's job).

use crate::physics::state::OrbitalState;

// ==================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
/// Computes the right-hand side `f(y)` of `dy/dt = f(y)` for a given state.
///
/// The model provides the "physics" (equations), the Solver provides
/// the "numerics" (method to solve them).
///
/// # Example
///
/// ```rust
/// use geodesic_rs::physics::{OrbitalState, PhysicalModel};
///
/// struct Drift;
///
/// impl PhysicalModel for Drift {
///     fn compute_physics(&self, _state: &OrbitalState) -> OrbitalState {
///         OrbitalState::new(1.0, 0.0, 0.0)
///     }
///
///     fn name(&self) -> &str {
///         "Drift"
///     }
/// }
///
/// let slope = Drift.compute_physics(&OrbitalState::zeros());
/// assert_eq!(slope.r(), 1.0);
/// ```
pub trait PhysicalModel: Send + Sync {
    /// Computes the time derivative at a given state
    ///
    /// # Arguments
    /// * `state` - Current state `(r, φ, ṙ)`
    ///
    /// # Returns
    /// Derivative `(dr/dt, dφ/dt, dṙ/dt)`
    fn compute_physics(&self, state: &OrbitalState) -> OrbitalState;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}
