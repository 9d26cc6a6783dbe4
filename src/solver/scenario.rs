//! Simulation scenario definition
//!
//! A scenario combines a physical model with its initial condition.

use crate::physics::{OrbitalState, PhysicalModel};

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Physical model (equations)
/// - Initial state at `t = 0`
///
/// # Design
///
/// The same scenario can be solved with different numerical methods.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use geodesic_rs::models::{ForceLaw, GeodesicModel};
/// use geodesic_rs::physics::OrbitalState;
/// use geodesic_rs::solver::Scenario;
///
/// let model = GeodesicModel::new(4.02, ForceLaw::Schwarzschild);
/// let scenario = Scenario::new(Box::new(model), OrbitalState::new(169.68, 0.0, -0.02));
///
/// assert!(scenario.validate().is_ok());
/// assert_eq!(scenario.get_model_name(), "Schwarzschild geodesic");
/// ```
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// State at `t = 0`
    pub initial: OrbitalState,
}

impl Scenario {
    /// Create a scenario
    pub fn new(model: Box<dyn PhysicalModel>, initial: OrbitalState) -> Self {
        Self { model, initial }
    }

    /// Check that the initial state is usable
    pub fn validate(&self) -> Result<(), String> {
        if !self.initial.is_finite() {
            return Err(format!("Initial state {} is not finite", self.initial));
        }
        if self.initial.r() <= 0.0 {
            return Err(format!("Initial radius must be positive, got {}", self.initial.r()));
        }
        Ok(())
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.get_model_name())
            .field("initial", &self.initial)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
