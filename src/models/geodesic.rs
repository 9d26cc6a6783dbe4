//! Equations of motion of a test particle in the effective potential
//!
//! # Mathematical Background
//!
//! The second-order radial equation `r̈ = -dV/dr` is reduced to first-order
//! form using conservation of angular momentum (`r²φ̇ = L`):
//!
//! ```text
//! dr/dt = ṙ
//! dφ/dt = L / r²
//! dṙ/dt = -dV/dr(r, L)
//! ```
//!
//! `L` is a constant of the model; it is never part of the evolved state.
//!
//! # Batches
//!
//! [`GeodesicModel::derivatives_batch`] evaluates many independent states at
//! once (one per row). With the `parallel` feature, batches larger than
//! [`parallel_threshold()`](crate::solver::parallel_threshold) rows are
//! dispatched to rayon.
//!
//! # Example
//!
//! ```rust
//! use geodesic_rs::models::{ForceLaw, GeodesicModel};
//! use geodesic_rs::physics::{OrbitalState, PhysicalModel};
//!
//! let model = GeodesicModel::new(4.02, ForceLaw::Schwarzschild);
//! let slope = model.compute_physics(&OrbitalState::new(169.68, 0.0, -0.02));
//!
//! assert_eq!(slope.r(), -0.02);
//! assert!(slope.phi() > 0.0);
//! ```

use crate::models::potential::{effective_potential_derivative, specific_energy, ForceLaw};
use crate::physics::{OrbitalState, PhysicalModel, StateBatch, STATE_DIM};

/// Test particle moving in the effective potential of a unit central mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicModel {
    angular_momentum: f64,
    law: ForceLaw,
}

impl GeodesicModel {
    /// Create a model for angular momentum `L` under the given force law
    pub fn new(angular_momentum: f64, law: ForceLaw) -> Self {
        Self { angular_momentum, law }
    }

    /// Same model with a different force law
    pub fn with_law(self, law: ForceLaw) -> Self {
        Self { law, ..self }
    }

    /// Angular momentum `L`
    pub fn angular_momentum(&self) -> f64 {
        self.angular_momentum
    }

    /// Active force law
    pub fn law(&self) -> ForceLaw {
        self.law
    }

    /// Specific energy of a state under this model
    pub fn energy(&self, state: &OrbitalState) -> f64 {
        specific_energy(state.r(), state.r_dot(), self.angular_momentum, self.law)
    }

    fn derivative_components(&self, r: f64, r_dot: f64) -> [f64; STATE_DIM] {
        [
            r_dot,
            self.angular_momentum / (r * r),
            -effective_potential_derivative(r, self.angular_momentum, self.law),
        ]
    }

    /// Evaluate the equations of motion for a batch of states
    ///
    /// Rows of `states` are independent `(r, φ, ṙ)` triples; the returned
    /// matrix has the same shape and holds `(dr/dt, dφ/dt, dṙ/dt)` per row.
    ///
    /// # Errors
    ///
    /// Returns `Err` when `states` does not have exactly 3 columns.
    pub fn derivatives_batch(&self, states: &StateBatch) -> Result<StateBatch, String> {
        if states.ncols() != STATE_DIM {
            return Err(format!(
                "State batch must have {} columns (r, phi, r_dot), got {}",
                STATE_DIM,
                states.ncols()
            ));
        }

        let n_rows = states.nrows();
        let compute_row = |i: usize| self.derivative_components(states[(i, 0)], states[(i, 2)]);

        if n_rows > crate::solver::parallel_threshold() {
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;

                let rows: Vec<[f64; STATE_DIM]> =
                    (0..n_rows).into_par_iter().map(compute_row).collect();
                return Ok(StateBatch::from_fn(n_rows, STATE_DIM, |i, k| rows[i][k]));
            }
        }

        let rows: Vec<[f64; STATE_DIM]> = (0..n_rows).map(compute_row).collect();
        Ok(StateBatch::from_fn(n_rows, STATE_DIM, |i, k| rows[i][k]))
    }
}

impl PhysicalModel for GeodesicModel {
    fn compute_physics(&self, state: &OrbitalState) -> OrbitalState {
        let [dr, dphi, dr_dot] = self.derivative_components(state.r(), state.r_dot());
        OrbitalState::new(dr, dphi, dr_dot)
    }

    fn name(&self) -> &str {
        match self.law {
            ForceLaw::Newtonian => "Newtonian geodesic",
            ForceLaw::Schwarzschild => "Schwarzschild geodesic",
        }
    }

    fn description(&self) -> Option<&str> {
        Some("Test particle in the effective potential of a unit central mass")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::potential::effective_potential_derivative;
    use crate::physics::state::batch_from_states;
    use crate::solver::ThresholdGuard;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_state_derivative() {
        let model = GeodesicModel::new(4.02, ForceLaw::Schwarzschild);
        let state = OrbitalState::new(1.5, 0.3, -1.02);
        let slope = model.compute_physics(&state);

        assert_eq!(slope.r(), -1.02);
        assert_relative_eq!(slope.phi(), 4.02 / 2.25);
        assert_relative_eq!(
            slope.r_dot(),
            -effective_potential_derivative(1.5, 4.02, ForceLaw::Schwarzschild)
        );
    }

    #[test]
    fn test_angle_does_not_enter_the_equations() {
        let model = GeodesicModel::new(10.02, ForceLaw::Newtonian);
        let a = model.compute_physics(&OrbitalState::new(50.0, 0.0, 0.1));
        let b = model.compute_physics(&OrbitalState::new(50.0, 17.0, 0.1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_circular_orbit_has_zero_radial_acceleration() {
        // Newtonian circular orbit: L² = r
        let r: f64 = 25.0;
        let model = GeodesicModel::new(r.sqrt(), ForceLaw::Newtonian);
        let slope = model.compute_physics(&OrbitalState::new(r - 1e-5, 0.0, 0.0));
        assert!(slope.r_dot().abs() < 1e-12);
    }

    #[test]
    fn test_batch_matches_single_evaluation() {
        let model = GeodesicModel::new(10.02, ForceLaw::Schwarzschild);
        let states = vec![
            OrbitalState::new(1.5, 0.0, -0.2),
            OrbitalState::new(97.0, 2.0, 0.01),
            OrbitalState::new(300.0, 7.5, 0.0),
        ];

        let derivatives = model.derivatives_batch(&batch_from_states(&states)).unwrap();
        assert_eq!(derivatives.shape(), (3, STATE_DIM));

        for (i, state) in states.iter().enumerate() {
            let single = model.compute_physics(state);
            for k in 0..STATE_DIM {
                assert_eq!(derivatives[(i, k)], single[k]);
            }
        }
    }

    #[test]
    fn test_batch_above_parallel_threshold_is_identical() {
        let _guard = ThresholdGuard::save(4);
        let model = GeodesicModel::new(4.02, ForceLaw::Schwarzschild);
        let states: Vec<_> = (0..64)
            .map(|i| OrbitalState::new(2.0 + i as f64, 0.1 * i as f64, -0.01 * i as f64))
            .collect();

        let derivatives = model.derivatives_batch(&batch_from_states(&states)).unwrap();
        for (i, state) in states.iter().enumerate() {
            assert_eq!(derivatives[(i, 2)], model.compute_physics(state).r_dot());
        }
    }

    #[test]
    fn test_batch_rejects_wrong_width() {
        let model = GeodesicModel::new(4.02, ForceLaw::Newtonian);
        assert!(model.derivatives_batch(&StateBatch::zeros(2, 4)).is_err());
    }

    #[test]
    fn test_names_follow_force_law() {
        let model = GeodesicModel::new(1.0, ForceLaw::Schwarzschild);
        assert_eq!(model.name(), "Schwarzschild geodesic");
        assert_eq!(model.with_law(ForceLaw::Newtonian).name(), "Newtonian geodesic");
    }
}
