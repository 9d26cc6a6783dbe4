//! Effective potential of a test particle around a central mass
//!
//! # Mathematical Background
//!
//! Geometric units are used throughout: `G = M = 1`, so radii are measured
//! in units of the central mass. For a particle with specific angular
//! momentum `L`, the radial motion is governed by the effective potential
//!
//! ```text
//! V(r) = L²/(2r²) - 1/r                  (Newtonian)
//! V(r) = L²/(2r²) - 1/r - L²/r³          (Schwarzschild)
//! ```
//!
//! and its derivative
//!
//! ```text
//! dV/dr = -L²/r³ + 1/r²                  (Newtonian)
//! dV/dr = -L²/r³ + 1/r² + 3L²/r⁴         (Schwarzschild)
//! ```
//!
//! The extra `-L²/r³` term is the relativistic correction responsible for
//! periapsis precession. The total specific energy of the radial motion is
//!
//! ```text
//! E = ṙ²/2 + V(r)
//! ```
//!
//! # Singularity offset
//!
//! Every function evaluates the potential at `r + SINGULARITY_OFFSET` so the
//! result stays finite as `r → 0`. This is a numerical safety valve, not a
//! physical boundary: orbits that plunge towards the centre become stiff and
//! the adaptive solver reports a failure instead of producing infinities.

/// Offset added to `r` before evaluating the potential
pub const SINGULARITY_OFFSET: f64 = 1e-5;

/// Radius of the circle drawn around the central mass in trajectory plots
/// (Schwarzschild radius `2M`)
pub const HORIZON_RADIUS: f64 = 2.0;

/// Force law selecting the effective potential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForceLaw {
    /// Newtonian gravity: centrifugal + `-1/r`
    Newtonian,

    /// Schwarzschild correction: Newtonian + `-L²/r³`
    #[default]
    Schwarzschild,
}

impl ForceLaw {
    /// Map the configuration's `GR` flag to a force law
    pub fn from_gr_flag(gr: bool) -> Self {
        if gr { Self::Schwarzschild } else { Self::Newtonian }
    }

    /// True for the relativistic correction
    pub fn is_relativistic(self) -> bool {
        matches!(self, Self::Schwarzschild)
    }

    /// Short label used in plots and logs
    pub fn label(self) -> &'static str {
        match self {
            Self::Newtonian => "Newton",
            Self::Schwarzschild => "GR",
        }
    }
}

impl std::fmt::Display for ForceLaw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Effective potential `V(r, L)`
///
/// # Example
///
/// ```
/// use geodesic_rs::models::{effective_potential, ForceLaw};
///
/// let newton = effective_potential(10.0, 4.0, ForceLaw::Newtonian);
/// let gr = effective_potential(10.0, 4.0, ForceLaw::Schwarzschild);
///
/// // The relativistic term is attractive
/// assert!(gr < newton);
/// ```
pub fn effective_potential(r: f64, angular_momentum: f64, law: ForceLaw) -> f64 {
    let r = r + SINGULARITY_OFFSET;
    let l2 = angular_momentum * angular_momentum;

    let mut potential = 0.5 * l2 / (r * r) - 1.0 / r;
    if law.is_relativistic() {
        potential -= l2 / (r * r * r);
    }
    potential
}

/// Radial derivative of the effective potential `dV/dr`
pub fn effective_potential_derivative(r: f64, angular_momentum: f64, law: ForceLaw) -> f64 {
    let r = r + SINGULARITY_OFFSET;
    let l2 = angular_momentum * angular_momentum;
    let r2 = r * r;

    let mut derivative = -l2 / (r2 * r) + 1.0 / r2;
    if law.is_relativistic() {
        derivative += 3.0 * l2 / (r2 * r2);
    }
    derivative
}

/// Total specific energy `E = ṙ²/2 + V(r)`
pub fn specific_energy(r: f64, r_dot: f64, angular_momentum: f64, law: ForceLaw) -> f64 {
    0.5 * r_dot * r_dot + effective_potential(r, angular_momentum, law)
}

/// Local escape velocity scale `sqrt(2·|V(r)|)`
///
/// Used to express an initial radial velocity as a fraction of the local
/// escape velocity (`relative_units` in scenario files).
pub fn escape_velocity(r: f64, angular_momentum: f64, law: ForceLaw) -> f64 {
    (2.0 * effective_potential(r, angular_momentum, law).abs()).sqrt()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn central_difference(r: f64, l: f64, law: ForceLaw) -> f64 {
        let h = 1e-6 * r;
        (effective_potential(r + h, l, law) - effective_potential(r - h, l, law)) / (2.0 * h)
    }

    #[test]
    fn test_newtonian_derivative_matches_numerical_derivative() {
        for &l in &[0.0, 1.0, 4.02, 10.02] {
            for &r in &[0.5, 1.5, 3.0, 10.0, 97.3, 1e3] {
                let analytic = effective_potential_derivative(r, l, ForceLaw::Newtonian);
                let numeric = central_difference(r, l, ForceLaw::Newtonian);
                assert_relative_eq!(analytic, numeric, max_relative = 1e-6, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_schwarzschild_derivative_matches_numerical_derivative() {
        for &l in &[0.5, 4.02, 10.02] {
            for &r in &[1.5, 3.0, 12.0, 150.0] {
                let analytic = effective_potential_derivative(r, l, ForceLaw::Schwarzschild);
                let numeric = central_difference(r, l, ForceLaw::Schwarzschild);
                assert_relative_eq!(analytic, numeric, max_relative = 1e-6, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_gr_reduces_to_newtonian_for_vanishing_angular_momentum() {
        for &r in &[1.5, 7.0, 300.0] {
            assert_relative_eq!(
                effective_potential(r, 0.0, ForceLaw::Schwarzschild),
                effective_potential(r, 0.0, ForceLaw::Newtonian)
            );
            assert_relative_eq!(
                effective_potential_derivative(r, 0.0, ForceLaw::Schwarzschild),
                effective_potential_derivative(r, 0.0, ForceLaw::Newtonian)
            );

            // Continuous approach: the gap shrinks like L²
            let gap = |l: f64| {
                effective_potential(r, l, ForceLaw::Newtonian)
                    - effective_potential(r, l, ForceLaw::Schwarzschild)
            };
            assert!(gap(1e-3) < gap(1e-2));
            assert!(gap(1e-4) < 1e-8);
        }
    }

    #[test]
    fn test_closed_forms() {
        let r = 2.0 - SINGULARITY_OFFSET;
        let l = 2.0;
        // r' = 2: V = 0.5*4/4 - 1/2 = 0, GR subtracts 4/8
        assert_relative_eq!(effective_potential(r, l, ForceLaw::Newtonian), 0.0, epsilon = 1e-12);
        assert_relative_eq!(effective_potential(r, l, ForceLaw::Schwarzschild), -0.5, epsilon = 1e-12);
        // dV/dr = -4/8 + 1/4 = -0.25, GR adds 12/16
        assert_relative_eq!(effective_potential_derivative(r, l, ForceLaw::Newtonian), -0.25, epsilon = 1e-12);
        assert_relative_eq!(effective_potential_derivative(r, l, ForceLaw::Schwarzschild), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_potential_finite_at_origin() {
        let v = effective_potential(0.0, 4.02, ForceLaw::Schwarzschild);
        let dv = effective_potential_derivative(0.0, 4.02, ForceLaw::Schwarzschild);
        assert!(v.is_finite());
        assert!(dv.is_finite());
    }

    #[test]
    fn test_energy_and_escape_velocity() {
        let (r, l) = (169.68, 4.02);
        let v = effective_potential(r, l, ForceLaw::Schwarzschild);
        assert_relative_eq!(specific_energy(r, 0.0, l, ForceLaw::Schwarzschild), v);
        assert_relative_eq!(specific_energy(r, 0.3, l, ForceLaw::Schwarzschild), v + 0.045);

        let escape = escape_velocity(r, l, ForceLaw::Schwarzschild);
        assert_relative_eq!(escape * escape, 2.0 * v.abs(), max_relative = 1e-12);
    }

    #[test]
    fn test_force_law_flag_mapping() {
        assert_eq!(ForceLaw::from_gr_flag(true), ForceLaw::Schwarzschild);
        assert_eq!(ForceLaw::from_gr_flag(false), ForceLaw::Newtonian);
        assert_eq!(ForceLaw::Schwarzschild.label(), "GR");
        assert_eq!(ForceLaw::Newtonian.to_string(), "Newton");
    }
}
