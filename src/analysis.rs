//! Orbit diagnostics computed from a sampled trajectory
//!
//! Apsides are located where the radial velocity changes sign between two
//! consecutive samples; time, angle and radius are interpolated linearly at
//! `ṙ = 0`. The precision is therefore limited by the output grid, which is
//! fine for precession angles of a few hundredths of a radian per orbit.

use std::f64::consts::TAU;

use crate::models::{specific_energy, ForceLaw};
use crate::solver::SimulationResult;

/// Turning point of the radial motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Apsis {
    pub time: f64,
    /// Unwrapped angle
    pub phi: f64,
    pub r: f64,
}

fn sign_changes(result: &SimulationResult, rising: bool) -> Vec<Apsis> {
    result
        .time_points
        .windows(2)
        .zip(result.state_trajectory.windows(2))
        .filter_map(|(t, s)| {
            let (a, b) = (s[0].r_dot(), s[1].r_dot());
            let crosses = if rising { a < 0.0 && b >= 0.0 } else { a > 0.0 && b <= 0.0 };
            if !crosses {
                return None;
            }
            let fraction = a / (a - b);
            let lerp = |x0: f64, x1: f64| x0 + fraction * (x1 - x0);
            Some(Apsis {
                time: lerp(t[0], t[1]),
                phi: lerp(s[0].phi(), s[1].phi()),
                r: lerp(s[0].r(), s[1].r()),
            })
        })
        .collect()
}

/// Minima of `r`: radial velocity goes from negative to non-negative
pub fn periapsis_passages(result: &SimulationResult) -> Vec<Apsis> {
    sign_changes(result, true)
}

/// Maxima of `r`: radial velocity goes from positive to non-positive
pub fn apoapsis_passages(result: &SimulationResult) -> Vec<Apsis> {
    sign_changes(result, false)
}

/// Angle gained by the periapsis on each revolution
///
/// Zero for a closed Keplerian ellipse, positive for prograde precession.
pub fn periapsis_advances(result: &SimulationResult) -> Vec<f64> {
    periapsis_passages(result)
        .windows(2)
        .map(|pair| pair[1].phi - pair[0].phi - TAU)
        .collect()
}

/// Specific energy at every sample
pub fn energy_series(result: &SimulationResult, angular_momentum: f64, law: ForceLaw) -> Vec<f64> {
    result
        .state_trajectory
        .iter()
        .map(|s| specific_energy(s.r(), s.r_dot(), angular_momentum, law))
        .collect()
}

/// Largest `|E(t) - E(0)| / |E(0)|` along the trajectory
///
/// Falls back to the absolute drift when the initial energy is zero. Returns
/// `NaN` when any sample has a non-finite energy.
pub fn max_relative_energy_drift(
    result: &SimulationResult,
    angular_momentum: f64,
    law: ForceLaw,
) -> f64 {
    let energies = energy_series(result, angular_momentum, law);
    let Some(&initial) = energies.first() else {
        return 0.0;
    };
    if energies.iter().any(|e| !e.is_finite()) {
        return f64::NAN;
    }
    let scale = if initial == 0.0 { 1.0 } else { initial.abs() };

    energies
        .iter()
        .map(|e| (e - initial).abs() / scale)
        .fold(0.0, f64::max)
}

// =================================================================================================
// Tests
// =================================================================================================
