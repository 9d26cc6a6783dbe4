//! Polar ↔ Cartesian conversion for the orbital plane

use std::f64::consts::TAU;

/// Convert polar coordinates `(r, φ)` to Cartesian `(x, y)`
pub fn to_cartesian(r: f64, phi: f64) -> (f64, f64) {
    (r * phi.cos(), r * phi.sin())
}

/// Convert Cartesian `(x, y)` to polar `(r, φ)` with `φ ∈ (-π, π]`
pub fn to_polar(x: f64, y: f64) -> (f64, f64) {
    (x.hypot(y), y.atan2(x))
}

/// Reduce an angle to `[0, 2π)`
pub fn wrap_angle(phi: f64) -> f64 {
    phi.rem_euclid(TAU)
}

/// Convert whole `(r, φ)` series to `(x, y)` points
pub fn trajectory_to_cartesian(radii: &[f64], angles: &[f64]) -> Vec<(f64, f64)> {
    radii
        .iter()
        .zip(angles.iter())
        .map(|(&r, &phi)| to_cartesian(r, phi))
        .collect()
}
