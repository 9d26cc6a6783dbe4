//! Orbital state container
//!
//! The radial problem is reduced to three first-order variables:
//!
//! ```text
//! y = (r, φ, ṙ)
//! ```
//!
//! - `r`     : radial distance from the central mass (units of M)
//! - `φ`     : azimuthal angle (rad), unwrapped (grows without bound)
//! - `ṙ`     : radial velocity
//!
//! The same container is used for states and for their time derivatives, so
//! it supports the `+` and `* f64` operations that Runge-Kutta stages need.
//!
//! Several states evaluated at once (a *batch*) are stored as an
//! `n × 3` [`DMatrix`], one state per row.

use nalgebra::{DMatrix, Vector3};
use std::fmt;

/// Number of components of an orbital state
pub const STATE_DIM: usize = 3;

/// Row-major batch of orbital states: one state per row, `STATE_DIM` columns
pub type StateBatch = DMatrix<f64>;

// =================================================================================================
// Orbital State
// =================================================================================================

/// State of the test particle `(r, φ, ṙ)`
///
/// # Example
/// ```
/// use geodesic_rs::physics::OrbitalState;
///
/// let state = OrbitalState::new(10.0, 0.0, -0.1);
/// let moved = state + OrbitalState::new(-0.1, 0.01, 0.0) * 2.0;
///
/// assert!((moved.r() - 9.8).abs() < 1e-12);
/// assert!((moved.phi() - 0.02).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalState {
    values: Vector3<f64>,
}

impl OrbitalState {
    /// Create a state from radius, angle and radial velocity
    pub fn new(r: f64, phi: f64, r_dot: f64) -> Self {
        Self { values: Vector3::new(r, phi, r_dot) }
    }

    /// State with every component set to zero
    pub fn zeros() -> Self {
        Self { values: Vector3::zeros() }
    }

    /// Build from an nalgebra vector
    pub fn from_vector(values: Vector3<f64>) -> Self {
        Self { values }
    }

    /// Build from a slice of length `STATE_DIM` (e.g. a batch row)
    ///
    /// Returns `None` when the slice has the wrong length.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        if values.len() != STATE_DIM {
            return None;
        }
        Some(Self::new(values[0], values[1], values[2]))
    }

    /// Radial distance
    pub fn r(&self) -> f64 {
        self.values[0]
    }

    /// Azimuthal angle
    pub fn phi(&self) -> f64 {
        self.values[1]
    }

    /// Radial velocity
    pub fn r_dot(&self) -> f64 {
        self.values[2]
    }

    /// Underlying vector
    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.values
    }

    /// Components as a plain array `[r, φ, ṙ]`
    pub fn to_array(&self) -> [f64; STATE_DIM] {
        [self.values[0], self.values[1], self.values[2]]
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Component-wise fused update `self + h * slope`
    pub fn advanced(&self, slope: &OrbitalState, h: f64) -> Self {
        Self { values: self.values + slope.values * h }
    }
}

// ================================== Simple arithmetic functions ==================================

impl std::ops::Add for OrbitalState {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { values: self.values + rhs.values }
    }
}

impl std::ops::Sub for OrbitalState {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { values: self.values - rhs.values }
    }
}

impl std::ops::Mul<f64> for OrbitalState {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self { values: self.values * scalar }
    }
}

impl std::ops::Mul<OrbitalState> for f64 {
    type Output = OrbitalState;

    fn mul(self, rhs: OrbitalState) -> Self::Output {
        rhs * self
    }
}

impl std::ops::Index<usize> for OrbitalState {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl fmt::Display for OrbitalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r = {}, phi = {}, r_dot = {})", self.r(), self.phi(), self.r_dot())
    }
}

// =================================================================================================
// Batches
// =================================================================================================

/// Stack states into an `n × 3` batch
pub fn batch_from_states(states: &[OrbitalState]) -> StateBatch {
    StateBatch::from_fn(states.len(), STATE_DIM, |row, col| states[row][col])
}

/// Split a batch back into individual states
///
/// Returns `None` when the batch does not have `STATE_DIM` columns.
pub fn states_from_batch(batch: &StateBatch) -> Option<Vec<OrbitalState>> {
    if batch.ncols() != STATE_DIM {
        return None;
    }
    Some(
        batch
            .row_iter()
            .map(|row| OrbitalState::new(row[0], row[1], row[2]))
            .collect(),
    )
}

// ==================== Tests ====================
