//! Mock physical models for testing
//!
//! These models have known analytical solutions, making them
//! ideal for validating numerical solver accuracy. They act on the radial
//! components of [`OrbitalState`] and leave the angle untouched.

use geodesic_rs::physics::{OrbitalState, PhysicalModel};

// =================================================================================================
// Exponential Decay: dr/dt = -k*r
// =================================================================================================

/// Exponential decay model: dr/dt = -k*r
///
/// Analytical solution: r(t) = r₀ * exp(-k*t)
pub struct ExponentialDecay {
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(decay_rate: f64) -> Self {
        Self { decay_rate }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64, r0: f64) -> f64 {
        r0 * (-self.decay_rate * t).exp()
    }
}

impl PhysicalModel for ExponentialDecay {
    fn compute_physics(&self, state: &OrbitalState) -> OrbitalState {
        OrbitalState::new(-self.decay_rate * state.r(), 0.0, 0.0)
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Constant Growth: dr/dt = c
// =================================================================================================

/// Constant growth model: dr/dt = c
///
/// Analytical solution: r(t) = r₀ + c*t, reproduced exactly by every
/// Runge-Kutta method.
pub struct ConstantGrowth {
    pub growth_rate: f64,
}

impl ConstantGrowth {
    pub fn new(growth_rate: f64) -> Self {
        Self { growth_rate }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64, r0: f64) -> f64 {
        r0 + self.growth_rate * t
    }
}

impl PhysicalModel for ConstantGrowth {
    fn compute_physics(&self, _state: &OrbitalState) -> OrbitalState {
        OrbitalState::new(self.growth_rate, 0.0, 0.0)
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}

// =================================================================================================
// Radial oscillator: r'' = -ω²(r - r_c)
// =================================================================================================

/// Harmonic oscillation of the radius around `center`
///
/// With `r(0) = center + amplitude` and `ṙ(0) = 0`:
/// `r(t) = center + amplitude * cos(ω t)`, and `φ` advances at rate `ω`
/// so the trajectory closes after one period.
pub struct RadialOscillator {
    pub omega: f64,
    pub center: f64,
}

impl RadialOscillator {
    pub fn new(omega: f64, center: f64) -> Self {
        Self { omega, center }
    }

    pub fn analytical_radius(&self, t: f64, amplitude: f64) -> f64 {
        self.center + amplitude * (self.omega * t).cos()
    }
}

impl PhysicalModel for RadialOscillator {
    fn compute_physics(&self, state: &OrbitalState) -> OrbitalState {
        OrbitalState::new(
            state.r_dot(),
            self.omega,
            -self.omega * self.omega * (state.r() - self.center),
        )
    }

    fn name(&self) -> &str {
        "Radial Oscillator"
    }

    fn description(&self) -> Option<&str> {
        Some("r'' = -w^2 (r - r_c), phi' = w")
    }
}
