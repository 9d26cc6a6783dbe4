//! Numerical methods for solving the equations of motion
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`Dopri5Solver`]**: Dormand-Prince 5(4) embedded pair
//!   - Order: fifth-order solution, fourth-order error estimate
//!   - Cost: 6 function evaluations per step (FSAL)
//!   - Use: **production runs**, orbits whose natural time scale changes by
//!     orders of magnitude between periapsis and apoapsis
//!
//! - **[`RK4Solver`]**: Classical fourth-order Runge-Kutta
//!   - Order: fourth-order O(dt⁴)
//!   - Cost: 4 function evaluations per step
//!   - Use: reference integrator for convergence checks and benchmarks
//!
//! # Design Philosophy
//!
//! Each solver is:
//! - **Self-contained**: No shared mutable state
//! - **Stateless**: Can be reused for multiple simulations; run counters are
//!   returned with the result rather than stored on the solver

mod dopri5;
mod rk4;

// Re-exports for convenience
pub use dopri5::{Dopri5Solver, Stats, Tolerances};
pub use rk4::RK4Solver;
