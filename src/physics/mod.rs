//! Physical state and model abstractions
//!
//! # Core Concepts
//!
//! - **Orbital State**: the reduced state `(r, φ, ṙ)` of the test particle
//! - **Physical Model**: computes `dy/dt` at a given state
//! - **Coordinates**: polar ↔ Cartesian conversion for the orbital plane
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to solve them (numerics)
//!
//! The same geodesic model can therefore be integrated with the adaptive
//! Dormand-Prince solver or with fixed-step RK4.

pub mod coordinates;
pub mod state;
pub mod traits;

// re-export commonly used types for convenience
pub use coordinates::{to_cartesian, to_polar, wrap_angle};
pub use state::{OrbitalState, StateBatch, STATE_DIM};
pub use traits::PhysicalModel;
