//! Physical models for orbital motion around a central mass
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! The solver calls `compute_physics` at each stage: models are responsible
//! for the physics (effective potential, angular momentum), the solver for
//! the time integration.
//!
//! # Available Models
//!
//! ## [`GeodesicModel`]
//!
//! Test particle with fixed angular momentum `L` moving in the effective
//! potential of a unit central mass. The [`ForceLaw`] selects between plain
//! Newtonian gravity and the Schwarzschild correction that makes bound
//! orbits precess.
//!
//! ## [`potential`]
//!
//! Closed-form effective potential, its radial derivative and the specific
//! energy, shared by the model, the configuration layer (`relative_units`)
//! and the analysis helpers.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod geodesic;
pub mod potential;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use geodesic::GeodesicModel;
pub use potential::{
    effective_potential,
    effective_potential_derivative,
    escape_velocity,
    specific_energy,
    ForceLaw,
    HORIZON_RADIUS,
    SINGULARITY_OFFSET,
};
