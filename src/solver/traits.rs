//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` defines the kind of time integration
//! - `SolverConfiguration` carries the `SolverType` and its parameters
//! - `SimulationResult` holds the sampled trajectory, the solver status and
//!   free-form metadata
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: stable interface, implementations live in `solver::methods`
//! - `SolverType` enum: extensible (new variants can be added)

use std::collections::HashMap;

use crate::physics::OrbitalState;
use crate::solver::Scenario;

// =================================================================================================
// Central Solver Type Enumeration
// =================================================================================================

/// Type of time integration
///
/// Each variant carries the data specific to that integration type.
///
/// # Examples
///
/// ```rust
/// use geodesic_rs::solver::SolverType;
///
/// // Fixed step integration
/// let fixed = SolverType::TimeEvolution {
///     total_time: 10.0,
///     time_steps: 1000,
/// };
///
/// // Adaptive integration sampled on 10 000 output points
/// let adaptive = SolverType::AdaptiveTimeEvolution {
///     total_time: 1e4,
///     output_points: 10_000,
///     max_step: 1e4,
/// };
///
/// assert!(fixed.validate().is_ok());
/// assert!(adaptive.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SolverType {
    /// Fixed-step time evolution
    ///
    /// Used by: RK4
    ///
    /// # Parameters
    /// - `total_time`: integration horizon
    /// - `time_steps`: number of equal steps
    TimeEvolution {
        total_time: f64,
        time_steps: usize,
    },

    /// Adaptive time evolution with dense output
    ///
    /// Used by: Dormand-Prince 5(4)
    ///
    /// # Parameters
    /// - `total_time`: integration horizon
    /// - `output_points`: number of equally spaced samples in `[0, total_time]`
    /// - `max_step`: upper bound on the internal step size
    AdaptiveTimeEvolution {
        total_time: f64,
        output_points: usize,
        max_step: f64,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::TimeEvolution { .. } => "TimeEvolution",
            SolverType::AdaptiveTimeEvolution { .. } => "AdaptiveTimeEvolution",
        }
    }

    /// Integration horizon
    pub fn total_time(&self) -> f64 {
        match self {
            SolverType::TimeEvolution { total_time, .. }
            | SolverType::AdaptiveTimeEvolution { total_time, .. } => *total_time,
        }
    }

    /// Validate that parameters are meaningful
    pub fn validate(&self) -> Result<(), String> {
        let total_time = self.total_time();
        if !total_time.is_finite() || total_time <= 0.0 {
            return Err(format!("Total time must be positive and finite, got {}", total_time));
        }

        match self {
            SolverType::TimeEvolution { time_steps, .. } => {
                if *time_steps == 0 {
                    return Err("TimeSteps must be greater than 0".to_string());
                }
                Ok(())
            }
            SolverType::AdaptiveTimeEvolution { output_points, max_step, .. } => {
                if *output_points < 2 {
                    return Err(format!(
                        "At least 2 output points are required, got {}",
                        output_points
                    ));
                }
                if max_step.is_nan() || *max_step <= 0.0 {
                    return Err(format!("Maximum step must be positive, got {}", max_step));
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for a numerical solver
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Type of solver and its parameters
    pub solver_type: SolverType,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self { solver_type }
    }

    /// Create a fixed-step time evolution configuration
    pub fn time_evolution(total_time: f64, time_steps: usize) -> Self {
        Self::new(SolverType::TimeEvolution { total_time, time_steps })
    }

    /// Create an adaptive time evolution configuration
    pub fn adaptive(total_time: f64, output_points: usize, max_step: f64) -> Self {
        Self::new(SolverType::AdaptiveTimeEvolution {
            total_time,
            output_points,
            max_step,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.solver_type.validate()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Outcome of an integration
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SolverStatus {
    /// Every requested output time was reached
    #[default]
    Success,

    /// Integration stopped early; the trajectory holds the samples reached
    /// before the failure
    Failed(String),
}

impl SolverStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, SolverStatus::Success)
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            SolverStatus::Success => None,
            SolverStatus::Failed(reason) => Some(reason),
        }
    }
}

/// Sampled trajectory produced by a [`Solver`]
///
/// `time_points[i]` is the time of `state_trajectory[i]`. Both vectors always
/// have the same length and contain at least the initial condition.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Output times
    pub time_points: Vec<f64>,

    /// State at each output time
    pub state_trajectory: Vec<OrbitalState>,

    /// Last sampled state
    pub final_state: OrbitalState,

    /// Success or failure of the run
    pub status: SolverStatus,

    /// Human readable solver message
    pub message: String,

    /// Free-form solver information (step counts, tolerances...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a successful result
    pub fn new(
        time_points: Vec<f64>,
        state_trajectory: Vec<OrbitalState>,
        final_state: OrbitalState,
    ) -> Self {
        Self {
            time_points,
            state_trajectory,
            final_state,
            status: SolverStatus::Success,
            message: "The solver successfully reached the end of the integration interval."
                .to_string(),
            metadata: HashMap::new(),
        }
    }

    /// Mark the result as failed with the given reason
    pub fn with_failure(mut self, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        self.message = reason.clone();
        self.status = SolverStatus::Failed(reason);
        self
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Look up a metadata entry
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Radius series
    pub fn radii(&self) -> Vec<f64> {
        self.state_trajectory.iter().map(OrbitalState::r).collect()
    }

    /// Angle series (unwrapped)
    pub fn angles(&self) -> Vec<f64> {
        self.state_trajectory.iter().map(OrbitalState::phi).collect()
    }

    /// Radial velocity series
    pub fn radial_velocities(&self) -> Vec<f64> {
        self.state_trajectory.iter().map(OrbitalState::r_dot).collect()
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical method applied to a [`Scenario`]
///
/// Configuration and scenario problems are returned as `Err`. Numerical
/// breakdown during the integration is not an error: implementations
/// return `Ok` with a [`SolverStatus::Failed`] result holding the partial
/// trajectory.
pub trait Solver {
    /// Integrate the scenario with the given configuration
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String>;

    /// Solver name
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
