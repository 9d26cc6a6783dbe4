//! Dormand-Prince 5(4) adaptive solver
//!
//! # Mathematical Background
//!
//! Seven-stage explicit Runge-Kutta pair. The fifth-order solution is
//! propagated, the embedded fourth-order solution only serves as an error
//! estimate. The last stage is evaluated at the new state, so it is reused
//! as the first stage of the next step (FSAL, "first same as last"): an
//! accepted step costs six function evaluations.
//!
//! ```text
//! error  = h · Σ eᵢ kᵢ
//! scaled = max_j |error_j| / (atol + rtol · max(|y_j|, |y_new_j|))
//! ```
//!
//! A step is accepted when `scaled ≤ 1`. The next step size follows an
//! I-controller, `h_new = h · clamp(0.9 · scaled^(-1/5), 0.2, 10)`, and is
//! never allowed to grow directly after a rejection.
//!
//! # Dense output
//!
//! The solver never steps onto the output grid. Samples are produced by cubic
//! Hermite interpolation between the two ends of each accepted step, using
//! the states and the slopes that FSAL already provides.
//!
//! # Failures
//!
//! The integration stops early when the step size falls below the floating
//! point spacing at the current time, or when the step budget is exhausted.
//! Both are reported as [`SolverStatus::Failed`](crate::solver::SolverStatus)
//! on an `Ok` result whose trajectory holds every output time reached so
//! far.

use crate::physics::{OrbitalState, PhysicalModel};
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

// =================================================================================================
// Butcher tableau
// =================================================================================================

// Nodes are not needed: the equations of motion do not depend on t.

const A21: f64 = 1.0 / 5.0;

const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;

const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;

const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;

const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// Fifth-order weights (also the last row of A)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Difference between fifth- and fourth-order weights
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

/// Order of the embedded error estimate plus one
const ERROR_EXPONENT: f64 = 1.0 / 5.0;

// =================================================================================================
// Tolerances, controller, statistics
// =================================================================================================

/// Error tolerances
///
/// A component passes when `|err| ≤ atol + rtol · |y|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub atol: f64,
    pub rtol: f64,
}

impl Tolerances {
    pub fn new(atol: f64, rtol: f64) -> Self {
        Self { atol, rtol }
    }

    fn validate(&self) -> Result<(), String> {
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(format!("atol must be positive and finite, got {}", self.atol));
        }
        if !self.rtol.is_finite() || self.rtol < 0.0 {
            return Err(format!("rtol must be non-negative and finite, got {}", self.rtol));
        }
        Ok(())
    }

    fn scale(&self, a: f64, b: f64) -> f64 {
        self.atol + self.rtol * a.abs().max(b.abs())
    }
}

impl Default for Tolerances {
    /// `rtol = 1e-10`, `atol = 1e-12`
    fn default() -> Self {
        Self::new(1e-12, 1e-10)
    }
}

/// I-controller for the step size
#[derive(Debug, Clone, Copy)]
struct StepController {
    safety: f64,
    min_factor: f64,
    max_factor: f64,
}

impl Default for StepController {
    fn default() -> Self {
        Self {
            safety: 0.9,
            min_factor: 0.2,
            max_factor: 10.0,
        }
    }
}

impl StepController {
    fn compute_factor(&self, error: f64) -> f64 {
        if error == 0.0 {
            return self.max_factor;
        }
        if !error.is_finite() {
            return self.min_factor;
        }
        (self.safety * error.powf(-ERROR_EXPONENT)).clamp(self.min_factor, self.max_factor)
    }
}

/// Counters collected during one integration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Total number of right-hand side evaluations
    pub fn_evals: u64,
    /// Number of accepted steps
    pub accepted_steps: u64,
    /// Number of rejected steps
    pub rejected_steps: u64,
}

impl Stats {
    fn attempted_steps(&self) -> u64 {
        self.accepted_steps + self.rejected_steps
    }
}

// =================================================================================================
// Solver
// =================================================================================================

/// Dormand-Prince 5(4) solver with dense output
///
/// Only accepts [`SolverType::AdaptiveTimeEvolution`]. Samples are placed at
/// `linspace(0, total_time, output_points)`.
///
/// # Example
///
/// ```rust
/// use geodesic_rs::models::{ForceLaw, GeodesicModel};
/// use geodesic_rs::physics::OrbitalState;
/// use geodesic_rs::solver::{Dopri5Solver, Scenario, Solver, SolverConfiguration};
///
/// let model = GeodesicModel::new(10.02, ForceLaw::Schwarzschild);
/// let scenario = Scenario::new(Box::new(model), OrbitalState::new(150.0, 0.0, -0.02));
/// let config = SolverConfiguration::adaptive(500.0, 51, 1e4);
///
/// let (result, stats) = Dopri5Solver::new().solve_with_stats(&scenario, &config)?;
///
/// assert!(result.is_success());
/// assert!(stats.accepted_steps > 0);
/// # Ok::<(), String>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Dopri5Solver {
    tolerances: Tolerances,
    controller: StepController,
    max_steps: u64,
}

impl Default for Dopri5Solver {
    fn default() -> Self {
        Self::new()
    }
}

struct StepOutcome {
    y_new: OrbitalState,
    f_new: OrbitalState,
    error: f64,
}

impl Dopri5Solver {
    /// Solver with the default tolerances (`rtol = 1e-10`, `atol = 1e-12`)
    pub fn new() -> Self {
        Self {
            tolerances: Tolerances::default(),
            controller: StepController::default(),
            max_steps: 5_000_000,
        }
    }

    /// Replace the tolerances
    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Replace the step budget (accepted + rejected steps)
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tolerances
    }

    /// Integrate and return the run counters along with the result
    pub fn solve_with_stats(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<(SimulationResult, Stats), String> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;
        self.tolerances.validate()?;

        let (total_time, output_points, max_step) = match &config.solver_type {
            SolverType::AdaptiveTimeEvolution { total_time, output_points, max_step } => {
                (*total_time, *output_points, *max_step)
            }
            other => {
                return Err(format!(
                    "Dopri5Solver only supports AdaptiveTimeEvolution configuration, got {}",
                    other.name()
                ));
            }
        };

        // ====== Step 2: Setup ======

        let model = scenario.model.as_ref();
        let output_times = linspace(total_time, output_points);

        let mut stats = Stats::default();
        let mut t = 0.0;
        let mut y = scenario.initial;
        let mut f = model.compute_physics(&y);
        stats.fn_evals += 1;

        let mut time_points = Vec::with_capacity(output_points);
        let mut state_trajectory = Vec::with_capacity(output_points);
        time_points.push(0.0);
        state_trajectory.push(y);
        let mut next_output = 1;

        let mut h = self.initial_step(model, &y, &f, total_time, max_step, &mut stats);
        let mut failure: Option<String> = None;
        let mut step_rejected = false;

        // ====== Step 3: Adaptive Integration ======

        while next_output < output_points {
            if stats.attempted_steps() >= self.max_steps {
                failure = Some(format!(
                    "Maximum number of steps ({}) reached at t = {}",
                    self.max_steps, t
                ));
                break;
            }

            let remaining = total_time - t;
            let min_step = 10.0 * f64::EPSILON * t.abs();
            let is_last = h >= remaining;
            if is_last {
                h = remaining;
            }

            if h < min_step || h <= 0.0 {
                failure = Some(format!(
                    "Required step size ({:e}) is less than the spacing between numbers at t = {}",
                    h, t
                ));
                break;
            }

            let StepOutcome { y_new, f_new, error } = self.step(model, &y, &f, h, &mut stats);
            let factor = self.controller.compute_factor(error);

            if error <= 1.0 && y_new.is_finite() {
                stats.accepted_steps += 1;
                let factor = if step_rejected { factor.min(1.0) } else { factor };
                step_rejected = false;
                let t_new = if is_last { total_time } else { t + h };

                // Dense output onto every grid time inside (t, t_new]
                while next_output < output_points && output_times[next_output] <= t_new {
                    let t_out = output_times[next_output];
                    let sample = if t_out == t_new {
                        y_new
                    } else {
                        hermite(&y, &f, &y_new, &f_new, h, (t_out - t) / h)
                    };
                    time_points.push(t_out);
                    state_trajectory.push(sample);
                    next_output += 1;
                }

                t = t_new;
                y = y_new;
                f = f_new;
                h = (h * factor).min(max_step);
            } else {
                stats.rejected_steps += 1;
                step_rejected = true;
                h *= factor.min(1.0);
            }
        }

        // ====== Step 4: Build Result ======

        let final_state = *state_trajectory.last().unwrap_or(&scenario.initial);
        let mut result = SimulationResult::new(time_points, state_trajectory, final_state);
        if let Some(reason) = failure {
            log::warn!("Integration of {} stopped early: {}", scenario.get_model_name(), reason);
            result = result.with_failure(reason);
        }

        result.add_metadata("solver", "Dormand-Prince 5(4)");
        result.add_metadata("rtol", &self.tolerances.rtol.to_string());
        result.add_metadata("atol", &self.tolerances.atol.to_string());
        result.add_metadata("max step", &max_step.to_string());
        result.add_metadata("total time", &total_time.to_string());
        result.add_metadata("function evaluations", &stats.fn_evals.to_string());
        result.add_metadata("accepted steps", &stats.accepted_steps.to_string());
        result.add_metadata("rejected steps", &stats.rejected_steps.to_string());

        Ok((result, stats))
    }

    /// One Dormand-Prince step from `(y, f)` with step `h`
    fn step(
        &self,
        model: &dyn PhysicalModel,
        y: &OrbitalState,
        k1: &OrbitalState,
        h: f64,
        stats: &mut Stats,
    ) -> StepOutcome {
        let k1 = *k1;
        let k2 = model.compute_physics(&y.advanced(&(k1 * A21), h));
        let k3 = model.compute_physics(&y.advanced(&(k1 * A31 + k2 * A32), h));
        let k4 = model.compute_physics(&y.advanced(&(k1 * A41 + k2 * A42 + k3 * A43), h));
        let k5 = model.compute_physics(
            &y.advanced(&(k1 * A51 + k2 * A52 + k3 * A53 + k4 * A54), h),
        );
        let k6 = model.compute_physics(
            &y.advanced(&(k1 * A61 + k2 * A62 + k3 * A63 + k4 * A64 + k5 * A65), h),
        );

        let y_new = y.advanced(&(k1 * B1 + k3 * B3 + k4 * B4 + k5 * B5 + k6 * B6), h);
        let k7 = model.compute_physics(&y_new);
        stats.fn_evals += 6;

        let local_error = (k1 * E1 + k3 * E3 + k4 * E4 + k5 * E5 + k6 * E6 + k7 * E7) * h;

        let error = local_error
            .to_array()
            .iter()
            .zip(y.to_array().iter().zip(y_new.to_array()))
            .map(|(err, (a, b))| err.abs() / self.tolerances.scale(*a, b))
            .fold(0.0_f64, |acc, e| if acc.is_nan() || e.is_nan() { f64::NAN } else { acc.max(e) });

        StepOutcome {
            y_new,
            f_new: k7,
            error,
        }
    }

    /// Starting step following Hairer, Nørsett & Wanner (II.4)
    fn initial_step(
        &self,
        model: &dyn PhysicalModel,
        y0: &OrbitalState,
        f0: &OrbitalState,
        span: f64,
        max_step: f64,
        stats: &mut Stats,
    ) -> f64 {
        let scale: Vec<f64> = y0.to_array().iter().map(|v| self.tolerances.scale(*v, 0.0)).collect();
        let rms = |v: &OrbitalState| -> f64 {
            let sum: f64 = v
                .to_array()
                .iter()
                .zip(scale.iter())
                .map(|(x, s)| (x / s).powi(2))
                .sum();
            (sum / 3.0).sqrt()
        };

        let d0 = rms(y0);
        let d1 = rms(f0);
        let h0 = if d0 < 1e-5 || d1 < 1e-5 { 1e-6 } else { 0.01 * d0 / d1 };
        let h0 = h0.min(max_step).min(span);

        let f1 = model.compute_physics(&y0.advanced(f0, h0));
        stats.fn_evals += 1;
        let d2 = rms(&(f1 - *f0)) / h0;

        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(ERROR_EXPONENT)
        };

        let h = (100.0 * h0).min(h1).min(max_step).min(span);
        if h.is_finite() && h > 0.0 { h } else { h0 }
    }
}

impl Solver for Dopri5Solver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String> {
        self.solve_with_stats(scenario, config).map(|(result, _)| result)
    }

    fn name(&self) -> &'static str {
        "Dormand-Prince 5(4)"
    }
}

// =================================================================================================
// Helpers
// =================================================================================================

/// `n` equally spaced points from `0` to `total_time`, both included
pub(crate) fn linspace(total_time: f64, n: usize) -> Vec<f64> {
    let last = (n.max(2) - 1) as f64;
    (0..n)
        .map(|i| if i + 1 == n { total_time } else { total_time * (i as f64) / last })
        .collect()
}

/// Cubic Hermite interpolation on `[t, t + h]` at fraction `theta`
fn hermite(
    y0: &OrbitalState,
    f0: &OrbitalState,
    y1: &OrbitalState,
    f1: &OrbitalState,
    h: f64,
    theta: f64,
) -> OrbitalState {
    let t2 = theta * theta;
    let t3 = t2 * theta;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + theta;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    *y0 * h00 + *f0 * (h10 * h) + *y1 * h01 + *f1 * (h11 * h)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SolverStatus;
    use approx::assert_relative_eq;

    struct ExponentialDecay {
        decay_rate: f64,
    }

    impl PhysicalModel for ExponentialDecay {
        fn compute_physics(&self, state: &OrbitalState) -> OrbitalState {
            *state * -self.decay_rate
        }

        fn name(&self) -> &str {
            "Exponential Decay"
        }
    }

    /// r'' = -(r - 1), offset so the radius stays positive
    struct HarmonicOscillator;

    impl PhysicalModel for HarmonicOscillator {
        fn compute_physics(&self, state: &OrbitalState) -> OrbitalState {
            OrbitalState::new(state.r_dot(), 1.0, -(state.r() - 1.0))
        }

        fn name(&self) -> &str {
            "Harmonic Oscillator"
        }
    }

    /// r' = r², blows up at t = 1 / r₀
    struct FiniteTimeBlowup;

    impl PhysicalModel for FiniteTimeBlowup {
        fn compute_physics(&self, state: &OrbitalState) -> OrbitalState {
            OrbitalState::new(state.r() * state.r(), 0.0, 0.0)
        }

        fn name(&self) -> &str {
            "Blowup"
        }
    }

    fn scenario(model: impl PhysicalModel + 'static, initial: OrbitalState) -> Scenario {
        Scenario::new(Box::new(model), initial)
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(3.0, 4);
        assert_eq!(grid, vec![0.0, 1.0, 2.0, 3.0]);

        let grid = linspace(1e4, 10_000);
        assert_eq!(grid.len(), 10_000);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[9_999], 1e4);
    }

    #[test]
    fn test_hermite_reproduces_cubic() {
        // y = x³ on [1, 3]: y' = 3x²
        let state = |x: f64| OrbitalState::new(x * x * x, 0.0, 0.0);
        let slope = |x: f64| OrbitalState::new(3.0 * x * x, 0.0, 0.0);
        let value = hermite(&state(1.0), &slope(1.0), &state(3.0), &slope(3.0), 2.0, 0.25);
        assert_relative_eq!(value.r(), 1.5f64.powi(3), max_relative = 1e-14);
    }

    #[test]
    fn test_controller_factor_bounds() {
        let controller = StepController::default();
        assert_eq!(controller.compute_factor(0.0), 10.0);
        assert_eq!(controller.compute_factor(1e12), 0.2);
        assert_eq!(controller.compute_factor(f64::NAN), 0.2);
        assert_relative_eq!(controller.compute_factor(1.0), 0.9);
    }

    #[test]
    fn test_rejects_fixed_step_configuration() {
        let s = scenario(ExponentialDecay { decay_rate: 1.0 }, OrbitalState::new(1.0, 0.0, 0.0));
        let err = Dopri5Solver::new()
            .solve(&s, &SolverConfiguration::time_evolution(1.0, 10))
            .unwrap_err();
        assert!(err.contains("only supports AdaptiveTimeEvolution"));
    }

    #[test]
    fn test_rejects_invalid_tolerances() {
        let s = scenario(ExponentialDecay { decay_rate: 1.0 }, OrbitalState::new(1.0, 0.0, 0.0));
        let solver = Dopri5Solver::new().with_tolerances(Tolerances::new(0.0, 1e-6));
        assert!(solver.solve(&s, &SolverConfiguration::adaptive(1.0, 10, 1.0)).is_err());
    }

    #[test]
    fn test_exponential_decay_accuracy_on_grid() {
        let s = scenario(ExponentialDecay { decay_rate: 0.5 }, OrbitalState::new(1.0, 2.0, 3.0));
        let config = SolverConfiguration::adaptive(10.0, 101, f64::INFINITY);
        let result = Dopri5Solver::new().solve(&s, &config).unwrap();

        assert!(result.is_success());
        assert_eq!(result.len(), 101);
        for (t, state) in result.time_points.iter().zip(&result.state_trajectory) {
            let exact = (-0.5 * t).exp();
            assert_relative_eq!(state.r(), exact, max_relative = 1e-5);
            assert_relative_eq!(state.r_dot(), 3.0 * exact, max_relative = 1e-5);
        }
        assert_eq!(*result.time_points.last().unwrap(), 10.0);
    }

    #[test]
    fn test_harmonic_oscillator_many_periods() {
        use std::f64::consts::TAU;

        let s = scenario(HarmonicOscillator, OrbitalState::new(2.0, 0.0, 0.0));
        let config = SolverConfiguration::adaptive(20.0 * TAU, 2001, 1e4);
        let result = Dopri5Solver::new().solve(&s, &config).unwrap();

        for (t, state) in result.time_points.iter().zip(&result.state_trajectory) {
            assert!((state.r() - (1.0 + t.cos())).abs() < 1e-5, "t = {t}");
        }
        assert_relative_eq!(result.final_state.phi(), 20.0 * TAU, max_relative = 1e-10);
    }

    #[test]
    fn test_max_step_bounds_internal_steps() {
        let s = scenario(ExponentialDecay { decay_rate: 0.1 }, OrbitalState::new(1.0, 0.0, 0.0));
        let (_, loose) = Dopri5Solver::new()
            .solve_with_stats(&s, &SolverConfiguration::adaptive(100.0, 11, 1e4))
            .unwrap();
        let (_, bounded) = Dopri5Solver::new()
            .solve_with_stats(&s, &SolverConfiguration::adaptive(100.0, 11, 0.05))
            .unwrap();

        assert!(bounded.accepted_steps >= 2000);
        assert!(bounded.accepted_steps > loose.accepted_steps);
    }

    #[test]
    fn test_fsal_evaluation_count() {
        let s = scenario(ExponentialDecay { decay_rate: 1.0 }, OrbitalState::new(1.0, 0.0, 0.0));
        let (result, stats) = Dopri5Solver::new()
            .solve_with_stats(&s, &SolverConfiguration::adaptive(5.0, 11, 1e4))
            .unwrap();

        // Initial slope + initial step probe + 6 per attempted step
        assert_eq!(stats.fn_evals, 2 + 6 * (stats.accepted_steps + stats.rejected_steps));
        assert_eq!(
            result.metadata("function evaluations"),
            Some(stats.fn_evals.to_string().as_str())
        );
    }

    #[test]
    fn test_blowup_returns_partial_trajectory() {
        // Solution 1 / (1 - t) blows up at t = 1
        let s = scenario(FiniteTimeBlowup, OrbitalState::new(1.0, 0.0, 0.0));
        let config = SolverConfiguration::adaptive(2.0, 201, 1e4);
        let result = Dopri5Solver::new().solve(&s, &config).unwrap();

        assert!(matches!(result.status, SolverStatus::Failed(_)));
        assert!(!result.message.is_empty());
        assert!(result.len() > 1);
        assert!(result.len() < 201);
        assert!(*result.time_points.last().unwrap() < 1.0);
        assert_eq!(result.time_points.len(), result.state_trajectory.len());
    }

    #[test]
    fn test_step_budget_exhaustion() {
        let s = scenario(HarmonicOscillator, OrbitalState::new(2.0, 0.0, 0.0));
        let solver = Dopri5Solver::new().with_max_steps(10);
        let result = solver.solve(&s, &SolverConfiguration::adaptive(1000.0, 11, 1e4)).unwrap();

        assert!(!result.is_success());
        assert!(result.message.contains("Maximum number of steps"));
    }

    #[test]
    fn test_identical_runs_are_bit_identical() {
        let run = || {
            let s = scenario(HarmonicOscillator, OrbitalState::new(1.5, 0.0, 0.3));
            Dopri5Solver::new()
                .solve(&s, &SolverConfiguration::adaptive(50.0, 501, 1e4))
                .unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.time_points, b.time_points);
        assert_eq!(a.state_trajectory, b.state_trajectory);
    }
}
