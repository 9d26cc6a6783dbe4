//! Convergence tests for numerical solvers
//!
//! RK4 must show fourth-order convergence when the step is halved, and the
//! adaptive solver must get more accurate as the tolerances are tightened.

use geodesic_rs::models::{ForceLaw, GeodesicModel};
use geodesic_rs::physics::OrbitalState;
use geodesic_rs::solver::{
    Dopri5Solver,
    RK4Solver,
    Scenario,
    Solver,
    SolverConfiguration,
    Tolerances,
};

mod common;
use common::{create_simple_scenario, ExponentialDecay, RadialOscillator};

fn assert_fourth_order(errors: &[f64], label: &str) {
    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        println!("{} convergence ratio {}->{}: {}", label, i, i + 1, ratio);

        // Should be close to 16 for fourth-order
        assert!(
            ratio > 12.0 && ratio < 20.0,
            "{}: convergence ratio {} not fourth-order",
            label, ratio
        );
    }
}

#[test]
fn test_rk4_fourth_order_convergence() {
    let decay_rate: f64 = 0.3;
    let total_time = 5.0;
    let exact = (-decay_rate * total_time).exp();

    let rk4 = RK4Solver::new();
    let errors: Vec<f64> = [10, 20, 40, 80]
        .iter()
        .map(|&steps| {
            let scenario = create_simple_scenario(ExponentialDecay::new(decay_rate), 1.0);
            let config = SolverConfiguration::time_evolution(total_time, steps);
            let result = rk4.solve(&scenario, &config).unwrap();
            (result.final_state.r() - exact).abs()
        })
        .collect();

    assert_fourth_order(&errors, "RK4 decay");
}

#[test]
fn test_rk4_fourth_order_on_newtonian_orbit() {
    // Slightly eccentric orbit around r = L² = 16
    let model = GeodesicModel::new(4.0, ForceLaw::Newtonian);
    let initial = OrbitalState::new(16.0, 0.0, 0.05);
    let total_time = 200.0;

    let reference = Dopri5Solver::new()
        .solve(
            &Scenario::new(Box::new(model), initial),
            &SolverConfiguration::adaptive(total_time, 2, 1e4),
        )
        .unwrap()
        .final_state;

    let rk4 = RK4Solver::new();
    let errors: Vec<f64> = [20, 40, 80]
        .iter()
        .map(|&steps| {
            let scenario = Scenario::new(Box::new(model), initial);
            let config = SolverConfiguration::time_evolution(total_time, steps);
            let state = rk4.solve(&scenario, &config).unwrap().final_state;
            (state - reference)
                .to_array()
                .iter()
                .fold(0.0_f64, |acc, d| acc.max(d.abs()))
        })
        .collect();

    assert_fourth_order(&errors, "RK4 orbit");
}

#[test]
fn test_dopri5_error_follows_tolerance() {
    let oscillator = RadialOscillator::new(1.0, 4.0);
    let total_time = 20.0 * std::f64::consts::TAU;
    let exact = oscillator.analytical_radius(total_time, 1.0);

    let error_for = |rtol: f64| {
        let scenario = create_simple_scenario(RadialOscillator::new(1.0, 4.0), 5.0);
        let solver = Dopri5Solver::new().with_tolerances(Tolerances::new(rtol * 1e-2, rtol));
        let (result, stats) = solver
            .solve_with_stats(&scenario, &SolverConfiguration::adaptive(total_time, 2, 1e4))
            .unwrap();
        ((result.final_state.r() - exact).abs(), stats.accepted_steps)
    };

    let (loose_error, loose_steps) = error_for(1e-5);
    let (tight_error, tight_steps) = error_for(1e-10);

    assert!(loose_error < 5e-2, "loose error {}", loose_error);
    assert!(tight_error < loose_error);
    assert!(tight_error < 1e-6, "tight error {}", tight_error);
    assert!(tight_steps > loose_steps);
}
