//! Example: Scattering and capture of unbound particles
//!
//! Particles come in from r₀ = 50 with specific energy E = 10⁻³ and
//! increasing angular momentum. Below the critical value (L ≈ 4 for E → 0)
//! the centrifugal barrier is too low and the particle falls through the
//! horizon; above it the particle is deflected back out.
//!
//! For each L the example reports the closest approach and, for scattered
//! particles, the deflection angle `Δφ - π`.

use geodesic_rs::{
    config::ScenarioParameters,
    driver::integrate_geodesics,
    models::{effective_potential, ForceLaw, HORIZON_RADIUS},
    output::{plot_trajectory, PlotConfig},
};

use std::f64::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Unbound Orbits - Capture vs Scattering (E = 1e-3)");
    println!("═══════════════════════════════════════════════════════\n");

    let energy = 1e-3;
    let r_0 = 50.0;
    let tmp_dir = std::env::temp_dir();

    println!(
        "{:<8} {:>10} {:>14} {:>16} {:>10}",
        "L", "Outcome", "r_min", "Deflection (rad)", "Status"
    );
    println!("{:-<62}", "");

    for angular_momentum in [3.6, 3.9, 4.02, 4.3, 5.0, 6.0] {
        let potential = effective_potential(r_0, angular_momentum, ForceLaw::Schwarzschild);
        let radial_kinetic = energy - potential;
        if radial_kinetic <= 0.0 {
            println!("{:<8} forbidden at r0", angular_momentum);
            continue;
        }

        let mut params = ScenarioParameters::default_scenario();
        params.name = format!("HYPERBOLIC_L{}", angular_momentum);
        params.angular_momentum = angular_momentum;
        params.r_0 = r_0;
        params.r_dot_0 = -(2.0 * radial_kinetic).sqrt();
        params.t_max = 2e3;

        let run = integrate_geodesics(&params)?;
        let result = &run.primary;

        let r_min = result.radii().into_iter().fold(f64::INFINITY, f64::min);
        let captured = !result.is_success() || r_min < HORIZON_RADIUS;
        let status = if result.is_success() { "ok" } else { "stopped" };

        if captured {
            println!(
                "{:<8} {:>10} {:>14.4} {:>16} {:>10}",
                angular_momentum, "captured", r_min, "-", status
            );
        } else {
            let swept = result.final_state.phi() - params.phi_0;
            println!(
                "{:<8} {:>10} {:>14.4} {:>16.4} {:>10}",
                angular_momentum,
                "scattered",
                r_min,
                swept - PI,
                status
            );
        }

        let path = tmp_dir.join(format!("{}_trajectory.png", params.name));
        let config = PlotConfig::trajectory(format!("L = {}", angular_momentum));
        plot_trajectory(result, ForceLaw::Schwarzschild, None, &path, Some(&config))?;
    }

    println!("\nTrajectories written to {}", tmp_dir.display());
    Ok(())
}
