//! Example: Periapsis precession, GR vs Newton
//!
//! Integrates the bound orbit L = 10.02, r₀ = 150, ṙ₀ = -0.02 over 3·10⁵
//! time units with both force laws, measures the periapsis advance per
//! revolution and compares it with the weak-field estimate 6π/L².
//!
//! Images and CSV files are written to the system temporary directory.

use geodesic_rs::{
    analysis::{max_relative_energy_drift, periapsis_advances, periapsis_passages},
    config::ScenarioParameters,
    driver::{integrate_geodesics, render_outputs},
    models::ForceLaw,
};

use std::f64::consts::PI;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Periapsis Precession - Schwarzschild vs Newtonian");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Scenario ======

    let mut params = ScenarioParameters::default_scenario();
    params.name = "ELLIPTIC".to_string();
    params.folder = std::env::temp_dir();
    params.angular_momentum = 10.02;
    params.r_0 = 150.0;
    params.r_dot_0 = -0.02;
    params.t_max = 3e5;
    params.compare = true;
    params.show = true;
    params.save_trajectory = true;
    params.save_csv = true;

    println!("Parameters:");
    for line in params.to_string().lines() {
        println!("  {}", line);
    }
    println!();

    // ====== Integration ======

    let start = Instant::now();
    let run = integrate_geodesics(&params)?;
    println!("Integrated both laws in {:.2}s\n", start.elapsed().as_secs_f64());

    let newtonian = run.newtonian.as_ref().ok_or("comparison run missing")?;

    // ====== Analysis ======

    println!("{:<8} {:>10} {:>16} {:>16}", "Law", "Periapses", "Advance (rad)", "Energy drift");
    println!("{:-<54}", "");

    for (law, result) in [(ForceLaw::Schwarzschild, &run.primary), (ForceLaw::Newtonian, newtonian)] {
        let advances = periapsis_advances(result);
        let mean = if advances.is_empty() {
            0.0
        } else {
            advances.iter().sum::<f64>() / advances.len() as f64
        };
        let drift = max_relative_energy_drift(result, params.angular_momentum, law);

        println!(
            "{:<8} {:>10} {:>16.6} {:>16.3e}",
            law.label(),
            periapsis_passages(result).len(),
            mean,
            drift
        );
    }

    let weak_field = 6.0 * PI / (params.angular_momentum * params.angular_momentum);
    println!("\nWeak-field estimate 6π/L² : {:.6} rad", weak_field);

    // ====== Output ======

    println!("\nFiles:");
    for path in render_outputs(&params, &run)? {
        println!("  {}", path.display());
    }

    Ok(())
}
