//! Visualization of orbit integrations
//!
//! This module renders simulation results with the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **orbit**: Diagnostic panels and orbital plane plots
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use geodesic_rs::output::visualization::{plot_diagnostics, plot_trajectory, PlotConfig};
//!
//! let run = integrate_geodesics(&params)?;
//!
//! // r(t), φ(t), ṙ(t) and the trajectory on one image
//! plot_diagnostics(&run.primary, law, run.newtonian.as_ref(), path, None)?;
//!
//! // Orbital plane only, equal axes
//! let config = PlotConfig::trajectory("ELLIPTIC");
//! plot_trajectory(&run.primary, law, None, Path::new("elliptic.jpeg"), Some(&config))?;
//! ```
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Quick look at a run | `plot_diagnostics` |
//! | GR vs Newton overlay | `plot_diagnostics` / `plot_trajectory` with `newtonian` |
//! | Publication image of the orbit | `plot_trajectory` |

pub mod config;
pub mod orbit;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};

pub use orbit::{equal_aspect_ranges, plot_diagnostics, plot_trajectory, value_range};
