//! Output module for simulation results
//!
//! - **Visualization**: PNG/JPEG/SVG plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── orbit.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use geodesic_rs::output::{plot_diagnostics, CsvExporter, Exporter};
//!
//! plot_diagnostics(&run.primary, law, run.newtonian.as_ref(), Path::new("test_diagnostics.png"), None)?;
//! CsvExporter::default().export_trajectory(&run.primary, &model, None, Path::new("test.csv"))?;
//! ```
//!
//! Plotting returns `Box<dyn Error>` like the plotters backends it wraps;
//! exporters carry their own error type.

pub mod export;
pub mod visualization;

pub use visualization::{plot_diagnostics, plot_trajectory, PlotConfig};

pub use export::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter};
