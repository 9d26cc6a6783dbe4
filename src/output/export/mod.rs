//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format is a new file.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use geodesic_rs::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//!
//! // Full export (all output samples)
//! exporter.export_trajectory(&result, &model, None, Path::new("orbit.csv"))?;
//!
//! // Downsampled export to 500 rows
//! exporter.export_trajectory(&result, &model, Some(500), Path::new("orbit_light.csv"))?;
//! ```

pub mod csv;

pub use csv::{downsample_indices, CsvConfig, CsvError, CsvExporter, CsvMetadata, COLUMNS};

use std::path::Path;

use crate::models::GeodesicModel;
use crate::solver::SimulationResult;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so the caller
/// can react to the precise failure instead of a boxed error.
///
/// # Parameter `n_points`
///
/// - `None`: exports every output sample
/// - `Some(n)`: uniformly downsamples to `n` rows, always including the
///   **first and last** sample (initial condition and final state)
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports one trajectory.
    ///
    /// `model` is the model that produced `result`; it supplies the energy
    /// column.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - `result` contains no data or non-finite samples
    /// - `n_points` is smaller than 2
    fn export_trajectory(
        &self,
        result: &SimulationResult,
        model: &GeodesicModel,
        n_points: Option<usize>,
        path: &Path,
    ) -> Result<(), Self::Error>;
}
