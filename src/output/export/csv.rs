//! CSV export of sampled trajectories
//!
//! One row per output sample with the columns
//!
//! ```csv
//! t,r,phi,r_dot,x,y,energy
//! ```
//!
//! `x, y` are the Cartesian coordinates in the orbital plane and `energy` is
//! the specific energy `ṙ²/2 + V(r)` of the model that produced the run, so
//! drift can be inspected without re-evaluating the potential.
//!
//! # Example
//!
//! ```rust,ignore
//! use geodesic_rs::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
//!
//! let config = CsvConfig::default()
//!     .with_metadata(CsvMetadata::from_result(&run.primary, &model));
//! let exporter = CsvExporter::new(config);
//!
//! // Every sample
//! exporter.export_trajectory(&run.primary, &model, None, Path::new("elliptic.csv"))?;
//!
//! // 500 rows, first and last sample included
//! exporter.export_trajectory(&run.primary, &model, Some(500), Path::new("light.csv"))?;
//! ```
//!
//! **Output** with metadata:
//! ```csv
//! # Geodesic Simulation Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Model: Schwarzschild geodesic
//! # Solver: Dormand-Prince 5(4)
//! # Status: Integration successful.
//! # Angular momentum: 10.02
//! #
//! t,r,phi,r_dot,x,y,energy
//! 0.0000000000e0,1.5000000000e2,...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::models::GeodesicModel;
use crate::output::export::Exporter;
use crate::physics::to_cartesian;
use crate::solver::SimulationResult;

/// Column names, in file order
pub const COLUMNS: [&str; 7] = ["t", "r", "phi", "r_dot", "x", "y", "energy"];

// =============================================================================
// Errors
// =============================================================================

/// Failures of the CSV exporter
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("empty data: the trajectory holds no samples")]
    EmptyResult,

    #[error("data length mismatch: {times} time points versus {states} states")]
    LengthMismatch { times: usize, states: usize },

    #[error("cannot downsample to {0} points: at least 2 are required")]
    InvalidPointCount(usize),

    #[error("invalid data: NaN or Inf in sample {row} (t = {time})")]
    NonFinite { row: usize, time: f64 },

    #[error("cannot write CSV file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Digits after the decimal point (default: 10)
/// - `scientific`: Write numbers as `1.5e2` rather than `150.0` (default: true)
/// - `include_metadata`: Add header comments with simulation info
/// - `metadata`: Simulation metadata to include
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 6,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of digits after the decimal point (default: 10)
    pub precision: usize,

    /// Scientific notation (default: true)
    pub scientific: bool,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 10,
            scientific: true,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set end up in the header.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Model name (e.g., "Schwarzschild geodesic")
    pub model_name: Option<String>,

    /// Solver name (e.g., "Dormand-Prince 5(4)")
    pub solver_name: Option<String>,

    /// Solver outcome message
    pub status: Option<String>,

    /// Specific angular momentum `L`
    pub angular_momentum: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Collect model, solver and status from a finished run
    pub fn from_result(result: &SimulationResult, model: &GeodesicModel) -> Self {
        let mut metadata = Self {
            model_name: result.metadata("model").map(str::to_string),
            solver_name: result.metadata("solver").map(str::to_string),
            status: Some(result.message.clone()),
            angular_momentum: Some(model.angular_momentum()),
            custom: Vec::new(),
        };
        if let Some(scenario) = result.metadata("scenario") {
            metadata.add_custom("Scenario", scenario);
        }
        metadata
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.push((key.to_string(), value.to_string()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(out, "# Geodesic Simulation Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(out, "# Model: {}", model)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some(status) = &metadata.status {
        writeln!(out, "# Status: {}", status)?;
    }
    if let Some(l) = metadata.angular_momentum {
        writeln!(out, "# Angular momentum: {}", l)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = if config.scientific {
        format!("{:.prec$e}", value, prec = config.precision)
    } else {
        format!("{:.prec$}", value, prec = config.precision)
    };

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Indices of the rows kept when writing `n_points` out of `len` samples
///
/// Uniform stride; the first and last sample are always part of the
/// selection. `None` or `n_points >= len` keeps everything.
pub fn downsample_indices(len: usize, n_points: Option<usize>) -> Result<Vec<usize>, CsvError> {
    match n_points {
        Some(n) if n < 2 => Err(CsvError::InvalidPointCount(n)),
        Some(n) if n < len => Ok((0..n).map(|i| i * (len - 1) / (n - 1)).collect()),
        _ => Ok((0..len).collect()),
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    /// Write the selected rows to any writer
    pub fn write_trajectory<W: Write>(
        &self,
        out: &mut W,
        result: &SimulationResult,
        model: &GeodesicModel,
        n_points: Option<usize>,
    ) -> Result<(), CsvError> {
        // ============================= Validation =============================

        if result.is_empty() {
            return Err(CsvError::EmptyResult);
        }

        if result.time_points.len() != result.state_trajectory.len() {
            return Err(CsvError::LengthMismatch {
                times: result.time_points.len(),
                states: result.state_trajectory.len(),
            });
        }

        if let Some(row) = result
            .time_points
            .iter()
            .zip(&result.state_trajectory)
            .position(|(t, s)| !t.is_finite() || !s.is_finite())
        {
            return Err(CsvError::NonFinite {
                row,
                time: result.time_points[row],
            });
        }

        let rows = downsample_indices(result.len(), n_points)?;
        let config = &self.config;

        // ============================= Write Metadata =========================

        if config.include_metadata {
            if let Some(metadata) = &config.metadata {
                write_metadata_header(out, metadata)?;
            }
        }

        // ============================= Write Header ===========================

        writeln!(out, "{}", COLUMNS.join(&config.delimiter.to_string()))?;

        // ============================= Write Data =============================

        for i in rows {
            let state = &result.state_trajectory[i];
            let (x, y) = to_cartesian(state.r(), state.phi());
            let values = [
                result.time_points[i],
                state.r(),
                state.phi(),
                state.r_dot(),
                x,
                y,
                model.energy(state),
            ];

            let line: Vec<String> = values.iter().map(|v| format_number(*v, config)).collect();
            writeln!(out, "{}", line.join(&config.delimiter.to_string()))?;
        }

        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_trajectory(
        &self,
        result: &SimulationResult,
        model: &GeodesicModel,
        n_points: Option<usize>,
        path: &Path,
    ) -> Result<(), CsvError> {
        // Validate before touching the file system
        downsample_indices(result.len(), n_points)?;
        if result.is_empty() {
            return Err(CsvError::EmptyResult);
        }

        // ============================= Open File ==============================

        let mut out = BufWriter::new(File::create(path)?);
        self.write_trajectory(&mut out, result, model, n_points)?;
        out.flush()?;
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
