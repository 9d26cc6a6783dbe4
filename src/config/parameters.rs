//! Scenario parameter sets
//!
//! A [`ScenarioParameters`] is built once per INI section (or once for the
//! built-in `test` scenario) and never modified afterwards. Optional keys are
//! filled from [`OptionalDefaults`] by a pure merge; the two derived
//! adjustments are applied at construction:
//!
//! - `relative_units`: `r_dot_0` is multiplied by the escape velocity scale
//!   `sqrt(2·|V(r_0, L, GR)|)` computed with the configured force law
//! - `compare`: the primary run is forced to use the Schwarzschild potential

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::{ConfigError, IniDocument, IniSection};
use crate::models::{escape_velocity, ForceLaw, GeodesicModel};
use crate::physics::OrbitalState;

/// Keys every scenario section must define
pub const REQUIRED_KEYS: [&str; 6] = ["L", "phi_0", "r_0", "r_dot_0", "GR", "t_max"];

/// Keys with a default value
pub const OPTIONAL_KEYS: [&str; 6] = [
    "max_step",
    "compare",
    "show",
    "save_trajectory",
    "relative_units",
    "save_csv",
];

/// Values used for optional keys absent from a section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionalDefaults {
    pub max_step: f64,
    pub compare: bool,
    pub show: bool,
    pub save_trajectory: bool,
    pub relative_units: bool,
    pub save_csv: bool,
}

impl Default for OptionalDefaults {
    fn default() -> Self {
        Self {
            max_step: 1e4,
            compare: false,
            show: true,
            save_trajectory: false,
            relative_units: false,
            save_csv: false,
        }
    }
}

/// Fully resolved parameters of one integration
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioParameters {
    /// Section name, used in file names and logs
    pub name: String,
    /// Directory receiving the output files
    pub folder: PathBuf,
    /// Angular momentum `L`
    pub angular_momentum: f64,
    pub phi_0: f64,
    pub r_0: f64,
    /// Initial radial velocity, already rescaled when `relative_units` is set
    pub r_dot_0: f64,
    /// Force law of the primary run
    pub gr: bool,
    pub t_max: f64,
    pub max_step: f64,
    /// Also integrate with the Newtonian potential
    pub compare: bool,
    /// Render the four-panel diagnostics figure
    pub show: bool,
    /// Write `<name>_trajectory.jpeg`
    pub save_trajectory: bool,
    pub relative_units: bool,
    /// Write `<name>_trajectory.csv`
    pub save_csv: bool,
}

impl ScenarioParameters {
    /// Build a parameter set from one INI section
    ///
    /// Every value must parse as a float; surrounding whitespace, including
    /// the line break of a continued value, is ignored. Flags are true when
    /// non-zero.
    /// Unknown keys are ignored with a warning.
    pub fn from_section(
        section: &IniSection,
        folder: &Path,
        defaults: &OptionalDefaults,
    ) -> Result<Self, ConfigError> {
        let mut values: HashMap<&str, f64> = HashMap::new();
        for (key, raw) in &section.entries {
            let raw = raw.as_ref().ok_or_else(|| ConfigError::NoValue {
                section: section.name.clone(),
                key: key.clone(),
            })?;
            let value = parse_float(raw).ok_or_else(|| ConfigError::InvalidValue {
                section: section.name.clone(),
                key: key.clone(),
                value: raw.clone(),
            })?;
            if !REQUIRED_KEYS.contains(&key.as_str()) && !OPTIONAL_KEYS.contains(&key.as_str()) {
                log::warn!("Section '{}': ignoring unknown key '{}'", section.name, key);
            }
            values.insert(key.as_str(), value);
        }

        let required = |key: &str| -> Result<f64, ConfigError> {
            values.get(key).copied().ok_or_else(|| ConfigError::MissingKey {
                section: section.name.clone(),
                key: key.to_string(),
            })
        };
        let flag = |key: &str, default: bool| values.get(key).map_or(default, |v| *v != 0.0);

        let angular_momentum = required("L")?;
        let phi_0 = required("phi_0")?;
        let r_0 = required("r_0")?;
        let r_dot_0 = required("r_dot_0")?;
        let gr = required("GR")? != 0.0;
        let t_max = required("t_max")?;

        let max_step = values.get("max_step").copied().unwrap_or(defaults.max_step);
        let compare = flag("compare", defaults.compare);
        let relative_units = flag("relative_units", defaults.relative_units);

        let r_dot_0 = if relative_units {
            r_dot_0 * escape_velocity(r_0, angular_momentum, ForceLaw::from_gr_flag(gr))
        } else {
            r_dot_0
        };

        Ok(Self {
            name: section.name.clone(),
            folder: folder.to_path_buf(),
            angular_momentum,
            phi_0,
            r_0,
            r_dot_0,
            gr: gr || compare,
            t_max,
            max_step,
            compare,
            show: flag("show", defaults.show),
            save_trajectory: flag("save_trajectory", defaults.save_trajectory),
            relative_units,
            save_csv: flag("save_csv", defaults.save_csv),
        })
    }

    /// Built-in scenario used when no configuration file is given
    ///
    /// ```rust
    /// use geodesic_rs::config::ScenarioParameters;
    ///
    /// let params = ScenarioParameters::default_scenario();
    /// assert_eq!(params.name, "test");
    /// assert!(params.r_dot_0 < 0.0);
    /// ```
    pub fn default_scenario() -> Self {
        let defaults = OptionalDefaults::default();
        let (angular_momentum, r_0) = (4.02, 169.68);

        Self {
            name: "test".to_string(),
            folder: PathBuf::from("."),
            angular_momentum,
            phi_0: 0.0,
            r_0,
            r_dot_0: -0.2 * escape_velocity(r_0, angular_momentum, ForceLaw::Schwarzschild),
            gr: true,
            t_max: 1e4,
            max_step: defaults.max_step,
            compare: defaults.compare,
            show: defaults.show,
            save_trajectory: defaults.save_trajectory,
            relative_units: defaults.relative_units,
            save_csv: defaults.save_csv,
        }
    }

    /// Force law of the primary run
    pub fn force_law(&self) -> ForceLaw {
        ForceLaw::from_gr_flag(self.gr)
    }

    /// Equations of motion of the primary run
    pub fn model(&self) -> GeodesicModel {
        GeodesicModel::new(self.angular_momentum, self.force_law())
    }

    /// State at `t = 0`
    pub fn initial_state(&self) -> OrbitalState {
        OrbitalState::new(self.r_0, self.phi_0, self.r_dot_0)
    }

    /// `<folder>/<name><suffix>`
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        self.folder.join(format!("{}{}", self.name, suffix))
    }
}

impl fmt::Display for ScenarioParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "folder: {}", self.folder.display())?;
        writeln!(f, "L: {}", self.angular_momentum)?;
        writeln!(f, "phi_0: {}", self.phi_0)?;
        writeln!(f, "r_0: {}", self.r_0)?;
        writeln!(f, "r_dot_0: {}", self.r_dot_0)?;
        writeln!(f, "GR: {}", self.gr)?;
        writeln!(f, "t_max: {}", self.t_max)?;
        writeln!(f, "max_step: {}", self.max_step)?;
        writeln!(f, "compare: {}", self.compare)?;
        writeln!(f, "show: {}", self.show)?;
        writeln!(f, "save_trajectory: {}", self.save_trajectory)?;
        writeln!(f, "relative_units: {}", self.relative_units)?;
        write!(f, "save_csv: {}", self.save_csv)
    }
}

/// Read every scenario of an INI file
///
/// The output folder of each scenario is the directory containing the file
/// (`.` when the path has no directory part).
pub fn load_scenarios(path: &Path) -> Result<Vec<ScenarioParameters>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    log::info!("Reading ini from file: {}", path.display());

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = IniDocument::parse(&text)?;

    let folder = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let defaults = OptionalDefaults::default();
    document
        .sections()
        .iter()
        .map(|section| ScenarioParameters::from_section(section, &folder, &defaults))
        .collect()
}

/// Float parsing accepting the spellings found in scenario files (`0.`, `2e3`, `inf`)
fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

// =================================================================================================
// Tests
// =================================================================================================
