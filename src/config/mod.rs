//! Scenario configuration
//!
//! Scenario files are INI documents: each section is one integration.
//!
//! ```text
//! [ELLIPTIC]
//! L = 10.02
//! phi_0 = 0.
//! r_0 = 150
//! r_dot_0 = -0.02
//! GR = 1
//! t_max = 3e5
//! compare = 1
//! ```
//!
//! Required keys: `L, phi_0, r_0, r_dot_0, GR, t_max`.
//! Optional keys (default): `max_step` (1e4), `compare` (0), `show` (1),
//! `save_trajectory` (0), `relative_units` (0), `save_csv` (0).

mod error;
mod ini;
mod parameters;

pub use error::ConfigError;
pub use ini::{IniDocument, IniSection, DEFAULT_SECTION};
pub use parameters::{
    load_scenarios,
    OptionalDefaults,
    ScenarioParameters,
    OPTIONAL_KEYS,
    REQUIRED_KEYS,
};
