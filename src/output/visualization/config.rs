//! Plot configuration shared across visualization functions

use plotters::prelude::*;

use crate::models::ForceLaw;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Figure title
/// - `line_color`: Colour of the relativistic (GR) curves
/// - `newton_color`: Colour of the Newtonian curves
/// - `marker_color`: Origin and start point markers
/// - `horizon_color`: Filled disc of radius 2 around the origin
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust,ignore
/// use geodesic_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::trajectory("Elliptic orbit");
/// config.line_color = MAGENTA;
/// config.width = 1920;
/// config.height = 1920;
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 1024)
    pub height: u32,

    /// Figure title (default: "Trajectory")
    pub title: String,

    /// Colour of the GR curves (default: BLUE)
    pub line_color: RGBColor,

    /// Colour of the Newtonian curves (default: orange)
    pub newton_color: RGBColor,

    /// Origin and start markers (default: RED)
    pub marker_color: RGBColor,

    /// Disc around the origin (default: BLACK)
    pub horizon_color: RGBColor,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            title: "Trajectory".to_string(),
            line_color: BLUE,
            newton_color: RGBColor(255, 127, 14),
            marker_color: RED,
            horizon_color: BLACK,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// ```rust,ignore
/// let config = PlotConfig::diagnostics(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Four-panel figure: 1600 × 1200, default title "Geodesic"
    pub fn diagnostics(title: impl IntoOptionalTitle) -> Self {
        Self {
            width: 1600,
            height: 1200,
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Geodesic".to_string()),
            ..Self::default()
        }
    }

    /// Square trajectory image, default title "Trajectory"
    pub fn trajectory(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Trajectory".to_string()),
            ..Self::default()
        }
    }

    /// Curve colour for a force law
    pub fn law_color(&self, law: ForceLaw) -> RGBColor {
        match law {
            ForceLaw::Schwarzschild => self.line_color,
            ForceLaw::Newtonian => self.newton_color,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 1024);
        assert!(config.show_grid);
    }

    #[test]
    fn test_diagnostics_config() {
        let config = PlotConfig::diagnostics(NO_TITLE);
        assert_eq!(config.title, "Geodesic");
        assert_eq!((config.width, config.height), (1600, 1200));

        let config = PlotConfig::diagnostics(format!("ELLIPTIC ({})", ForceLaw::Schwarzschild));
        assert_eq!(config.title, "ELLIPTIC (GR)");
    }

    #[test]
    fn test_trajectory_config_with_str() {
        let config = PlotConfig::trajectory("HYPERBOLIC");
        assert_eq!(config.title, "HYPERBOLIC");
        assert_eq!(config.width, config.height);
    }

    #[test]
    fn test_law_colors_differ() {
        let config = PlotConfig::default();
        assert_eq!(config.law_color(ForceLaw::Schwarzschild), BLUE);
        assert_ne!(
            config.law_color(ForceLaw::Schwarzschild),
            config.law_color(ForceLaw::Newtonian)
        );
    }
}
