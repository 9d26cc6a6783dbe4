//! Orbit plots
//!
//! Two figures are produced from a [`SimulationResult`]:
//!
//! - [`plot_diagnostics`]: radius, angle and radial velocity against time plus
//!   the trajectory in the orbital plane, on a 2 × 2 grid
//! - [`plot_trajectory`]: the orbital plane alone, with equal axis scaling
//!
//! The backend is picked from the file extension: `.svg` goes through
//! `SVGBackend`, anything else (`.png`, `.jpeg`, `.jpg`) through `BitMapBackend`.
//!
//! # Example
//!
//! ```rust,ignore
//! use geodesic_rs::output::visualization::{plot_trajectory, PlotConfig};
//!
//! let config = PlotConfig::trajectory("ELLIPTIC");
//! plot_trajectory(&run.primary, law, None, Path::new("elliptic.jpeg"), Some(&config))?;
//! ```

use std::error::Error;
use std::f64::consts::TAU;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::models::{ForceLaw, HORIZON_RADIUS};
use crate::output::visualization::config::{PlotConfig, NO_TITLE};
use crate::physics::coordinates::trajectory_to_cartesian;
use crate::solver::SimulationResult;

/// Fraction of the data span added on each side of a panel
const PADDING: f64 = 0.05;

/// Vertices of the polygon drawn for the horizon disc
const DISC_VERTICES: usize = 120;

const MARGIN: u32 = 15;
const X_LABEL_AREA: u32 = 50;
const Y_LABEL_AREA: u32 = 70;
const CAPTION_HEIGHT: u32 = 40;

// =================================================================================================
// Range helpers
// =================================================================================================

/// Axis range covering `values` with a small margin
///
/// Non-finite values are skipped. A constant series gets a symmetric band
/// around its value so that the axis is never empty.
pub fn value_range(values: &[f64]) -> Range<f64> {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }

    let span = max - min;
    let pad = if span > 0.0 {
        PADDING * span
    } else {
        (0.05 * min.abs()).max(0.5)
    };
    (min - pad)..(max + pad)
}

/// Ranges for the orbital plane with one unit of x spanning as many pixels as
/// one unit of y
///
/// `aspect` is the plotting area width divided by its height. The origin and
/// the horizon disc are always inside the returned window.
pub fn equal_aspect_ranges(points: &[(f64, f64)], aspect: f64) -> (Range<f64>, Range<f64>) {
    let mut x_bounds = (-HORIZON_RADIUS, HORIZON_RADIUS);
    let mut y_bounds = (-HORIZON_RADIUS, HORIZON_RADIUS);

    for &(x, y) in points.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
        x_bounds = (x_bounds.0.min(x), x_bounds.1.max(x));
        y_bounds = (y_bounds.0.min(y), y_bounds.1.max(y));
    }

    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    let center_x = 0.5 * (x_bounds.0 + x_bounds.1);
    let center_y = 0.5 * (y_bounds.0 + y_bounds.1);

    let half_x = 0.5 * (x_bounds.1 - x_bounds.0);
    let half_y = 0.5 * (y_bounds.1 - y_bounds.0);
    let half_x = half_x.max(half_y * aspect) * (1.0 + PADDING);
    let half_y = half_x / aspect;

    (
        (center_x - half_x)..(center_x + half_x),
        (center_y - half_y)..(center_y + half_y),
    )
}

/// Width over height of the plotting area left inside a panel of `dims` pixels
fn plotting_aspect(dims: (u32, u32), with_caption: bool) -> f64 {
    let caption = if with_caption { CAPTION_HEIGHT } else { 0 };
    let width = dims.0.saturating_sub(2 * MARGIN + Y_LABEL_AREA).max(1);
    let height = dims.1.saturating_sub(2 * MARGIN + X_LABEL_AREA + caption).max(1);
    width as f64 / height as f64
}

fn horizon_disc() -> Vec<(f64, f64)> {
    (0..DISC_VERTICES)
        .map(|i| {
            let angle = TAU * i as f64 / DISC_VERTICES as f64;
            (HORIZON_RADIUS * angle.cos(), HORIZON_RADIUS * angle.sin())
        })
        .collect()
}

fn cartesian_points(result: &SimulationResult) -> Vec<(f64, f64)> {
    trajectory_to_cartesian(&result.radii(), &result.angles())
}

// =================================================================================================
// Public API
// =================================================================================================

/// Four-panel figure: `r(t)`, `φ(t)`, `ṙ(t)` and the trajectory
///
/// When `newtonian` is given, its trajectory is overlaid on the orbital plane
/// panel with the Newtonian colour.
///
/// # Errors
///
/// Returns `Err` if `primary` holds no samples or the backend fails.
pub fn plot_diagnostics(
    primary: &SimulationResult,
    law: ForceLaw,
    newtonian: Option<&SimulationResult>,
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if primary.is_empty() {
        return Err("cannot plot an empty trajectory".into());
    }

    let default_config = PlotConfig::diagnostics(NO_TITLE);
    let figure = OrbitFigure {
        kind: FigureKind::Diagnostics,
        primary,
        law,
        newtonian,
        config: config.unwrap_or(&default_config),
    };
    render(&figure, output_path)
}

/// Trajectory in the orbital plane
///
/// The origin is marked with a dot, the start point with a cross, and a
/// filled disc of radius 2 is drawn around the origin. Axes share the same
/// scale.
///
/// # Errors
///
/// Returns `Err` if `primary` holds no samples or the backend fails.
pub fn plot_trajectory(
    primary: &SimulationResult,
    law: ForceLaw,
    newtonian: Option<&SimulationResult>,
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if primary.is_empty() {
        return Err("cannot plot an empty trajectory".into());
    }

    let default_config = PlotConfig::trajectory(NO_TITLE);
    let figure = OrbitFigure {
        kind: FigureKind::Trajectory,
        primary,
        law,
        newtonian,
        config: config.unwrap_or(&default_config),
    };
    render(&figure, output_path)
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FigureKind {
    Diagnostics,
    Trajectory,
}

/// Everything one figure needs, independent of the backend
struct OrbitFigure<'a> {
    kind: FigureKind,
    primary: &'a SimulationResult,
    law: ForceLaw,
    newtonian: Option<&'a SimulationResult>,
    config: &'a PlotConfig,
}

/// Pick the backend from the file extension and draw `figure` on it
fn render(figure: &OrbitFigure<'_>, output_path: &Path) -> Result<(), Box<dyn Error>> {
    let size = (figure.config.width, figure.config.height);
    let ext = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => draw_figure(SVGBackend::new(output_path, size), figure),
        _ => draw_figure(BitMapBackend::new(output_path, size), figure),
    }
}

fn draw_figure<DB: DrawingBackend>(backend: DB, figure: &OrbitFigure<'_>) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let OrbitFigure { kind, primary, law, newtonian, config } = *figure;
    match kind {
        FigureKind::Diagnostics => plot_diagnostics_impl(backend, primary, law, newtonian, config),
        FigureKind::Trajectory => plot_trajectory_impl(backend, primary, law, newtonian, config),
    }
}

fn plot_diagnostics_impl<DB: DrawingBackend>(
    backend: DB,
    primary: &SimulationResult,
    law: ForceLaw,
    newtonian: Option<&SimulationResult>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;
    let root = root.titled(&config.title, ("sans-serif", 40).into_font())?;

    let panels = root.split_evenly((2, 2));
    let color = config.law_color(law);
    let times = &primary.time_points;

    draw_time_panel(&panels[0], times, &primary.radii(), "t", "r", law.label(), color, config)?;
    draw_time_panel(&panels[1], times, &primary.angles(), "t", "phi", law.label(), color, config)?;
    draw_time_panel(
        &panels[2],
        times,
        &primary.radial_velocities(),
        "t",
        "r_dot",
        law.label(),
        color,
        config,
    )?;
    draw_orbit_panel(&panels[3], primary, law, newtonian, None, config)?;

    root.present()?;
    Ok(())
}

fn plot_trajectory_impl<DB: DrawingBackend>(
    backend: DB,
    primary: &SimulationResult,
    law: ForceLaw,
    newtonian: Option<&SimulationResult>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    draw_orbit_panel(&root, primary, law, newtonian, Some(&config.title), config)?;

    root.present()?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_time_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    times: &[f64],
    values: &[f64],
    xlabel: &str,
    ylabel: &str,
    label: &str,
    color: RGBColor,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let t_end = times.last().copied().filter(|t| *t > 0.0).unwrap_or(1.0);

    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(0.0..t_end, value_range(values))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(xlabel).y_desc(ylabel);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    chart
        .draw_series(LineSeries::new(
            times.iter().zip(values.iter()).map(|(t, v)| (*t, *v)),
            color.stroke_width(config.line_width),
        ))?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn draw_orbit_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    primary: &SimulationResult,
    law: ForceLaw,
    newtonian: Option<&SimulationResult>,
    caption: Option<&str>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let points = cartesian_points(primary);
    let newton_points = newtonian.map(cartesian_points);

    let mut all_points = points.clone();
    if let Some(extra) = &newton_points {
        all_points.extend_from_slice(extra);
    }
    let aspect = plotting_aspect(area.dim_in_pixel(), caption.is_some());
    let (x_range, y_range) = equal_aspect_ranges(&all_points, aspect);

    let mut builder = ChartBuilder::on(area);
    if let Some(caption) = caption {
        builder.caption(caption, ("sans-serif", 40).into_font());
    }
    let mut chart = builder
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc("x").y_desc("y");
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    chart.draw_series(std::iter::once(Polygon::new(
        horizon_disc(),
        config.horizon_color.filled(),
    )))?;

    let color = config.law_color(law);
    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            color.stroke_width(config.line_width),
        ))?
        .label(law.label())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

    if let Some(newton_points) = newton_points {
        let newton_color = config.law_color(ForceLaw::Newtonian);
        chart
            .draw_series(LineSeries::new(
                newton_points.into_iter(),
                newton_color.stroke_width(config.line_width),
            ))?
            .label(ForceLaw::Newtonian.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], newton_color));
    }

    chart.draw_series(std::iter::once(Circle::new(
        (0.0, 0.0),
        4,
        config.marker_color.filled(),
    )))?;

    if let Some(&start) = points.first() {
        chart.draw_series(std::iter::once(Cross::new(
            start,
            8,
            config.marker_color.stroke_width(2),
        )))?;
    }

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
