use crate::numerical::quadrature::integrand::Integrand;
use crate::numerical::quadrature::sample_grid::SampleGrid;
use log::{info, warn};
use plotters::prelude::*;
use std::fmt::Display;
use std::path::Path;
use thiserror::Error;

/// points of the smooth curve drawn under the samples
const CURVE_RESOLUTION: usize = 400;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to draw plot: {0}")]
pub struct PlotError(pub String);

fn plot_error<E: Display>(e: E) -> PlotError {
    PlotError(e.to_string())
}

/// Plots the integrand over `[a, b]` of `grid`: the area between the curve and the x axis, the
/// curve itself and the samples the rule used, saved as PNG.
pub fn plot_integral<I: Integrand + ?Sized>(
    f: &I,
    grid: &SampleGrid,
    caption: &str,
    path: &Path,
) -> Result<(), PlotError> {
    let curve = match SampleGrid::sample(f, grid.a(), grid.b(), CURVE_RESOLUTION) {
        Ok(fine) => fine.points(),
        Err(e) => {
            warn!("drawing through the samples only: {}", e);
            grid.points()
        }
    };
    draw_region(&curve, &grid.points(), caption, path)
}

/// Same picture for tabulated data: the polyline through the points is exactly what the
/// trapezoidal rule integrates.
pub fn plot_samples(grid: &SampleGrid, caption: &str, path: &Path) -> Result<(), PlotError> {
    let points = grid.points();
    draw_region(&points, &points, caption, path)
}

fn draw_region(
    curve: &[(f64, f64)],
    samples: &[(f64, f64)],
    caption: &str,
    path: &Path,
) -> Result<(), PlotError> {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (0.0f64, 0.0f64);
    for &(x, y) in curve.iter().chain(samples.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !(x_min < x_max) {
        return Err(PlotError(format!("empty x range [{}, {}]", x_min, x_max)));
    }
    let y_pad = if y_max > y_min { 0.05 * (y_max - y_min) } else { 1.0 };

    let root_area = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root_area)
        .caption(caption, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_min..x_max, (y_min - y_pad)..(y_max + y_pad))
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("f(x)")
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(
            AreaSeries::new(curve.iter().copied(), 0.0, BLUE.mix(0.2)).border_style(BLUE),
        )
        .map_err(plot_error)?
        .label(" integration region")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], BLUE.mix(0.2).filled()));

    chart
        .draw_series(LineSeries::new(curve.iter().copied(), &BLUE))
        .map_err(plot_error)?
        .label(" f(x)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(
            samples
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, RED.filled())),
        )
        .map_err(plot_error)?
        .label(" samples")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, RED.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root_area.present().map_err(plot_error)?;
    info!("plot saved to {}", path.display());
    Ok(())
}
