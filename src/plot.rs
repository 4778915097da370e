//! Convergence picture for a finished solver run.
//!
//! Two side-by-side panels: the function curve over the user-chosen window
//! with the root marked, and the per-iteration step error on a logarithmic
//! axis. The rendering is persisted as a PNG via kaleido.

use plotly::{
    color::NamedColor,
    common::{Marker, MarkerSymbol, Mode},
    layout::{Axis, AxisType, GridPattern, Layout, LayoutGrid},
    Plot, Scatter,
};

use crate::newton::IterationRecord;

const CURVE_SAMPLES: usize = 1000;

/// Render the function curve and the error history, writing the image to
/// `location`.
///
/// `x_min` must be strictly less than `x_max`; the interactive app enforces
/// this at the prompt. The error panel is empty when `trace` is empty, as
/// after a degenerate-derivative abort on the very first pass.
pub fn render_plot<F>(
    f: F,
    root: f64,
    trace: &[IterationRecord<f64>],
    x_min: f64,
    x_max: f64,
    location: &str,
) where
    F: Fn(f64) -> f64,
{
    let mut plot = Plot::new();

    let step = (x_max - x_min) / (CURVE_SAMPLES - 1) as f64;
    let (xs, ys): (Vec<f64>, Vec<f64>) = (0..CURVE_SAMPLES)
        .map(|i| {
            let x = x_min + step * i as f64;
            (x, f(x))
        })
        .unzip();
    let curve = Scatter::new(xs, ys)
        .mode(Mode::Lines)
        .marker(Marker::new().color(NamedColor::Blue))
        .name("f(x)");
    plot.add_trace(curve);

    let root_marker = Scatter::new(vec![root], vec![f(root)])
        .mode(Mode::Markers)
        .marker(
            Marker::new()
                .symbol(MarkerSymbol::CircleOpen)
                .size(12)
                .color(NamedColor::Red),
        )
        .name(&format!("root: x = {root:.6}"));
    plot.add_trace(root_marker);

    let (indices, errors): (Vec<usize>, Vec<f64>) =
        trace.iter().map(|rec| (rec.index, rec.error)).unzip();
    let error_trace = Scatter::new(indices, errors)
        .mode(Mode::LinesMarkers)
        .marker(Marker::new().color(NamedColor::Green))
        .name("|x_{i+1} - x_i|")
        .x_axis("x2")
        .y_axis("y2");
    plot.add_trace(error_trace);

    let layout = Layout::new()
        .grid(
            LayoutGrid::new()
                .rows(1)
                .columns(2)
                .pattern(GridPattern::Independent),
        )
        .x_axis(Axis::new().zero_line(true))
        .y_axis(Axis::new().zero_line(true))
        .x_axis2(Axis::new().zero_line(false))
        .y_axis2(Axis::new().type_(AxisType::Log));
    plot.set_layout(layout);

    plot.write_image(location, plotly::ImageFormat::PNG, 1200, 500, 1.0);
}
