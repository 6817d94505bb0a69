//! Area Line Graph Module

use super::line::LinePlot;
use super::xy::{PlotData, SeriesRenderer};
use super::{Axis, Color, ContinuousGraph};
use crate::render::{Canvas, Point};

/// Share of the graph alpha used for the filled area.
const FILL_FRACTION: f64 = 0.3;

/// Line plot with the area between each line and the x axis filled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaPlot {
    pub line: LinePlot,
}

impl SeriesRenderer for AreaPlot {
    fn draw_series(&self, plot: &PlotData<'_>, canvas: &mut dyn Canvas) {
        let axes = plot.axes;
        let (ymin, _) = axes.bounds(Axis::Y);
        let origin = axes.to_y(ymin.max(0.0));
        let alpha = (plot.alpha as f64 * FILL_FRACTION) as u8;

        for series in plot.series.iter().filter(|s| s.visible) {
            let fill = series.color.with_alpha(alpha);
            for pair in plot.points(series).windows(2) {
                fill_segment(canvas, pair[0], pair[1], origin, fill);
            }
        }
        self.line.draw_series(plot, canvas);
    }
}

/// Fill between segment `a`-`b` and the horizontal line at `origin`. A
/// segment crossing that line becomes two triangles meeting at the crossing,
/// so every polygon handed to the canvas is convex.
fn fill_segment(canvas: &mut dyn Canvas, a: Point, b: Point, origin: f64, color: Color) {
    let (da, db) = (a.y - origin, b.y - origin);
    if da * db < 0.0 {
        let t = da / (da - db);
        let cross = Point::new(a.x + (b.x - a.x) * t, origin);
        canvas.fill_polygon(&[a, cross, Point::new(a.x, origin)], color);
        canvas.fill_polygon(&[cross, b, Point::new(b.x, origin)], color);
    } else {
        canvas.fill_polygon(
            &[a, b, Point::new(b.x, origin), Point::new(a.x, origin)],
            color,
        );
    }
}

pub type AreaLineGraph = ContinuousGraph<AreaPlot>;

impl AreaLineGraph {
    pub fn draw_points(&mut self, draw: bool) {
        self.renderer_mut().line.draw_points = draw;
    }

    pub fn set_point_size(&mut self, fraction: f64) {
        self.renderer_mut().line.set_point_size(fraction);
    }
}
