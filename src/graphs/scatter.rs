//! Scatter Graph Module

use super::xy::{PlotData, SeriesRenderer};
use super::{Color, ContinuousGraph};
use crate::render::{Canvas, Point, Region};
use serde::{Deserialize, Serialize};

const MIN_SHAPE_SIZE: f64 = 5.0;
const MAX_SHAPE_SIZE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerShape {
    Square,
    Circle,
    Triangle,
}

impl MarkerShape {
    pub const ALL: [MarkerShape; 3] = [MarkerShape::Square, MarkerShape::Circle, MarkerShape::Triangle];

    /// Shape series `index` gets unless one was chosen.
    pub fn cycled(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Paint one marker of edge length `size` centred on `at`.
    pub fn draw(self, canvas: &mut dyn Canvas, at: Point, size: f64, color: Color) {
        let half = size / 2.0;
        match self {
            MarkerShape::Square => {
                canvas.fill_rect(Region::new(at.x - half, at.y - half, size, size), color)
            }
            MarkerShape::Circle => canvas.fill_circle(at, half, color),
            MarkerShape::Triangle => canvas.fill_polygon(&triangle(at, half), color),
        }
    }
}

/// Upward equilateral triangle around `at` with half base `s`.
fn triangle(at: Point, s: f64) -> [Point; 3] {
    let h = 30f64.to_radians().tan() * s;
    let w = 2.0 * s * 60f64.to_radians().sin() - h;
    [
        Point::new(at.x - s, at.y + h),
        Point::new(at.x + s, at.y + h),
        Point::new(at.x, at.y - w),
    ]
}

/// One marker per point, no connecting lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub shape_size: f64,
    /// Per-series shape overrides by series index.
    shapes: Vec<Option<MarkerShape>>,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self {
            shape_size: MIN_SHAPE_SIZE,
            shapes: Vec::new(),
        }
    }
}

impl ScatterPlot {
    /// Marker size from a fraction: 0 is the smallest marker, 1 the largest.
    pub fn set_shape_size(&mut self, fraction: f64) {
        let d = fraction.clamp(0.0, 1.0);
        self.shape_size = MIN_SHAPE_SIZE + (MAX_SHAPE_SIZE - MIN_SHAPE_SIZE) * d;
    }

    pub fn set_shape(&mut self, series: usize, shape: MarkerShape) {
        if self.shapes.len() <= series {
            self.shapes.resize(series + 1, None);
        }
        self.shapes[series] = Some(shape);
    }

    pub fn shape(&self, series: usize) -> MarkerShape {
        self.shapes
            .get(series)
            .copied()
            .flatten()
            .unwrap_or_else(|| MarkerShape::cycled(series))
    }
}

impl SeriesRenderer for ScatterPlot {
    fn draw_series(&self, plot: &PlotData<'_>, canvas: &mut dyn Canvas) {
        for (i, series) in plot.series.iter().enumerate() {
            if !series.visible {
                continue;
            }
            let shape = self.shape(i);
            for p in plot.points(series) {
                shape.draw(canvas, p, self.shape_size, series.color);
            }
        }
    }
}

pub type ScatterGraph = ContinuousGraph<ScatterPlot>;

impl ScatterGraph {
    pub fn set_shape_size(&mut self, fraction: f64) {
        self.renderer_mut().set_shape_size(fraction);
    }

    pub fn set_draw_shape(&mut self, shape: MarkerShape, series: usize) {
        self.renderer_mut().set_shape(series, shape);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSet;
    use crate::graphs::Graph;
    use crate::render::RecordingCanvas;

    #[test]
    fn test_shapes_cycle_by_series() {
        let plot = ScatterPlot::default();
        assert_eq!(plot.shape(0), MarkerShape::Square);
        assert_eq!(plot.shape(1), MarkerShape::Circle);
        assert_eq!(plot.shape(2), MarkerShape::Triangle);
        assert_eq!(plot.shape(3), MarkerShape::Square);
    }

    #[test]
    fn test_override_one_series() {
        let mut plot = ScatterPlot::default();
        plot.set_shape(2, MarkerShape::Circle);
        assert_eq!(plot.shape(0), MarkerShape::Square);
        assert_eq!(plot.shape(2), MarkerShape::Circle);
    }

    #[test]
    fn test_size_never_zero() {
        let mut plot = ScatterPlot::default();
        plot.set_shape_size(-1.0);
        assert_eq!(plot.shape_size, 5.0);
        plot.set_shape_size(1.0);
        assert_eq!(plot.shape_size, 50.0);
    }

    #[test]
    fn test_triangle_vertices() {
        let [a, b, c] = triangle(Point::new(0.0, 0.0), 10.0);
        assert_eq!(a.x, -10.0);
        assert_eq!(b.x, 10.0);
        assert!((a.y - 5.773502691896257).abs() < 1e-9);
        assert!((c.y + (17.320508075688775 - 5.773502691896257)).abs() < 1e-9);
    }

    #[test]
    fn test_marker_per_point() {
        let mut ds = DataSet::new();
        ds.set_independent([1.0, 2.0, 3.0]);
        ds.add_dependent(vec![1.0, 4.0, 9.0]);
        ds.add_dependent(vec![2.0, 3.0, 4.0]);
        ds.add_dependent(vec![0.5, 0.5, 0.5]);
        let graph = ScatterGraph::new().into_shared();
        ds.add_observer(&graph);

        let mut canvas = RecordingCanvas::new(400.0, 300.0);
        let mut g = graph.borrow_mut();
        g.draw(&mut canvas);
        let squares = canvas.rects_with_color(g.core().series()[0].color);
        assert_eq!(squares.len(), 3);
        assert!(squares.iter().all(|r| r.width == 5.0));
        assert_eq!(canvas.circles().len(), 3);
        assert_eq!(canvas.polygons().len(), 3);
    }
}
