//! Line Graph Module

use super::xy::{PlotData, SeriesRenderer};
use super::ContinuousGraph;
use crate::render::{Canvas, Stroke};

const MIN_POINT_RADIUS: f64 = 1.0;
const MAX_POINT_RADIUS: f64 = 10.0;

/// Connects each series' points and marks every point unless told not to.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    pub draw_points: bool,
    pub point_radius: f64,
}

impl Default for LinePlot {
    fn default() -> Self {
        Self {
            draw_points: true,
            point_radius: 3.0,
        }
    }
}

impl LinePlot {
    /// Marker radius from a fraction: 0 is the smallest marker, 1 the largest.
    pub fn set_point_size(&mut self, fraction: f64) {
        let d = fraction.clamp(0.0, 1.0);
        self.point_radius = d * (MAX_POINT_RADIUS - MIN_POINT_RADIUS) + MIN_POINT_RADIUS;
    }
}

impl SeriesRenderer for LinePlot {
    fn draw_series(&self, plot: &PlotData<'_>, canvas: &mut dyn Canvas) {
        for series in plot.series.iter().filter(|s| s.visible) {
            let points = plot.points(series);
            canvas.polyline(&points, Stroke::new(series.stroke_width, series.color));
            if self.draw_points {
                for p in points {
                    canvas.fill_circle(p, self.point_radius, series.color);
                }
            }
        }
    }
}

pub type LineGraph = ContinuousGraph<LinePlot>;

impl LineGraph {
    pub fn draw_points(&mut self, draw: bool) {
        self.renderer_mut().draw_points = draw;
    }

    pub fn set_point_size(&mut self, fraction: f64) {
        self.renderer_mut().set_point_size(fraction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSet;
    use crate::graphs::Graph;
    use crate::render::RecordingCanvas;

    fn drawn(graph: &mut LineGraph) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new(400.0, 300.0);
        graph.draw(&mut canvas);
        canvas
    }

    fn sine() -> DataSet<f64> {
        let mut ds = DataSet::new();
        let xs: Vec<f64> = (0..20).map(|i| i as f64 * 0.5).collect();
        ds.add_dependent(xs.iter().map(|x| x.sin()).collect());
        ds.set_independent(xs);
        ds
    }

    #[test]
    fn test_point_size_range() {
        let mut plot = LinePlot::default();
        plot.set_point_size(0.0);
        assert_eq!(plot.point_radius, 1.0);
        plot.set_point_size(1.0);
        assert_eq!(plot.point_radius, 10.0);
        plot.set_point_size(7.0);
        assert_eq!(plot.point_radius, 10.0);
    }

    #[test]
    fn test_markers_drawn_by_default() {
        let mut ds = sine();
        let graph = LineGraph::new().into_shared();
        ds.add_observer(&graph);

        let circles = drawn(&mut graph.borrow_mut()).circles();
        assert_eq!(circles.len(), 20);
        assert!(circles.iter().all(|(_, r, _)| *r == 3.0));

        graph.borrow_mut().set_point_size(0.5);
        let circles = drawn(&mut graph.borrow_mut()).circles();
        assert!(circles.iter().all(|(_, r, _)| *r == 5.5));

        graph.borrow_mut().draw_points(false);
        assert!(drawn(&mut graph.borrow_mut()).circles().is_empty());
    }

    #[test]
    fn test_hidden_series_not_drawn() {
        let mut ds = sine();
        ds.add_dependent(vec![0.5; 20]);
        let graph = LineGraph::new().into_shared();
        ds.add_observer(&graph);
        let mut g = graph.borrow_mut();
        let hidden = g.core().series()[1].color;
        g.set_series_visible(1, false).unwrap();
        let canvas = drawn(&mut g);
        assert!(canvas.lines_with_color(hidden).is_empty());
        assert_eq!(canvas.lines_with_color(g.core().series()[0].color).len(), 19);
    }

    #[test]
    fn test_short_series_draws_prefix() {
        let mut ds = DataSet::new();
        ds.set_independent([0.0, 1.0, 2.0, 3.0]);
        ds.add_dependent(vec![1.0, 2.0]);
        let graph = LineGraph::new().into_shared();
        ds.add_observer(&graph);
        let mut g = graph.borrow_mut();
        let color = g.core().series()[0].color;
        assert_eq!(drawn(&mut g).lines_with_color(color).len(), 1);
    }
}
