//! Categoric Graph Module
//! X/Y chart with one column per named category.

use super::xy::{self, SeriesRenderer};
use super::{Axes, Axis, AxisRange, Graph, GraphCore};
use crate::config::GraphConfig;
use crate::data::{DataObserver, DataSetId, DataView};
use crate::render::{Canvas, Point, TextMetrics, TextStyle};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Space between a rotated label and the axis.
const LABEL_GAP: f64 = 5.0;

/// Chart of `DataSet<String>` data painted by `R`. The x axis spans
/// `[0, categories]`, one unit per category.
pub struct CategoricGraph<R> {
    core: GraphCore,
    categories: Vec<String>,
    x_points: Vec<f64>,
    renderer: R,
}

impl<R: SeriesRenderer + Default> CategoricGraph<R> {
    pub fn new() -> Self {
        Self::with_renderer(R::default(), GraphConfig::default())
    }
}

impl<R: SeriesRenderer + Default> Default for CategoricGraph<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SeriesRenderer> CategoricGraph<R> {
    pub fn with_renderer(renderer: R, mut config: GraphConfig) -> Self {
        renderer.configure(&mut config);
        Self {
            core: GraphCore::new(config),
            categories: Vec::new(),
            x_points: Vec::new(),
            renderer,
        }
    }

    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        self.core.request_repaint();
        &mut self.renderer
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Pixel x of each category's centre.
    pub fn x_points(&self) -> &[f64] {
        &self.x_points
    }

    /// Fix the y axis to `[min, max]`.
    pub fn set_y_range(&mut self, min: f64, max: f64) {
        self.core.axes.y = AxisRange::manual(min, max);
        self.updated();
    }

    pub fn auto_y_range(&mut self) {
        self.core.axes.y = AxisRange::default();
        self.updated();
    }

    fn load(&mut self, data: DataView<'_, String>) {
        self.categories.clear();
        self.categories.extend_from_slice(data.independent);
        self.core.sync_series(data.dependent);
        self.updated();
    }

    fn draw_category_labels(&self, canvas: &mut dyn Canvas) {
        let axes = &self.core.axes;
        let config = &self.core.config;
        let style = TextStyle::new(config.fonts.label, config.text_color);

        let widths: Vec<f64> = self
            .categories
            .iter()
            .map(|c| canvas.text_width(c, style.size))
            .collect();
        let column = axes.to_x(1.0) - axes.to_x(0.0);
        let horizontal = widths.iter().all(|&w| w <= column);
        let row = category_row(axes);
        let h = canvas.line_height(style.size);

        for (i, (name, w)) in self.categories.iter().zip(widths).enumerate() {
            let centre = axes.to_x(i as f64 + 0.5);
            if horizontal {
                canvas.text(name, Point::new(centre - w / 2.0, row + h), style);
            } else {
                canvas.text(
                    name,
                    Point::new(centre + h / 4.0, row + w + LABEL_GAP),
                    style.rotated(),
                );
            }
        }
    }
}

/// Top of the category labels: the x axis, or the bottom of the data when
/// zero is out of range.
fn category_row(axes: &Axes) -> f64 {
    if axes.zero_in_range(Axis::Y) {
        axes.to_y(0.0)
    } else {
        axes.to_y(axes.bounds(Axis::Y).0)
    }
}

/// Shift the plot up when rotated labels would run off the bottom.
fn rebalance_padding(core: &mut GraphCore, categories: &[String], metrics: &dyn TextMetrics) {
    let region = core.axes.region();
    if region.height <= 0.0 || categories.is_empty() {
        return;
    }
    let size = core.config.fonts.label;
    let widest = categories
        .iter()
        .map(|c| metrics.text_width(c, size))
        .fold(0.0, f64::max)
        + LABEL_GAP;
    let column = core.axes.to_x(1.0) - core.axes.to_x(0.0);
    if widest <= column || category_row(&core.axes) + widest <= region.bottom() {
        return;
    }

    let (ymin, ymax) = core.axes.bounds(Axis::Y);
    let range = ymax - ymin;
    let margin = core.config.margin;
    let string_margin = widest / region.height;
    let diff = if margin - string_margin > 0.0 {
        0.0
    } else {
        (string_margin - margin) / 0.5
    };
    debug!(string_margin, diff, "Making room for rotated category labels");
    core.axes.set_vertical_padding(
        range * (margin + diff + string_margin / 2.0),
        range * (margin + diff - string_margin / 2.0),
    );
}

impl<R: SeriesRenderer> Graph for CategoricGraph<R> {
    fn core(&self) -> &GraphCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GraphCore {
        &mut self.core
    }

    fn is_plottable(&self) -> bool {
        !self.categories.is_empty() && self.core.series.iter().any(|s| !s.values().is_empty())
    }

    fn convert_points(&mut self, metrics: &dyn TextMetrics) {
        let n = self.categories.len();
        let core = &mut self.core;
        core.axes.x = AxisRange::manual(0.0, n.max(1) as f64);
        core.axes.reset_auto();
        for series in &core.series {
            core.axes.include_values(Axis::Y, series.values());
        }
        core.axes.include_zero(Axis::Y);
        core.axes.finish_ranges();
        core.axes
            .compute_padding(core.config.margin, core.y_label.is_some());
        rebalance_padding(core, &self.categories, metrics);

        self.x_points = (0..n).map(|i| core.axes.to_x(i as f64 + 0.5)).collect();
        for series in &mut core.series {
            if series.values().len() != n {
                debug!(
                    series = %series.name,
                    values = series.values().len(),
                    categories = n,
                    "Series length differs from category count"
                );
            }
            let points = core.axes.convert_all(Axis::Y, series.values());
            series.set_plot_points(points);
        }
    }

    fn draw_plot(&mut self, canvas: &mut dyn Canvas) {
        let core = &self.core;
        let config = &core.config;
        if config.draw_x_grid {
            xy::draw_grid(core, canvas, Axis::X);
        }
        if config.draw_y_grid {
            xy::draw_grid(core, canvas, Axis::Y);
        }
        self.renderer
            .draw_series(&core.plot_data(&self.x_points), canvas);
        if config.draw_x_axis {
            xy::draw_axis_line(core, canvas, Axis::X);
        }
        if config.draw_y_axis {
            xy::draw_axis_line(core, canvas, Axis::Y);
        }
        if config.draw_x_ticks {
            self.draw_category_labels(canvas);
        }
        if config.draw_y_ticks {
            xy::draw_tick_labels(core, canvas, Axis::Y);
        }
        xy::draw_x_title(core, canvas);
        xy::draw_y_title(core, canvas);
    }
}

impl<R: SeriesRenderer> DataObserver<String> for CategoricGraph<R> {
    fn attached(&mut self, source: DataSetId, data: DataView<'_, String>) {
        self.core.attach(source);
        self.load(data);
    }

    fn data_changed(&mut self, source: DataSetId, data: DataView<'_, String>) {
        if self.core.follows(source) {
            self.load(data);
        }
    }

    fn detached(&mut self, source: DataSetId) {
        if !self.core.follows(source) {
            return;
        }
        self.core.detach();
        self.categories.clear();
        self.x_points.clear();
        self.updated();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CategoricDataSet;
    use crate::graphs::xy::PlotData;
    use crate::render::{DrawOp, RecordingCanvas, Rotation};

    #[derive(Default)]
    struct Nothing;

    impl SeriesRenderer for Nothing {
        fn draw_series(&self, _plot: &PlotData<'_>, _canvas: &mut dyn Canvas) {}
    }

    type TestGraph = CategoricGraph<Nothing>;

    fn dataset(names: &[&str], values: Vec<f64>) -> CategoricDataSet {
        let mut ds = CategoricDataSet::new();
        ds.set_independent(names.iter().map(|n| n.to_string()));
        ds.add_dependent(values);
        ds
    }

    fn label_rotations(canvas: &RecordingCanvas, names: &[&str]) -> Vec<Rotation> {
        canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(t, _, s) if names.contains(&t.as_str()) => Some(s.rotation),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_one_unit_per_category() {
        let mut ds = dataset(&["a", "b", "c"], vec![3.0, 5.0, 4.0]);
        let graph = TestGraph::new().into_shared();
        ds.add_observer(&graph);
        let g = graph.borrow();
        assert_eq!(g.core().axes().bounds(Axis::X), (0.0, 3.0));
        let xs = g.x_points();
        assert_eq!(xs.len(), 3);
        let axes = g.core().axes();
        assert!((xs[1] - axes.to_x(1.5)).abs() < 1e-9);
    }

    #[test]
    fn test_y_range_includes_zero() {
        let mut ds = dataset(&["a", "b"], vec![3.0, 5.0]);
        let graph = TestGraph::new().into_shared();
        ds.add_observer(&graph);
        assert_eq!(graph.borrow().core().axes().bounds(Axis::Y), (0.0, 5.0));

        ds.add_dependent(vec![-2.0, -4.0]);
        assert_eq!(graph.borrow().core().axes().bounds(Axis::Y), (-4.0, 5.0));

        ds.remove_dependent(0).unwrap();
        assert_eq!(graph.borrow().core().axes().bounds(Axis::Y), (-4.0, 0.0));
    }

    #[test]
    fn test_short_labels_stay_horizontal() {
        let names = ["a", "b", "c"];
        let mut ds = dataset(&names, vec![1.0, 2.0, 3.0]);
        let graph = TestGraph::new().into_shared();
        ds.add_observer(&graph);
        let mut canvas = RecordingCanvas::new(600.0, 400.0);
        graph.borrow_mut().draw(&mut canvas);
        assert_eq!(label_rotations(&canvas, &names), vec![Rotation::None; 3]);
    }

    #[test]
    fn test_long_labels_rotate_and_lift_plot() {
        let names = [
            "a fairly long category name",
            "another very long category",
            "and one more long category",
            "the last long category name",
        ];
        let mut ds = dataset(&names, vec![1.0, 2.0, 3.0, 4.0]);
        let graph = TestGraph::new().into_shared();
        ds.add_observer(&graph);

        let mut canvas = RecordingCanvas::new(300.0, 300.0);
        graph.borrow_mut().draw(&mut canvas);
        assert_eq!(label_rotations(&canvas, &names), vec![Rotation::Ccw90; 4]);

        let g = graph.borrow();
        let (below, above) = g.core().axes().vertical_padding();
        assert!(below > above);
    }

    #[test]
    fn test_detach_drops_categories() {
        let mut ds = dataset(&["a"], vec![1.0]);
        let graph = TestGraph::new().into_shared();
        ds.add_observer(&graph);
        ds.remove_all_observers();
        let g = graph.borrow();
        assert!(g.categories().is_empty());
        assert!(!g.is_plottable());
    }
}
