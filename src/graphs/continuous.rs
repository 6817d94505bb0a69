//! Continuous Graph Module
//! X/Y chart over numeric independent values.

use super::xy::{self, SeriesRenderer};
use super::{Axis, AxisRange, Graph, GraphCore};
use crate::config::GraphConfig;
use crate::data::{DataObserver, DataSetId, DataView};
use crate::render::{Canvas, TextMetrics};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Chart of `DataSet<f64>` data painted by `R`.
pub struct ContinuousGraph<R> {
    core: GraphCore,
    x_values: Vec<f64>,
    x_points: Vec<f64>,
    renderer: R,
}

impl<R: SeriesRenderer + Default> ContinuousGraph<R> {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }
}

impl<R: SeriesRenderer + Default> Default for ContinuousGraph<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SeriesRenderer> ContinuousGraph<R> {
    pub fn with_renderer(renderer: R, mut config: GraphConfig) -> Self {
        renderer.configure(&mut config);
        Self {
            core: GraphCore::new(config),
            x_values: Vec::new(),
            x_points: Vec::new(),
            renderer,
        }
    }

    pub fn with_config(config: GraphConfig) -> Self
    where
        R: Default,
    {
        Self::with_renderer(R::default(), config)
    }

    /// Wrap for registering with a dataset.
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

    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    /// Pixel x of each independent value, from the last conversion.
    pub fn x_points(&self) -> &[f64] {
        &self.x_points
    }

    /// Fix the x axis to `[min, max]`.
    pub fn set_x_range(&mut self, min: f64, max: f64) {
        self.core.axes.x = AxisRange::manual(min, max);
        self.updated();
    }

    /// Fix the y axis to `[min, max]`.
    pub fn set_y_range(&mut self, min: f64, max: f64) {
        self.core.axes.y = AxisRange::manual(min, max);
        self.updated();
    }

    pub fn auto_x_range(&mut self) {
        self.core.axes.x = AxisRange::default();
        self.updated();
    }

    pub fn auto_y_range(&mut self) {
        self.core.axes.y = AxisRange::default();
        self.updated();
    }

    fn load(&mut self, data: DataView<'_, f64>) {
        self.x_values.clear();
        self.x_values.extend_from_slice(data.independent);
        self.core.sync_series(data.dependent);
        self.updated();
    }
}

impl<R: SeriesRenderer> Graph for ContinuousGraph<R> {
    fn core(&self) -> &GraphCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut GraphCore {
        &mut self.core
    }

    fn is_plottable(&self) -> bool {
        !self.x_values.is_empty() && self.core.series.iter().any(|s| !s.values().is_empty())
    }

    fn convert_points(&mut self, _metrics: &dyn TextMetrics) {
        let core = &mut self.core;
        core.axes.reset_auto();
        core.axes.include_values(Axis::X, &self.x_values);
        for series in &core.series {
            core.axes.include_values(Axis::Y, series.values());
        }
        core.axes.finish_ranges();
        core.axes
            .compute_padding(core.config.margin, core.y_label.is_some());

        self.x_points = core.axes.convert_all(Axis::X, &self.x_values);
        for series in &mut core.series {
            if series.values().len() != self.x_values.len() {
                debug!(
                    series = %series.name,
                    values = series.values().len(),
                    independent = self.x_values.len(),
                    "Series length differs from independent values"
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
            xy::draw_tick_labels(core, canvas, Axis::X);
        }
        if config.draw_y_ticks {
            xy::draw_tick_labels(core, canvas, Axis::Y);
        }
        xy::draw_x_title(core, canvas);
        xy::draw_y_title(core, canvas);
    }
}

impl<R: SeriesRenderer> DataObserver<f64> for ContinuousGraph<R> {
    fn attached(&mut self, source: DataSetId, data: DataView<'_, f64>) {
        self.core.attach(source);
        self.load(data);
    }

    fn data_changed(&mut self, source: DataSetId, data: DataView<'_, f64>) {
        if self.core.follows(source) {
            self.load(data);
        }
    }

    fn detached(&mut self, source: DataSetId) {
        if !self.core.follows(source) {
            return;
        }
        self.core.detach();
        self.x_values.clear();
        self.x_points.clear();
        self.updated();
    }
}
