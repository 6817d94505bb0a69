//! Graph Module
//! State shared by every chart type and the `Graph` trait that drives
//! conversion and painting.

use super::palette::to_8bit;
use super::series::default_series_name;
use super::tracker::MetaTracker;
use super::{Axes, Color, ColorGenerator, Legend, LegendSide, Series};
use crate::config::{GraphConfig, MAX_MARGIN, MIN_MARGIN};
use crate::data::DataSetId;
use crate::render::{ApproxMetrics, Canvas, Point, Region, TextMetrics, TextStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("No dataset is attached to this graph")]
    DataNotSet,
    #[error("Series {index} does not exist ({len} series present)")]
    SeriesOutOfRange { index: usize, len: usize },
}

static NEXT_GRAPH: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphId(u64);

/// Gap under the title strip.
const TITLE_GAP: f64 = 8.0;

/// Pixel regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub title: Option<Region>,
    pub legend: Option<Region>,
    pub plot: Region,
}

/// Series, appearance and layout state every chart carries.
pub struct GraphCore {
    id: GraphId,
    pub(crate) series: Vec<Series>,
    pub(crate) config: GraphConfig,
    pub(crate) axes: Axes,
    pub(crate) title: Option<String>,
    pub(crate) x_label: Option<String>,
    pub(crate) y_label: Option<String>,
    pub(crate) legend: Legend,
    tracker: MetaTracker,
    colors: ColorGenerator,
    auto_colors: bool,
    source: Option<DataSetId>,
    size: (f64, f64),
    repaint_requested: bool,
    repaint_hook: Option<Box<dyn Fn()>>,
}

impl GraphCore {
    pub fn new(config: GraphConfig) -> Self {
        Self {
            id: GraphId(NEXT_GRAPH.fetch_add(1, Ordering::Relaxed)),
            series: Vec::new(),
            config: config.validated(),
            axes: Axes::new(),
            title: None,
            x_label: None,
            y_label: None,
            legend: Legend::default(),
            tracker: MetaTracker::default(),
            colors: ColorGenerator::new(),
            auto_colors: true,
            source: None,
            size: (0.0, 0.0),
            repaint_requested: false,
            repaint_hook: None,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    /// Canvas size of the last draw.
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    pub fn uses_auto_colors(&self) -> bool {
        self.auto_colors
    }

    pub fn source(&self) -> Option<DataSetId> {
        self.source
    }

    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    /// Alpha applied to generated colors.
    pub fn alpha(&self) -> u8 {
        to_8bit(self.config.transparency)
    }

    pub(crate) fn attach(&mut self, source: DataSetId) {
        if let Some(old) = self.source.replace(source) {
            if old != source {
                debug!(graph = ?self.id, ?old, new = ?source, "Graph switched datasets");
            }
        }
    }

    pub(crate) fn detach(&mut self) {
        self.source = None;
        for s in &mut self.series {
            s.clear();
        }
    }

    /// Whether a push from `source` concerns this graph.
    pub(crate) fn follows(&self, source: DataSetId) -> bool {
        self.source == Some(source)
    }

    /// Match series to the dataset's dependent columns. Names, colors and
    /// visibility stay with their position; values are replaced.
    pub(crate) fn sync_series(&mut self, dependent: &[Vec<f64>]) {
        self.series.truncate(dependent.len());
        let alpha = self.alpha();
        for (i, values) in dependent.iter().enumerate() {
            if let Some(series) = self.series.get_mut(i) {
                series.set_values(values);
            } else {
                let color = self.colors.next_color(alpha);
                self.series.push(Series::new(
                    values.clone(),
                    default_series_name(i),
                    self.config.stroke_width,
                    color,
                ));
            }
        }
    }

    /// Rebuild the legend if names or colors moved since the last check.
    pub(crate) fn refresh_meta(&mut self) {
        let names = self.tracker.names_updated(&self.series);
        let colors = self.tracker.colors_updated(&self.series);
        if names || colors {
            self.legend.set_entries(&self.series);
        }
    }

    pub(crate) fn request_repaint(&mut self) {
        self.repaint_requested = true;
        if let Some(hook) = &self.repaint_hook {
            hook();
        }
    }

    fn check_index(&self, index: usize) -> Result<(), GraphError> {
        if index >= self.series.len() {
            return Err(GraphError::SeriesOutOfRange {
                index,
                len: self.series.len(),
            });
        }
        Ok(())
    }

    /// Split a canvas into title strip, legend column and plot region.
    pub fn layout(&self, metrics: &dyn TextMetrics, size: (f64, f64)) -> Layout {
        let (width, height) = size;
        let fonts = &self.config.fonts;

        let mut top = 0.0;
        let title = self.title.as_ref().map(|_| {
            top = metrics.line_height(fonts.title) + TITLE_GAP;
            Region::new(0.0, 0.0, width, top)
        });

        let legend_width = self.legend.measure(metrics, fonts).min(width / 2.0);
        let body = (height - top).max(0.0);
        let (legend, plot_x) = if legend_width > 0.0 {
            match self.legend.side {
                LegendSide::Right => (
                    Some(Region::new(width - legend_width, top, legend_width, body)),
                    0.0,
                ),
                LegendSide::Left => (Some(Region::new(0.0, top, legend_width, body)), legend_width),
            }
        } else {
            (None, 0.0)
        };

        Layout {
            title,
            legend,
            plot: Region::new(plot_x, top, (width - legend_width).max(0.0), body),
        }
    }

    /// Background, title and legend.
    pub(crate) fn draw_frame(&self, canvas: &mut dyn Canvas, layout: &Layout) {
        let (width, height) = canvas.size();
        canvas.fill_rect(Region::new(0.0, 0.0, width, height), self.config.background);

        let fonts = &self.config.fonts;
        if let (Some(title), Some(region)) = (&self.title, layout.title) {
            let w = canvas.text_width(title, fonts.title);
            let baseline = region.y + canvas.line_height(fonts.title);
            canvas.text(
                title,
                Point::new(region.x + (region.width - w) / 2.0, baseline),
                TextStyle::new(fonts.title, self.config.text_color),
            );
        }
        if let Some(region) = layout.legend {
            self.legend
                .draw(canvas, region, fonts, self.config.text_color);
        }
    }
}

/// A chart: shared state in a [`GraphCore`] plus type-specific conversion
/// and painting.
pub trait Graph {
    fn core(&self) -> &GraphCore;

    fn core_mut(&mut self) -> &mut GraphCore;

    /// True when there is data to plot.
    fn is_plottable(&self) -> bool;

    /// Recompute ranges, padding and pixel positions for the current region.
    fn convert_points(&mut self, metrics: &dyn TextMetrics);

    /// Paint gridlines, series, axes and labels into the plot region.
    fn draw_plot(&mut self, canvas: &mut dyn Canvas);

    /// Recompute after a data or setting change.
    fn updated(&mut self) {
        if self.core().is_attached() && self.is_plottable() {
            self.convert_points(&ApproxMetrics);
        }
        let core = self.core_mut();
        core.refresh_meta();
        core.request_repaint();
    }

    /// Lay out and paint a whole frame.
    fn draw(&mut self, canvas: &mut dyn Canvas) {
        let size = canvas.size();
        self.core_mut().refresh_meta();
        let layout = self.core().layout(canvas.metrics(), size);
        {
            let core = self.core_mut();
            core.size = size;
            core.axes.set_region(layout.plot);
        }
        let plottable = self.core().is_attached() && self.is_plottable();
        if plottable {
            self.convert_points(canvas.metrics());
        }
        self.core().draw_frame(canvas, &layout);
        if plottable {
            self.draw_plot(canvas);
        }
        self.core_mut().repaint_requested = false;
    }

    fn set_title(&mut self, title: Option<&str>) {
        self.core_mut().title = title.map(str::to_string);
        self.core_mut().request_repaint();
    }

    fn set_x_label(&mut self, label: Option<&str>) {
        self.core_mut().x_label = label.map(str::to_string);
        self.core_mut().request_repaint();
    }

    /// The y title widens the left padding, so points are recomputed.
    fn set_y_label(&mut self, label: Option<&str>) {
        self.core_mut().y_label = label.map(str::to_string);
        self.updated();
    }

    /// Blank space around the data as a fraction of its range.
    fn set_percent_margin(&mut self, margin: f64) {
        self.core_mut().config.margin = margin.clamp(MIN_MARGIN, MAX_MARGIN);
        self.updated();
    }

    /// Opacity (0..=1) of generated series colors.
    fn set_transparency(&mut self, fraction: f64) {
        self.core_mut().config.transparency = fraction.clamp(0.0, 1.0);
        self.updated();
    }

    /// Replace every setting at once.
    fn apply_config(&mut self, config: GraphConfig) {
        self.core_mut().config = config.validated();
        self.updated();
    }

    /// Name the series in order; series past the end of `names` get their
    /// default names back. Shows the legend.
    fn set_series_names(&mut self, names: &[&str]) {
        let core = self.core_mut();
        for (i, series) in core.series.iter_mut().enumerate() {
            series.name = names
                .get(i)
                .map(|n| n.to_string())
                .unwrap_or_else(|| default_series_name(i));
        }
        core.legend.visible = true;
        self.updated();
    }

    fn set_series_name(&mut self, index: usize, name: &str) -> Result<(), GraphError> {
        let core = self.core_mut();
        core.check_index(index)?;
        core.series[index].name = name.to_string();
        core.legend.visible = true;
        self.updated();
        Ok(())
    }

    /// Color the series in order; series past the end of `colors` get
    /// generated colors. Turns auto coloring off.
    fn set_series_colors(&mut self, colors: &[Color]) -> Result<(), GraphError> {
        let core = self.core_mut();
        if !core.is_attached() {
            return Err(GraphError::DataNotSet);
        }
        let alpha = core.alpha();
        for (i, series) in core.series.iter_mut().enumerate() {
            series.color = match colors.get(i) {
                Some(&c) => c,
                None => core.colors.next_color(alpha),
            };
        }
        core.auto_colors = false;
        self.updated();
        Ok(())
    }

    fn set_series_color(&mut self, index: usize, color: Color) -> Result<(), GraphError> {
        let core = self.core_mut();
        core.check_index(index)?;
        core.series[index].color = color;
        core.auto_colors = false;
        self.updated();
        Ok(())
    }

    fn set_series_visible(&mut self, index: usize, visible: bool) -> Result<(), GraphError> {
        let core = self.core_mut();
        core.check_index(index)?;
        core.series[index].visible = visible;
        core.request_repaint();
        Ok(())
    }

    /// Regenerate colors for every series after manual coloring.
    fn auto_colors(&mut self) {
        let core = self.core_mut();
        if core.auto_colors {
            return;
        }
        core.colors.reset();
        let alpha = core.alpha();
        for series in &mut core.series {
            series.color = core.colors.next_color(alpha);
        }
        core.auto_colors = true;
        self.updated();
    }

    fn set_legend_visible(&mut self, visible: bool) {
        self.core_mut().legend.visible = visible;
        self.core_mut().request_repaint();
    }

    fn set_legend_title(&mut self, title: Option<&str>) {
        self.core_mut().legend.title = title.map(str::to_string);
        self.set_legend_visible(true);
    }

    fn legend_left_side(&mut self) {
        self.core_mut().legend.side = LegendSide::Left;
        self.set_legend_visible(true);
    }

    fn legend_right_side(&mut self) {
        self.core_mut().legend.side = LegendSide::Right;
        self.set_legend_visible(true);
    }

    fn set_title_font_size(&mut self, size: f32) {
        self.core_mut().config.fonts.title = size;
        self.updated();
    }

    fn set_subtitle_font_size(&mut self, size: f32) {
        self.core_mut().config.fonts.subtitle = size;
        self.updated();
    }

    fn set_text_font_size(&mut self, size: f32) {
        self.core_mut().config.fonts.text = size;
        self.updated();
    }

    fn set_label_font_size(&mut self, size: f32) {
        self.core_mut().config.fonts.label = size;
        self.updated();
    }

    fn set_legend_transparency(&mut self, fraction: f64) {
        self.core_mut().legend.set_transparency(fraction);
        self.core_mut().request_repaint();
    }

    fn set_legend_background_color(&mut self, color: Color) {
        self.core_mut().legend.set_background_color(color);
        self.core_mut().request_repaint();
    }

    /// Called whenever the graph wants to be repainted.
    fn set_repaint_hook(&mut self, hook: Box<dyn Fn()>) {
        self.core_mut().repaint_hook = Some(hook);
    }

    /// True once after any change that needs a repaint.
    fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.core_mut().repaint_requested)
    }
}
