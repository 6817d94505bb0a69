//! Bar Graph Module
//! Grouped bars, one group per category.

use super::palette::to_8bit;
use super::xy::{PlotData, SeriesRenderer};
use super::{CategoricGraph, Color};
use crate::config::GraphConfig;
use crate::render::{Canvas, Point, Region, Stroke};

const MAX_GAP: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct BarPlot {
    /// Space on each side of a group, as a fraction of the column.
    pub gap: f64,
    pub bar_alpha: u8,
    pub highlight_alpha: u8,
    /// Outline color; the series color when unset.
    pub highlight_color: Option<Color>,
    pub highlight_width: f32,
}

impl Default for BarPlot {
    fn default() -> Self {
        Self {
            gap: 0.1,
            bar_alpha: 150,
            highlight_alpha: 255,
            highlight_color: None,
            highlight_width: 0.5,
        }
    }
}

impl BarPlot {
    /// Width of one bar in category units.
    pub fn bar_width(&self, series: usize) -> f64 {
        (1.0 - 2.0 * self.gap) / series.max(1) as f64
    }

    /// Left and right edge, in category units, of bar `index` in `category`.
    pub fn bar_span(&self, category: usize, index: usize, series: usize) -> (f64, f64) {
        let w = self.bar_width(series);
        let start = category as f64 + self.gap + index as f64 * w;
        (start, start + w)
    }
}

impl SeriesRenderer for BarPlot {
    fn configure(&self, config: &mut GraphConfig) {
        config.draw_x_grid = false;
    }

    fn draw_series(&self, plot: &PlotData<'_>, canvas: &mut dyn Canvas) {
        let axes = plot.axes;
        let count = plot.series.len();
        let base = axes.to_y(0.0);

        for (i, series) in plot.series.iter().enumerate() {
            if !series.visible {
                continue;
            }
            let fill = series.color.with_alpha(self.bar_alpha);
            let outline = Stroke::new(
                self.highlight_width,
                self.highlight_color
                    .unwrap_or(series.color)
                    .with_alpha(self.highlight_alpha),
            );
            let categories = plot.x_points.len().min(series.plot_points().len());
            for (j, &top) in series.plot_points()[..categories].iter().enumerate() {
                let (start, end) = self.bar_span(j, i, count);
                let (left, right) = (axes.to_x(start), axes.to_x(end));
                let top = top.trunc();
                canvas.fill_rect(
                    Region::new(left, top.min(base), right - left, (base - top).abs()),
                    fill,
                );
                canvas.polyline(
                    &[
                        Point::new(left, base),
                        Point::new(left, top),
                        Point::new(right, top),
                        Point::new(right, base),
                    ],
                    outline,
                );
            }
        }
    }
}

pub type BarGraph = CategoricGraph<BarPlot>;

impl BarGraph {
    /// Space on each side of a group, clamped to `0..=0.5` of the column.
    pub fn set_bar_gap(&mut self, gap: f64) {
        self.renderer_mut().gap = gap.clamp(0.0, MAX_GAP);
    }

    /// Fill opacity as a fraction.
    pub fn set_bar_alpha(&mut self, fraction: f64) {
        self.renderer_mut().bar_alpha = to_8bit(fraction);
    }

    /// Outline opacity as a fraction.
    pub fn set_bar_highlight_alpha(&mut self, fraction: f64) {
        self.renderer_mut().highlight_alpha = to_8bit(fraction);
    }

    pub fn set_bar_highlight_color(&mut self, color: Option<Color>) {
        self.renderer_mut().highlight_color = color;
    }

    pub fn set_bar_highlight_width(&mut self, width: f32) {
        self.renderer_mut().highlight_width = width.max(0.0);
    }
}
