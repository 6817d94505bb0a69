//! XY Module
//! Gridlines, axes, ticks and titles shared by the continuous and categoric
//! graphs, and the trait series renderers implement.

use super::format::format_tick;
use super::{Axes, Axis, GraphCore, Series};
use crate::config::GraphConfig;
use crate::render::{Canvas, Point, Stroke, TextStyle};

/// Axis lines run this far past the outermost data.
const AXIS_OVERHANG: f64 = 15.0;
/// Baseline offset of x tick labels below the axis.
const X_TICK_LABEL_GAP: f64 = 15.0;
/// Width budget of y tick labels when placing the y title.
const Y_TICK_LABEL_SAMPLE: &str = "2222222";

/// Everything a renderer needs to paint the series.
pub struct PlotData<'a> {
    pub axes: &'a Axes,
    pub series: &'a [Series],
    /// Pixel x of each independent value (category centres for categoric
    /// graphs).
    pub x_points: &'a [f64],
    pub config: &'a GraphConfig,
    /// Alpha of generated colors.
    pub alpha: u8,
}

impl PlotData<'_> {
    /// Points of `series` that have an x position. Shorter series yield their
    /// prefix.
    pub fn points(&self, series: &Series) -> Vec<Point> {
        self.x_points
            .iter()
            .zip(series.plot_points())
            .map(|(&x, &y)| Point::new(x, y))
            .collect()
    }
}

/// Paints series data for a chart type.
pub trait SeriesRenderer {
    /// Adjust the defaults of a fresh graph.
    fn configure(&self, _config: &mut GraphConfig) {}

    fn draw_series(&self, plot: &PlotData<'_>, canvas: &mut dyn Canvas);
}

impl GraphCore {
    pub(crate) fn plot_data<'a>(&'a self, x_points: &'a [f64]) -> PlotData<'a> {
        PlotData {
            axes: &self.axes,
            series: &self.series,
            x_points,
            config: &self.config,
            alpha: self.alpha(),
        }
    }
}

pub(crate) fn draw_grid(core: &GraphCore, canvas: &mut dyn Canvas, axis: Axis) {
    let axes = &core.axes;
    let stroke = Stroke::new(core.config.grid_width, core.config.grid_color);
    let (xmin, xmax) = axes.bounds(Axis::X);
    let (ymin, ymax) = axes.bounds(Axis::Y);
    for t in axes.ticks(axis, core.config.axis_divisions) {
        match axis {
            Axis::X => {
                let x = axes.to_x(t);
                canvas.line(
                    Point::new(x, axes.to_y(ymin)),
                    Point::new(x, axes.to_y(ymax)),
                    stroke,
                );
            }
            Axis::Y => {
                let y = axes.to_y(t);
                canvas.line(
                    Point::new(axes.to_x(xmin), y),
                    Point::new(axes.to_x(xmax), y),
                    stroke,
                );
            }
        }
    }
}

/// The x axis is the horizontal line through y = 0, the y axis the vertical
/// line through x = 0. Neither is drawn when zero is out of range.
pub(crate) fn draw_axis_line(core: &GraphCore, canvas: &mut dyn Canvas, axis: Axis) {
    let axes = &core.axes;
    let stroke = Stroke::new(core.config.axis_width, core.config.axis_color);
    match axis {
        Axis::X => {
            if !axes.zero_in_range(Axis::Y) {
                return;
            }
            let (min, max) = axes.bounds(Axis::X);
            let y = axes.to_y(0.0);
            canvas.line(
                Point::new(axes.to_x(min) - AXIS_OVERHANG, y),
                Point::new(axes.to_x(max) + AXIS_OVERHANG, y),
                stroke,
            );
        }
        Axis::Y => {
            if !axes.zero_in_range(Axis::X) {
                return;
            }
            let (min, max) = axes.bounds(Axis::Y);
            let x = axes.to_x(0.0);
            canvas.line(
                Point::new(x, axes.to_y(min) + AXIS_OVERHANG),
                Point::new(x, axes.to_y(max) - AXIS_OVERHANG),
                stroke,
            );
        }
    }
}

/// Where the x tick marks sit: on the x axis, or along the bottom of the
/// data when zero is below it.
pub(crate) fn x_tick_row(axes: &Axes) -> f64 {
    let (ymin, _) = axes.bounds(Axis::Y);
    axes.to_y(ymin.max(0.0))
}

pub(crate) fn draw_tick_labels(core: &GraphCore, canvas: &mut dyn Canvas, axis: Axis) {
    let axes = &core.axes;
    let config = &core.config;
    let half = config.tick_size / 2.0;
    let stroke = Stroke::new(config.axis_width, config.axis_color);
    let style = TextStyle::new(config.fonts.label, config.text_color);
    let (min, max) = axes.bounds(axis);

    match axis {
        Axis::X => {
            let row = x_tick_row(axes);
            for t in axes.ticks(axis, config.axis_divisions) {
                let x = axes.to_x(t);
                canvas.line(Point::new(x, row - half), Point::new(x, row + half), stroke);
                let label = format_tick(t, max - min);
                let w = canvas.text_width(&label, style.size);
                canvas.text(&label, Point::new(x - w / 2.0, row + X_TICK_LABEL_GAP), style);
            }
        }
        Axis::Y => {
            let (xmin, _) = axes.bounds(Axis::X);
            let column = axes.to_x(xmin.max(0.0));
            let left = axes.region().x;
            for t in axes.ticks(axis, config.axis_divisions) {
                let y = axes.to_y(t);
                canvas.line(Point::new(column - half, y), Point::new(column + half, y), stroke);
                let label = format_tick(t, max - min);
                let w = canvas.text_width(&label, style.size);
                let x = (column - w - 2.0).max(left);
                canvas.text(&label, Point::new(x, y - 5.0), style);
            }
        }
    }
}

/// X title centred under the plot, kept inside the region.
pub(crate) fn draw_x_title(core: &GraphCore, canvas: &mut dyn Canvas) {
    let Some(label) = &core.x_label else {
        return;
    };
    let axes = &core.axes;
    let config = &core.config;
    let size = config.fonts.text;
    let (xmin, xmax) = axes.bounds(Axis::X);
    let (ymin, ymax) = axes.bounds(Axis::Y);

    let extra = (ymax - ymin) * config.axis_padding * config.margin;
    let below = axes.to_y(ymin - extra);
    let w = canvas.text_width(label, size);
    let h = canvas.line_height(size);
    let x = axes.to_x((xmin + xmax) / 2.0) - w / 2.0;
    let y = (below + config.axis_label_offset + h / 2.0).min(axes.region().bottom() - 5.0);
    canvas.text(label, Point::new(x, y), TextStyle::new(size, config.text_color));
}

/// Y title rotated to read bottom to top, left of the tick labels.
pub(crate) fn draw_y_title(core: &GraphCore, canvas: &mut dyn Canvas) {
    let Some(label) = &core.y_label else {
        return;
    };
    let axes = &core.axes;
    let config = &core.config;
    let size = config.fonts.text;
    let (xmin, _) = axes.bounds(Axis::X);
    let (ymin, ymax) = axes.bounds(Axis::Y);

    let column = axes.to_x(xmin.min(0.0));
    let label_room = canvas.text_width(Y_TICK_LABEL_SAMPLE, config.fonts.label)
        - canvas.line_height(config.fonts.label);
    let h = canvas.line_height(size);
    let mut x = column - label_room - h;
    if x - h < axes.region().x {
        x = axes.region().x + h;
    }
    let w = canvas.text_width(label, size);
    let y = axes.to_y((ymin + ymax) / 2.0) + w / 2.0;
    canvas.text(
        label,
        Point::new(x, y),
        TextStyle::new(size, config.text_color).rotated(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::Color;
    use crate::render::{DrawOp, RecordingCanvas, Region, Rotation};

    fn core_with(x: (f64, f64), y: (f64, f64)) -> GraphCore {
        let mut core = GraphCore::new(GraphConfig::default());
        core.axes.set_region(Region::new(0.0, 0.0, 400.0, 300.0));
        core.axes.include(Axis::X, x.0, x.1);
        core.axes.include(Axis::Y, y.0, y.1);
        core.axes.finish_ranges();
        core.axes.compute_padding(core.config.margin, false);
        core
    }

    #[test]
    fn test_axis_lines_need_zero() {
        let core = core_with((1.0, 5.0), (-2.0, 2.0));
        let mut canvas = RecordingCanvas::new(400.0, 300.0);
        draw_axis_line(&core, &mut canvas, Axis::X);
        draw_axis_line(&core, &mut canvas, Axis::Y);
        let lines = canvas.lines_with_color(Color::BLACK);
        assert_eq!(lines.len(), 1);
        let (a, b) = lines[0];
        assert_eq!(a.y, core.axes.to_y(0.0));
        assert!((a.x - (core.axes.to_x(1.0) - AXIS_OVERHANG)).abs() < 1e-9);
        assert!((b.x - (core.axes.to_x(5.0) + AXIS_OVERHANG)).abs() < 1e-9);
    }

    #[test]
    fn test_one_gridline_per_tick() {
        let core = core_with((0.0, 10.0), (0.0, 10.0));
        let mut canvas = RecordingCanvas::new(400.0, 300.0);
        draw_grid(&core, &mut canvas, Axis::X);
        assert_eq!(
            canvas.lines_with_color(Color::GRID).len(),
            core.axes.ticks(Axis::X, 10).len()
        );
    }

    #[test]
    fn test_tick_labels_are_formatted_values() {
        let core = core_with((0.0, 10.0), (0.0, 1.0));
        let mut canvas = RecordingCanvas::new(400.0, 300.0);
        draw_tick_labels(&core, &mut canvas, Axis::X);
        let texts = canvas.texts();
        assert!(texts.contains(&"0.0"));
        assert!(texts.contains(&"10.0"));
    }

    #[test]
    fn test_y_tick_labels_stay_in_region() {
        let core = core_with((0.0, 10.0), (0.0, 100000.0));
        let mut canvas = RecordingCanvas::new(400.0, 300.0);
        draw_tick_labels(&core, &mut canvas, Axis::Y);
        for op in &canvas.ops {
            if let DrawOp::Text(_, p, _) = op {
                assert!(p.x >= 0.0);
            }
        }
    }

    #[test]
    fn test_titles() {
        let mut core = core_with((0.0, 10.0), (0.0, 10.0));
        core.x_label = Some("time".into());
        core.y_label = Some("value".into());
        let mut canvas = RecordingCanvas::new(400.0, 300.0);
        draw_x_title(&core, &mut canvas);
        draw_y_title(&core, &mut canvas);
        let rotations: Vec<(String, Rotation)> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(t, p, s) => {
                    assert!(p.y <= 295.0 + 1e-9);
                    Some((t.clone(), s.rotation))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            rotations,
            vec![
                ("time".to_string(), Rotation::None),
                ("value".to_string(), Rotation::Ccw90)
            ]
        );
    }

    #[test]
    fn test_points_truncate_to_shorter_side() {
        let core = GraphCore::new(GraphConfig::default());
        let mut series = Series::new(vec![1.0, 2.0], "s", 1.0, Color::GOLD);
        series.set_plot_points(vec![10.0, 20.0]);
        let x = [1.0, 2.0, 3.0];
        let plot = core.plot_data(&x);
        assert_eq!(
            plot.points(&series),
            vec![Point::new(1.0, 10.0), Point::new(2.0, 20.0)]
        );
    }
}
