//! Render module - drawing surfaces charts paint onto

mod bitmap;
mod egui_canvas;
mod recording;

pub use bitmap::{render_to_image, save_png, BitmapCanvas, RenderError};
pub use egui_canvas::EguiCanvas;
pub use recording::{DrawOp, RecordingCanvas};

use crate::graphs::Color;

/// Pixel position, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    /// Rotated 90 degrees counter-clockwise, text reads bottom to top.
    Ccw90,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub rotation: Rotation,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            rotation: Rotation::None,
        }
    }

    pub const fn rotated(self) -> Self {
        Self {
            rotation: Rotation::Ccw90,
            ..self
        }
    }
}

/// Text measurement, needed for label placement.
pub trait TextMetrics {
    fn text_width(&self, text: &str, size: f32) -> f64;

    fn line_height(&self, size: f32) -> f64 {
        size as f64 * 1.2
    }
}

/// Character-count estimate, used when no canvas is at hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMetrics;

impl TextMetrics for ApproxMetrics {
    fn text_width(&self, text: &str, size: f32) -> f64 {
        text.chars().count() as f64 * size as f64 * 0.6
    }
}

/// Drawing surface. Text positions are the start of the baseline before any
/// rotation is applied.
pub trait Canvas: TextMetrics {
    /// This canvas as a plain measurer.
    fn metrics(&self) -> &dyn TextMetrics;

    /// Width and height in pixels.
    fn size(&self) -> (f64, f64);

    fn fill_rect(&mut self, region: Region, color: Color);

    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], stroke);
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    fn text(&mut self, text: &str, pos: Point, style: TextStyle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_metrics_scales_with_length() {
        let m = ApproxMetrics;
        assert_eq!(m.text_width("", 10.0), 0.0);
        assert!((m.text_width("abcd", 10.0) - 24.0).abs() < 1e-9);
        assert!(m.line_height(10.0) > 10.0);
    }

    #[test]
    fn test_region_edges() {
        let r = Region::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
    }
}
