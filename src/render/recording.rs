//! Recording canvas: keeps draw calls as values instead of pixels.

use super::{ApproxMetrics, Canvas, Point, Region, Stroke, TextMetrics, TextStyle};
use crate::graphs::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect(Region, Color),
    Line(Point, Point, Stroke),
    Polygon(Vec<Point>, Color),
    Circle(Point, f64, Color),
    Text(String, Point, TextStyle),
}

/// Canvas of a fixed size that records every primitive.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(t, _, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(Point, f64, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle(p, r, c) => Some((*p, *r, *c)),
                _ => None,
            })
            .collect()
    }

    pub fn polygons(&self) -> Vec<(&[Point], Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Polygon(p, c) => Some((p.as_slice(), *c)),
                _ => None,
            })
            .collect()
    }

    pub fn lines_with_color(&self, color: Color) -> Vec<(Point, Point)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line(a, b, s) if s.color == color => Some((*a, *b)),
                _ => None,
            })
            .collect()
    }

    pub fn rects_with_color(&self, color: Color) -> Vec<Region> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect(r, c) if *c == color => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl TextMetrics for RecordingCanvas {
    fn text_width(&self, text: &str, size: f32) -> f64 {
        ApproxMetrics.text_width(text, size)
    }
}

impl Canvas for RecordingCanvas {
    fn metrics(&self) -> &dyn TextMetrics {
        self
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, region: Region, color: Color) {
        self.ops.push(DrawOp::FillRect(region, color));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.ops.push(DrawOp::Line(from, to, stroke));
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.ops.push(DrawOp::Polygon(points.to_vec(), color));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.ops.push(DrawOp::Circle(center, radius, color));
    }

    fn text(&mut self, text: &str, pos: Point, style: TextStyle) {
        self.ops.push(DrawOp::Text(text.to_string(), pos, style));
    }
}
