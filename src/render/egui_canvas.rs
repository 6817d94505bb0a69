//! egui canvas: paints chart primitives through an `egui::Painter`.

use super::{Canvas, Point, Region, Rotation, Stroke, TextMetrics, TextStyle};
use crate::graphs::Color;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape};
use std::f32::consts::FRAC_PI_2;

/// Canvas covering `rect` of an egui painter. Chart coordinates are relative
/// to the rect's top-left corner.
pub struct EguiCanvas {
    painter: Painter,
    rect: Rect,
}

impl EguiCanvas {
    pub fn new(painter: Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn pos(&self, p: Point) -> Pos2 {
        Pos2::new(self.rect.min.x + p.x as f32, self.rect.min.y + p.y as f32)
    }

    fn stroke(s: Stroke) -> egui::Stroke {
        egui::Stroke::new(s.width, Color32::from(s.color))
    }
}

impl TextMetrics for EguiCanvas {
    fn text_width(&self, text: &str, size: f32) -> f64 {
        let galley = self.painter.layout_no_wrap(
            text.to_string(),
            FontId::proportional(size),
            Color32::BLACK,
        );
        galley.size().x as f64
    }

    fn line_height(&self, size: f32) -> f64 {
        self.painter
            .layout_no_wrap("Ag".to_string(), FontId::proportional(size), Color32::BLACK)
            .size()
            .y as f64
    }
}

impl Canvas for EguiCanvas {
    fn metrics(&self) -> &dyn TextMetrics {
        self
    }

    fn size(&self) -> (f64, f64) {
        (self.rect.width() as f64, self.rect.height() as f64)
    }

    fn fill_rect(&mut self, region: Region, color: Color) {
        let min = self.pos(Point::new(region.x, region.y));
        let max = self.pos(Point::new(region.right(), region.bottom()));
        self.painter
            .rect_filled(Rect::from_min_max(min, max), 0.0, Color32::from(color));
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.painter
            .line_segment([self.pos(from), self.pos(to)], Self::stroke(stroke));
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        let points: Vec<Pos2> = points.iter().map(|&p| self.pos(p)).collect();
        self.painter.add(Shape::line(points, Self::stroke(stroke)));
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let points: Vec<Pos2> = points.iter().map(|&p| self.pos(p)).collect();
        self.painter.add(Shape::convex_polygon(
            points,
            Color32::from(color),
            egui::Stroke::NONE,
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.painter
            .circle_filled(self.pos(center), radius as f32, Color32::from(color));
    }

    fn text(&mut self, text: &str, pos: Point, style: TextStyle) {
        let color = Color32::from(style.color);
        let galley =
            self.painter
                .layout_no_wrap(text.to_string(), FontId::proportional(style.size), color);
        // Galleys are positioned by their top-left corner; shift up from the
        // baseline by roughly the ascent.
        let ascent = galley.size().y * 0.8;
        let base = self.pos(pos);
        let shape = match style.rotation {
            Rotation::None => TextShape::new(Pos2::new(base.x, base.y - ascent), galley, color),
            Rotation::Ccw90 => TextShape::new(Pos2::new(base.x - ascent, base.y), galley, color)
                .with_angle(-FRAC_PI_2),
        };
        self.painter.add(shape);
    }
}
