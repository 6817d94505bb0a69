//! Bitmap Renderer
//! Renders charts off-screen with plotters into an `image` buffer or a PNG
//! file.

use super::{Canvas, Point, Region, Rotation, Stroke, TextMetrics, TextStyle};
use crate::graphs::{Color, Graph};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color as _, FontTransform, RGBAColor};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing backend error: {0}")]
    Backend(String),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid image size {0}x{1}")]
    InvalidSize(u32, u32),
}

/// Canvas over a plotters bitmap drawing area. Backend errors are kept and
/// reported by [`BitmapCanvas::finish`].
pub struct BitmapCanvas<'a> {
    area: DrawingArea<BitMapBackend<'a>, Shift>,
    width: u32,
    height: u32,
    error: Option<String>,
}

impl<'a> BitmapCanvas<'a> {
    /// Draw into `buffer`, an RGB buffer of `width * height * 3` bytes.
    pub fn new(buffer: &'a mut [u8], width: u32, height: u32) -> Self {
        let area = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
        Self {
            area,
            width,
            height,
            error: None,
        }
    }

    /// Flush pending drawing and return the first backend error, if any.
    pub fn finish(mut self) -> Result<(), RenderError> {
        let presented = self.area.present().map_err(|e| e.to_string());
        if let Err(e) = presented {
            self.error.get_or_insert(e);
        }
        match self.error {
            Some(e) => Err(RenderError::Backend(e)),
            None => Ok(()),
        }
    }

    fn record<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        if let Err(e) = result {
            self.error.get_or_insert(e.to_string());
        }
    }

    fn coord(p: Point) -> (i32, i32) {
        (p.x.round() as i32, p.y.round() as i32)
    }

    fn font(size: f32) -> plotters::style::TextStyle<'static> {
        plotters::style::TextStyle::from(("sans-serif", size as f64).into_font())
    }
}

impl TextMetrics for BitmapCanvas<'_> {
    fn text_width(&self, text: &str, size: f32) -> f64 {
        match self.area.estimate_text_size(text, &Self::font(size)) {
            Ok((w, _)) => w as f64,
            Err(_) => super::ApproxMetrics.text_width(text, size),
        }
    }
}

impl Canvas for BitmapCanvas<'_> {
    fn metrics(&self) -> &dyn TextMetrics {
        self
    }

    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn fill_rect(&mut self, region: Region, color: Color) {
        let rect = Rectangle::new(
            [
                Self::coord(Point::new(region.x, region.y)),
                Self::coord(Point::new(region.right(), region.bottom())),
            ],
            RGBAColor::from(color).filled(),
        );
        let result = self.area.draw(&rect);
        self.record(result);
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.polyline(&[from, to], stroke);
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        let path = PathElement::new(
            points.iter().map(|&p| Self::coord(p)).collect::<Vec<_>>(),
            RGBAColor::from(stroke.color).stroke_width(stroke.width.max(1.0).round() as u32),
        );
        let result = self.area.draw(&path);
        self.record(result);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let polygon = Polygon::new(
            points.iter().map(|&p| Self::coord(p)).collect::<Vec<_>>(),
            RGBAColor::from(color).filled(),
        );
        let result = self.area.draw(&polygon);
        self.record(result);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        let circle = Circle::new(
            Self::coord(center),
            radius.round().max(1.0) as u32,
            RGBAColor::from(color).filled(),
        );
        let result = self.area.draw(&circle);
        self.record(result);
    }

    fn text(&mut self, text: &str, pos: Point, style: TextStyle) {
        let mut font = ("sans-serif", style.size as f64)
            .into_font()
            .color(&RGBAColor::from(style.color))
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        if style.rotation == Rotation::Ccw90 {
            font = font.transform(FontTransform::Rotate270);
        }
        let result = self.area.draw_text(text, &font, Self::coord(pos));
        self.record(result);
    }
}

/// Render `graph` at `width` x `height` into an RGB image.
pub fn render_to_image(
    graph: &mut dyn Graph,
    width: u32,
    height: u32,
) -> Result<RgbImage, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidSize(width, height));
    }
    let mut buffer = vec![255u8; width as usize * height as usize * 3];
    {
        let mut canvas = BitmapCanvas::new(&mut buffer, width, height);
        graph.draw(&mut canvas);
        canvas.finish()?;
    }
    debug!(width, height, "Rendered chart bitmap");
    RgbImage::from_raw(width, height, buffer).ok_or(RenderError::InvalidSize(width, height))
}

/// Render `graph` and save it as a PNG file.
pub fn save_png(
    graph: &mut dyn Graph,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> Result<(), RenderError> {
    let img = render_to_image(graph, width, height)?;
    img.save(path.as_ref())?;
    Ok(())
}
