//! Legend Module
//! Series name/color key drawn beside the plot.

use super::palette::to_8bit;
use super::{Color, Series};
use crate::config::FontSizes;
use crate::render::{Canvas, Point, Region, TextMetrics, TextStyle};

const SWATCH: f64 = 15.0;
const PADDING: f64 = 10.0;
const GAP: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendSide {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct Legend {
    pub title: Option<String>,
    pub visible: bool,
    pub side: LegendSide,
    entries: Vec<LegendEntry>,
    background: Color,
    alpha: u8,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            title: None,
            visible: false,
            side: LegendSide::Right,
            entries: Vec::new(),
            background: Color::rgba(150, 150, 150, 0),
            alpha: 0,
        }
    }
}

impl Legend {
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Rebuild the entries from the series, in series order.
    pub fn set_entries(&mut self, series: &[Series]) {
        self.entries = series
            .iter()
            .map(|s| LegendEntry {
                name: s.name.clone(),
                color: s.color,
            })
            .collect();
    }

    /// Background color; the legend keeps its own transparency.
    pub fn set_background_color(&mut self, color: Color) {
        self.background = color.with_alpha(self.alpha);
    }

    /// Background opacity as a fraction in `0..=1`.
    pub fn set_transparency(&mut self, fraction: f64) {
        self.alpha = to_8bit(fraction.clamp(0.0, 1.0));
        self.background = self.background.with_alpha(self.alpha);
    }

    /// Width needed to show every entry, 0 when hidden.
    pub fn measure(&self, metrics: &dyn TextMetrics, fonts: &FontSizes) -> f64 {
        if !self.visible {
            return 0.0;
        }
        let names = self
            .entries
            .iter()
            .map(|e| SWATCH + GAP + metrics.text_width(&e.name, fonts.text))
            .fold(0.0, f64::max);
        let title = self
            .title
            .as_deref()
            .map(|t| metrics.text_width(t, fonts.subtitle))
            .unwrap_or(0.0);
        names.max(title) + 2.0 * PADDING
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, region: Region, fonts: &FontSizes, text: Color) {
        if !self.visible || region.width <= 0.0 {
            return;
        }
        if self.background.a > 0 {
            canvas.fill_rect(region, self.background);
        }

        let mut y = region.y + PADDING;
        if let Some(title) = &self.title {
            y += canvas.line_height(fonts.subtitle);
            canvas.text(
                title,
                Point::new(region.x + PADDING, y),
                TextStyle::new(fonts.subtitle, text),
            );
            y += GAP;
        }

        let row = canvas.line_height(fonts.text).max(SWATCH) + GAP;
        for entry in &self.entries {
            canvas.fill_rect(
                Region::new(region.x + PADDING, y, SWATCH, SWATCH),
                entry.color,
            );
            canvas.text(
                &entry.name,
                Point::new(region.x + PADDING + SWATCH + GAP, y + SWATCH - 2.0),
                TextStyle::new(fonts.text, text),
            );
            y += row;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ApproxMetrics, RecordingCanvas};

    fn legend_with(names: &[&str]) -> Legend {
        let series: Vec<Series> = names
            .iter()
            .map(|n| Series::new(vec![], *n, 1.0, Color::GOLD))
            .collect();
        let mut legend = Legend::default();
        legend.set_entries(&series);
        legend
    }

    #[test]
    fn test_hidden_legend_takes_no_space() {
        let legend = legend_with(&["a"]);
        assert_eq!(legend.measure(&ApproxMetrics, &FontSizes::default()), 0.0);
    }

    #[test]
    fn test_width_follows_longest_name() {
        let mut legend = legend_with(&["a", "a much longer name"]);
        legend.visible = true;
        let fonts = FontSizes::default();
        let expected = SWATCH + GAP + ApproxMetrics.text_width("a much longer name", fonts.text)
            + 2.0 * PADDING;
        assert!((legend.measure(&ApproxMetrics, &fonts) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_draw_swatch_and_name_per_entry() {
        let mut legend = legend_with(&["sin", "cos"]);
        legend.visible = true;
        legend.title = Some("Legend".into());
        let mut canvas = RecordingCanvas::new(200.0, 200.0);
        legend.draw(
            &mut canvas,
            Region::new(0.0, 0.0, 100.0, 200.0),
            &FontSizes::default(),
            Color::BLACK,
        );
        assert_eq!(canvas.texts(), vec!["Legend", "sin", "cos"]);
        assert_eq!(canvas.rects_with_color(Color::GOLD).len(), 2);
    }

    #[test]
    fn test_transparency_keeps_background_rgb() {
        let mut legend = Legend::default();
        legend.set_transparency(0.5);
        legend.set_background_color(Color::WHITE);
        assert_eq!(legend.background(), Color::rgba(255, 255, 255, 127));
    }
}
