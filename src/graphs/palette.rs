//! Palette Module
//! Series colors and the generator that hands them out.

use serde::{Deserialize, Serialize};

/// RGBA color, not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRID: Color = Color::rgba(176, 176, 176, 200);
    pub const PANEL: Color = Color::rgb(238, 238, 238);

    pub const SKY_BLUE: Color = Color::rgb(105, 210, 231);
    pub const IVORY: Color = Color::rgb(224, 228, 204);
    pub const ORANGE: Color = Color::rgb(243, 134, 48);
    pub const DARK_ORANGE: Color = Color::rgb(250, 105, 0);
    pub const ORANGE_RED: Color = Color::rgb(219, 51, 64);
    pub const ORANGE_RED_2: Color = Color::rgb(209, 77, 40);
    pub const GOLDEN_ROD: Color = Color::rgb(232, 183, 26);
    pub const SEA_GREEN: Color = Color::rgb(31, 218, 154);
    pub const DEEP_SEA_GREEN: Color = Color::rgb(40, 171, 227);
    pub const DARK_KHAKI: Color = Color::rgb(176, 164, 114);
    pub const GOLD: Color = Color::rgb(245, 223, 101);
    pub const DARK_GREEN: Color = Color::rgb(43, 148, 100);
    pub const DARK_CYAN: Color = Color::rgb(89, 200, 223);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha component.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Look up a palette color by its constant name, e.g. `"DARK_CYAN"`.
    pub fn named(name: &str) -> Option<Color> {
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }
}

/// Convert a fraction to an 8 bit channel value, clamped to `0..=255`.
pub fn to_8bit(fraction: f64) -> u8 {
    let v = (255.0 * fraction) as i64;
    v.clamp(0, 255) as u8
}

const NAMED: [(&str, Color); 13] = [
    ("SKY_BLUE", Color::SKY_BLUE),
    ("IVORY", Color::IVORY),
    ("ORANGE", Color::ORANGE),
    ("DARK_ORANGE", Color::DARK_ORANGE),
    ("ORANGE_RED", Color::ORANGE_RED),
    ("GOLDEN_ROD", Color::GOLDEN_ROD),
    ("SEA_GREEN", Color::SEA_GREEN),
    ("DEEP_SEA_GREEN", Color::DEEP_SEA_GREEN),
    ("DARK_KHAKI", Color::DARK_KHAKI),
    ("GOLD", Color::GOLD),
    ("DARK_GREEN", Color::DARK_GREEN),
    ("DARK_CYAN", Color::DARK_CYAN),
    ("ORANGE_RED_2", Color::ORANGE_RED_2),
];

/// Order in which generated series colors are handed out. Neighbouring
/// entries are picked to contrast.
pub const PALETTE: [Color; 13] = [
    Color::DEEP_SEA_GREEN,
    Color::ORANGE_RED,
    Color::SEA_GREEN,
    Color::DARK_ORANGE,
    Color::DARK_CYAN,
    Color::GOLDEN_ROD,
    Color::DARK_GREEN,
    Color::ORANGE_RED_2,
    Color::SKY_BLUE,
    Color::DARK_KHAKI,
    Color::ORANGE,
    Color::GOLD,
    Color::IVORY,
];

/// Cycles through [`PALETTE`]. Each graph owns one, so two charts of the same
/// dataset show the same colors.
#[derive(Debug, Clone, Default)]
pub struct ColorGenerator {
    counter: usize,
}

impl ColorGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_color(&mut self, alpha: u8) -> Color {
        let color = PALETTE[self.counter % PALETTE.len()];
        self.counter += 1;
        color.with_alpha(alpha)
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

impl From<Color> for egui::Color32 {
    fn from(c: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
    }
}

impl From<Color> for plotters::style::RGBAColor {
    fn from(c: Color) -> Self {
        plotters::style::RGBAColor(c.r, c.g, c.b, c.a as f64 / 255.0)
    }
}
