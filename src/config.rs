//! Config Module
//! Serializable chart appearance settings.

use crate::graphs::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub subtitle: f32,
    pub text: f32,
    pub label: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 20.0,
            subtitle: 16.0,
            text: 13.0,
            label: 11.0,
        }
    }
}

/// Appearance and layout settings shared by every chart type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Blank space around the plotted data, as a fraction of the data range.
    pub margin: f64,
    /// Extra gap below the plot for the x title, as a fraction of `margin`.
    pub axis_padding: f64,
    /// Number of gridline / tick intervals per axis.
    pub axis_divisions: usize,
    /// Length of tick marks in pixels.
    pub tick_size: f64,
    /// Gap between the axis and the axis title in pixels.
    pub axis_label_offset: f64,

    pub draw_x_grid: bool,
    pub draw_y_grid: bool,
    pub draw_x_axis: bool,
    pub draw_y_axis: bool,
    pub draw_x_ticks: bool,
    pub draw_y_ticks: bool,

    pub stroke_width: f32,
    pub axis_width: f32,
    pub grid_width: f32,

    pub axis_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
    pub background: Color,

    /// Alpha (0..=1) applied to generated series colors.
    pub transparency: f64,

    pub fonts: FontSizes,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            margin: 0.10,
            axis_padding: 0.3,
            axis_divisions: 10,
            tick_size: 6.0,
            axis_label_offset: 10.0,
            draw_x_grid: true,
            draw_y_grid: true,
            draw_x_axis: true,
            draw_y_axis: true,
            draw_x_ticks: true,
            draw_y_ticks: true,
            stroke_width: 1.0,
            axis_width: 1.0,
            grid_width: 1.0,
            axis_color: Color::BLACK,
            grid_color: Color::GRID,
            text_color: Color::BLACK,
            background: Color::PANEL,
            transparency: 1.0,
            fonts: FontSizes::default(),
        }
    }
}

pub const MIN_MARGIN: f64 = 0.03;
pub const MAX_MARGIN: f64 = 0.5;
pub const MAX_AXIS_DIVISIONS: usize = 100;

impl GraphConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str::<Self>(json)?.validated())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Clamp values into their usable ranges.
    pub fn validated(mut self) -> Self {
        self.margin = self.margin.clamp(MIN_MARGIN, MAX_MARGIN);
        self.axis_padding = self.axis_padding.max(0.0);
        self.axis_divisions = self.axis_divisions.clamp(1, MAX_AXIS_DIVISIONS);
        self.transparency = self.transparency.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = GraphConfig::from_json_str(r#"{ "axis_divisions": 4, "fonts": { "label": 9.0 } }"#)
            .unwrap();
        assert_eq!(cfg.axis_divisions, 4);
        assert_eq!(cfg.fonts.label, 9.0);
        assert_eq!(cfg.fonts.title, FontSizes::default().title);
        assert_eq!(cfg.margin, 0.10);
    }

    #[test]
    fn test_values_are_clamped() {
        let cfg = GraphConfig::from_json_str(r#"{ "margin": 2.0, "axis_divisions": 0, "transparency": -1 }"#)
            .unwrap();
        assert_eq!(cfg.margin, MAX_MARGIN);
        assert_eq!(cfg.axis_divisions, 1);
        assert_eq!(cfg.transparency, 0.0);

        let cfg = GraphConfig::from_json_str(r#"{ "axis_divisions": 4000000000 }"#).unwrap();
        assert_eq!(cfg.axis_divisions, MAX_AXIS_DIVISIONS);
    }

    #[test]
    fn test_json_round_trip_keeps_colors() {
        let cfg = GraphConfig {
            background: Color::IVORY,
            ..GraphConfig::default()
        };
        let back = GraphConfig::from_json_str(&cfg.to_json_string().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GraphConfig::from_json_str("{ margin: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}
