//! Axes Module
//! Auto-ranging and data-space to pixel-space conversion shared by every
//! x/y chart.

use super::format::range_difference_factor;
use crate::render::Region;

/// Differences below this are treated as zero.
pub const ZERO_FACTOR: f64 = f64::MIN_POSITIVE * 1e4;

/// Range bounds within this fraction of the axis span of an integer are
/// snapped to it.
const SNAP_TOLERANCE: f64 = 0.03;

const DEFAULT_BOUNDS: (f64, f64) = (-1.0, 1.0);

pub fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() < ZERO_FACTOR
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Bounds of one axis. Auto ranges are rebuilt from the data on every pass,
/// manual ranges are left alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub auto: bool,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            auto: true,
        }
    }
}

impl AxisRange {
    pub fn manual(min: f64, max: f64) -> Self {
        Self {
            min: Some(min.min(max)),
            max: Some(min.max(max)),
            auto: false,
        }
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.min?, self.max?))
    }

    fn bounds_or_default(&self) -> (f64, f64) {
        self.bounds().unwrap_or(DEFAULT_BOUNDS)
    }

    fn reset(&mut self) {
        if self.auto {
            self.min = None;
            self.max = None;
        }
    }

    fn widen(&mut self, lo: f64, hi: f64) {
        self.min = Some(self.min.map_or(lo, |m| m.min(lo)));
        self.max = Some(self.max.map_or(hi, |m| m.max(hi)));
    }

    fn snap(&mut self) {
        if !self.auto {
            return;
        }
        let Some((min, max)) = self.bounds() else {
            return;
        };
        let min = snapped(min, max - min);
        let max = snapped(max, max - min);
        self.min = Some(min);
        self.max = Some(max);
    }
}

fn snapped(value: f64, span: f64) -> f64 {
    let nearest = value.round_ties_even();
    if span != 0.0 && range_difference_factor(value, nearest, span) < SNAP_TOLERANCE {
        nearest
    } else {
        value
    }
}

/// Finite minimum and maximum of `values`, `None` if there are none.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Ranges, padding and the pixel region the plot occupies.
#[derive(Debug, Clone, Default)]
pub struct Axes {
    pub x: AxisRange,
    pub y: AxisRange,
    hpad: f64,
    vpad_min: f64,
    vpad_max: f64,
    region: Region,
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    fn range(&self, axis: Axis) -> &AxisRange {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn range_mut(&mut self, axis: Axis) -> &mut AxisRange {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// Bounds of `axis`, `(-1, 1)` until something set them.
    pub fn bounds(&self, axis: Axis) -> (f64, f64) {
        self.range(axis).bounds_or_default()
    }

    /// Forget auto-ranged bounds before a new pass over the data.
    pub fn reset_auto(&mut self) {
        self.x.reset();
        self.y.reset();
    }

    /// Widen an auto range to cover `[lo, hi]`. A single non-zero value is
    /// widened to include zero; all zeros give `[-1, 1]`.
    pub fn include(&mut self, axis: Axis, lo: f64, hi: f64) {
        let range = self.range_mut(axis);
        if !range.auto {
            return;
        }
        if close_enough(lo, hi) {
            if !close_enough(hi, 0.0) {
                range.widen(hi.min(0.0), hi.max(0.0));
            } else {
                range.widen(DEFAULT_BOUNDS.0, DEFAULT_BOUNDS.1);
            }
        } else {
            range.widen(lo, hi);
        }
    }

    /// Widen an auto range to cover the finite values of `values`.
    pub fn include_values(&mut self, axis: Axis, values: &[f64]) {
        if let Some((lo, hi)) = extent(values) {
            self.include(axis, lo, hi);
        }
    }

    /// Widen an auto range that has bounds so it contains zero.
    pub fn include_zero(&mut self, axis: Axis) {
        let range = self.range_mut(axis);
        if range.auto && range.bounds().is_some() {
            range.widen(0.0, 0.0);
        }
    }

    /// Snap auto bounds to nearby integers, then fill in defaults for axes
    /// that saw no data.
    pub fn finish_ranges(&mut self) {
        self.x.snap();
        self.y.snap();
        for axis in [Axis::X, Axis::Y] {
            let range = self.range_mut(axis);
            if range.bounds().is_none() {
                range.min = Some(DEFAULT_BOUNDS.0);
                range.max = Some(DEFAULT_BOUNDS.1);
            }
        }
    }

    /// Data-space padding from the percent margin. The horizontal pad is
    /// doubled to leave room for a y axis title.
    pub fn compute_padding(&mut self, margin: f64, wide_left: bool) {
        let (xmin, xmax) = self.bounds(Axis::X);
        let (ymin, ymax) = self.bounds(Axis::Y);
        self.hpad = if wide_left {
            (xmax - xmin) * margin / 0.5
        } else {
            (xmax - xmin) * margin
        };
        self.vpad_min = (ymax - ymin) * margin;
        self.vpad_max = self.vpad_min;
    }

    pub fn vertical_padding(&self) -> (f64, f64) {
        (self.vpad_min, self.vpad_max)
    }

    pub fn set_vertical_padding(&mut self, below: f64, above: f64) {
        self.vpad_min = below;
        self.vpad_max = above;
    }

    pub fn zero_in_range(&self, axis: Axis) -> bool {
        let (min, max) = self.bounds(axis);
        min <= 0.0 && max >= 0.0
    }

    /// Where non-finite values are drawn: zero when strictly inside the
    /// range, otherwise the x minimum or the y maximum.
    fn baseline(&self, axis: Axis) -> f64 {
        let (min, max) = self.bounds(axis);
        if 0.0 > min && 0.0 < max {
            0.0
        } else {
            match axis {
                Axis::X => min,
                Axis::Y => max,
            }
        }
    }

    pub fn to_pixel(&self, axis: Axis, value: f64) -> f64 {
        match axis {
            Axis::X => self.to_x(value),
            Axis::Y => self.to_y(value),
        }
    }

    pub fn to_x(&self, value: f64) -> f64 {
        let value = if value.is_finite() {
            value
        } else {
            self.baseline(Axis::X)
        };
        let (min, max) = self.bounds(Axis::X);
        let lo = min - self.hpad;
        let hi = max + self.hpad;
        let r = self.region;
        if close_enough(hi, lo) {
            return r.x + r.width / 2.0;
        }
        r.x + (value - lo) * r.width / (hi - lo)
    }

    pub fn to_y(&self, value: f64) -> f64 {
        let value = if value.is_finite() {
            value
        } else {
            self.baseline(Axis::Y)
        };
        let (min, max) = self.bounds(Axis::Y);
        let lo = min - self.vpad_min;
        let hi = max + self.vpad_max;
        let r = self.region;
        if close_enough(hi, lo) {
            return r.y + r.height / 2.0;
        }
        r.y + r.height - (value - lo) * r.height / (hi - lo)
    }

    pub fn convert_all(&self, axis: Axis, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.to_pixel(axis, v)).collect()
    }

    /// Tick / gridline values. Anchored at zero when zero is in range so a
    /// tick always lands on the origin.
    pub fn ticks(&self, axis: Axis, divisions: usize) -> Vec<f64> {
        let (min, max) = self.bounds(axis);
        let divisions = divisions.max(1);
        let step = (max - min) / divisions as f64;
        if step <= 0.0 || !step.is_finite() {
            return vec![min];
        }

        if !self.zero_in_range(axis) {
            return (0..=divisions).map(|i| min + i as f64 * step).collect();
        }

        let mut ticks = Vec::new();
        let mut current = 0.0;
        while current <= max + 0.01 * step {
            ticks.push(current);
            current += step;
        }
        current = -step;
        while current >= min - 0.01 * step {
            ticks.push(current);
            current -= step;
        }
        ticks
    }
}
