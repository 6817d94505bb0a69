//! Tracks series metadata so the legend only rebuilds on change.

use super::{Color, Series};

#[derive(Debug, Clone, Default)]
pub struct MetaTracker {
    names: Vec<String>,
    colors: Vec<Color>,
}

impl MetaTracker {
    /// True (and remembered) when the series names differ from last time.
    pub fn names_updated(&mut self, series: &[Series]) -> bool {
        if self.names.iter().eq(series.iter().map(|s| &s.name)) {
            return false;
        }
        self.names = series.iter().map(|s| s.name.clone()).collect();
        true
    }

    /// True (and remembered) when the series colors differ from last time.
    pub fn colors_updated(&mut self, series: &[Series]) -> bool {
        if self.colors.iter().eq(series.iter().map(|s| &s.color)) {
            return false;
        }
        self.colors = series.iter().map(|s| s.color).collect();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str, color: Color) -> Series {
        Series::new(vec![], name, 1.0, color)
    }

    #[test]
    fn test_reports_changes_once() {
        let mut tracker = MetaTracker::default();
        let mut s = vec![series("a", Color::GOLD)];
        assert!(tracker.names_updated(&s));
        assert!(tracker.colors_updated(&s));
        assert!(!tracker.names_updated(&s));
        assert!(!tracker.colors_updated(&s));

        s[0].name = "b".into();
        assert!(tracker.names_updated(&s));
        assert!(!tracker.colors_updated(&s));

        s.push(series("c", Color::GOLD));
        assert!(tracker.colors_updated(&s));
    }

    #[test]
    fn test_empty_series_is_not_a_change() {
        let mut tracker = MetaTracker::default();
        assert!(!tracker.names_updated(&[]));
    }
}
