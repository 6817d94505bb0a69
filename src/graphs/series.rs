use super::Color;

/// One dependent series plus how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Color,
    pub stroke_width: f32,
    /// Hidden series keep their slot (bar position, legend entry) but are not
    /// painted.
    pub visible: bool,
    values: Vec<f64>,
    /// `values` converted to pixel y positions.
    plot_points: Vec<f64>,
}

impl Series {
    pub fn new(values: Vec<f64>, name: impl Into<String>, stroke_width: f32, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            stroke_width,
            visible: true,
            values,
            plot_points: Vec::new(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn plot_points(&self) -> &[f64] {
        &self.plot_points
    }

    pub(crate) fn set_values(&mut self, values: &[f64]) {
        self.values.clear();
        self.values.extend_from_slice(values);
    }

    pub(crate) fn set_plot_points(&mut self, points: Vec<f64>) {
        self.plot_points = points;
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.plot_points.clear();
    }
}

/// Default name of the series at `index`.
pub fn default_series_name(index: usize) -> String {
    format!("Series - {}", index + 1)
}
