//! GUI module - egui embedding of charts

mod chart_view;

pub use chart_view::{repaint_waker, ChartView};
