//! livegraph - observable datasets and auto-ranging charts
//!
//! Datasets push every change to the charts observing them. Charts convert
//! the data to pixel space and paint through a [`render::Canvas`]: an egui
//! painter, a plotters bitmap, or a recording used in tests.

pub mod config;
pub mod data;
pub mod graphs;
pub mod gui;
pub mod render;

pub use config::{ConfigError, FontSizes, GraphConfig};
pub use data::{
    update_channel, CategoricDataSet, ContinuousDataSet, DataError, DataObserver, DataSet,
    DataSetId, Mutation,
};
pub use graphs::{
    AreaLineGraph, BarGraph, CategoricGraph, Color, ContinuousGraph, Graph, GraphError,
    LineGraph, MarkerShape, ScatterGraph,
};
pub use gui::ChartView;
pub use render::{render_to_image, save_png, RenderError};
