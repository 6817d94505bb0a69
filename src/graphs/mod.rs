//! Graphs module - coordinate engine, shared chart state and chart types

mod area;
mod axes;
mod bar;
mod categoric;
mod continuous;
mod format;
mod graph;
mod legend;
mod line;
mod palette;
mod scatter;
mod series;
mod tracker;
mod xy;

pub use area::{AreaLineGraph, AreaPlot};
pub use axes::{close_enough, extent, Axes, Axis, AxisRange, ZERO_FACTOR};
pub use bar::{BarGraph, BarPlot};
pub use categoric::CategoricGraph;
pub use continuous::ContinuousGraph;
pub use format::{format_tick, round_to_significant};
pub use graph::{Graph, GraphCore, GraphError, GraphId, Layout};
pub use legend::{Legend, LegendEntry, LegendSide};
pub use line::{LineGraph, LinePlot};
pub use palette::{Color, ColorGenerator, PALETTE};
pub use scatter::{MarkerShape, ScatterGraph, ScatterPlot};
pub use series::{default_series_name, Series};
pub use tracker::MetaTracker;
pub use xy::{PlotData, SeriesRenderer};
