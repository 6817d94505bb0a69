use anyhow::Result;
use livegraph::data::UpdateQueue;
use livegraph::graphs::Axis;
use livegraph::render::RecordingCanvas;
use livegraph::{
    update_channel, BarGraph, CategoricDataSet, ContinuousDataSet, Graph, GraphConfig, LineGraph,
    Mutation, ScatterGraph,
};
use std::thread;

#[test]
fn test_two_charts_share_one_dataset() -> Result<()> {
    let mut ds = ContinuousDataSet::new();
    ds.set_independent((0..=10).map(|i| i as f64));
    ds.add_function(|x| x * 2.0);

    let line = LineGraph::new().into_shared();
    let scatter = ScatterGraph::new().into_shared();
    ds.add_observer(&line);
    ds.add_observer(&scatter);

    ds.push_independent(11.0);
    for graph in [&*line.borrow() as &dyn Graph, &*scatter.borrow()] {
        assert_eq!(graph.core().axes().bounds(Axis::X), (0.0, 11.0));
        assert_eq!(graph.core().axes().bounds(Axis::Y), (0.0, 22.0));
        assert_eq!(graph.core().series()[0].color, livegraph::graphs::PALETTE[0]);
    }
    Ok(())
}

#[test]
fn test_worker_updates_reach_chart_after_drain() -> Result<()> {
    let (tx, queue): (_, UpdateQueue<Mutation<f64>>) = update_channel();
    let mut ds = livegraph::DataSet::new();
    let graph = LineGraph::new().into_shared();
    ds.add_observer(&graph);

    let worker = thread::spawn(move || -> Result<()> {
        tx.send(Mutation::SetIndependent(vec![0.0, 1.0, 2.0]))?;
        tx.send(Mutation::AddDependent(vec![5.0, -5.0, 0.0]))?;
        Ok(())
    });
    worker.join().map_err(|_| anyhow::anyhow!("worker panicked"))??;

    assert!(!graph.borrow().is_plottable());
    assert_eq!(queue.drain_into(&mut ds)?, 2);

    let mut canvas = RecordingCanvas::new(480.0, 320.0);
    let mut g = graph.borrow_mut();
    g.set_title(Some("Live"));
    g.draw(&mut canvas);
    assert!(canvas.texts().contains(&"Live"));
    let color = g.core().series()[0].color;
    assert_eq!(canvas.lines_with_color(color).len(), 2);
    Ok(())
}

#[test]
fn test_config_from_json_applies_to_bar_chart() -> Result<()> {
    let config = GraphConfig::from_json_str(
        r#"{ "draw_x_grid": false, "draw_y_grid": false, "axis_divisions": 4, "fonts": { "label": 9.0 } }"#,
    )?;

    let mut ds = CategoricDataSet::new();
    ds.set_independent(["north", "south"].map(String::from));
    ds.add_dependent(vec![4.0, 8.0]);
    let graph = BarGraph::new().into_shared();
    ds.add_observer(&graph);

    let mut g = graph.borrow_mut();
    g.apply_config(config);
    g.set_series_names(&["revenue"]);

    let mut canvas = RecordingCanvas::new(400.0, 300.0);
    g.draw(&mut canvas);
    let grid = g.core().config().grid_color;
    assert!(canvas.lines_with_color(grid).is_empty());
    let texts = canvas.texts();
    assert!(texts.contains(&"north"));
    assert!(texts.contains(&"revenue"));
    Ok(())
}
