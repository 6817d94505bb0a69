//! Chart View Widget
//! Paints any graph into an egui layout and keeps it repainting when its
//! data changes.

use crate::graphs::Graph;
use crate::render::EguiCanvas;
use egui::{Color32, Response, Sense, Ui, Vec2, Widget};

const DEFAULT_HEIGHT: f32 = 300.0;

/// Card styling, as used around chart panels.
const CARD_ROUNDING: f32 = 8.0;
const CARD_MARGIN: f32 = 12.0;

/// Widget drawing `graph` at a fixed size.
///
/// ```ignore
/// ui.add(ChartView::new(&mut *graph.borrow_mut()).size(egui::vec2(600.0, 400.0)));
/// ```
pub struct ChartView<'a> {
    graph: &'a mut dyn Graph,
    size: Option<Vec2>,
    border: Option<Color32>,
}

impl<'a> ChartView<'a> {
    pub fn new(graph: &'a mut dyn Graph) -> Self {
        Self {
            graph,
            size: None,
            border: None,
        }
    }

    /// Size of the chart; defaults to the available width by 300px.
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    /// Wrap the chart in a rounded card with a colored border.
    pub fn framed(mut self, border: Color32) -> Self {
        self.border = Some(border);
        self
    }

    fn paint(self, ui: &mut Ui) -> Response {
        let size = self
            .size
            .unwrap_or_else(|| egui::vec2(ui.available_width(), DEFAULT_HEIGHT));
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

        let ctx = ui.ctx().clone();
        self.graph
            .set_repaint_hook(Box::new(move || ctx.request_repaint()));

        if ui.is_rect_visible(rect) {
            let mut canvas = EguiCanvas::new(ui.painter_at(rect), rect);
            self.graph.draw(&mut canvas);
        }
        response
    }
}

impl Widget for ChartView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        match self.border {
            Some(border) => {
                egui::Frame::none()
                    .rounding(CARD_ROUNDING)
                    .stroke(egui::Stroke::new(2.0, border))
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(CARD_MARGIN)
                    .show(ui, |ui| self.paint(ui))
                    .inner
            }
            None => self.paint(ui),
        }
    }
}

/// Waker for an `UpdateSender` that wakes the egui loop so queued updates
/// are drained on the next frame.
pub fn repaint_waker(ctx: &egui::Context) -> impl Fn() + Send + Sync + 'static {
    let ctx = ctx.clone();
    move || ctx.request_repaint()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{update_channel, DataSet, Mutation};
    use crate::graphs::LineGraph;

    fn run_frame(ctx: &egui::Context, graph: &mut LineGraph, size: Vec2) -> egui::Rect {
        let mut rect = egui::Rect::NOTHING;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                rect = ui.add(ChartView::new(graph).size(size)).rect;
            });
        });
        rect
    }

    #[test]
    fn test_view_allocates_requested_size() {
        let mut ds = DataSet::new();
        ds.set_independent([0.0, 1.0, 2.0]);
        ds.add_dependent(vec![1.0, 3.0, 2.0]);
        let graph = LineGraph::new().into_shared();
        ds.add_observer(&graph);

        let ctx = egui::Context::default();
        let rect = run_frame(&ctx, &mut graph.borrow_mut(), egui::vec2(320.0, 200.0));
        assert_eq!(rect.size(), egui::vec2(320.0, 200.0));
        assert_eq!(graph.borrow().core().size(), (320.0, 200.0));
        assert!(!graph.borrow_mut().take_repaint_request());
    }

    #[test]
    fn test_waker_runs_on_send() {
        let ctx = egui::Context::default();
        let (tx, queue) = update_channel::<Mutation<f64>>();
        let tx = tx.with_waker(repaint_waker(&ctx));
        tx.send(Mutation::PushIndependent(1.0)).unwrap();

        let mut ds = DataSet::new();
        assert_eq!(queue.drain_into(&mut ds).unwrap(), 1);
        assert_eq!(ds.independent(), &[1.0]);
    }
}
