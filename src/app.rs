use eframe::egui;

use crate::chart::Chart;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ChartViewerApp {
    pub state: ViewerState,
}

impl ChartViewerApp {
    pub fn new(charts: Vec<Chart>) -> Self {
        Self {
            state: ViewerState::new(charts),
        }
    }
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: chart navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: current chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_plot(ui, self.state.current_chart());
        });

        if self.state.finished {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
