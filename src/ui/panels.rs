use eframe::egui::{self, RichText, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the navigation bar: position, title, and back/next buttons.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.add_enabled_ui(state.current > 0, |ui: &mut Ui| {
            if ui.button("◀ Previous").clicked() {
                state.back();
            }
        });

        let next_label = if state.is_last() { "Close" } else { "Next ▶" };
        if ui.button(next_label).clicked() {
            state.dismiss();
        }

        ui.separator();
        ui.label(state.position_label());

        if let Some(chart) = state.current_chart() {
            ui.separator();
            ui.label(RichText::new(chart.title()).strong());
        }
    });
}
