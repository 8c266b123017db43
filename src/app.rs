use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// Trace viewer window
// ---------------------------------------------------------------------------

/// Viewer window around one [`AppState`].
pub struct HexplotApp {
    pub state: AppState,
}

impl HexplotApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HexplotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: File menu, loaded trace, status ----
        egui::TopBottomPanel::top("trace_menu").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: head filter, x/y columns, rebase ----
        egui::SidePanel::left("trace_columns")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: y columns against x ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::trace_plot(ui, &self.state);
        });
    }
}
