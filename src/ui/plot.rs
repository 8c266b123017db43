use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Trace plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected y columns against the x column.
pub fn trace_plot(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a trace to plot it  (File → Open…)");
        });
        return;
    }

    Plot::new("trace_plot")
        .legend(Legend::default())
        .x_axis_label(format!("field {}", state.x_column))
        .y_axis_label("value")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &state.series {
                let points = PlotPoints::new(series.points.clone());
                let line = Line::new(points)
                    .name(format!("field {}", series.column))
                    .color(state.colors.color_for(series.column))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}
