use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

fn fmt_bound(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.3}")).unwrap_or_else(|| "–".to_string())
}

// ---------------------------------------------------------------------------
// Left side panel – filter and column widgets
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Load");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Head filter");
        ui.add(egui::TextEdit::singleline(&mut state.head_input).desired_width(30.0));
        if ui.button("Apply").clicked() {
            state.reload();
        }
    });

    ui.add_space(8.0);
    ui.heading("Columns");
    ui.separator();

    let n_fields = match &state.dataset {
        Some(ds) => ds.max_fields(),
        None => {
            ui.label("No trace loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- X column selector ----
            ui.strong("X axis");
            ui.horizontal(|ui: &mut Ui| {
                egui::ComboBox::from_id_salt("x_column")
                    .selected_text(format!("field {}", state.x_column))
                    .show_ui(ui, |ui: &mut Ui| {
                        for col in 0..n_fields {
                            if ui
                                .selectable_label(state.x_column == col, format!("field {col}"))
                                .clicked()
                            {
                                state.set_x_column(col);
                            }
                        }
                    });
                if ui.small_button("Rebase").clicked() {
                    state.rebase_x();
                }
            });
            ui.label(format!(
                "range {} … {}",
                fmt_bound(state.x_range.0),
                fmt_bound(state.x_range.1)
            ));
            ui.separator();

            // ---- Y columns ----
            ui.strong("Y axis");
            for col in 0..n_fields {
                let mut checked = state.y_columns.contains(&col);
                let mut text = RichText::new(format!("field {col}"));
                if checked {
                    text = text.color(state.colors.color_for(col));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_y_column(col);
                }
            }
            ui.separator();

            // ---- Ranges of the plotted series ----
            egui::Grid::new("series_ranges")
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("series");
                    ui.strong("min");
                    ui.strong("max");
                    ui.end_row();
                    for series in &state.series {
                        ui.label(format!("field {}", series.column));
                        ui.label(fmt_bound(series.range.0));
                        ui.label(fmt_bound(series.range.1));
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(path)) = (&state.dataset, &state.path) {
            ui.label(format!("{}: {} rows", path.display(), ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open trace")
        .add_filter("CSV", &["csv", "txt", "log"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
