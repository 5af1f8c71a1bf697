use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::ColumnKind;
use crate::state::AppState;
use crate::ui::table::fmt_stat;

// ---------------------------------------------------------------------------
// Left side panel – axis selection
// ---------------------------------------------------------------------------

/// Render the left panel: logo and the two axis pickers.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    if let Some(logo) = &state.logo {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::from_bytes(logo.uri.clone(), logo.bytes.clone())
                    .max_width(ui.available_width() * 0.8)
                    .max_height(120.0)
                    .corner_radius(4.0),
            );
        });
        ui.add_space(4.0);
    }

    ui.heading("Axes");
    ui.separator();

    let names = state.pipeline.column_names();
    if names.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }

    // Owned so state can be mutated below.
    let columns: Vec<(String, ColumnKind)> = names
        .into_iter()
        .map(|name| {
            let kind = state
                .pipeline
                .dataset()
                .and_then(|ds| ds.column(&name))
                .map_or(ColumnKind::Textual, |c| c.data.kind());
            (name, kind)
        })
        .collect();

    let enabled = state.pipeline.accepts_selection();
    let mut picked_x = None;
    let mut picked_y = None;

    ui.add_enabled_ui(enabled, |ui: &mut Ui| {
        picked_x = axis_combo(ui, "Select X-axis column", "x_axis", &columns, &state.x_choice);
        ui.add_space(6.0);
        picked_y = axis_combo(ui, "Select Y-axis column", "y_axis", &columns, &state.y_choice);
    });

    if let Some(x) = picked_x {
        state.set_x(x);
    }
    if let Some(y) = picked_y {
        state.set_y(y);
    }

    if let (Some(pair), Some(metrics)) = (state.pipeline.axes(), state.pipeline.metrics()) {
        ui.add_space(8.0);
        ui.label(format!("{} points, {} rows dropped", pair.len(), pair.dropped));
        ui.label(format!("r = {}", fmt_stat(metrics.correlation)));
    }

    if state.pipeline.is_halted() {
        ui.add_space(8.0);
        ui.label(
            RichText::new("Analysis stopped. Reload or open a file to continue.")
                .color(Color32::RED),
        );
    }
}

/// Combo box over all columns; text columns are listed but marked. Returns
/// the newly clicked column, if any.
fn axis_combo(
    ui: &mut Ui,
    label: &str,
    id: &str,
    columns: &[(String, ColumnKind)],
    current: &Option<String>,
) -> Option<String> {
    let mut picked = None;
    ui.strong(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.clone().unwrap_or_default())
        .show_ui(ui, |ui: &mut Ui| {
            for (name, kind) in columns {
                let text = match kind {
                    ColumnKind::Numeric => RichText::new(name),
                    ColumnKind::Textual => RichText::new(format!("{name}  ({kind})")).weak(),
                };
                let selected = current.as_deref() == Some(name.as_str());
                if ui.selectable_label(selected, text).clicked() && !selected {
                    picked = Some(name.clone());
                }
            }
        });
    picked
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
            if ui
                .add_enabled(state.source_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(
                    state.pipeline.narrative().is_some(),
                    egui::Button::new("Copy insights"),
                )
                .clicked()
            {
                if let Some(report) = state.pipeline.narrative() {
                    ui.ctx().copy_text(report.statements.join("\n"));
                }
                ui.close_menu();
            }
            if ui.button("Clear").clicked() {
                state.clear();
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(name), Some(ds)) = (state.pipeline.source(), state.pipeline.dataset()) {
            ui.label(format!("{name}: {} rows, {} columns", ds.len(), ds.columns().len()));
            ui.separator();
        }

        if ui
            .selectable_label(state.settings.show_regression_line, "Regression line")
            .clicked()
        {
            state.settings.show_regression_line = !state.settings.show_regression_line;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload your CSV file")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
