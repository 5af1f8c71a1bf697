use eframe::egui::{self, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Step guide (central panel, above the pipeline steps)
// ---------------------------------------------------------------------------

/// Combo box over the step captions and the screenshot of the chosen step.
/// Steps whose image failed to load keep their caption and draw nothing.
pub fn step_guide(ui: &mut Ui, state: &mut AppState) {
    if state.step_guide.is_empty() {
        return;
    }
    state.guide_index = state.guide_index.min(state.step_guide.len() - 1);

    ui.collapsing("How it works", |ui: &mut Ui| {
        let current = &state.step_guide[state.guide_index].caption;
        egui::ComboBox::from_label("Select a step to view")
            .selected_text(current.as_str())
            .show_ui(ui, |ui: &mut Ui| {
                for (i, step) in state.step_guide.iter().enumerate() {
                    ui.selectable_value(&mut state.guide_index, i, step.caption.as_str());
                }
            });

        let step = &state.step_guide[state.guide_index];
        if let Some(image) = &step.image {
            ui.add(
                egui::Image::from_bytes(image.uri.clone(), image.bytes.clone())
                    .max_width(ui.available_width())
                    .corner_radius(4.0),
            );
            ui.weak(step.caption.as_str());
        }
    });
    ui.add_space(8.0);
}
