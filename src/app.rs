use eframe::egui::{self, ScrollArea, Ui};

use crate::pipeline::Stage;
use crate::settings::Settings;
use crate::state::AppState;
use crate::ui::{guide, panels};
use crate::ui::steps::StepView;

const INTRO: &str = "Upload your data, view its statistics, plot one column against another \
and read what the relationship looks like, without writing any code.";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct InsightHiveApp {
    pub state: AppState,
}

impl InsightHiveApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }
}

impl eframe::App for InsightHiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: axis selection ----
        egui::SidePanel::left("axis_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pipeline steps ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Insight Hive - Self-Service Analytics for SMEs");
                    ui.label(INTRO);
                    ui.add_space(8.0);
                    guide::step_guide(ui, &mut self.state);

                    if *self.state.pipeline.stage() == Stage::NoFile {
                        ui.add_space(24.0);
                        ui.label("Please upload a CSV file to proceed  (File → Open…)");
                        return;
                    }

                    let mut view = StepView {
                        ui,
                        settings: &self.state.settings,
                        colors: self.state.colors,
                    };
                    self.state.pipeline.render(&mut view);
                });
        });
    }
}
