use eframe::egui::{self, Color32, RichText, Ui};

use super::{plot, table};
use crate::color::SeriesColors;
use crate::error::PipelineError;
use crate::pipeline::{RenderSink, Step, StepOutput};
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Central panel: one section per pipeline step
// ---------------------------------------------------------------------------

/// Draws each pipeline step under its heading as the pipeline reports it.
pub struct StepView<'a> {
    pub ui: &'a mut Ui,
    pub settings: &'a Settings,
    pub colors: SeriesColors,
}

impl StepView<'_> {
    fn heading(&mut self, step: Step) {
        self.ui.add_space(12.0);
        self.ui.heading(step.title());
        self.ui.separator();
    }
}

impl RenderSink for StepView<'_> {
    fn step_succeeded(&mut self, step: Step, output: StepOutput<'_>) {
        self.heading(step);
        let ui = &mut *self.ui;
        match output {
            StepOutput::Dataset(dataset) => {
                ui.strong("Uploaded Data:");
                table::dataset_preview(ui, dataset, self.settings.preview_rows);
            }
            StepOutput::Statistics(stats) => {
                ui.strong("Basic Statistics:");
                table::statistics_tables(ui, stats);
            }
            StepOutput::Axes(pair) => {
                let s = &pair.selection;
                ui.label(format!("{} vs {}: {} points", s.y, s.x, pair.len()));
                if pair.dropped > 0 {
                    ui.weak(format!(
                        "{} row(s) with a missing value were left out",
                        pair.dropped
                    ));
                }
            }
            StepOutput::Relationship { pair, metrics } => {
                plot::relationship_plot(
                    ui,
                    pair,
                    metrics,
                    self.colors,
                    self.settings.show_regression_line,
                );
                ui.add_space(6.0);
                egui::Grid::new("relationship_metrics")
                    .num_columns(2)
                    .show(ui, |ui: &mut Ui| {
                        ui.label("Correlation (r)");
                        ui.monospace(table::fmt_stat(metrics.correlation));
                        ui.end_row();
                        ui.label("R²");
                        ui.monospace(table::fmt_stat(metrics.r_squared()));
                        ui.end_row();
                        ui.label("Slope");
                        ui.monospace(table::fmt_stat(metrics.regression.map(|l| l.slope)));
                        ui.end_row();
                        ui.label("Intercept");
                        ui.monospace(table::fmt_stat(metrics.regression.map(|l| l.intercept)));
                        ui.end_row();
                    });
            }
            StepOutput::Narrative(report) => {
                ui.strong("Insights:");
                for (i, statement) in report.statements.iter().enumerate() {
                    ui.label(format!("{}. {statement}", i + 1));
                }
            }
        }
    }

    fn step_failed(&mut self, step: Step, error: &PipelineError) {
        self.heading(step);
        egui::Frame::group(self.ui.style())
            .stroke(egui::Stroke::new(1.0, Color32::RED))
            .show(self.ui, |ui: &mut Ui| {
                ui.label(RichText::new(error.kind()).strong().color(Color32::RED));
                ui.label(error.to_string());
                ui.weak("Open a file (or reload it) to start again.");
            });
    }
}
