use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::analysis::stats::{NumericSummary, SummaryStatistics};
use crate::data::model::TabularDataset;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

/// Scrollable preview of the first `max_rows` rows of the uploaded table.
pub fn dataset_preview(ui: &mut Ui, dataset: &TabularDataset, max_rows: usize) {
    let shown = dataset.len().min(max_rows);
    ui.label(format!(
        "{} rows × {} columns{}",
        dataset.len(),
        dataset.columns().len(),
        if shown < dataset.len() {
            format!(" (showing first {shown})")
        } else {
            String::new()
        }
    ));

    let columns = dataset.columns();
    ui.push_id("dataset_preview", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(260.0)
            .column(TableColumn::auto().at_least(40.0))
            .columns(TableColumn::auto().at_least(60.0), columns.len())
            .header(HEADER_HEIGHT, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                for col in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(&col.name)
                            .on_hover_text(format!("{} column", col.data.kind()));
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, shown, |mut row| {
                    let i = row.index();
                    row.col(|ui: &mut Ui| {
                        ui.weak(i.to_string());
                    });
                    for col in columns {
                        row.col(|ui: &mut Ui| {
                            ui.label(col.data.display_cell(i));
                        });
                    }
                });
            });
    });
}

/// Describe-style tables: one for numeric columns (statistics as rows), one
/// for text columns.
pub fn statistics_tables(ui: &mut Ui, stats: &SummaryStatistics) {
    let numeric: Vec<(&str, &NumericSummary)> = stats.numeric().collect();
    if !numeric.is_empty() {
        let rows: [(&str, fn(&NumericSummary) -> String); 8] = [
            ("count", |s: &NumericSummary| s.count.to_string()),
            ("mean", |s: &NumericSummary| fmt_stat(s.mean)),
            ("std", |s: &NumericSummary| fmt_stat(s.std)),
            ("min", |s: &NumericSummary| fmt_stat(s.min)),
            ("25%", |s: &NumericSummary| fmt_stat(s.q25)),
            ("50%", |s: &NumericSummary| fmt_stat(s.median)),
            ("75%", |s: &NumericSummary| fmt_stat(s.q75)),
            ("max", |s: &NumericSummary| fmt_stat(s.max)),
        ];
        ui.push_id("numeric_stats", |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(TableColumn::auto().at_least(50.0))
                .columns(TableColumn::auto().at_least(80.0), numeric.len())
                .header(HEADER_HEIGHT, |mut header| {
                    header.col(|_ui: &mut Ui| {});
                    for (name, _) in &numeric {
                        header.col(|ui: &mut Ui| {
                            ui.strong(*name);
                        });
                    }
                })
                .body(|mut body| {
                    for (label, value) in rows {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.strong(label);
                            });
                            for (_, summary) in &numeric {
                                row.col(|ui: &mut Ui| {
                                    ui.monospace(value(summary));
                                });
                            }
                        });
                    }
                });
        });
    }

    let textual: Vec<_> = stats.textual().collect();
    if !textual.is_empty() {
        ui.add_space(8.0);
        ui.label("Text columns:");
        egui::Grid::new("text_stats")
            .striped(true)
            .num_columns(5)
            .show(ui, |ui: &mut Ui| {
                for heading in ["column", "count", "unique", "top", "freq"] {
                    ui.strong(heading);
                }
                ui.end_row();
                for (name, s) in textual {
                    ui.label(name);
                    ui.monospace(s.count.to_string());
                    ui.monospace(s.unique.to_string());
                    ui.label(s.top.as_deref().unwrap_or("undefined"));
                    ui.monospace(s.freq.to_string());
                    ui.end_row();
                }
            });
    }
}

/// Four decimals, or "undefined" where the statistic has no value.
pub fn fmt_stat(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{x:.4}"),
        None => "undefined".to_string(),
    }
}
