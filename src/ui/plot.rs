use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, Points};

use crate::analysis::axis::AxisPair;
use crate::analysis::relationship::RelationshipMetrics;
use crate::color::SeriesColors;

// ---------------------------------------------------------------------------
// Relationship plot (central panel)
// ---------------------------------------------------------------------------

/// Scatter the aligned pairs and, when defined and enabled, the fitted line
/// across the x range.
pub fn relationship_plot(
    ui: &mut Ui,
    pair: &AxisPair,
    metrics: &RelationshipMetrics,
    colors: SeriesColors,
    show_fit: bool,
) {
    let selection = &pair.selection;
    let x_min = pair.x.iter().copied().fold(f64::INFINITY, f64::min);
    let x_max = pair.x.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Plot::new("relationship_plot")
        .legend(Legend::default())
        .x_axis_label(selection.x.clone())
        .y_axis_label(selection.y.clone())
        .height(320.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let points = Points::new(pair.points())
                .name(format!("{} vs {}", selection.y, selection.x))
                .color(colors.points)
                .radius(3.0);
            plot_ui.points(points);

            if let Some(fit) = metrics.regression.filter(|_| show_fit) {
                let line = Line::new(vec![[x_min, fit.predict(x_min)], [x_max, fit.predict(x_max)]])
                    .name("regression line")
                    .color(colors.fit)
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}
