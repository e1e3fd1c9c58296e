use eframe::egui::{self, Ui};

use weather_dashboard::data::model::{Metric, Observation};
use weather_dashboard::data::summary::SummaryTable;

/// Grid of the first filtered rows: city, date_time and every metric column
/// the source file carries.
pub fn preview_table(ui: &mut Ui, rows: &[Observation], columns: &[Metric]) {
    egui::ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("preview_table")
                .striped(true)
                .num_columns(columns.len() + 2)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("city");
                    ui.strong("date_time");
                    for m in columns {
                        ui.strong(m.name());
                    }
                    ui.end_row();

                    for row in rows {
                        ui.label(row.city.as_str());
                        ui.label(
                            row.date_time
                                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                                .unwrap_or_default(),
                        );
                        for m in columns {
                            ui.label(format_cell(m.value(row)));
                        }
                        ui.end_row();
                    }
                });
        });
}

/// Per-city means, rounded to two decimals.
pub fn summary_table(ui: &mut Ui, summary: &SummaryTable) {
    if summary.metrics.is_empty() {
        ui.label("Select at least one metric to see summary statistics.");
        return;
    }
    egui::Grid::new("summary_table")
        .striped(true)
        .num_columns(summary.metrics.len() + 1)
        .show(ui, |ui: &mut Ui| {
            ui.strong("city");
            for m in &summary.metrics {
                ui.strong(m.name());
            }
            ui.end_row();

            for cells in summary.display() {
                for cell in cells {
                    ui.label(cell);
                }
                ui.end_row();
            }
        });
}

fn format_cell(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}
