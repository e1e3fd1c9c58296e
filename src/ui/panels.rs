use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use weather_dashboard::data::model::Metric;
use weather_dashboard::data::pipeline::PipelineOutcome;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let cities: Vec<String> = match &state.table {
        Some(table) => table.cities.iter().cloned().collect(),
        None => {
            ui.label("No data loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Cities ----
            let header_text = format!("City  ({}/{})", state.selected_cities.len(), cities.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("cities")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_cities();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_cities();
                        }
                    });
                    for city in &cities {
                        let mut checked = state.selected_cities.contains(city);
                        let text = RichText::new(city).color(state.colors.color_for(city));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_city(city);
                        }
                    }
                });

            // ---- Metrics ----
            egui::CollapsingHeader::new(RichText::new("Weather metrics").strong())
                .id_salt("metrics")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for metric in Metric::ALL {
                        let mut checked = state.selected_metrics.contains(&metric);
                        if ui.checkbox(&mut checked, metric.title()).changed() {
                            state.toggle_metric(metric);
                        }
                    }
                });

            // ---- Date range ----
            ui.separator();
            ui.strong("Date range");
            let mut lo = state.date_lo;
            let mut hi = state.date_hi;
            egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
                ui.label("From");
                ui.add(DatePickerButton::new(&mut lo).id_salt("date_lo"));
                ui.end_row();
                ui.label("To");
                ui.add(DatePickerButton::new(&mut hi).id_salt("date_hi"));
                ui.end_row();
            });
            if lo != state.date_lo || hi != state.date_hi {
                state.set_date_range(lo, hi);
            }
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
            if ui.button("Rescan data folder").clicked() {
                state.scan_data_dir();
                ui.close_menu();
            }
        });

        ui.separator();

        let mut picked = None;
        let current = state
            .selected_file
            .as_deref()
            .map(file_label)
            .unwrap_or_else(|| "Select weather CSV file".to_string());
        egui::ComboBox::from_id_salt("csv_file")
            .selected_text(current)
            .show_ui(ui, |ui: &mut Ui| {
                for path in &state.csv_files {
                    let is_current = state.selected_file.as_ref() == Some(path);
                    if ui.selectable_label(is_current, file_label(path)).clicked() {
                        picked = Some(path.clone());
                    }
                }
            });
        if let Some(path) = picked {
            state.load_source(&path);
        }

        ui.separator();

        if let Some(table) = &state.table {
            let visible = match &state.outcome {
                Some(PipelineOutcome::Ready(view)) => view.matched_rows,
                _ => 0,
            };
            ui.label(format!("{} rows loaded, {} visible", table.len(), visible));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open weather data")
        .set_directory(&state.data_dir)
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_source(&path);
    }
}
