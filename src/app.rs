use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use weather_dashboard::data::pipeline::PipelineOutcome;
use weather_dashboard::settings::PREVIEW_ROWS;

use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WeatherDashboardApp {
    pub state: AppState,
}

impl WeatherDashboardApp {
    /// Scan `data_dir` and load its first CSV file, if any.
    pub fn new(data_dir: PathBuf) -> Self {
        let mut state = AppState::new(data_dir);
        state.scan_data_dir();
        Self { state }
    }
}

impl eframe::App for WeatherDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let view = match &state.outcome {
        Some(PipelineOutcome::Ready(view)) => view,
        Some(PipelineOutcome::Empty(reason)) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(
                    RichText::new(format!("No data available for selected filters: {reason}."))
                        .color(Color32::YELLOW),
                );
            });
            return;
        }
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a weather CSV to begin  (File → Open…)");
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("Filtered Weather Data (First {PREVIEW_ROWS} Rows)"));
            tables::preview_table(ui, &view.preview, &view.preview_columns);
            ui.separator();

            ui.heading("Weather Trends Over Time");
            plot::metric_charts(ui, &view.charts, &state.colors);
            ui.separator();

            ui.heading("Summary Statistics");
            tables::summary_table(ui, &view.summary);
        });
}
