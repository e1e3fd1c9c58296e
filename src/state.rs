use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use weather_dashboard::data::loader::load_file;
use weather_dashboard::data::model::{Metric, ObservationTable};
use weather_dashboard::data::pipeline::{day_range, run, PipelineOutcome, SelectionCriteria};
use weather_dashboard::data::source::discover_csv_files;
use weather_dashboard::error::DashboardError;
use weather_dashboard::settings::DEFAULT_METRICS;

use crate::color::CityColors;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Folder scanned for CSV files.
    pub data_dir: PathBuf,

    /// CSV files found in `data_dir`.
    pub csv_files: Vec<PathBuf>,

    /// File the current table was loaded from.
    pub selected_file: Option<PathBuf>,

    /// Loaded table (None until a file loads successfully).
    pub table: Option<ObservationTable>,

    pub selected_cities: BTreeSet<String>,

    /// Selected metrics, in the order they were picked.
    pub selected_metrics: Vec<Metric>,

    /// Inclusive date range.
    pub date_lo: NaiveDate,
    pub date_hi: NaiveDate,

    /// Stable colour per city of the loaded table.
    pub colors: CityColors,

    /// Result of the last recomputation.
    pub outcome: Option<PipelineOutcome>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            csv_files: Vec::new(),
            selected_file: None,
            table: None,
            selected_cities: BTreeSet::new(),
            selected_metrics: DEFAULT_METRICS.to_vec(),
            date_lo: NaiveDate::default(),
            date_hi: NaiveDate::default(),
            colors: CityColors::default(),
            outcome: None,
            status_message: None,
        }
    }

    /// Rescan the data folder and load the first file if nothing is loaded yet.
    pub fn scan_data_dir(&mut self) {
        match discover_csv_files(&self.data_dir) {
            Ok(files) => {
                self.csv_files = files;
                self.status_message = None;
                if self.selected_file.is_none() {
                    if let Some(first) = self.csv_files.first().cloned() {
                        self.load_source(&first);
                    }
                }
            }
            Err(e) => {
                self.csv_files.clear();
                self.report_error(&e);
            }
        }
    }

    /// Load `path` and reset every selection to its default.
    pub fn load_source(&mut self, path: &Path) {
        self.selected_file = Some(path.to_path_buf());
        match load_file(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                self.table = None;
                self.outcome = None;
                self.report_error(&e);
            }
        }
    }

    /// Ingest a newly loaded table: select every city, the full date span,
    /// the default metrics, and recompute. A table without any parseable
    /// date gets today as its range.
    pub fn set_table(&mut self, table: ObservationTable) {
        self.selected_cities = table.cities.clone();
        self.selected_metrics = DEFAULT_METRICS.to_vec();
        (self.date_lo, self.date_hi) = match table.date_bounds() {
            Some((lo, hi)) => (lo.date(), hi.date()),
            None => {
                let today = Local::now().date_naive();
                (today, today)
            }
        };
        self.colors = CityColors::new(&table.cities);
        self.table = Some(table);
        self.status_message = None;
        self.recompute();
    }

    /// Current selections as explicit pipeline input.
    pub fn criteria(&self) -> SelectionCriteria {
        let (date_lo, date_hi) = day_range(self.date_lo, self.date_hi);
        SelectionCriteria {
            cities: self.selected_cities.clone(),
            metrics: self.selected_metrics.clone(),
            date_lo,
            date_hi,
        }
    }

    /// Re-run the whole pipeline for the current selections.
    pub fn recompute(&mut self) {
        self.outcome = self.table.as_ref().map(|t| run(t, &self.criteria()));
    }

    pub fn toggle_city(&mut self, city: &str) {
        if !self.selected_cities.remove(city) {
            self.selected_cities.insert(city.to_string());
        }
        self.recompute();
    }

    pub fn select_all_cities(&mut self) {
        if let Some(table) = &self.table {
            self.selected_cities = table.cities.clone();
            self.recompute();
        }
    }

    pub fn select_no_cities(&mut self) {
        self.selected_cities.clear();
        self.recompute();
    }

    pub fn toggle_metric(&mut self, metric: Metric) {
        if let Some(pos) = self.selected_metrics.iter().position(|&m| m == metric) {
            self.selected_metrics.remove(pos);
        } else {
            self.selected_metrics.push(metric);
        }
        self.recompute();
    }

    pub fn set_date_range(&mut self, lo: NaiveDate, hi: NaiveDate) {
        self.date_lo = lo;
        self.date_hi = hi;
        self.recompute();
    }

    fn report_error(&mut self, e: &DashboardError) {
        log::error!("{e}");
        self.status_message = Some(format!("Error: {e}"));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use weather_dashboard::data::pipeline::EmptyReason;

    const CSV: &str = "city,date_time,temperature,humidity\n\
                       Paris,2024-01-01,10,70\n\
                       Paris,2024-01-02,,72\n\
                       Vienna,2024-01-01,20,60\n\
                       Vienna,not-a-date,25,65\n";

    fn data_dir_with(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    fn ready(state: &AppState) -> &weather_dashboard::data::pipeline::DashboardView {
        match &state.outcome {
            Some(PipelineOutcome::Ready(view)) => view,
            other => panic!("expected a ready view, got {other:?}"),
        }
    }

    #[test]
    fn scan_loads_first_file_with_defaults() {
        let dir = data_dir_with(&[("b.csv", "city,date_time\n"), ("a.csv", CSV)]);
        let mut state = AppState::new(dir.path());
        state.scan_data_dir();

        assert_eq!(state.csv_files.len(), 2);
        assert_eq!(state.selected_file.as_deref(), Some(dir.path().join("a.csv").as_path()));
        assert_eq!(state.selected_cities.len(), 2);
        assert_eq!(state.selected_metrics, DEFAULT_METRICS.to_vec());
        assert_eq!(state.date_lo, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(state.date_hi, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        let view = ready(&state);
        assert_eq!(view.matched_rows, 3);
        assert_eq!(view.summary.mean("Paris", Metric::Temperature), Some(10.0));
        assert_eq!(view.summary.mean("Vienna", Metric::Humidity), Some(60.0));
    }

    #[test]
    fn missing_data_dir_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(dir.path().join("data"));
        state.scan_data_dir();
        assert!(state.table.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error: Cannot read"));
    }

    #[test]
    fn empty_data_dir_reports_no_input() {
        let dir = data_dir_with(&[("readme.txt", "")]);
        let mut state = AppState::new(dir.path());
        state.scan_data_dir();
        assert!(state.status_message.as_deref().unwrap().contains("No CSV files"));
    }

    #[test]
    fn failed_load_clears_previous_results() {
        let dir = data_dir_with(&[("good.csv", CSV), ("bad.csv", "town\nParis\n")]);
        let mut state = AppState::new(dir.path());
        state.load_source(&dir.path().join("good.csv"));
        assert!(state.outcome.is_some());

        state.load_source(&dir.path().join("bad.csv"));
        assert!(state.table.is_none());
        assert!(state.outcome.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn undated_file_does_not_keep_previous_dates() {
        let dir = data_dir_with(&[
            ("dated.csv", CSV),
            ("undated.csv", "city,date_time,temperature\nRome,??,12\n"),
        ]);
        let mut state = AppState::new(dir.path());
        state.load_source(&dir.path().join("dated.csv"));
        assert_eq!(state.date_lo, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let before = Local::now().date_naive();
        state.load_source(&dir.path().join("undated.csv"));
        assert_eq!(state.date_lo, state.date_hi);
        assert!(state.date_lo >= before);
        assert_eq!(
            state.outcome,
            Some(PipelineOutcome::Empty(EmptyReason::NoParseableDates))
        );
    }

    #[test]
    fn selection_changes_recompute() {
        let dir = data_dir_with(&[("w.csv", CSV)]);
        let mut state = AppState::new(dir.path());
        state.load_source(&dir.path().join("w.csv"));

        state.toggle_city("Vienna");
        assert_eq!(ready(&state).matched_rows, 2);

        state.toggle_metric(Metric::Humidity);
        assert_eq!(ready(&state).summary.metrics, vec![Metric::Temperature]);
        state.toggle_metric(Metric::Pressure);
        assert_eq!(ready(&state).charts.len(), 2);

        state.select_no_cities();
        assert_eq!(
            state.outcome,
            Some(PipelineOutcome::Empty(EmptyReason::NoCitiesSelected))
        );

        state.select_all_cities();
        state.set_date_range(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        assert_eq!(ready(&state).matched_rows, 1);
    }
}
