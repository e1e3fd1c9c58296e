use crate::data::model::Metric;

/// Window title.
pub const APP_TITLE: &str = "European Cities Weather Dashboard";

/// Folder (relative to the working directory) scanned for CSV files.
pub const DATA_DIR_NAME: &str = "data";

/// Number of filtered rows shown in the preview table.
pub const PREVIEW_ROWS: usize = 10;

/// Metrics selected when a file is first loaded.
pub const DEFAULT_METRICS: [Metric; 2] = [Metric::Temperature, Metric::Humidity];

pub const WINDOW_SIZE: [f32; 2] = [1280.0, 860.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];

/// Height of each per-metric chart in the central panel.
pub const CHART_HEIGHT: f32 = 260.0;
