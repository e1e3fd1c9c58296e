use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Everything that can end a dashboard interaction early.
///
/// None of these are retried: given the same file and selections they fail
/// the same way, so the shell reports them and waits for the next input.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Cannot read {}: {reason}", path.display())]
    SourceNotFound { path: PathBuf, reason: String },

    #[error("No CSV files found in {}", dir.display())]
    NoInputAvailable { dir: PathBuf },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Unknown metric '{0}'")]
    UnknownMetric(String),
}
