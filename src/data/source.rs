use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};

/// List the `.csv` files directly inside `dir`, sorted by path.
///
/// Fails with [`DashboardError::SourceNotFound`] when `dir` is missing or
/// unreadable and with [`DashboardError::NoInputAvailable`] when it holds no
/// CSV file.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let not_found = |reason: String| DashboardError::SourceNotFound {
        path: dir.to_path_buf(),
        reason,
    };

    if !dir.is_dir() {
        return Err(not_found("not a directory".to_string()));
    }
    let entries = std::fs::read_dir(dir).map_err(|e| not_found(e.to_string()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_csv(p))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(DashboardError::NoInputAvailable {
            dir: dir.to_path_buf(),
        });
    }
    log::info!("Found {} CSV file(s) in {}", files.len(), dir.display());
    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_csv_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.csv", "a.CSV", "notes.txt"] {
            std::fs::write(dir.path().join(name), "city,date_time\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = discover_csv_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn missing_dir_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_csv_files(&dir.path().join("data")).unwrap_err();
        assert!(matches!(err, DashboardError::SourceNotFound { .. }));
    }

    #[test]
    fn dir_without_csv_is_no_input_available() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), "hi").unwrap();
        let err = discover_csv_files(dir.path()).unwrap_err();
        assert!(matches!(err, DashboardError::NoInputAvailable { .. }));
    }
}
