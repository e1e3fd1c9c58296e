use std::fs::File;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use super::model::{Metric, Observation, ObservationTable};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an observation table from a file.  Dispatch by extension.
///
/// Only `.csv` is supported; anything else is reported as malformed input so
/// the shell can tell the user what went wrong with the picked file.
pub fn load_file(path: &Path) -> Result<ObservationTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        other => Err(DashboardError::MalformedInput(format!(
            "unsupported file extension: .{other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV record before timestamp parsing.
///
/// Metric columns are optional in the header. Empty cells and the usual
/// missing-value markers (`NA`, `null`, `#N/A`, ...) deserialize to `None`;
/// any other non-numeric cell fails the whole load.
#[derive(Debug, Deserialize)]
struct RawObservation {
    city: String,
    date_time: String,
    #[serde(default, deserialize_with = "metric_cell")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "metric_cell")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "metric_cell")]
    pressure: Option<f64>,
    #[serde(default, deserialize_with = "metric_cell")]
    wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "metric_cell")]
    precipitation: Option<f64>,
    #[serde(default, deserialize_with = "metric_cell")]
    snowfall: Option<f64>,
    #[serde(default, deserialize_with = "metric_cell")]
    visibility: Option<f64>,
}

impl From<RawObservation> for Observation {
    fn from(raw: RawObservation) -> Self {
        Observation {
            date_time: parse_timestamp(&raw.date_time),
            city: raw.city,
            temperature: raw.temperature,
            humidity: raw.humidity,
            pressure: raw.pressure,
            wind_speed: raw.wind_speed,
            precipitation: raw.precipitation,
            snowfall: raw.snowfall,
            visibility: raw.visibility,
        }
    }
}

/// Cell values read as "no measurement" (compared case-insensitively), the
/// markers pandas treats as NaN by default.
const MISSING_MARKERS: [&str; 11] = [
    "", "NA", "N/A", "NaN", "-NaN", "NULL", "None", "<NA>", "#N/A", "#N/A N/A", "#NA",
];

fn is_missing_marker(cell: &str) -> bool {
    MISSING_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(cell))
}

fn metric_cell<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(cell) = raw else {
        return Ok(None);
    };
    let cell = cell.trim();
    if is_missing_marker(cell) {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(|v| Some(v).filter(|x| !x.is_nan()))
        .map_err(|_| D::Error::custom(format!("'{cell}' is not a number")))
}

/// CSV layout: header row with column names.
/// `city` and `date_time` are required; any of the seven metric columns may
/// be present. Other columns are ignored.
pub fn load_csv(path: &Path) -> Result<ObservationTable> {
    let file = File::open(path).map_err(|e| DashboardError::SourceNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let malformed = |e: csv::Error| DashboardError::MalformedInput(format!("{}: {e}", path.display()));

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers().map_err(malformed)?.clone();
    for required in ["city", "date_time"] {
        if !headers.iter().any(|h| h == required) {
            return Err(DashboardError::MalformedInput(format!(
                "{}: missing required '{required}' column",
                path.display()
            )));
        }
    }
    let metric_columns: Vec<Metric> = headers
        .iter()
        .filter_map(|h| h.parse::<Metric>().ok())
        .collect();

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawObservation>() {
        let raw = result.map_err(malformed)?;
        rows.push(Observation::from(raw));
    }

    let table = ObservationTable::from_rows(rows, metric_columns);
    log::info!(
        "Loaded {} rows for {} cities from {} (metrics: {:?})",
        table.len(),
        table.cities.len(),
        path.display(),
        table.metric_columns
    );
    let nulled = table.null_date_count();
    if nulled > 0 {
        log::warn!("{nulled} rows have an unparseable date_time and will never match a date range");
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Lenient timestamp parsing
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a `date_time` cell. Anything unrecognised becomes `None` instead of
/// an error; such rows are dropped later by every date-range filter.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::model::tests::ts;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_rows_and_metric_columns() {
        let file = write_csv(
            "city,date_time,temperature,humidity\n\
             Paris,2024-01-01,10.5,80\n\
             Vienna,2024-01-01 12:00:00,,75\n",
        );
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.metric_columns, vec![Metric::Temperature, Metric::Humidity]);
        assert_eq!(table.rows[0].temperature, Some(10.5));
        assert_eq!(table.rows[1].temperature, None);
        assert_eq!(table.rows[1].humidity, Some(75.0));
        assert_eq!(
            table.rows[1].date_time,
            ts(2024, 1, 1).date().and_hms_opt(12, 0, 0)
        );
        assert_eq!(table.rows[0].pressure, None);
    }

    #[test]
    fn unparseable_date_becomes_null() {
        let file = write_csv("city,date_time,temperature\nParis,not-a-date,3\n");
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.rows[0].date_time, None);
        assert_eq!(table.rows[0].temperature, Some(3.0));
    }

    #[test]
    fn extra_columns_and_padded_headers_are_accepted() {
        let file = write_csv(" city , date_time ,station,visibility\nRome,2024-02-03,LIRF,10\n");
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.rows[0].city, "Rome");
        assert_eq!(table.rows[0].visibility, Some(10.0));
        assert_eq!(table.metric_columns, vec![Metric::Visibility]);
    }

    #[test]
    fn nan_cells_are_null() {
        let file = write_csv("city,date_time,snowfall\nPrague,2024-01-01,NaN\n");
        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.rows[0].snowfall, None);
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::SourceNotFound { .. }));
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let file = write_csv("town,date_time\nParis,2024-01-01\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedInput(ref msg) if msg.contains("'city'")));

        let file = write_csv("city,temperature\nParis,1\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedInput(ref msg) if msg.contains("'date_time'")));
    }

    #[test]
    fn inconsistent_column_count_is_malformed() {
        let file = write_csv("city,date_time,temperature\nParis,2024-01-01,1,2,3\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedInput(_)));
    }

    #[test]
    fn missing_value_markers_are_null() {
        for marker in ["NA", "N/A", "n/a", "null", "NULL", "None", "#N/A", "<NA>", "nan", " NaN "] {
            let file = write_csv(&format!("city,date_time,humidity\nOslo,2024-01-01,{marker}\n"));
            let table = load_csv(file.path())
                .unwrap_or_else(|e| panic!("marker {marker:?} should load: {e}"));
            assert_eq!(table.rows[0].humidity, None, "marker {marker:?}");
        }
    }

    #[test]
    fn means_skip_missing_value_markers() {
        let file = write_csv(
            "city,date_time,temperature\n\
             Paris,2024-01-01,10\n\
             Paris,2024-01-02,NA\n\
             Paris,2024-01-03,null\n\
             Paris,2024-01-04,14\n",
        );
        let table = load_csv(file.path()).unwrap();
        let all = crate::data::filter::FilteredTable::all(&table);
        let summary = crate::data::summary::summarize(&all, &[Metric::Temperature]);
        assert_eq!(summary.mean("Paris", Metric::Temperature), Some(12.0));
    }

    #[test]
    fn non_numeric_metric_is_malformed() {
        let file = write_csv("city,date_time,pressure\nLisbon,2024-01-01,high\n");
        let err = load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedInput(_)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("observations.parquet")).unwrap_err();
        assert!(matches!(err, DashboardError::MalformedInput(ref msg) if msg.contains(".parquet")));
    }

    #[test]
    fn timestamp_formats() {
        let noon = ts(2024, 5, 6).date().and_hms_opt(12, 30, 0);
        assert_eq!(parse_timestamp("2024-05-06"), Some(ts(2024, 5, 6)));
        assert_eq!(parse_timestamp("2024/05/06"), Some(ts(2024, 5, 6)));
        assert_eq!(parse_timestamp("2024-05-06 12:30:00"), noon);
        assert_eq!(parse_timestamp("2024-05-06T12:30"), noon);
        assert_eq!(parse_timestamp("2024-05-06T12:30:00+02:00"), noon);
        assert_eq!(parse_timestamp("  "), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
        assert_eq!(parse_timestamp("not-a-date"), None);
    }
}
