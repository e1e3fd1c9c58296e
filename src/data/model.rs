use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Metric – the closed set of numeric weather measurements
// ---------------------------------------------------------------------------

/// One of the seven recognised numeric columns.
///
/// Column names coming from the outside world are turned into a `Metric`
/// through [`FromStr`]; after that point every lookup is a typed accessor
/// ([`Metric::value`]) rather than a string-keyed column search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    Precipitation,
    Snowfall,
    Visibility,
}

impl Metric {
    /// All metrics in canonical column order.
    pub const ALL: [Metric; 7] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::Pressure,
        Metric::WindSpeed,
        Metric::Precipitation,
        Metric::Snowfall,
        Metric::Visibility,
    ];

    /// Column name as it appears in the CSV header.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::Pressure => "pressure",
            Metric::WindSpeed => "wind_speed",
            Metric::Precipitation => "precipitation",
            Metric::Snowfall => "snowfall",
            Metric::Visibility => "visibility",
        }
    }

    /// Human readable label, e.g. `wind_speed` → `Wind Speed`.
    pub fn title(self) -> String {
        self.name()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Read this metric from an observation.
    pub fn value(self, obs: &Observation) -> Option<f64> {
        match self {
            Metric::Temperature => obs.temperature,
            Metric::Humidity => obs.humidity,
            Metric::Pressure => obs.pressure,
            Metric::WindSpeed => obs.wind_speed,
            Metric::Precipitation => obs.precipitation,
            Metric::Snowfall => obs.snowfall,
            Metric::Visibility => obs.visibility,
        }
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| DashboardError::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single daily observation for one city.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub city: String,
    /// `None` when the source value could not be parsed as a timestamp.
    pub date_time: Option<NaiveDateTime>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub precipitation: Option<f64>,
    pub snowfall: Option<f64>,
    pub visibility: Option<f64>,
}

// ---------------------------------------------------------------------------
// ObservationTable – the complete loaded file
// ---------------------------------------------------------------------------

/// The full parsed file. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ObservationTable {
    /// All rows, in file order. Duplicates are kept.
    pub rows: Vec<Observation>,
    /// Metric columns that were present in the header, in [`Metric::ALL`] order.
    pub metric_columns: Vec<Metric>,
    /// Sorted distinct city names (blank cells excluded).
    pub cities: BTreeSet<String>,
}

impl ObservationTable {
    /// Build the city index from the loaded rows.
    pub fn from_rows(rows: Vec<Observation>, mut metric_columns: Vec<Metric>) -> Self {
        metric_columns.sort();
        metric_columns.dedup();
        let cities = rows
            .iter()
            .filter(|r| !r.city.is_empty())
            .map(|r| r.city.clone())
            .collect();
        ObservationTable {
            rows,
            metric_columns,
            cities,
        }
    }

    /// Earliest and latest parseable timestamp, if any row has one.
    pub fn date_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut stamps = self.rows.iter().filter_map(|r| r.date_time);
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Number of rows whose timestamp could not be parsed.
    pub fn null_date_count(&self) -> usize {
        self.rows.iter().filter(|r| r.date_time.is_none()).count()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
