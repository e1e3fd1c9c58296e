use std::collections::BTreeMap;

use super::filter::FilteredTable;
use super::model::Metric;
use crate::error::Result;

// ---------------------------------------------------------------------------
// SummaryTable – per-city means of the selected metrics
// ---------------------------------------------------------------------------

/// One city's row in the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub city: String,
    /// One entry per metric of the owning [`SummaryTable`], same order.
    /// `None` when the city has no non-null value for that metric.
    pub means: Vec<Option<f64>>,
}

/// Per-city means, cities sorted by name. Values keep full precision; use
/// [`format_mean`] for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    pub metrics: Vec<Metric>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Mean of `metric` for `city`, if both are present and the mean is defined.
    pub fn mean(&self, city: &str, metric: Metric) -> Option<f64> {
        let col = self.metrics.iter().position(|&m| m == metric)?;
        self.rows
            .iter()
            .find(|r| r.city == city)
            .and_then(|r| r.means[col])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows rendered as display strings (city followed by one cell per metric).
    pub fn display(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                std::iter::once(r.city.clone())
                    .chain(r.means.iter().map(|m| format_mean(*m)))
                    .collect()
            })
            .collect()
    }
}

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Display form of a mean: two decimals, or `n/a` when undefined.
pub fn format_mean(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{:.2}", round2(v)),
        None => "n/a".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn mean(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Group `filtered` by city and average each metric over non-null values.
///
/// An empty view yields an empty table. Cities with no rows in the view are
/// absent from the result.
pub fn summarize(filtered: &FilteredTable<'_>, metrics: &[Metric]) -> SummaryTable {
    let mut groups: BTreeMap<&str, Vec<Accumulator>> = BTreeMap::new();

    for obs in filtered.rows() {
        let accs = groups
            .entry(obs.city.as_str())
            .or_insert_with(|| vec![Accumulator::default(); metrics.len()]);
        for (acc, metric) in accs.iter_mut().zip(metrics) {
            if let Some(v) = metric.value(obs) {
                acc.sum += v;
                acc.count += 1;
            }
        }
    }

    let rows = groups
        .into_iter()
        .map(|(city, accs)| SummaryRow {
            city: city.to_string(),
            means: accs.into_iter().map(Accumulator::mean).collect(),
        })
        .collect();

    SummaryTable {
        metrics: metrics.to_vec(),
        rows,
    }
}

/// Like [`summarize`], but takes metric names and rejects unknown ones with
/// [`DashboardError::UnknownMetric`](crate::error::DashboardError::UnknownMetric)
/// before touching any rows.
pub fn summarize_by_name<S: AsRef<str>>(
    filtered: &FilteredTable<'_>,
    metric_names: &[S],
) -> Result<SummaryTable> {
    let metrics = metric_names
        .iter()
        .map(|n| n.as_ref().parse::<Metric>())
        .collect::<Result<Vec<_>>>()?;
    Ok(summarize(filtered, &metrics))
}
