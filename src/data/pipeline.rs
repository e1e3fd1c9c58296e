use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::filter::filter;
use super::model::{Metric, Observation, ObservationTable};
use super::series::{metric_chart, MetricChart};
use super::summary::{summarize, SummaryTable};
use crate::error::Result;
use crate::settings::PREVIEW_ROWS;

// ---------------------------------------------------------------------------
// Selection criteria
// ---------------------------------------------------------------------------

/// Everything the user picked for one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCriteria {
    pub cities: BTreeSet<String>,
    pub metrics: Vec<Metric>,
    /// Inclusive lower bound.
    pub date_lo: NaiveDateTime,
    /// Inclusive upper bound.
    pub date_hi: NaiveDateTime,
}

impl SelectionCriteria {
    /// Build criteria from raw metric names, rejecting unknown names.
    pub fn from_names<S: AsRef<str>>(
        cities: impl IntoIterator<Item = String>,
        metric_names: &[S],
        date_lo: NaiveDateTime,
        date_hi: NaiveDateTime,
    ) -> Result<Self> {
        let metrics = metric_names
            .iter()
            .map(|n| n.as_ref().parse::<Metric>())
            .collect::<Result<Vec<_>>>()?;
        Ok(SelectionCriteria {
            cities: cities.into_iter().collect(),
            metrics,
            date_lo,
            date_hi,
        })
    }
}

/// Inclusive timestamp range covering whole days `lo..=hi`.
pub fn day_range(lo: NaiveDate, hi: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = lo.and_time(NaiveTime::MIN);
    let end = hi
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .unwrap_or(NaiveDateTime::MAX);
    (start, end)
}

// ---------------------------------------------------------------------------
// Outcome of one recomputation
// ---------------------------------------------------------------------------

/// Why a recomputation produced no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The file has a header but no data rows.
    NoRows,
    /// The file has no parseable `date_time` at all.
    NoParseableDates,
    NoCitiesSelected,
    InvertedRange,
    NoMatchingRows,
}

impl EmptyReason {
    fn diagnose(table: &ObservationTable, criteria: &SelectionCriteria) -> Self {
        if table.is_empty() {
            EmptyReason::NoRows
        } else if table.date_bounds().is_none() {
            EmptyReason::NoParseableDates
        } else if criteria.cities.is_empty() {
            EmptyReason::NoCitiesSelected
        } else if criteria.date_lo > criteria.date_hi {
            EmptyReason::InvertedRange
        } else {
            EmptyReason::NoMatchingRows
        }
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EmptyReason::NoRows => "the file has no data rows",
            EmptyReason::NoParseableDates => "the file has no parseable date_time values",
            EmptyReason::NoCitiesSelected => "no city is selected",
            EmptyReason::InvertedRange => "the start date is after the end date",
            EmptyReason::NoMatchingRows => "no rows fall in the selected cities and dates",
        };
        f.write_str(msg)
    }
}

/// Everything the shell renders for a non-empty selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Number of rows that passed the filter.
    pub matched_rows: usize,
    /// First rows of the filtered table.
    pub preview: Vec<Observation>,
    /// Metric columns present in the source file, for the preview header.
    pub preview_columns: Vec<Metric>,
    /// One chart per selected metric, in selection order.
    pub charts: Vec<MetricChart>,
    pub summary: SummaryTable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Empty(EmptyReason),
    Ready(DashboardView),
}

/// Filter, chart and summarize `table` for `criteria`. Recomputes everything.
pub fn run(table: &ObservationTable, criteria: &SelectionCriteria) -> PipelineOutcome {
    let filtered = filter(table, &criteria.cities, criteria.date_lo, criteria.date_hi);
    log::debug!(
        "Filtered {} of {} rows ({} cities, {} .. {})",
        filtered.len(),
        table.len(),
        criteria.cities.len(),
        criteria.date_lo,
        criteria.date_hi
    );

    if filtered.is_empty() {
        return PipelineOutcome::Empty(EmptyReason::diagnose(table, criteria));
    }

    PipelineOutcome::Ready(DashboardView {
        matched_rows: filtered.len(),
        preview: filtered.head(PREVIEW_ROWS).cloned().collect(),
        preview_columns: table.metric_columns.clone(),
        charts: criteria
            .metrics
            .iter()
            .map(|&m| metric_chart(&filtered, m))
            .collect(),
        summary: summarize(&filtered, &criteria.metrics),
    })
}
