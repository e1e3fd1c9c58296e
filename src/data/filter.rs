use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use super::model::{Observation, ObservationTable};

// ---------------------------------------------------------------------------
// FilteredTable – an index view over an ObservationTable
// ---------------------------------------------------------------------------

/// The rows of an [`ObservationTable`] that passed a city/date filter.
///
/// Holds row indices into the source table, in ascending (file) order, so
/// building it never copies observations.
#[derive(Debug, Clone)]
pub struct FilteredTable<'a> {
    table: &'a ObservationTable,
    indices: Vec<usize>,
}

impl PartialEq for FilteredTable<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table) && self.indices == other.indices
    }
}

impl<'a> FilteredTable<'a> {
    /// A view containing every row of `table`.
    pub fn all(table: &'a ObservationTable) -> Self {
        FilteredTable {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    /// Narrow this view further with the same predicate as [`filter`].
    pub fn filter(
        &self,
        cities: &BTreeSet<String>,
        date_lo: NaiveDateTime,
        date_hi: NaiveDateTime,
    ) -> FilteredTable<'a> {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| row_matches(&self.table.rows[i], cities, date_lo, date_hi))
            .collect();
        FilteredTable {
            table: self.table,
            indices,
        }
    }

    /// Indices into the source table of the rows in this view.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The table this view was taken from.
    pub fn source(&self) -> &'a ObservationTable {
        self.table
    }

    /// Rows in source order.
    pub fn rows(&self) -> impl Iterator<Item = &'a Observation> + '_ {
        let table = self.table;
        self.indices.iter().map(move |&i| &table.rows[i])
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> impl Iterator<Item = &'a Observation> + '_ {
        self.rows().take(n)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// Keep the rows whose city is selected and whose timestamp lies in
/// `[date_lo, date_hi]`.
///
/// * An empty `cities` set selects nothing.
/// * `date_lo > date_hi` is a valid but unsatisfiable range.
/// * Rows without a parseable timestamp never match.
pub fn filter<'a>(
    table: &'a ObservationTable,
    cities: &BTreeSet<String>,
    date_lo: NaiveDateTime,
    date_hi: NaiveDateTime,
) -> FilteredTable<'a> {
    FilteredTable::all(table).filter(cities, date_lo, date_hi)
}

fn row_matches(
    obs: &Observation,
    cities: &BTreeSet<String>,
    date_lo: NaiveDateTime,
    date_hi: NaiveDateTime,
) -> bool {
    if !cities.contains(&obs.city) {
        return false;
    }
    match obs.date_time {
        Some(t) => date_lo <= t && t <= date_hi,
        None => false,
    }
}
