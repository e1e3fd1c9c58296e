use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::filter::FilteredTable;
use super::model::Metric;

/// Line-chart data for one city and one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySeries {
    pub city: String,
    /// Runs of consecutive `(date_time, value)` points in filtered-row order.
    /// A null value ends the current run, so lines are not drawn across gaps.
    pub segments: Vec<Vec<(NaiveDateTime, f64)>>,
}

impl CitySeries {
    pub fn points(&self) -> impl Iterator<Item = &(NaiveDateTime, f64)> + '_ {
        self.segments.iter().flatten()
    }
}

/// All city series for one metric, plus the chart title.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricChart {
    pub metric: Metric,
    pub title: String,
    pub series: Vec<CitySeries>,
}

/// Split `filtered` into per-city series for `metric`, cities sorted by name.
/// A city whose values are all null gets no series.
pub fn metric_series(filtered: &FilteredTable<'_>, metric: Metric) -> Vec<CitySeries> {
    let mut by_city: BTreeMap<&str, Vec<Vec<(NaiveDateTime, f64)>>> = BTreeMap::new();
    for obs in filtered.rows() {
        let segments = by_city.entry(obs.city.as_str()).or_default();
        match (obs.date_time, metric.value(obs)) {
            (Some(t), Some(v)) => match segments.last_mut() {
                Some(open) => open.push((t, v)),
                None => segments.push(vec![(t, v)]),
            },
            // gap: start a new run at the next value
            _ => {
                if segments.last().is_some_and(|s| !s.is_empty()) {
                    segments.push(Vec::new());
                }
            }
        }
    }
    by_city
        .into_iter()
        .filter_map(|(city, mut segments)| {
            segments.retain(|s| !s.is_empty());
            (!segments.is_empty()).then(|| CitySeries {
                city: city.to_string(),
                segments,
            })
        })
        .collect()
}

/// Chart for `metric`, titled e.g. "Wind Speed Over Time".
pub fn metric_chart(filtered: &FilteredTable<'_>, metric: Metric) -> MetricChart {
    MetricChart {
        metric,
        title: format!("{} Over Time", metric.title()),
        series: metric_series(filtered, metric),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::filter::filter;
    use crate::data::model::tests::{obs, three_row_table, ts};
    use crate::data::model::ObservationTable;

    #[test]
    fn series_are_grouped_by_city_and_skip_nulls() {
        let table = three_row_table();
        let f = filter(&table, &table.cities, ts(2024, 1, 1), ts(2024, 1, 2));
        let series = metric_series(&f, Metric::Temperature);

        assert_eq!(
            series,
            vec![
                CitySeries { city: "Paris".into(), segments: vec![vec![(ts(2024, 1, 1), 10.0)]] },
                CitySeries { city: "Vienna".into(), segments: vec![vec![(ts(2024, 1, 1), 20.0)]] },
            ]
        );
    }

    #[test]
    fn null_values_break_the_line() {
        let rows = vec![
            obs("Oslo", Some(ts(2024, 1, 1)), Some(1.0)),
            obs("Oslo", Some(ts(2024, 1, 2)), Some(2.0)),
            obs("Oslo", Some(ts(2024, 1, 3)), None),
            obs("Oslo", Some(ts(2024, 1, 4)), None),
            obs("Oslo", Some(ts(2024, 1, 5)), Some(5.0)),
            obs("Oslo", Some(ts(2024, 1, 6)), None),
        ];
        let table = ObservationTable::from_rows(rows, vec![Metric::Temperature]);
        let f = filter(&table, &table.cities, ts(2024, 1, 1), ts(2024, 1, 6));
        let series = metric_series(&f, Metric::Temperature);

        assert_eq!(series.len(), 1);
        assert_eq!(
            series[0].segments,
            vec![
                vec![(ts(2024, 1, 1), 1.0), (ts(2024, 1, 2), 2.0)],
                vec![(ts(2024, 1, 5), 5.0)],
            ]
        );
        assert_eq!(series[0].points().count(), 3);
    }

    #[test]
    fn chart_title_uses_metric_label() {
        let table = three_row_table();
        let f = filter(&table, &table.cities, ts(2024, 1, 1), ts(2024, 1, 2));
        let chart = metric_chart(&f, Metric::WindSpeed);
        assert_eq!(chart.title, "Wind Speed Over Time");
        assert!(chart.series.is_empty());
    }
}
