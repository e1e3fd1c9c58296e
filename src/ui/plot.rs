use chrono::{DateTime, NaiveDateTime};
use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, Points};

use weather_dashboard::data::series::MetricChart;
use weather_dashboard::settings::CHART_HEIGHT;

use crate::color::CityColors;

// ---------------------------------------------------------------------------
// Per-metric line charts (central panel)
// ---------------------------------------------------------------------------

/// One line chart per selected metric, one line per city.
pub fn metric_charts(ui: &mut Ui, charts: &[MetricChart], colors: &CityColors) {
    for chart in charts {
        ui.strong(chart.title.as_str());

        Plot::new(("metric_chart", chart.metric.name()))
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .x_axis_label("date_time")
            .y_axis_label(chart.metric.name())
            .x_axis_formatter(|mark, _range| format_date(mark.value))
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .allow_zoom(true)
            .show(ui, |plot_ui| {
                for series in &chart.series {
                    let color = colors.color_for(&series.city);

                    // one line per run of non-null values; same name keeps one legend entry
                    for segment in &series.segments {
                        plot_ui.line(
                            Line::new(to_plot_points(segment))
                                .name(&series.city)
                                .color(color)
                                .width(1.5),
                        );
                    }
                    // markers
                    let points: Vec<[f64; 2]> =
                        series.points().map(|&(t, v)| [to_plot_x(t), v]).collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(&series.city)
                            .color(color)
                            .radius(2.5),
                    );
                }
            });

        ui.add_space(12.0);
    }
}

fn to_plot_points(segment: &[(NaiveDateTime, f64)]) -> Vec<[f64; 2]> {
    segment.iter().map(|&(t, v)| [to_plot_x(t), v]).collect()
}

/// Plot x coordinate: seconds since the Unix epoch.
fn to_plot_x(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp() as f64
}

fn format_date(x: f64) -> String {
    DateTime::from_timestamp(x as i64, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn axis_labels_round_trip_dates() {
        assert_eq!(format_date(to_plot_x(ts(2024, 1, 15))), "2024-01-15");
        assert_eq!(to_plot_x(ts(1970, 1, 2)), 86_400.0);
    }

    #[test]
    fn segment_points_keep_their_order() {
        let segment = [(ts(1970, 1, 2), 4.0), (ts(1970, 1, 1), 3.5)];
        assert_eq!(to_plot_points(&segment), vec![[86_400.0, 4.0], [0.0, 3.5]]);
    }
}
