// Chart and table projections of the current record set
use serde::Serialize;

use crate::domain::observation::Metric;
use crate::domain::record::{self, MetricRecord};

pub const CHART_TITLE: &str = "Water Quality (Last 7 Days)";

/// Marker rendered for a metric with no observation at a timestamp.
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Serialize)]
pub struct ChartView {
    pub title: &'static str,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
    pub legend_position: &'static str,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Serialize)]
pub struct ChartSeries {
    pub label: &'static str,
    /// Nulls are gaps the renderer is expected to bridge, not breaks.
    pub data: Vec<Option<f64>>,
    pub span_gaps: bool,
}

/// One labeled series per recognized metric, in record order, with gaps
/// preserved as nulls.
pub fn chart_view(records: &[MetricRecord]) -> ChartView {
    let labels = records
        .iter()
        .map(|r| record::chart_label(&r.timestamp))
        .collect();

    let series = Metric::ALL
        .iter()
        .map(|metric| ChartSeries {
            label: metric.label(),
            data: records.iter().map(|r| r.value(*metric)).collect(),
            span_gaps: true,
        })
        .collect();

    ChartView {
        title: CHART_TITLE,
        x_axis: "Time",
        y_axis: "Value",
        legend_position: "top",
        labels,
        series,
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TableRow {
    pub time: String,
    pub ph: String,
    pub turbidity: String,
    pub conductivity: String,
}

/// One row per record; numeric cells carry two decimals or the
/// not-available marker.
pub fn table_rows(records: &[MetricRecord]) -> Vec<TableRow> {
    records
        .iter()
        .map(|r| TableRow {
            time: r.display_time.clone(),
            ph: format_cell(r.ph),
            turbidity: format_cell(r.turbidity),
            conductivity: format_cell(r.conductivity),
        })
        .collect()
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(day: u32, hour: u32, ph: Option<f64>, turbidity: Option<f64>) -> MetricRecord {
        let timestamp = Utc.with_ymd_and_hms(2026, 3, day, hour, 30, 0).unwrap();
        MetricRecord {
            timestamp,
            display_time: record::display_time(&timestamp),
            ph,
            turbidity,
            conductivity: None,
        }
    }

    #[test]
    fn test_chart_has_one_series_per_recognized_metric() {
        let view = chart_view(&[record(10, 9, Some(7.0), Some(2.0))]);

        let labels: Vec<_> = view.series.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["pH", "Turbidity (NTU)", "Conductivity (µS/cm)"]);
        assert_eq!(view.legend_position, "top");
        assert_eq!(view.x_axis, "Time");
        assert_eq!(view.y_axis, "Value");
    }

    #[test]
    fn test_chart_preserves_gaps_as_nulls() {
        let view = chart_view(&[
            record(10, 9, Some(7.0), None),
            record(10, 10, None, Some(2.0)),
        ]);

        assert_eq!(view.series[0].data, vec![Some(7.0), None]);
        assert_eq!(view.series[1].data, vec![None, Some(2.0)]);
        assert!(view.series.iter().all(|s| s.span_gaps));
    }

    #[test]
    fn test_chart_labels_stay_distinct_across_days() {
        // Same time of day on different days of the window.
        let view = chart_view(&[
            record(10, 9, Some(7.0), None),
            record(11, 9, Some(7.1), None),
        ]);

        assert_eq!(view.labels.len(), 2);
        assert_ne!(view.labels[0], view.labels[1]);
    }

    #[test]
    fn test_table_formats_two_decimals_and_marks_missing() {
        let rows = table_rows(&[record(10, 9, Some(7.0), None)]);

        assert_eq!(rows[0].ph, "7.00");
        assert_eq!(rows[0].turbidity, "N/A");
        assert_eq!(rows[0].conductivity, "N/A");
        assert_eq!(rows[0].time, "2026-03-10 09:30:00");
    }
}
