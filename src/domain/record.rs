// Pivoted metric record domain model
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::observation::Metric;

/// Dense per-timestamp record produced by one fetch cycle. A field stays
/// `None` until an observation for that (timestamp, metric) pair is seen;
/// missing data is never interpolated here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub timestamp: DateTime<Utc>,
    pub display_time: String,
    pub ph: Option<f64>,
    pub turbidity: Option<f64>,
    pub conductivity: Option<f64>,
}

impl MetricRecord {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Ph => self.ph,
            Metric::Turbidity => self.turbidity,
            Metric::Conductivity => self.conductivity,
        }
    }
}

/// Full date and time shown in the table's Time column.
pub fn display_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Day-qualified chart label. Time-of-day alone repeats across the 7-day
/// window, so the day stays in.
pub fn chart_label(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d %b %H:%M").to_string()
}
