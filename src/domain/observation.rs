// Raw sensor observation domain model
use chrono::{DateTime, Utc};

/// One sparse row as delivered by the time-series store. Consumed by the
/// pivot step immediately, never retained across cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub timestamp: DateTime<Utc>,
    pub metric: String,
    pub value: Option<f64>,
}

/// Sensor fields the dashboard recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Ph,
    Turbidity,
    Conductivity,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Ph, Metric::Turbidity, Metric::Conductivity];

    /// Maps a store-side field name onto a recognized metric. Unknown
    /// names stay invisible to the pipeline until added here.
    pub fn from_field(name: &str) -> Option<Self> {
        match name {
            "ph" => Some(Metric::Ph),
            "turbidity" => Some(Metric::Turbidity),
            "conductivity" => Some(Metric::Conductivity),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Ph => "pH",
            Metric::Turbidity => "Turbidity (NTU)",
            Metric::Conductivity => "Conductivity (µS/cm)",
        }
    }
}
