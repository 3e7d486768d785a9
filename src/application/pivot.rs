// Pivot aggregation - sparse observations into dense records
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::StreamExt;

use crate::application::observation_source::ObservationStream;
use crate::domain::observation::{Metric, RawObservation};
use crate::domain::record::{self, MetricRecord};

/// Build-then-freeze accumulator keyed by timestamp. Stays private to
/// this module; callers only ever see the frozen, ordered record set.
#[derive(Default)]
struct PivotBuilder {
    slots: BTreeMap<DateTime<Utc>, Slot>,
}

#[derive(Default)]
struct Slot {
    ph: Option<f64>,
    turbidity: Option<f64>,
    conductivity: Option<f64>,
}

impl PivotBuilder {
    fn observe(&mut self, obs: RawObservation) {
        let slot = self.slots.entry(obs.timestamp).or_default();

        // An absent value still opens the timestamp's slot but never
        // overwrites a field already seen this cycle.
        let Some(value) = obs.value else { return };

        // Last observation wins for duplicate (timestamp, metric) pairs
        // within one cycle.
        match Metric::from_field(&obs.metric) {
            Some(Metric::Ph) => slot.ph = Some(value),
            Some(Metric::Turbidity) => slot.turbidity = Some(value),
            Some(Metric::Conductivity) => slot.conductivity = Some(value),
            None => {}
        }
    }

    fn finish(self) -> Vec<MetricRecord> {
        self.slots
            .into_iter()
            .map(|(timestamp, slot)| MetricRecord {
                timestamp,
                display_time: record::display_time(&timestamp),
                ph: slot.ph,
                turbidity: slot.turbidity,
                conductivity: slot.conductivity,
            })
            .collect()
    }
}

/// Consumes one cycle's observation stream and produces the record set,
/// ascending by timestamp with no duplicate timestamps.
pub async fn pivot_records(mut observations: ObservationStream) -> Vec<MetricRecord> {
    let mut builder = PivotBuilder::default();
    while let Some(obs) = observations.next().await {
        builder.observe(obs);
    }
    builder.finish()
}
