// Fetch cycle - query, pivot, classify
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::observation_source::ObservationSource;
use crate::application::pivot;
use crate::application::state::CycleOutcome;

/// Historical range queried on every cycle.
pub const LOOKBACK_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Clone)]
pub struct MonitorService {
    source: Arc<dyn ObservationSource>,
    lookback: Duration,
}

impl MonitorService {
    pub fn new(source: Arc<dyn ObservationSource>) -> Self {
        Self {
            source,
            lookback: LOOKBACK_WINDOW,
        }
    }

    /// Runs one full query-and-pivot pass. Every failure resolves to a
    /// descriptor inside this method; nothing escapes the cycle boundary.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let observations = match self.source.observations(self.lookback).await {
            Ok(stream) => stream,
            Err(err) => {
                warn!("fetch cycle failed: {}", err);
                return CycleOutcome::Failed(err.into());
            }
        };

        let records = pivot::pivot_records(observations).await;
        debug!("fetch cycle pivoted {} records", records.len());

        if records.is_empty() {
            let days = self.lookback.as_secs() / 86_400;
            return CycleOutcome::Empty {
                message: format!(
                    "connection OK, but no records with the expected fields were found in the last {days} days"
                ),
            };
        }
        CycleOutcome::Records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use futures::{StreamExt, stream};

    use crate::application::observation_source::{FetchError, ObservationStream};
    use crate::domain::dashboard::ErrorKind;
    use crate::domain::observation::RawObservation;

    struct FixedSource {
        result: fn() -> Result<Vec<RawObservation>, FetchError>,
    }

    #[async_trait]
    impl ObservationSource for FixedSource {
        async fn observations(
            &self,
            _lookback: Duration,
        ) -> Result<ObservationStream, FetchError> {
            (self.result)().map(|observations| stream::iter(observations).boxed())
        }
    }

    fn service(result: fn() -> Result<Vec<RawObservation>, FetchError>) -> MonitorService {
        MonitorService::new(Arc::new(FixedSource { result }))
    }

    #[tokio::test]
    async fn test_source_error_becomes_failed_outcome() {
        let service = service(|| {
            Err(FetchError::Configuration {
                missing: "token".to_string(),
            })
        });

        match service.run_cycle().await {
            CycleOutcome::Failed(descriptor) => {
                assert_eq!(descriptor.kind, ErrorKind::Configuration);
                assert!(descriptor.message.contains("token"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_stream_is_empty_result_not_an_error() {
        let service = service(|| Ok(Vec::new()));

        match service.run_cycle().await {
            CycleOutcome::Empty { message } => {
                assert!(message.contains("7 days"));
            }
            other => panic!("expected Empty, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_observations_become_pivoted_records() {
        let service = service(|| {
            Ok(vec![RawObservation {
                timestamp: Utc.timestamp_opt(100, 0).unwrap(),
                metric: "ph".to_string(),
                value: Some(7.3),
            }])
        });

        match service.run_cycle().await {
            CycleOutcome::Records(records) => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].ph, Some(7.3));
            }
            other => panic!("expected Records, got {other:?}"),
        }
    }
}
