// Dashboard state controller - single writer, whole-state snapshots
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::dashboard::{DashboardState, ErrorDescriptor, ErrorKind};
use crate::domain::record::MetricRecord;

/// Result of one completed fetch cycle, ready for a state transition.
#[derive(Debug)]
pub enum CycleOutcome {
    Records(Vec<MetricRecord>),
    Empty { message: String },
    Failed(ErrorDescriptor),
}

struct ControllerInner {
    state: DashboardState,
    last_applied: u64,
    closed: bool,
}

/// Single mutable holder of `DashboardState`. Fetch cycles write, the
/// HTTP handlers read; a reader always sees a whole state, never a
/// half-applied one.
#[derive(Clone)]
pub struct StateController {
    inner: Arc<RwLock<ControllerInner>>,
}

impl StateController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ControllerInner {
                state: DashboardState::initial(),
                last_applied: 0,
                closed: false,
            })),
        }
    }

    /// Marks a refresh in progress. Records from the previous cycle stay
    /// visible while the new one runs.
    pub async fn begin_cycle(&self) {
        let mut inner = self.inner.write().await;
        if inner.closed {
            return;
        }
        inner.state.loading = true;
    }

    /// Applies a completed cycle. Returns false when the result is stale
    /// (an older generation than one already applied) or the controller
    /// is closed; a discarded result leaves the state untouched.
    pub async fn apply(&self, generation: u64, outcome: CycleOutcome) -> bool {
        let mut inner = self.inner.write().await;
        if inner.closed || generation <= inner.last_applied {
            return false;
        }
        inner.last_applied = generation;
        let next = match outcome {
            CycleOutcome::Records(records) => DashboardState {
                records,
                loading: false,
                error: None,
            },
            CycleOutcome::Empty { message } => DashboardState {
                records: Vec::new(),
                loading: false,
                error: Some(ErrorDescriptor::new(ErrorKind::EmptyResult, message)),
            },
            // The last good record set stays visible next to the error.
            CycleOutcome::Failed(error) => DashboardState {
                records: std::mem::take(&mut inner.state.records),
                loading: false,
                error: Some(error),
            },
        };
        inner.state = next;
        true
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.inner.read().await.state.clone()
    }

    /// After close, every later begin or apply is a no-op.
    pub async fn close(&self) {
        self.inner.write().await.closed = true;
    }
}

impl Default for StateController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::domain::record;

    fn records(ph: f64) -> Vec<MetricRecord> {
        let timestamp = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        vec![MetricRecord {
            timestamp,
            display_time: record::display_time(&timestamp),
            ph: Some(ph),
            turbidity: None,
            conductivity: None,
        }]
    }

    fn query_error() -> ErrorDescriptor {
        ErrorDescriptor::new(ErrorKind::Query, "unauthorized")
    }

    #[tokio::test]
    async fn test_success_replaces_records_and_clears_error() {
        let controller = StateController::new();
        assert!(controller.apply(1, CycleOutcome::Failed(query_error())).await);
        assert!(controller.apply(2, CycleOutcome::Records(records(7.0))).await);

        let state = controller.snapshot().await;
        assert_eq!(state.records[0].ph, Some(7.0));
        assert_eq!(state.error, None);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_failure_keeps_last_good_records() {
        let controller = StateController::new();
        controller.apply(1, CycleOutcome::Records(records(7.0))).await;
        controller.begin_cycle().await;
        controller.apply(2, CycleOutcome::Failed(query_error())).await;

        let state = controller.snapshot().await;
        assert_eq!(state.records[0].ph, Some(7.0));
        assert_eq!(state.error.map(|e| e.kind), Some(ErrorKind::Query));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_empty_result_clears_records_with_distinct_kind() {
        let controller = StateController::new();
        controller.apply(1, CycleOutcome::Records(records(7.0))).await;
        controller
            .apply(2, CycleOutcome::Empty { message: "no records".to_string() })
            .await;

        let state = controller.snapshot().await;
        assert!(state.records.is_empty());
        assert_eq!(state.error.map(|e| e.kind), Some(ErrorKind::EmptyResult));
    }

    #[tokio::test]
    async fn test_stale_generation_is_rejected() {
        let controller = StateController::new();
        assert!(controller.apply(2, CycleOutcome::Records(records(2.0))).await);
        assert!(!controller.apply(1, CycleOutcome::Records(records(1.0))).await);

        let state = controller.snapshot().await;
        assert_eq!(state.records[0].ph, Some(2.0));
    }

    #[tokio::test]
    async fn test_begin_cycle_keeps_records_visible() {
        let controller = StateController::new();
        controller.apply(1, CycleOutcome::Records(records(7.0))).await;
        controller.begin_cycle().await;

        let state = controller.snapshot().await;
        assert!(state.loading);
        assert_eq!(state.records[0].ph, Some(7.0));
    }

    #[tokio::test]
    async fn test_closed_controller_ignores_everything() {
        let controller = StateController::new();
        controller.close().await;
        controller.begin_cycle().await;
        assert!(!controller.apply(1, CycleOutcome::Records(records(7.0))).await);

        assert_eq!(controller.snapshot().await, DashboardState::initial());
    }
}
