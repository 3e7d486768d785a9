// Dashboard state domain model
use serde::Serialize;

use super::record::MetricRecord;

/// Failure classes a fetch cycle can surface. Each is terminal to the
/// cycle that produced it, never to the service; the next tick retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required connection settings missing; detected before any network
    /// attempt.
    Configuration,
    /// Transport, authentication, or store-side query failure.
    Query,
    /// The query succeeded but pivoting produced zero usable records, so
    /// the store is reachable and the data itself is the problem.
    EmptyResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDescriptor {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorDescriptor {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// What the presentation layer reads: the current record set plus the
/// loading and error flags. Replaced wholesale at the end of each cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    pub records: Vec<MetricRecord>,
    pub loading: bool,
    pub error: Option<ErrorDescriptor>,
}

impl DashboardState {
    pub fn initial() -> Self {
        Self {
            records: Vec::new(),
            loading: true,
            error: None,
        }
    }
}
