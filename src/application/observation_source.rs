// Source trait for raw sensor observations
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::domain::dashboard::{ErrorDescriptor, ErrorKind};
use crate::domain::observation::RawObservation;

/// Finite, single-use observation stream for one fetch cycle. Each cycle
/// issues a fresh query; streams are never reused.
pub type ObservationStream = BoxStream<'static, RawObservation>;

/// Failures raised before or during a range query. An empty result is not
/// an error here; it is classified after pivoting.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("missing connection settings: {missing}")]
    Configuration { missing: String },

    #[error("{message}")]
    Query { message: String },
}

impl From<FetchError> for ErrorDescriptor {
    fn from(err: FetchError) -> Self {
        let kind = match err {
            FetchError::Configuration { .. } => ErrorKind::Configuration,
            FetchError::Query { .. } => ErrorKind::Query,
        };
        ErrorDescriptor::new(kind, err.to_string())
    }
}

#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Issue one bounded range query over the lookback window.
    async fn observations(&self, lookback: Duration) -> Result<ObservationStream, FetchError>;
}
